// Integration suite for the generators and the lookup tool; drives the library
// entry points and the compiled binaries against throwaway project trees.
mod support;

use anyhow::Result;
use quasar_meta::assets::{COMPONENTS_FILE, FUNCTIONS_FILE, LISTS_FILE, MAPPING_FILE};
use quasar_meta::quasar::{DescriptorSource, SourceLayout, resolve_source_path_with};
use quasar_meta::{AssetCatalog, ItemKind, MetadataError, gather_nicegui, gather_props};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::fs;
use support::{Project, helper_command, run_command};

fn keys_of(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default()
}

fn write_checkout(project: &Project) -> Result<()> {
    let src = project.dir.path().join("quasar/ui/src");
    project.write_json(
        &src,
        "api.extends.json",
        &json!({
            "props": {
                "flat": {"type": "Boolean", "default": false, "desc": "Use flat design"},
                "dense": {"type": "Boolean", "desc": "Dense mode"}
            },
            "events": {
                "click": {"desc": "Emitted when clicked", "params": {"evt": {}}}
            }
        }),
    )?;
    project.write_json(
        &src,
        "components/btn/QBtn.json",
        &json!({
            "meta": {"docsUrl": "https://v2.quasar.dev/vue-components/button"},
            "mixins": ["composables/private.use-size/use-size"],
            "props": {
                "flat": {"type": "Boolean", "extends": "flat"},
                "dense": {"extends": "dense", "desc": "Compact button"},
                "label": {"type": ["String", "Number"]}
            },
            "events": {"click": {"extends": "click"}}
        }),
    )?;
    project.write_json(
        &src,
        "components/card/QCard.json",
        &json!({
            "props": {"flat": {"extends": "flat"}, "bordered": {"type": "Boolean"}},
            "slots": {"default": {"desc": "Card content"}}
        }),
    )?;
    project.write_json(
        &src,
        "composables/private.use-size/use-size.json",
        &json!({
            "props": {
                "size": {"type": "String", "values": ["'xs'", "'sm'", "'md'"]},
                "label": {"type": "String", "desc": "from mixin"}
            },
            "methods": {"resize": {"params": null, "returns": null}}
        }),
    )?;
    Ok(())
}

fn write_exports(project: &Project) -> Result<()> {
    project.write_json(
        &project.root(),
        "tools/nicegui_exports.json",
        &json!([
            {"name": "button", "class_name": "Button", "element": true,
             "doc": "Button\n\nThis element is based on Quasar's QBtn component.",
             "source": "super().__init__(tag='q-btn', text=text)"},
            {"name": "card", "class_name": "Card", "element": true,
             "doc": "Card\n\nThis element is based on Quasar's `QCard <https://quasar.dev>`_ component."},
            {"name": "scroll_area", "class_name": "ScrollArea", "element": true,
             "doc": "Scroll Area\n\nA way of customizing the scrollbars. Wraps the Quasar `ScrollArea` component."},
            {"name": "markdown", "class_name": "Markdown", "element": true, "doc": "Markdown Element"},
            {"name": "run_javascript", "doc": "Run JavaScript"},
            {"name": "_internal", "class_name": "Card", "element": true},
            {"name": "size_picker", "class_name": "SizePicker", "element": true,
             "source": "super().__init__(tag=\"q-use-size\")"}
        ]),
    )?;
    Ok(())
}

// The worked example: an item declaring `extends` picks up the registry's
// attributes without losing its own.
#[test]
fn extends_example_hydrates_button() -> Result<()> {
    let project = Project::new()?;
    let src = project.dir.path().join("descriptors");
    project.write_json(
        &src,
        "QBtn.json",
        &json!({"props": {"flat": {"type": "Boolean", "extends": "flat"}}}),
    )?;
    project.write_json(
        &src,
        "api.extends.json",
        &json!({"props": {"flat": {"type": "Boolean", "default": false}}}),
    )?;

    let summary = gather_props(&DescriptorSource::new(src), &project.assets())?;
    assert_eq!(summary.descriptors, 2);

    let components = project.read_asset(COMPONENTS_FILE)?;
    let flat = &components["qbtn"]["props"]["flat"];
    assert_eq!(flat["type"], json!("Boolean"));
    assert_eq!(flat["default"], json!(false));
    assert_eq!(flat["extends"], json!("flat"));
    Ok(())
}

// Full hydration over a sibling Quasar checkout discovered from the project root.
#[test]
fn gather_props_binary_hydrates_checkout() -> Result<()> {
    let project = Project::new()?;
    write_checkout(&project)?;

    let mut cmd = helper_command("gather-props");
    cmd.arg("--root").arg(project.root()).arg("--quiet");
    run_command(cmd)?;

    let components = project.read_asset(COMPONENTS_FILE)?;
    assert_eq!(
        keys_of(&components),
        vec!["api.extends", "qbtn", "qcard", "use-size"]
    );

    let qbtn = &components["qbtn"];
    assert_eq!(
        qbtn["props"]["flat"],
        json!({"type": "Boolean", "extends": "flat", "default": false, "desc": "Use flat design"})
    );
    assert_eq!(qbtn["props"]["dense"]["desc"], json!("Compact button"));
    assert_eq!(qbtn["props"]["dense"]["type"], json!("Boolean"));
    // Own item wins over the mixin's item of the same name.
    assert_eq!(qbtn["props"]["label"], json!({"type": ["String", "Number"]}));
    assert_eq!(qbtn["props"]["size"]["type"], json!("String"));
    assert!(qbtn["methods"].get("resize").is_some());
    assert_eq!(qbtn["slots"], json!({}));
    assert_eq!(qbtn["events"]["click"]["params"], json!({"evt": {}}));
    assert_eq!(qbtn["meta"]["docsUrl"], json!("https://v2.quasar.dev/vue-components/button"));
    assert_eq!(
        keys_of(&qbtn["props"]),
        vec!["flat", "dense", "label", "size"]
    );

    let lists = project.read_asset(LISTS_FILE)?;
    assert_eq!(
        lists,
        json!({
            "events": ["click"],
            "methods": ["resize"],
            "props": ["bordered", "dense", "flat", "label", "size"],
            "slots": ["default"]
        })
    );
    Ok(())
}

// Every prop of every hydrated component appears in the vocabulary, which is
// sorted and free of duplicates.
#[test]
fn vocabulary_covers_component_table() -> Result<()> {
    let project = Project::new()?;
    write_checkout(&project)?;
    let src = project.dir.path().join("quasar/ui/src");
    gather_props(&DescriptorSource::new(src), &project.assets())?;

    let components = project.read_asset(COMPONENTS_FILE)?;
    let lists = project.read_asset(LISTS_FILE)?;
    for kind in ItemKind::ALL {
        let listed: Vec<String> = serde_json::from_value(lists[kind.as_str()].clone())?;
        let mut expected = BTreeSet::new();
        for descriptor in components.as_object().unwrap().values() {
            expected.extend(keys_of(&descriptor[kind.as_str()]));
        }
        assert_eq!(listed, expected.into_iter().collect::<Vec<_>>(), "{kind}");
    }
    Ok(())
}

#[test]
fn npm_layout_uses_file_stems() -> Result<()> {
    let project = Project::new()?;
    let api = project.root().join("node_modules/quasar/dist/api");
    project.write_json(&api, "QBtn.json", &json!({"props": {"round": {"type": "Boolean"}}}))?;
    project.write_json(&api, "QBtnGroup.json", &json!({"props": {"spread": {"type": "Boolean"}}}))?;

    let source = resolve_source_path_with(&project.root(), None, None)?;
    assert_eq!(source.layout, SourceLayout::Flat);

    let mut cmd = helper_command("gather-props");
    cmd.arg("--root").arg(project.root()).arg("--quiet");
    run_command(cmd)?;

    let components = project.read_asset(COMPONENTS_FILE)?;
    assert_eq!(keys_of(&components), vec!["qbtn", "qbtngroup"]);
    Ok(())
}

#[test]
fn api_dir_env_overrides_fallbacks() -> Result<()> {
    let project = Project::new()?;
    write_checkout(&project)?;
    let custom = project.dir.path().join("custom");
    project.write_json(&custom, "QBadge.json", &json!({"props": {"floating": {}}}))?;

    let mut cmd = helper_command("gather-props");
    cmd.arg("--root")
        .arg(project.root())
        .arg("--quiet")
        .env("QUASAR_API_DIR", &custom);
    run_command(cmd)?;

    let components = project.read_asset(COMPONENTS_FILE)?;
    assert_eq!(keys_of(&components), vec!["qbadge"]);
    Ok(())
}

#[test]
fn assets_are_indented_with_trailing_newline() -> Result<()> {
    let project = Project::new()?;
    write_checkout(&project)?;
    let mut cmd = helper_command("gather-props");
    cmd.arg("--root").arg(project.root()).arg("--quiet");
    run_command(cmd)?;

    for name in [COMPONENTS_FILE, LISTS_FILE] {
        let text = fs::read_to_string(project.assets().join(name))?;
        assert!(text.ends_with("}\n"), "{name} must end with a newline");
        assert!(text.starts_with("{\n    \""), "{name} must use four-space indent");
    }
    Ok(())
}

#[test]
fn missing_source_fails_without_output() -> Result<()> {
    let project = Project::new()?;

    let output = helper_command("gather-props")
        .arg("--root")
        .arg(project.root())
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("QUASAR_API_DIR"), "stderr: {stderr}");
    assert!(!project.assets().join(COMPONENTS_FILE).exists());
    assert!(!project.assets().join(LISTS_FILE).exists());
    Ok(())
}

#[test]
fn malformed_descriptor_leaves_previous_assets() -> Result<()> {
    let project = Project::new()?;
    fs::write(project.assets().join(COMPONENTS_FILE), "{\"qbtn\": {}}\n")?;
    let src = project.dir.path().join("broken");
    fs::create_dir_all(&src)?;
    fs::write(src.join("QBtn.json"), "{\"props\": {")?;
    fs::write(src.join("QCard.json"), "{}")?;

    let err = gather_props(&DescriptorSource::new(src), &project.assets()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MetadataError>(),
        Some(MetadataError::Parse { .. })
    ));
    assert_eq!(
        fs::read_to_string(project.assets().join(COMPONENTS_FILE))?,
        "{\"qbtn\": {}}\n"
    );
    assert!(!project.assets().join(LISTS_FILE).exists());
    Ok(())
}

#[test]
fn gather_nicegui_binary_maps_classes() -> Result<()> {
    let project = Project::new()?;
    write_checkout(&project)?;
    write_exports(&project)?;

    let mut props = helper_command("gather-props");
    props.arg("--root").arg(project.root()).arg("--quiet");
    run_command(props)?;

    let mut cmd = helper_command("gather-nicegui");
    cmd.arg("--root").arg(project.root());
    let output = run_command(cmd)?;
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(
        stdout,
        "exported ui names: 6\nclass-to-quasar mappings: 2\n"
    );

    let functions = project.read_asset(FUNCTIONS_FILE)?;
    assert_eq!(
        functions,
        json!(["button", "card", "markdown", "run_javascript", "scroll_area", "size_picker"])
    );

    // ScrollArea, Markdown and SizePicker resolve to keys the fixture table
    // does not contain; the private alias and the plain function are skipped.
    let mapping = project.read_asset(MAPPING_FILE)?;
    assert_eq!(mapping, json!({"Button": "qbtn", "Card": "qcard"}));
    assert_eq!(keys_of(&mapping), vec!["Button", "Card"]);
    Ok(())
}

#[test]
fn gather_nicegui_requires_component_table() -> Result<()> {
    let project = Project::new()?;
    write_exports(&project)?;

    let err = gather_nicegui(
        &project.root().join("tools/nicegui_exports.json"),
        &project.assets(),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MetadataError>(),
        Some(MetadataError::NotFound { .. })
    ));
    assert!(!project.assets().join(FUNCTIONS_FILE).exists());
    assert!(!project.assets().join(MAPPING_FILE).exists());

    let output = helper_command("gather-nicegui")
        .arg("--root")
        .arg(project.root())
        .output()?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn lookup_reads_generated_assets() -> Result<()> {
    let project = Project::new()?;
    write_checkout(&project)?;
    write_exports(&project)?;
    let src = project.dir.path().join("quasar/ui/src");
    gather_props(&DescriptorSource::new(src), &project.assets())?;
    gather_nicegui(
        &project.root().join("tools/nicegui_exports.json"),
        &project.assets(),
    )?;

    let catalog = AssetCatalog::load(&project.assets())?;
    let names: Vec<String> = catalog
        .items(Some("Button"), ItemKind::Props, "")
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["flat", "dense", "label", "size"]);
    assert_eq!(
        catalog.values("Button", ItemKind::Props, "size"),
        vec!["xs", "sm", "md"]
    );

    let mut cmd = helper_command("quasar-lookup");
    cmd.arg("--assets")
        .arg(project.assets())
        .arg("--class")
        .arg("Card")
        .arg("--kind")
        .arg("props")
        .arg("--word")
        .arg("fl");
    let output = run_command(cmd)?;
    let lines: Vec<Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(
        lines,
        vec![json!({"name": "flat", "label": "Boolean", "desc": "Use flat design"})]
    );

    let mut cmd = helper_command("quasar-lookup");
    cmd.arg("--assets")
        .arg(project.assets())
        .arg("--functions")
        .arg("--word")
        .arg("ar");
    let output = run_command(cmd)?;
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "\"card\"\n\"markdown\"\n\"scroll_area\"\n"
    );
    Ok(())
}
