//! Hydrates the Quasar API descriptors into `assets/`.
//!
//! Resolves the descriptor source (`--source`, `QUASAR_API_DIR`, a sibling
//! Quasar checkout, or the npm package), fills `extends` references and
//! mixins, and writes `quasar_components.json` plus `quasar_lists.json`.

use anyhow::{Result, bail};
use quasar_meta::quasar::resolve_source_path;
use quasar_meta::{find_project_root, gather_props, resolve_asset_dir};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("gather-props: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse()?;
    let root = match cli.root {
        Some(root) => root,
        None => find_project_root()?,
    };
    let source = resolve_source_path(&root, cli.source.as_deref())?;
    let asset_dir = resolve_asset_dir(&root, cli.assets.as_deref());
    if !cli.quiet {
        eprintln!(
            "gather-props: reading descriptors from {} ({:?} layout)",
            source.path.display(),
            source.layout
        );
    }

    let summary = gather_props(&source, &asset_dir)?;

    if !cli.quiet {
        eprintln!(
            "gather-props: {} descriptors -> {} components ({} inherited attributes, {} mixin items) in {}",
            summary.descriptors,
            summary.components,
            summary.extended_attributes,
            summary.mixed_in_items,
            asset_dir.display()
        );
    }
    Ok(())
}

struct CliArgs {
    root: Option<PathBuf>,
    source: Option<PathBuf>,
    assets: Option<PathBuf>,
    quiet: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut cli = CliArgs {
            root: None,
            source: None,
            assets: None,
            quiet: false,
        };

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--root" => cli.root = Some(PathBuf::from(next_value(&mut args, "--root")?)),
                "--source" => {
                    cli.source = Some(PathBuf::from(next_value(&mut args, "--source")?))
                }
                "--assets" => {
                    cli.assets = Some(PathBuf::from(next_value(&mut args, "--assets")?))
                }
                "--quiet" | "-q" => cli.quiet = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }
        Ok(cli)
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: gather-props [--root DIR] [--source DIR] [--assets DIR] [--quiet]\n\
Hydrates Quasar API descriptors and writes quasar_components.json and quasar_lists.json.\n\
Source defaults to $QUASAR_API_DIR, ../quasar/ui/src, then node_modules/quasar/dist/api.\n"
}
