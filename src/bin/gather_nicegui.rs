//! Maps NiceGUI element classes onto the hydrated Quasar components.
//!
//! Reads the pre-extracted export listing (`--exports`, `NICEGUI_EXPORTS`, or
//! `tools/nicegui_exports.json`) and the `quasar_components.json` produced by
//! `gather-props`, then writes `nicegui_functions.json` and
//! `nicegui_to_quasar_map.json`.

use anyhow::{Result, bail};
use quasar_meta::{find_project_root, gather_nicegui, resolve_asset_dir, resolve_exports_path};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("gather-nicegui: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse()?;
    let root = match cli.root {
        Some(root) => root,
        None => find_project_root()?,
    };
    let exports_path = resolve_exports_path(&root, cli.exports.as_deref());
    let asset_dir = resolve_asset_dir(&root, cli.assets.as_deref());

    let summary = gather_nicegui(&exports_path, &asset_dir)?;

    println!("exported ui names: {}", summary.exported_names);
    println!("class-to-quasar mappings: {}", summary.mappings);
    Ok(())
}

struct CliArgs {
    root: Option<PathBuf>,
    exports: Option<PathBuf>,
    assets: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut cli = CliArgs {
            root: None,
            exports: None,
            assets: None,
        };

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--root" => cli.root = Some(PathBuf::from(next_value(&mut args, "--root")?)),
                "--exports" => {
                    cli.exports = Some(PathBuf::from(next_value(&mut args, "--exports")?))
                }
                "--assets" => {
                    cli.assets = Some(PathBuf::from(next_value(&mut args, "--assets")?))
                }
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
    "Usage: gather-nicegui [--root DIR] [--exports FILE] [--assets DIR]\n\
Infers the Quasar component behind each NiceGUI element class and writes\n\
nicegui_functions.json and nicegui_to_quasar_map.json. Run gather-props first.\n"
}
