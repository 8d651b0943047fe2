//! Queries the generated assets the way editor completion does.
//!
//! Prints one JSON value per line: item entries for a class and kind, the
//! accepted values of one item, or the exported `ui.` names.

use anyhow::{Result, bail};
use quasar_meta::{AssetCatalog, ItemKind, find_project_root, resolve_asset_dir};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("quasar-lookup: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse()?;
    let asset_dir = match (&cli.assets, &cli.root) {
        (Some(assets), _) => assets.clone(),
        (None, Some(root)) => resolve_asset_dir(root, None),
        (None, None) => resolve_asset_dir(&find_project_root()?, None),
    };
    let catalog = AssetCatalog::load(&asset_dir)?;
    let word = cli.word.as_deref().unwrap_or("");

    match cli.query {
        Query::Functions => print_lines(catalog.functions(word)),
        Query::Items { class, kind } => print_lines(catalog.items(class.as_deref(), kind, word)),
        Query::Values { class, kind, item } => print_lines(catalog.values(&class, kind, &item)),
    }
}

fn print_lines<T: Serialize>(values: Vec<T>) -> Result<()> {
    for value in values {
        println!("{}", serde_json::to_string(&value)?);
    }
    Ok(())
}

enum Query {
    Functions,
    Items {
        class: Option<String>,
        kind: ItemKind,
    },
    Values {
        class: String,
        kind: ItemKind,
        item: String,
    },
}

struct CliArgs {
    root: Option<PathBuf>,
    assets: Option<PathBuf>,
    word: Option<String>,
    query: Query,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut root = None;
        let mut assets = None;
        let mut word = None;
        let mut functions = false;
        let mut class: Option<String> = None;
        let mut kind: Option<ItemKind> = None;
        let mut values_of: Option<String> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--root" => root = Some(PathBuf::from(next_value(&mut args, "--root")?)),
                "--assets" => assets = Some(PathBuf::from(next_value(&mut args, "--assets")?)),
                "--word" => word = Some(next_value(&mut args, "--word")?),
                "--functions" => functions = true,
                "--class" => class = Some(next_value(&mut args, "--class")?),
                "--kind" => kind = Some(next_value(&mut args, "--kind")?.parse()?),
                "--values" => values_of = Some(next_value(&mut args, "--values")?),
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}\n{}", usage()),
            }
        }

        let query = match (functions, kind, values_of) {
            (true, None, None) if class.is_none() => Query::Functions,
            (true, _, _) => bail!("--functions cannot be combined with --class/--kind/--values"),
            (false, Some(kind), Some(item)) => match class {
                Some(class) => Query::Values { class, kind, item },
                None => bail!("--values requires --class"),
            },
            (false, Some(kind), None) => Query::Items { class, kind },
            (false, None, _) => bail!("--kind is required unless --functions is given\n{}", usage()),
        };

        Ok(CliArgs {
            root,
            assets,
            word,
            query,
        })
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
    "Usage: quasar-lookup [--root DIR|--assets DIR] (--functions | [--class NAME] --kind props|events|methods|slots | --class NAME --kind KIND --values ITEM) [--word W]\n\
Prints matching completion entries from the generated assets as NDJSON.\n"
}
