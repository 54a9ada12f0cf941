use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use filterkit_core::config::{resolve_with_base, Config};
use filterkit_core::types::{Filter, FilterKind, SelectedFilter};
use filterkit_store::FilterStore;

const USAGE: &str = "Usage: filterkit <derive|search|groups> [args...]
  derive <selection.json> [--text T]   print the query for a selection
  search <filters.json> <query> [--kind K]  list registered filters matching query
  groups <selection.json>              print the selection grouped by kind";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() { eprintln!("{USAGE}"); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_selection(store: &mut FilterStore, path: &Path) -> anyhow::Result<()> {
    let selection: Vec<SelectedFilter> = read_json(path)?;
    for s in selection {
        store.select_filter(s.filter, s.condition, s.can_be_removed)?;
    }
    info!(selected = store.selection().count(), file = %path.display(), "loaded selection");
    Ok(())
}

fn file_arg(args: &[String], idx: usize, base: &Path) -> PathBuf {
    match args.get(idx) {
        Some(p) => resolve_with_base(base, p),
        None => { eprintln!("{USAGE}"); std::process::exit(1) }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let base = config.data_dir()?;
    let mut store = FilterStore::new(config.store()?);
    let (cmd, args) = parse_args();

    match cmd.as_str() {
        "derive" => {
            load_selection(&mut store, &file_arg(&args, 0, &base))?;
            let mut i = 1;
            while i < args.len() {
                match args[i].as_str() {
                    "--text" | "-t" => {
                        let Some(text) = args.get(i + 1) else { eprintln!("Error: --text requires a value"); std::process::exit(1) };
                        store.set_search_text(Some(text.clone()));
                        i += 1;
                    }
                    other => { eprintln!("Unknown argument: {other}"); std::process::exit(1); }
                }
                i += 1;
            }
            let derived = store.derive_query()?;
            println!("{}", serde_json::to_string_pretty(&derived.path_query)?);
        }
        "search" => {
            let filters: Vec<Filter> = read_json(&file_arg(&args, 0, &base))?;
            store.register_filters(filters);
            let query = args.get(1).cloned().unwrap_or_default();
            let kind = match args.iter().position(|a| a == "--kind" || a == "-k") {
                Some(i) => {
                    let Some(name) = args.get(i + 1) else { eprintln!("Error: --kind requires a value"); std::process::exit(1) };
                    Some(name.parse::<FilterKind>()?)
                }
                None => None,
            };
            let hits: Vec<_> = store
                .search_registered_filters(&query)
                .into_iter()
                .filter(|f| kind.map_or(true, |k| f.kind == k))
                .collect();
            info!(query = %query, hits = hits.len(), "searched registered filters");
            for f in hits { println!("{}", f.key()); }
        }
        "groups" => {
            load_selection(&mut store, &file_arg(&args, 0, &base))?;
            println!("{}", serde_json::to_string_pretty(&store.group_selected_by_type())?);
        }
        _ => { eprintln!("Unknown command: {}\n{USAGE}", cmd); std::process::exit(1); }
    }
    Ok(())
}
