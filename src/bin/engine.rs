//! Reference ranking engine for `fpick`.
//!
//! Speaks the picker's engine contract: runs in the directory being browsed,
//! takes the query as its final argument, and prints a JSON array of
//! `{name, path, is_dir}` entries on stdout, best match first. Lists the
//! working directory one level deep; an empty query yields the default
//! ordering (directories first, then names).

use std::env;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use frizbee::{Config, match_list};
use ignore::WalkBuilder;
use log::warn;

use fpick::Entry;

#[derive(Parser, Debug)]
#[command(
    name = "fpick-engine",
    version,
    about = "Directory listing and ranking engine for fpick"
)]
struct EngineArgs {
    /// Query to rank entries against; empty lists the whole directory.
    #[arg(default_value = "")]
    query: String,
    /// Include hidden files in the listing.
    #[arg(long)]
    hidden: bool,
    /// Cap on the number of entries printed.
    #[arg(long, value_name = "N", default_value_t = 500)]
    limit: usize,
}

fn main() -> Result<()> {
    fpick::logging::initialize();
    let args = EngineArgs::parse();

    let cwd = env::current_dir().context("failed to determine working directory")?;
    let entries = list_entries(&cwd, args.hidden);
    let ranked = rank(entries, &args.query, args.limit);

    serde_json::to_writer(io::stdout().lock(), &ranked)
        .context("failed to write entries to stdout")?;
    Ok(())
}

/// Collect the immediate children of `root`, honoring ignore files unless
/// hidden entries were requested. Unreadable entries are skipped.
fn list_entries(root: &Path, hidden: bool) -> Vec<Entry> {
    let mut entries = Vec::new();
    let walker = WalkBuilder::new(root)
        .max_depth(Some(1))
        .hidden(!hidden)
        .build();

    for result in walker {
        let dent = match result {
            Ok(dent) => dent,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", root.display());
                continue;
            }
        };
        if dent.depth() == 0 {
            continue;
        }
        let name = dent.file_name().to_string_lossy().into_owned();
        let is_dir = dent.file_type().is_some_and(|kind| kind.is_dir());
        let path = dent.into_path();
        entries.push(if is_dir {
            Entry::dir(name, path)
        } else {
            Entry::file(name, path)
        });
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    entries
}

/// Rank `entries` against `query`, best first. Entries that do not match at
/// all are dropped.
fn rank(entries: Vec<Entry>, query: &str, limit: usize) -> Vec<Entry> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return entries.into_iter().take(limit).collect();
    }

    let haystacks: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    let matches = match_list(trimmed, &haystacks, &match_config());

    let mut scored: Vec<(u16, usize)> = matches
        .into_iter()
        .filter(|entry| entry.score > 0)
        .map(|entry| (entry.score, entry.index as usize))
        .collect();
    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| entries[a.1].name.cmp(&entries[b.1].name))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, index)| entries[index].clone())
        .collect()
}

fn match_config() -> Config {
    Config {
        prefilter: false,
        max_typos: None,
        sort: false,
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_puts_directories_first_then_names() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("src")).unwrap();
        std::fs::create_dir(root.path().join("docs")).unwrap();
        std::fs::write(root.path().join("Cargo.toml"), "").unwrap();
        std::fs::write(root.path().join("README.md"), "").unwrap();

        let names: Vec<String> = list_entries(root.path(), false)
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, ["docs", "src", "Cargo.toml", "README.md"]);
    }

    #[test]
    fn listing_excludes_the_root_and_hidden_entries() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(".hidden"), "").unwrap();
        std::fs::write(root.path().join("visible"), "").unwrap();

        let entries = list_entries(root.path(), false);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "visible");

        let entries = list_entries(root.path(), true);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn empty_query_keeps_the_default_ordering() {
        let entries = vec![
            Entry::dir("src", "/r/src"),
            Entry::file("a.rs", "/r/a.rs"),
            Entry::file("b.rs", "/r/b.rs"),
        ];
        let ranked = rank(entries.clone(), "", 10);
        assert_eq!(ranked, entries);
    }

    #[test]
    fn ranking_drops_non_matches() {
        let entries = vec![
            Entry::file("main.rs", "/r/main.rs"),
            Entry::file("zzz.txt", "/r/zzz.txt"),
        ];
        let ranked = rank(entries, "main", 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "main.rs");
    }

    #[test]
    fn limit_caps_the_listing() {
        let entries: Vec<Entry> = (0..10)
            .map(|i| Entry::file(format!("f{i}"), format!("/r/f{i}")))
            .collect();
        assert_eq!(rank(entries, "", 3).len(), 3);
    }
}
