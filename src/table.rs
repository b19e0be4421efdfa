// src/table.rs  —  Batch table files (TOML)
//
// One parametrized merger fed with data replaces the old pile of per-feature
// scripts, each hardcoding its own translation dictionary.  A batch table
// carries an optional lookup dictionary plus explicit entries.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::catalog::merge::{Candidate, Lookup};

/// Example batch table embedded at compile time.
/// Users can inspect it with:  xcmerge --print-table
pub const DEFAULT_TABLE_TOML: &str = include_str!("../table.toml.example");

/// Write the embedded example table to disk.
/// Returns the path it was written to.
pub fn write_default_table(path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("table.toml"));
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating table directory {:?}", parent))?;
        }
    }
    std::fs::write(&path, DEFAULT_TABLE_TOML)
        .with_context(|| format!("Writing batch table to {:?}", path))?;
    Ok(path)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFile {
    /// Merge every lookup pair as its own candidate (sorted by source text),
    /// deriving keys from the source strings.  Off by default: the lookup is
    /// then only consulted for entries and scanned strings.
    #[serde(default)]
    pub merge_lookup: bool,

    /// Source text → target text dictionary
    #[serde(default)]
    pub lookup: Lookup,

    /// Explicit entries, merged in file order
    #[serde(default, rename = "entry")]
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    /// Explicit key; omitted means derive one from the source text
    pub key:    Option<String>,
    pub source: String,
    pub target: Option<String>,
}

impl BatchFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Reading batch table {:?}", path))?;
        let batch: BatchFile = toml::from_str(&raw)
            .with_context(|| format!("Parsing batch table {:?}", path))?;
        log::info!(
            "[table] {}: {} entries, {} lookup pairs",
            path.display(),
            batch.entries.len(),
            batch.lookup.len()
        );
        Ok(batch)
    }

    /// Candidates this batch contributes: explicit entries first (file order),
    /// then, with `merge_lookup`, one candidate per lookup pair.
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut out: Vec<Candidate> = self
            .entries
            .iter()
            .map(|e| Candidate {
                key:    e.key.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
            })
            .collect();
        if self.merge_lookup {
            // BTreeMap iteration gives sorted source order, so repeated runs
            // see the pairs in the same sequence.
            out.extend(self.lookup.iter().map(|(en, zh)| Candidate {
                key:    None,
                source: en.clone(),
                target: Some(zh.clone()),
            }));
        }
        out
    }
}
