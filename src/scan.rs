// src/scan.rs  —  Extract localizable strings from Swift UI sources
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// Pattern-matching scanner over `.swift` files.  Yields candidate
/// source-locale strings; extraction stays agnostic of the catalog.
pub struct Scanner {
    text_re:  Regex,
    label_re: Regex,
}

impl Scanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Text("...")
            text_re: Regex::new(r#"Text\("([^"\\]*(?:\\.[^"\\]*)*)"\)"#)
                .context("Compiling Text() pattern")?,
            // label: "...", title: "...", message: "...", placeholder: "..."
            // followed by a closing paren
            label_re: Regex::new(r#"(?:label|title|message|placeholder):\s*"([^"\\]*(?:\\.[^"\\]*)*)"\)"#)
                .context("Compiling label pattern")?,
        })
    }

    /// All matches from one file's contents, in match order.
    /// Strings with Swift interpolation (`\(...)`) are dropped: they need a
    /// format-string treatment the catalog does not model.
    pub fn extract(&self, source: &str) -> Vec<String> {
        let mut out = Vec::new();
        for re in [&self.text_re, &self.label_re] {
            for cap in re.captures_iter(source) {
                let text = &cap[1];
                if text.contains(r"\(") {
                    continue;
                }
                if !text.is_empty() {
                    out.push(text.to_string());
                }
            }
        }
        out
    }

    /// Walk a directory tree, extract from every `.swift` file, and return the
    /// deduplicated strings in sorted order.  Deterministic: rescanning an
    /// unchanged tree yields an identical sequence.
    pub fn scan(&self, root: &Path) -> Result<Vec<String>> {
        let mut found = BTreeSet::new();
        let mut files = 0usize;
        for entry in WalkDir::new(root) {
            let entry = entry.with_context(|| format!("Walking {:?}", root))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("swift") {
                continue;
            }
            log::debug!("[scan] {}", entry.path().display());
            let source = std::fs::read_to_string(entry.path())
                .with_context(|| format!("Reading {:?}", entry.path()))?;
            found.extend(self.extract(&source));
            files += 1;
        }
        log::info!("[scan] {} unique strings across {} files", found.len(), files);
        Ok(found.into_iter().collect())
    }
}
