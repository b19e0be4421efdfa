// src/catalog/merge.rs  —  Apply candidate batches to a catalog
use anyhow::{bail, Result};
use std::collections::BTreeMap;

use crate::catalog::{key, Catalog, ExtractionState, LocalizationRecord};
use crate::config::KeyStyle;

/// One merge input: an optional explicit key, the source-locale text, and an
/// optional translation.  Consumed once, never persisted.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub key:    Option<String>,
    pub source: String,
    pub target: Option<String>,
}

impl Candidate {
    pub fn keyed(key: &str, source: &str, target: &str) -> Self {
        Self { key: Some(key.into()), source: source.into(), target: Some(target.into()) }
    }
    pub fn bare(source: &str) -> Self {
        Self { key: None, source: source.into(), target: None }
    }
}

/// Source text → target-locale text, consulted when a candidate carries no
/// explicit translation.
pub type Lookup = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy)]
pub struct MergeOptions<'a> {
    /// Locale tag new translations are filed under (e.g. "zh-Hans")
    pub target_locale: &'a str,
    pub key_style:     KeyStyle,
    pub extraction:    ExtractionState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergeSummary {
    pub added:   usize,
    pub skipped: usize,
    /// Catalog size after the merge
    pub total:   usize,
}

impl MergeSummary {
    pub fn absorb(&mut self, other: MergeSummary) {
        self.added += other.added;
        self.skipped += other.skipped;
        self.total = other.total;
    }
}

/// Merge a batch of candidates into the catalog, in input order.
///
/// Existing entries always win: a key that is already present is never
/// overwritten, which makes re-running the same batch a no-op.  A derived key
/// that lands on an entry holding a *different* source text is a genuine
/// collision and takes a `_1`, `_2`, … suffix instead of being dropped.
pub fn merge_batch(
    catalog: &mut Catalog,
    candidates: &[Candidate],
    lookup: &Lookup,
    opts: MergeOptions<'_>,
) -> Result<MergeSummary> {
    // Downstream steps assume the source-locale invariant; refuse to build on
    // top of a catalog that already violates it.
    catalog.validate()?;

    let source_tag = catalog.source_language.clone();
    let mut summary = MergeSummary::default();

    for cand in candidates {
        if cand.source.is_empty() {
            bail!("batch candidate with empty source text (key {:?})", cand.key);
        }

        let entry_key = match &cand.key {
            Some(k) => {
                if catalog.strings.contains_key(k) {
                    log::debug!("[merge] skip existing key {k:?}");
                    summary.skipped += 1;
                    continue;
                }
                k.clone()
            }
            None => {
                let base = key::generate_key(&cand.source, opts.key_style);
                // Re-run detection walks the whole suffix chain: a text that
                // lost an earlier collision sits under base_1, base_2, … and
                // still derives `base` the next time around.
                let mut probe = base.clone();
                let mut n = 1usize;
                let mut rerun = false;
                while let Some(existing) = catalog.strings.get(&probe) {
                    if existing.value_for(&source_tag) == Some(cand.source.as_str()) {
                        rerun = true;
                        break;
                    }
                    probe = format!("{base}_{n}");
                    n += 1;
                }
                if rerun {
                    log::debug!("[merge] skip re-run of {probe:?}");
                    summary.skipped += 1;
                    continue;
                }
                // Every occupied slot held a different text: genuine collision
                key::unique_key(catalog, &base)
            }
        };

        let target = cand
            .target
            .as_deref()
            .or_else(|| lookup.get(&cand.source).map(String::as_str));

        let record = match target {
            Some(t) => LocalizationRecord::translated(
                opts.extraction, &source_tag, &cand.source, opts.target_locale, t,
            ),
            None => LocalizationRecord::untranslated(
                opts.extraction, &source_tag, &cand.source, opts.target_locale,
            ),
        };

        log::debug!("[merge] add {entry_key:?} ({:?})", opts.extraction);
        catalog.strings.insert(entry_key, record);
        summary.added += 1;
    }

    summary.total = catalog.strings.len();
    log::info!(
        "[merge] batch done: {} added, {} skipped, {} total",
        summary.added, summary.skipped, summary.total
    );
    Ok(summary)
}
