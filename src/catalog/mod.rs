// src/catalog/mod.rs  —  xcstrings catalog data model
pub mod key;
pub mod merge;
pub mod storage;

use anyhow::{bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const CATALOG_VERSION: &str = "1.0";

/// A whole persisted string catalog.  Key order is insignificant for lookups
/// but preserved across load/save so diffs stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub source_language: String,
    pub strings:         IndexMap<String, LocalizationRecord>,
    pub version:         String,
}

/// One catalog entry: how its key was produced, plus one StringUnit per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizationRecord {
    pub extraction_state: ExtractionState,
    pub localizations:    IndexMap<String, Localization>,
}

/// Per-locale wrapper — the xcstrings format nests the unit one level down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub string_unit: StringUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringUnit {
    pub state: TranslationState,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionState {
    /// Hand-authored batch entry
    Manual,
    /// Scraped from UI sources by the scanner
    Automatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationState {
    Translated,
    NeedsTranslation,
}

// ── Record constructors ───────────────────────────────────────────────────────
impl LocalizationRecord {
    /// Both locales carry real text.
    pub fn translated(
        extraction: ExtractionState,
        source_tag: &str,
        source: &str,
        target_tag: &str,
        target: &str,
    ) -> Self {
        let mut localizations = IndexMap::new();
        localizations.insert(source_tag.to_string(), Localization {
            string_unit: StringUnit {
                state: TranslationState::Translated,
                value: source.to_string(),
            },
        });
        localizations.insert(target_tag.to_string(), Localization {
            string_unit: StringUnit {
                state: TranslationState::Translated,
                value: target.to_string(),
            },
        });
        Self { extraction_state: extraction, localizations }
    }

    /// No translation yet: the target locale is marked needs_translation and
    /// carries the source text as a placeholder (never an empty string).
    pub fn untranslated(
        extraction: ExtractionState,
        source_tag: &str,
        source: &str,
        target_tag: &str,
    ) -> Self {
        let mut localizations = IndexMap::new();
        localizations.insert(source_tag.to_string(), Localization {
            string_unit: StringUnit {
                state: TranslationState::Translated,
                value: source.to_string(),
            },
        });
        localizations.insert(target_tag.to_string(), Localization {
            string_unit: StringUnit {
                state: TranslationState::NeedsTranslation,
                value: source.to_string(),
            },
        });
        Self { extraction_state: extraction, localizations }
    }

    /// The text this record holds for a locale, if any.
    pub fn value_for(&self, locale: &str) -> Option<&str> {
        self.localizations.get(locale).map(|l| l.string_unit.value.as_str())
    }
}

// ── Catalog operations ────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CatalogStats {
    pub total:             usize,
    pub translated:        usize,
    pub needs_translation: usize,
}

impl Catalog {
    pub fn new(source_language: &str) -> Self {
        Self {
            source_language: source_language.to_string(),
            strings:         IndexMap::new(),
            version:         CATALOG_VERSION.to_string(),
        }
    }

    /// Check the invariants downstream consumers rely on:
    /// every record carries a unit for the declared source locale, and a
    /// needs_translation unit never holds an empty placeholder.
    pub fn validate(&self) -> Result<()> {
        for (k, rec) in &self.strings {
            let Some(src) = rec.localizations.get(&self.source_language) else {
                bail!("catalog entry {k:?} has no {:?} string unit", self.source_language);
            };
            if src.string_unit.value.is_empty() {
                bail!("catalog entry {k:?} has an empty {:?} value", self.source_language);
            }
            for (tag, loc) in &rec.localizations {
                if loc.string_unit.state == TranslationState::NeedsTranslation
                    && loc.string_unit.value.is_empty()
                {
                    bail!("catalog entry {k:?} locale {tag:?} needs translation but has an empty placeholder");
                }
            }
        }
        Ok(())
    }

    /// Translated vs. untranslated counts for one target locale.
    /// Entries with no unit for that locale count as untranslated.
    pub fn stats(&self, target_locale: &str) -> CatalogStats {
        let mut st = CatalogStats { total: self.strings.len(), ..Default::default() };
        for rec in self.strings.values() {
            match rec.localizations.get(target_locale) {
                Some(loc) if loc.string_unit.state == TranslationState::Translated => {
                    st.translated += 1;
                }
                _ => st.needs_translation += 1,
            }
        }
        st
    }
}
