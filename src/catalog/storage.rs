// src/catalog/storage.rs  —  Whole-file catalog persistence
use anyhow::{Context, Result};
use std::path::Path;

use crate::catalog::Catalog;

/// Read and parse a catalog, checking its invariants before returning it.
pub fn load(path: &Path) -> Result<Catalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Reading catalog {:?}", path))?;
    let catalog: Catalog = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing catalog {:?}", path))?;
    catalog
        .validate()
        .with_context(|| format!("Validating catalog {:?}", path))?;
    log::info!("[storage] loaded {} strings from {}", catalog.strings.len(), path.display());
    Ok(catalog)
}

/// Like `load`, but a missing file starts a fresh catalog instead of failing.
pub fn load_or_empty(path: &Path, source_language: &str) -> Result<Catalog> {
    if path.exists() {
        load(path)
    } else {
        log::info!("[storage] no catalog at {}, starting empty", path.display());
        Ok(Catalog::new(source_language))
    }
}

/// Serialize and write the whole catalog back.  2-space indentation, CJK text
/// written as UTF-8 rather than \u escapes, entry order preserved.
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
    let mut out = serde_json::to_string_pretty(catalog)
        .context("Serializing catalog")?;
    out.push('\n');
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating catalog directory {:?}", parent))?;
        }
    }
    std::fs::write(path, out)
        .with_context(|| format!("Writing catalog {:?}", path))?;
    log::info!("[storage] wrote {} strings to {}", catalog.strings.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ExtractionState, LocalizationRecord};

    #[test]
    fn round_trip_preserves_content_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Localizable.xcstrings");

        let mut cat = Catalog::new("en");
        for (key, en, zh) in [
            ("settings", "Settings", "设置"),
            ("back", "Back", "返回"),
            ("all_caught_up", "All caught up!", "全部完成！"),
        ] {
            cat.strings.insert(
                key.into(),
                LocalizationRecord::translated(ExtractionState::Manual, "en", en, "zh-Hans", zh),
            );
        }
        save(&path, &cat).unwrap();

        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded, cat);
        let keys: Vec<&str> = reloaded.strings.keys().map(String::as_str).collect();
        assert_eq!(keys, ["settings", "back", "all_caught_up"]);
    }

    #[test]
    fn chinese_text_is_not_escaped_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.xcstrings");

        let mut cat = Catalog::new("en");
        cat.strings.insert(
            "start".into(),
            LocalizationRecord::translated(ExtractionState::Manual, "en", "Start", "zh-Hans", "开始"),
        );
        save(&path, &cat).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("开始"), "CJK text should round-trip as UTF-8: {raw}");
        assert!(raw.contains("\"sourceLanguage\": \"en\""));
    }

    #[test]
    fn missing_file_is_an_error_unless_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.xcstrings");
        assert!(load(&path).is_err());

        let cat = load_or_empty(&path, "en").unwrap();
        assert!(cat.strings.is_empty());
        assert_eq!(cat.source_language, "en");
        assert_eq!(cat.version, "1.0");
    }

    #[test]
    fn malformed_catalog_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.xcstrings");

        // well-formed JSON, but the entry has no source-locale unit
        let raw = r#"{
          "sourceLanguage": "en",
          "strings": {
            "orphan": {
              "extractionState": "manual",
              "localizations": {
                "zh-Hans": {"stringUnit": {"state": "translated", "value": "孤儿"}}
              }
            }
          },
          "version": "1.0"
        }"#;
        std::fs::write(&path, raw).unwrap();
        let err = load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("orphan"));
    }
}
