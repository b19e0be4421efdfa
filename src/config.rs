// src/config.rs  —  Runtime configuration (CLI + TOML)
use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The example config is embedded directly in the binary at compile time.
/// Users can write it out with:  xcmerge --write-config
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config.toml.example");

// ── CLI ───────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug)]
#[command(
    name        = "xcmerge",
    about       = "String catalog merge tool — builds and extends .xcstrings files",
    version,
)]
pub struct Cli {
    /// Config file path (default: ~/.config/xcmerge/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalog file path (e.g. Dayflow/Localizable.xcstrings)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Batch table file(s) to merge into the catalog, applied in order
    #[arg(long = "table", value_name = "FILE")]
    pub tables: Vec<PathBuf>,

    /// Scan a directory tree of Swift sources and merge the extracted strings
    #[arg(long, value_name = "DIR")]
    pub scan: Option<PathBuf>,

    /// Source locale tag (default: en)
    #[arg(long)]
    pub source_locale: Option<String>,

    /// Target locale tag (default: zh-Hans)
    #[arg(long)]
    pub target_locale: Option<String>,

    /// Key generation style: compact | extended
    #[arg(long)]
    pub key_style: Option<KeyStyle>,

    /// Create an empty catalog at the catalog path and exit
    #[arg(long, action)]
    pub init: bool,

    /// Load the catalog, check its invariants, and exit
    #[arg(long, action)]
    pub check: bool,

    /// Print catalog statistics and exit
    #[arg(long, action)]
    pub stats: bool,

    /// Merge in memory and report, but do not write the catalog back
    #[arg(long, action)]
    pub dry_run: bool,

    /// Write the built-in default config.toml to the config path and exit.
    /// Use --config <PATH> to write to a custom location.
    #[arg(long, action)]
    pub write_config: bool,

    /// Print the built-in default config.toml to stdout and exit
    #[arg(long, action)]
    pub print_config: bool,

    /// Print the built-in example batch table to stdout and exit
    #[arg(long, action)]
    pub print_table: bool,

    /// Write the built-in example batch table and exit.
    /// Writes to the first --table <FILE> argument, or ./table.toml.
    #[arg(long, action)]
    pub write_table: bool,
}

// ── Enums shared across CLI + TOML ────────────────────────────────────────────
/// Key length ceiling variant.  Both appear in historical catalogs, so the
/// choice is explicit and applied consistently per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// 50-char ceiling; over-long keys keep the first 5 words
    Compact,
    /// 80-char ceiling; over-long keys keep the first 3 words
    Extended,
}

// ── TOML file structure ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub catalog: Option<CatalogCfg>,
    pub merge:   Option<MergeCfg>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCfg {
    pub path:          Option<PathBuf>,
    pub source_locale: Option<String>,
    pub target_locale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeCfg {
    pub key_style: Option<KeyStyle>,
}

// ── Resolved / merged config ──────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog:       PathBuf,
    pub source_locale: String,
    pub target_locale: String,
    pub key_style:     KeyStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog:       PathBuf::from("Localizable.xcstrings"),
            source_locale: "en".into(),
            target_locale: "zh-Hans".into(),
            key_style:     KeyStyle::Compact,
        }
    }
}

// ── Config loader ─────────────────────────────────────────────────────────────
impl AppConfig {
    /// Write the embedded default config to disk.
    /// Returns the path it was written to.
    pub fn write_default_config(cli: &Cli) -> Result<PathBuf> {
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory {:?}", parent))?;
        }
        std::fs::write(&path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Writing config to {:?}", path))?;
        Ok(path)
    }

    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        // 1. Load TOML file (optional — every setting has a default)
        let path = cli.config.clone().unwrap_or_else(default_config_path);
        if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Reading config {:?}", path))?;
            let fc: FileConfig = toml::from_str(&raw)
                .with_context(|| format!("Parsing config {:?}", path))?;
            cfg.apply_file(&fc);
        } else {
            log::debug!("[config] no config file at {}, using defaults", path.display());
        }

        // 2. Apply CLI overrides
        cfg.apply_cli(cli);
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: &FileConfig) {
        if let Some(c) = &fc.catalog {
            if let Some(v) = &c.path          { self.catalog       = v.clone(); }
            if let Some(v) = &c.source_locale { self.source_locale = v.clone(); }
            if let Some(v) = &c.target_locale { self.target_locale = v.clone(); }
        }
        if let Some(m) = &fc.merge {
            if let Some(v) = m.key_style { self.key_style = v; }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.catalog       { self.catalog       = v.clone(); }
        if let Some(v) = &cli.source_locale { self.source_locale = v.clone(); }
        if let Some(v) = &cli.target_locale { self.target_locale = v.clone(); }
        if let Some(v) = cli.key_style      { self.key_style     = v; }
    }
}

fn default_config_path() -> PathBuf {
    dirs_next().join("xcmerge").join("config.toml")
}

fn dirs_next() -> PathBuf {
    if let Ok(v) = std::env::var("XDG_CONFIG_HOME") { return PathBuf::from(v); }
    if let Ok(v) = std::env::var("APPDATA")          { return PathBuf::from(v); }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_default();
    PathBuf::from(home).join(".config")
}
