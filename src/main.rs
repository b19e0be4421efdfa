// src/main.rs  —  xcmerge entry point
mod catalog;
mod config;
mod scan;
mod table;

use anyhow::{bail, Result};
use clap::Parser;

use catalog::merge::{self, Candidate, Lookup, MergeOptions, MergeSummary};
use catalog::{storage, Catalog, ExtractionState};
use config::{AppConfig, Cli};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // ── --print-config  ───────────────────────────────────────────────────────
    if cli.print_config {
        print!("{}", config::DEFAULT_CONFIG_TOML);
        return Ok(());
    }

    // ── --write-config  ───────────────────────────────────────────────────────
    if cli.write_config {
        let path = AppConfig::write_default_config(&cli)?;
        println!("Config written to: {}", path.display());
        println!("Edit it to set your catalog path, locales, and key style.");
        return Ok(());
    }

    // ── --print-table  ────────────────────────────────────────────────────────
    if cli.print_table {
        print!("{}", table::DEFAULT_TABLE_TOML);
        return Ok(());
    }

    // ── --write-table  ────────────────────────────────────────────────────────
    if cli.write_table {
        let path = table::write_default_table(cli.tables.first().map(|p| p.as_path()))?;
        println!("Batch table written to: {}", path.display());
        println!("Edit it, then merge with: xcmerge --table {}", path.display());
        return Ok(());
    }

    // ── Load config ───────────────────────────────────────────────────────────
    let cfg = AppConfig::load(&cli)?;

    // ── --init  ───────────────────────────────────────────────────────────────
    if cli.init {
        if cfg.catalog.exists() {
            bail!("catalog already exists: {}", cfg.catalog.display());
        }
        storage::save(&cfg.catalog, &Catalog::new(&cfg.source_locale))?;
        println!("Created empty catalog at {}", cfg.catalog.display());
        return Ok(());
    }

    // ── --check  ──────────────────────────────────────────────────────────────
    if cli.check {
        // load() already validates every invariant
        let cat = storage::load(&cfg.catalog)?;
        println!("Catalog OK: {} strings", cat.strings.len());
        return Ok(());
    }

    // ── --stats  ──────────────────────────────────────────────────────────────
    if cli.stats {
        let cat = storage::load(&cfg.catalog)?;
        print_stats(&cat, &cfg.target_locale);
        return Ok(());
    }

    if cli.tables.is_empty() && cli.scan.is_none() {
        eprintln!("Nothing to do.  Supply --table and/or --scan (see --help).");
        std::process::exit(2);
    }

    // ── Load batch tables up front — a malformed file aborts before any merge ─
    let mut batches = Vec::new();
    for path in &cli.tables {
        batches.push((path, table::BatchFile::load(path)?));
    }

    // ── Load, merge, persist ──────────────────────────────────────────────────
    let mut cat = storage::load_or_empty(&cfg.catalog, &cfg.source_locale)?;
    let mut summary = MergeSummary::default();

    for (path, batch) in &batches {
        let opts = MergeOptions {
            target_locale: &cfg.target_locale,
            key_style:     cfg.key_style,
            extraction:    ExtractionState::Manual,
        };
        let s = merge::merge_batch(&mut cat, &batch.candidates(), &batch.lookup, opts)?;
        println!("{}: added {}, skipped {}", path.display(), s.added, s.skipped);
        summary.absorb(s);
    }

    if let Some(dir) = &cli.scan {
        let scanner = scan::Scanner::new()?;
        let strings = scanner.scan(dir)?;
        println!("Scanned {}: {} unique strings", dir.display(), strings.len());

        // Scanned strings may still find a translation in any supplied lookup
        let mut lookup = Lookup::new();
        for (_, batch) in &batches {
            lookup.extend(batch.lookup.clone());
        }
        let candidates: Vec<Candidate> =
            strings.iter().map(|s| Candidate::bare(s)).collect();
        let opts = MergeOptions {
            target_locale: &cfg.target_locale,
            key_style:     cfg.key_style,
            extraction:    ExtractionState::Automatic,
        };
        let s = merge::merge_batch(&mut cat, &candidates, &lookup, opts)?;
        println!("scan: added {}, skipped {}", s.added, s.skipped);
        summary.absorb(s);
    }

    println!(
        "Added {}, skipped {}  ({} total strings)",
        summary.added, summary.skipped, summary.total
    );
    print_stats(&cat, &cfg.target_locale);

    if cli.dry_run {
        println!("Dry run — catalog not written.");
    } else {
        storage::save(&cfg.catalog, &cat)?;
        println!("Catalog written to {}", cfg.catalog.display());
    }
    Ok(())
}

fn print_stats(cat: &Catalog, target_locale: &str) {
    let st = cat.stats(target_locale);
    println!(
        "Translated ({target_locale}): {}/{}  —  {} need translation",
        st.translated, st.total, st.needs_translation
    );
}
