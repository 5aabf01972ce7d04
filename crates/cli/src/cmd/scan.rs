//! Scan command: classify notes without copying them.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use notemigrate_core::migrate::{MigrationConfig, Migrator};
use notemigrate_core::remote::MemoryStorage;

use super::load_config;
use super::output::{print_scan_json, print_scan_quiet, print_scan_table};
use crate::{OutputFormat, ScanArgs, logging};

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ScanArgs) -> Result<()> {
    let rc = load_config(config, profile);
    logging::init(&rc);

    let mc = MigrationConfig::from(&rc);
    // Scanning never touches the network
    let storage = MemoryStorage::new();
    let migrator = Migrator::new(&mc, &storage).wrap_err("failed to prepare scan")?;
    let notes = migrator.scan();

    match resolve_format(args.output, args.json, args.quiet) {
        OutputFormat::Table => print_scan_table(&notes),
        OutputFormat::Json => print_scan_json(&notes),
        OutputFormat::Quiet => print_scan_quiet(&notes),
    }

    logging::shutdown();
    Ok(())
}

fn resolve_format(output: OutputFormat, json: bool, quiet: bool) -> OutputFormat {
    if json {
        OutputFormat::Json
    } else if quiet {
        OutputFormat::Quiet
    } else {
        output
    }
}
