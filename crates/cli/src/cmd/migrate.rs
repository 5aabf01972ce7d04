//! Migrate command implementation.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use notemigrate_core::migrate::{MigrationConfig, Migrator};
use notemigrate_core::remote::DiskClient;

use super::load_config;
use super::output::{print_report_json, print_summary};
use crate::{MigrateArgs, logging};

/// Run the migration. Per-note problems are logged; only setup failures are errors.
pub fn run(config: Option<&Path>, profile: Option<&str>, args: MigrateArgs) -> Result<()> {
    let rc = load_config(config, profile);
    logging::init(&rc);

    let mut mc = MigrationConfig::from(&rc);
    if let Some(password) = args.password {
        mc.archive_password = Some(password);
    }

    let mut remote = rc.remote.clone();
    if let Some(token) = args.token {
        remote.token = Some(token);
    }
    if remote.token.is_none() {
        tracing::debug!("No remote token configured; remote folders will not be downloaded");
    }

    let client = DiskClient::new(&remote).wrap_err("failed to build remote client")?;
    let migrator = Migrator::new(&mc, &client).wrap_err("invalid migration settings")?;

    tracing::info!("Migrating {} into {}", mc.vault_root.display(), mc.output_dir.display());
    let report = migrator.run().wrap_err("migration aborted")?;

    if args.json {
        print_report_json(&report);
    } else {
        print_summary(&report, &mc.output_dir);
    }

    logging::shutdown();
    Ok(())
}
