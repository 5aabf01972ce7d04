use notemigrate_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

use crate::logging;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            logging::init(&rc);
            tracing::debug!("Configuration loaded for profile {}", rc.active_profile);

            println!("OK   notemigrate doctor");
            println!("version: {}", notemigrate_core::version());
            println!(
                "path: {}",
                config.map_or_else(
                    || default_config_path().display().to_string(),
                    |p| p.display().to_string()
                )
            );
            println!("profile: {}", rc.active_profile);
            println!("vault_root: {}", rc.vault_root.display());
            println!("attachments_dir: {}", rc.attachments_dir.display());
            println!("output_dir: {}", rc.output_dir.display());
            for excluded in &rc.excluded_folders {
                println!("excluded: {}", excluded.display());
            }
            println!("archive.password: {}", set_or_unset(rc.archive.password.as_deref()));
            println!("remote.domain: {}", rc.remote.domain);
            println!("remote.api_base: {}", rc.remote.api_base);
            println!("remote.token: {}", set_or_unset(rc.remote.token.as_deref()));

            if !rc.vault_root.is_dir() {
                println!("warning: vault_root does not exist");
            }
            if !rc.attachments_dir.is_dir() {
                println!("warning: attachments_dir does not exist");
            }
            logging::shutdown();
        }
        Err(e) => {
            println!("FAIL notemigrate doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

fn set_or_unset(value: Option<&str>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "set",
        _ => "not set",
    }
}
