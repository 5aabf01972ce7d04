pub mod doctor;
pub mod migrate;
pub mod output;
pub mod scan;

use std::path::Path;

use notemigrate_core::config::{ConfigLoader, ResolvedConfig};

/// Load configuration or exit with status 1.
fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }
}
