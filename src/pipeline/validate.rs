// src/pipeline/validate.rs

//! Configuration and credential validation entry point.

use std::path::Path;

use crate::config::load_credentials;
use crate::error::Result;
use crate::models::Config;
use crate::services::ApiAuth;

/// Validate configuration and credentials without touching the network.
pub fn run_validate(config: &Config) -> Result<()> {
    config.validate()?;
    log::info!("Configuration is valid");
    log::info!("  API domain: {}", config.api.domain);
    log::info!("  Grouping: {:?}", config.taxonomy.grouping);
    log::info!("  Categories: {}", config.taxonomy.categories.len());
    log::info!("  Grades: {}", config.taxonomy.grades.len());

    let auth = load_credentials(Path::new(&config.paths.credentials))?;
    match auth {
        ApiAuth::ClientCredentials { .. } => {
            log::info!("Credentials: OAuth client credentials");
        }
        ApiAuth::StaticToken { .. } => {
            log::info!("Credentials: static API token");
        }
    }
    Ok(())
}
