// src/config.rs

//! Configuration and credential loading utilities.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::services::ApiAuth;

/// Load configuration from a TOML file.
///
/// Falls back to defaults (the real Kamkalima values) if loading fails.
pub fn load_config(path: &Path) -> Config {
    Config::load_or_default(path)
}

#[derive(Debug, Deserialize)]
struct ClientCredentialsFile {
    client_id: String,
    client_secret: String,
}

/// Load API credentials from a local secret file.
///
/// Accepts either a JSON `{client_id, client_secret}` document or a
/// plain-text token. A missing or empty file is a fatal startup error,
/// surfaced here rather than somewhere mid-run.
pub fn load_credentials(path: &Path) -> Result<ApiAuth> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::config(format!("Cannot read credentials file {path:?}: {e}"))
    })?;

    if let Ok(creds) = serde_json::from_str::<ClientCredentialsFile>(&content) {
        return Ok(ApiAuth::ClientCredentials {
            client_id: creds.client_id,
            client_secret: creds.client_secret,
        });
    }

    let token = content.trim();
    if token.is_empty() || token.starts_with('{') {
        return Err(AppError::config(format!(
            "Credentials file {path:?} is neither client credentials JSON nor a token"
        )));
    }
    Ok(ApiAuth::StaticToken {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_client_credentials_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("client_credentials.json");
        fs::write(&path, r#"{"client_id": "abc", "client_secret": "xyz"}"#).unwrap();

        match load_credentials(&path).unwrap() {
            ApiAuth::ClientCredentials {
                client_id,
                client_secret,
            } => {
                assert_eq!(client_id, "abc");
                assert_eq!(client_secret, "xyz");
            }
            ApiAuth::StaticToken { .. } => panic!("expected client credentials"),
        }
    }

    #[test]
    fn load_plain_token() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("token.txt");
        fs::write(&path, "  sekrit-token\n").unwrap();

        match load_credentials(&path).unwrap() {
            ApiAuth::StaticToken { token } => assert_eq!(token, "sekrit-token"),
            ApiAuth::ClientCredentials { .. } => panic!("expected static token"),
        }
    }

    #[test]
    fn missing_credentials_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let result = load_credentials(&tmp.path().join("absent.json"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn malformed_json_credentials_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, r#"{"client_id": "abc"}"#).unwrap();
        assert!(load_credentials(&path).is_err());
    }
}
