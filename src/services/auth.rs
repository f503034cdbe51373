// src/services/auth.rs

//! Token acquisition for the content API.
//!
//! Two API generations are supported: an OAuth client-credentials exchange
//! that yields a bearer token, and a static long-lived token sent as a
//! query parameter. Either way the result is an [`AccessToken`] the
//! fetcher attaches to every page request.

use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Credential material loaded at startup.
#[derive(Debug, Clone)]
pub enum ApiAuth {
    /// OAuth client credentials for the token exchange
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
    /// Raw long-lived token
    StaticToken { token: String },
}

/// A token ready to be attached to API requests.
#[derive(Debug, Clone)]
pub enum AccessToken {
    /// Sent as `Authorization: Bearer {token}`
    Bearer(String),
    /// Sent as `?api_token={token}`
    QueryParam(String),
}

impl AccessToken {
    /// Attach this token to a request.
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            AccessToken::Bearer(token) => request.bearer_auth(token),
            AccessToken::QueryParam(token) => request.query(&[("api_token", token.as_str())]),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtain an access token for the content API.
///
/// Client credentials are exchanged at `{domain}/oauth/token`; a
/// non-success response aborts the whole run. Static tokens need no
/// exchange.
pub fn authenticate(client: &Client, api: &ApiConfig, auth: &ApiAuth) -> Result<AccessToken> {
    match auth {
        ApiAuth::ClientCredentials {
            client_id,
            client_secret,
        } => {
            let endpoint = api.token_endpoint();
            let response = client
                .post(&endpoint)
                .form(&[
                    ("grant_type", "client_credentials"),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                ])
                .send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::auth(format!(
                    "Token endpoint {endpoint} returned {status}"
                )));
            }
            let token: TokenResponse = response.json()?;
            log::info!("Successfully obtained authorization token");
            Ok(AccessToken::Bearer(token.access_token))
        }
        ApiAuth::StaticToken { token } => Ok(AccessToken::QueryParam(token.clone())),
    }
}
