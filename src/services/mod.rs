// src/services/mod.rs

//! Service layer for the chef application.
//!
//! This module contains the API-facing logic:
//! - Token acquisition (`authenticate`)
//! - Paginated listing walks (`ApiClient`)

mod api;
mod auth;

pub use api::{ApiClient, follow_next};
pub use auth::{AccessToken, ApiAuth, authenticate};
