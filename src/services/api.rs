// src/services/api.rs

//! Paginated content API client.
//!
//! Walks a cursor-linked listing endpoint to completion. A failed page is
//! fatal rather than retried or silently truncated: the caller must be
//! able to tell "genuine end of pagination" from "a page broke".

use reqwest::blocking::Client;

use crate::error::{AppError, Result};
use crate::models::{Page, RawItem};
use crate::services::auth::AccessToken;
use crate::utils::url::same_domain;

/// Authenticated client for the paginated listing endpoints.
pub struct ApiClient {
    client: Client,
    domain: String,
    token: AccessToken,
}

impl ApiClient {
    pub fn new(client: Client, domain: impl Into<String>, token: AccessToken) -> Self {
        Self {
            client,
            domain: domain.into(),
            token,
        }
    }

    /// Fetch the complete ordered item sequence across all pages.
    ///
    /// Errors on any non-success page status, and with
    /// [`AppError::EmptyListing`] when the whole walk yields zero items.
    pub fn fetch_all_items(&self, start_url: &str) -> Result<Vec<RawItem>> {
        let mut all_items = Vec::new();
        let mut current_url = start_url.to_string();

        loop {
            log::debug!("GET {current_url}");
            let response = self.token.apply(self.client.get(&current_url)).send()?;
            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Fetch {
                    url: current_url,
                    status: status.as_u16(),
                });
            }

            let page: Page = response.json()?;
            all_items.extend(page.items);

            match follow_next(page.next_page_url.as_deref(), &self.domain) {
                Some(next) => current_url = next,
                None => {
                    log::debug!("Reached end of API results");
                    break;
                }
            }
        }

        if all_items.is_empty() {
            return Err(AppError::EmptyListing {
                endpoint: start_url.to_string(),
            });
        }
        log::info!("Found {} items at {}", all_items.len(), start_url);
        Ok(all_items)
    }
}

/// Decide whether a page's next-page reference should be followed.
///
/// The cursor is followed only when present, non-empty, and on the same
/// host as the content domain; anything else makes the page terminal.
pub fn follow_next(next_page_url: Option<&str>, domain: &str) -> Option<String> {
    let next = next_page_url?.trim();
    if next.is_empty() {
        return None;
    }
    if !same_domain(next, domain) {
        log::warn!("Ignoring off-domain next page cursor: {next}");
        return None;
    }
    Some(next.to_string())
}
