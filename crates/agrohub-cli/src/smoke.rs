//! End-to-end smoke test against a running AgroHub API.
//!
//! Logs in, lists products with the returned bearer token, and checks that
//! both responses honour the envelope contract. Meant to be run by hand after
//! a deploy.

use std::fmt;
use std::num::NonZeroU64;

use agrohub_core::{Envelope, PaginationMeta};
use anyhow::{Context, Result, anyhow, bail, ensure};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LISTING_PATH: &str = "/api/products";

/// What the smoke test talks to and with which credentials.
///
/// - `API_BASE_URL` (default `http://localhost:3000`)
/// - `SMOKE_EMAIL`, `SMOKE_PASSWORD`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmokeTestConfig {
    pub base_url: String,
    pub email: String,
    pub password: String,
    pub page: u64,
    pub page_size: u64,
}

impl SmokeTestConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            email: std::env::var("SMOKE_EMAIL").unwrap_or_default(),
            password: std::env::var("SMOKE_PASSWORD").unwrap_or_default(),
            page: 1,
            page_size: 10,
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), LOGIN_PATH)
    }

    pub fn listing_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), LISTING_PATH)
    }
}

/// Parses `body` as an envelope and checks the invariants a client relies on.
///
/// - `ok`, `message` and an RFC 3339 `timestamp` are present
/// - success bodies carry a `data` key (possibly `null`); error bodies do not
/// - `pagination` and `details` only appear on the matching shape
/// - `details`, when absent, is omitted rather than `null`
/// - the pagination block is internally consistent
pub fn check_contract(body: &Value) -> Result<Envelope> {
    let object = body
        .as_object()
        .ok_or_else(|| anyhow!("Response body is not a JSON object"))?;

    if object.get("details") == Some(&Value::Null) {
        bail!("`details` must be omitted, not null");
    }

    let envelope: Envelope = serde_json::from_value(body.clone())
        .context("Response body does not match the envelope contract")?;

    if envelope.ok {
        ensure!(envelope.data.is_some(), "Success envelope is missing `data`");
        ensure!(envelope.details.is_none(), "Success envelope carries `details`");
    } else {
        ensure!(envelope.data.is_none(), "Error envelope carries `data`");
        ensure!(envelope.pagination.is_none(), "Error envelope carries `pagination`");
    }

    if let Some(meta) = envelope.pagination {
        check_pagination(&meta)?;
    }

    Ok(envelope)
}

fn check_pagination(meta: &PaginationMeta) -> Result<()> {
    let page_size = NonZeroU64::new(meta.page_size)
        .ok_or_else(|| anyhow!("Pagination block has page_size 0"))?;
    let expected = PaginationMeta::new(meta.total, meta.current_page, page_size);

    ensure!(
        *meta == expected,
        "Inconsistent pagination block: got {meta:?}, expected {expected:?}"
    );
    Ok(())
}

/// Pulls the bearer token out of a login envelope's `data`.
pub fn extract_token(envelope: &Envelope) -> Option<&str> {
    let data = envelope.data.as_ref()?;

    ["token", "access_token", "accessToken"]
        .iter()
        .find_map(|key| data.get(key).and_then(Value::as_str))
        .filter(|token| !token.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmokeReport {
    pub login_status: StatusCode,
    pub listing_status: StatusCode,
    pub items: Option<usize>,
    pub pagination: Option<PaginationMeta>,
}

impl fmt::Display for SmokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Login:    {}", self.login_status)?;
        write!(f, "Listing:  {}", self.listing_status)?;

        if let Some(items) = self.items {
            write!(f, ", {items} item(s) on this page")?;
        }

        match &self.pagination {
            Some(meta) => write!(
                f,
                "\nPage:     {}/{} ({} total, next: {}, previous: {})",
                meta.current_page, meta.total_pages, meta.total, meta.has_next, meta.has_previous
            ),
            None => write!(f, "\nPage:     (unpaginated response)"),
        }
    }
}

async fn read_envelope(response: reqwest::Response) -> Result<(StatusCode, Envelope)> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .with_context(|| format!("Response with status {status} is not JSON"))?;

    Ok((status, check_contract(&body)?))
}

/// Runs login followed by one listing call.
pub async fn run(client: &Client, config: &SmokeTestConfig) -> Result<SmokeReport> {
    ensure!(
        !config.email.is_empty() && !config.password.is_empty(),
        "Smoke test credentials are missing (set SMOKE_EMAIL/SMOKE_PASSWORD or pass --email/--password)"
    );

    info!(url = %config.login_url(), "Logging in");
    let response = client
        .post(config.login_url())
        .json(&json!({ "email": config.email, "password": config.password }))
        .send()
        .await
        .context("Login request failed")?;
    let (login_status, login) = read_envelope(response).await?;

    if !login.ok {
        bail!("Login rejected ({login_status}): {}", login.message);
    }
    let token = extract_token(&login)
        .ok_or_else(|| anyhow!("Login succeeded but no token was found in `data`"))?;

    info!(url = %config.listing_url(), page = config.page, page_size = config.page_size, "Fetching listing");
    let response = client
        .get(config.listing_url())
        .bearer_auth(token)
        .query(&[("page", config.page), ("page_size", config.page_size)])
        .send()
        .await
        .context("Listing request failed")?;
    let (listing_status, listing) = read_envelope(response).await?;

    if !listing.ok {
        bail!("Listing rejected ({listing_status}): {}", listing.message);
    }
    if listing.pagination.is_none() {
        warn!("Listing response is not paginated");
    }

    Ok(SmokeReport {
        login_status,
        listing_status,
        items: listing.data.as_ref().and_then(Value::as_array).map(Vec::len),
        pagination: listing.pagination,
    })
}
