//! Pagination utilities for API responses.
//!
//! Listing endpoints accept page-based query parameters and answer with a
//! paginated envelope whose `pagination` block is derived here.
//!
//! # Query parameters
//!
//! - `page`: Page number (1-indexed, default: 1)
//! - `page_size` (alias `limit`): Items per page (1-100, default: 10)
//!
//! # Pagination block
//!
//! ```json
//! {
//!   "total": 10,
//!   "current_page": 2,
//!   "page_size": 3,
//!   "total_pages": 4,
//!   "has_next": true,
//!   "has_previous": true
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use agrohub_core::{paginated_success, PaginationParams};
//!
//! async fn list_products(State(state): State<AppState>, params: PaginationParams) -> Response {
//!     let products = fetch_products(&state.db, params.page_size().get(), params.offset()).await?;
//!     let total = count_products(&state.db).await?;
//!     paginated_success(products, total, params.page(), params.page_size(), None)
//! }
//! ```

use std::num::NonZeroU64;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::serde::deserialize_optional_i64;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Page position and navigation flags for a paginated envelope.
///
/// Built only through [`PaginationMeta::new`], so the derived fields always
/// agree with `total`, `current_page` and `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-indexed)
    pub current_page: u64,
    /// Items requested per page
    pub page_size: u64,
    /// Number of pages, `ceil(total / page_size)`
    pub total_pages: u64,
    /// Whether a page exists after the current one
    pub has_next: bool,
    /// Whether a page exists before the current one
    pub has_previous: bool,
}

impl PaginationMeta {
    /// Derives the pagination block.
    ///
    /// `page` is taken as given: a page past the end yields `has_next = false`
    /// and is not clamped. A zero page size cannot be expressed.
    #[must_use]
    pub fn new(total: u64, page: u64, page_size: NonZeroU64) -> Self {
        let total_pages = total.div_ceil(page_size.get());

        Self {
            total,
            current_page: page,
            page_size: page_size.get(),
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

/// Query parameters for page-based listing.
///
/// Values are clamped rather than rejected:
///
/// - `page` is clamped to a minimum of 1
/// - `page_size` is clamped to the range [1, 100]
///
/// Used directly as an extractor; malformed values produce a 400 error
/// envelope.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, alias = "limit", deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Returns the effective page number, at least 1.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1) as u64
    }

    /// Returns the effective page size, clamped to [1, 100].
    #[must_use]
    pub fn page_size(&self) -> NonZeroU64 {
        let size = self
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u64;
        NonZeroU64::new(size).unwrap_or(NonZeroU64::MIN)
    }

    /// Number of rows to skip for the current page.
    ///
    /// Saturates at `u64::MAX` for absurdly large pages, which skips every row.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.page_size().get())
    }

    /// Pagination block for a result set of `total` items.
    #[must_use]
    pub fn meta(&self, total: u64) -> PaginationMeta {
        PaginationMeta::new(total, self.page(), self.page_size())
    }
}

impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(anyhow::anyhow!(
                    "Invalid pagination parameters: {}",
                    rejection.body_text()
                ))
            })?;

        Ok(params)
    }
}
