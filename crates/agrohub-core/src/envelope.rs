//! The JSON response envelope shared by every AgroHub endpoint.
//!
//! Three shapes exist on the wire:
//!
//! ```text
//! { "ok": true,  "message": "...", "data": <any>, "timestamp": "..." }
//! { "ok": true,  "message": "...", "data": <any>, "pagination": {...}, "timestamp": "..." }
//! { "ok": false, "message": "...", "details"?: <any>, "timestamp": "..." }
//! ```
//!
//! Clients branch on `ok` first and then on the presence of `pagination`.
//! A success may legitimately carry `"data": null`; an error never carries
//! `data`, and carries `details` only when the caller supplied some.

use std::num::NonZeroU64;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::PaginationMeta;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation completed successfully";
pub const DEFAULT_LIST_MESSAGE: &str = "Data listed successfully";
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// A single response body.
///
/// Constructed once per response and never mutated: the constructors stamp
/// the current time and the value is serialized as-is. It also deserializes,
/// so clients of the API can parse responses with the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub ok: bool,
    pub message: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde::deserialize_present",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(serialize_with = "crate::serde::serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn paginated(data: T, pagination: PaginationMeta, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            data: Some(data),
            pagination: Some(pagination),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Error envelope. A JSON `null` in `details` counts as "no details" and
    /// the key is omitted.
    pub fn error(message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            data: None,
            pagination: None,
            details: details.filter(|d| !d.is_null()),
            timestamp: Utc::now(),
        }
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.is_some()
    }

    fn kind(&self) -> &'static str {
        match (self.ok, self.is_paginated()) {
            (false, _) => "error",
            (true, true) => "paginated",
            (true, false) => "success",
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Writes the envelope as the body of a response with `status`.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        counter!("api_envelopes_total", "kind" => self.kind(), "status" => status.as_u16().to_string())
            .increment(1);

        (status, Json(self)).into_response()
    }
}

/// Success envelope: `{ ok: true, message, data, timestamp }`.
///
/// Defaults to [`DEFAULT_SUCCESS_MESSAGE`] and `200 OK`. The status is not
/// checked; picking a 2xx code is up to the caller.
pub fn success<T: Serialize>(
    data: T,
    message: Option<&str>,
    status: Option<StatusCode>,
) -> Response {
    Envelope::success(data, message.unwrap_or(DEFAULT_SUCCESS_MESSAGE))
        .into_response_with(status.unwrap_or(StatusCode::OK))
}

/// Paginated envelope, always `200 OK`.
///
/// `data` is passed through untouched; its length is not compared with
/// `page_size`. `total` is the count across all pages.
pub fn paginated_success<T: Serialize>(
    data: T,
    total: u64,
    page: u64,
    page_size: NonZeroU64,
    message: Option<&str>,
) -> Response {
    let pagination = PaginationMeta::new(total, page, page_size);

    Envelope::paginated(data, pagination, message.unwrap_or(DEFAULT_LIST_MESSAGE))
        .into_response_with(StatusCode::OK)
}

/// Error envelope: `{ ok: false, message, details?, timestamp }`.
///
/// Defaults to `400 Bad Request`.
pub fn error(
    message: impl Into<String>,
    status: Option<StatusCode>,
    details: Option<Value>,
) -> Response {
    Envelope::<Value>::error(message, details)
        .into_response_with(status.unwrap_or(DEFAULT_ERROR_STATUS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    async fn read(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn without_timestamp(mut value: Value) -> Value {
        value.as_object_mut().unwrap().remove("timestamp");
        value
    }

    #[tokio::test]
    async fn test_success_defaults() {
        let (status, body) = read(success(json!({"id": 1}), None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], DEFAULT_SUCCESS_MESSAGE);
        assert_eq!(body["data"], json!({"id": 1}));
        assert!(body.get("pagination").is_none());
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_success_custom_message_and_status() {
        let (status, body) =
            read(success(vec!["wheat"], Some("Created"), Some(StatusCode::CREATED))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Created");
        assert_eq!(body["data"], json!(["wheat"]));
    }

    #[tokio::test]
    async fn test_success_null_payload_keeps_data_key() {
        let (_, body) = read(success(Value::Null, Some("done"), None)).await;

        let object = body.as_object().unwrap();
        assert!(object.contains_key("data"));
        assert_eq!(object["data"], Value::Null);
        assert_eq!(body["message"], "done");
    }

    #[tokio::test]
    async fn test_success_timestamp_is_iso8601() {
        let (_, body) = read(success(1, None, None)).await;

        let stamp = body["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
        assert!(stamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_paginated_scenario() {
        let page_size = NonZeroU64::new(3).unwrap();
        let (status, body) = read(paginated_success(vec!["a", "b"], 10, 2, page_size, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], DEFAULT_LIST_MESSAGE);
        assert_eq!(body["data"], json!(["a", "b"]));
        assert_eq!(
            body["pagination"],
            json!({
                "total": 10,
                "current_page": 2,
                "page_size": 3,
                "total_pages": 4,
                "has_next": true,
                "has_previous": true
            })
        );
    }

    #[tokio::test]
    async fn test_paginated_empty() {
        let page_size = NonZeroU64::new(10).unwrap();
        let (_, body) = read(paginated_success(Vec::<String>::new(), 0, 1, page_size, None)).await;

        assert_eq!(body["pagination"]["total_pages"], 0);
        assert_eq!(body["pagination"]["has_next"], false);
        assert_eq!(body["pagination"]["has_previous"], false);
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_error_without_details_omits_key() {
        let (status, body) = read(error("Invalid input", None, None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let object = body.as_object().unwrap();
        assert_eq!(object["ok"], false);
        assert_eq!(object["message"], "Invalid input");
        assert!(!object.contains_key("details"));
        assert!(!object.contains_key("data"));
        assert!(object.contains_key("timestamp"));
    }

    #[tokio::test]
    async fn test_error_with_details() {
        let (status, body) = read(error(
            "User not found",
            Some(StatusCode::NOT_FOUND),
            Some(json!({"field": "email"})),
        ))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            without_timestamp(body),
            json!({"ok": false, "message": "User not found", "details": {"field": "email"}})
        );
    }

    #[tokio::test]
    async fn test_error_null_details_omitted() {
        let (_, body) = read(error("bad", None, Some(Value::Null))).await;
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_error_falsy_details_kept() {
        let (_, body) = read(error("bad", None, Some(json!(0)))).await;
        assert_eq!(body["details"], 0);
    }

    #[tokio::test]
    async fn test_same_inputs_same_shape() {
        let (_, first) = read(success(json!({"crop": "maize"}), None, None)).await;
        let (_, second) = read(success(json!({"crop": "maize"}), None, None)).await;

        assert_eq!(without_timestamp(first), without_timestamp(second));
    }

    #[test]
    fn test_deserialize_distinguishes_null_and_missing_data() {
        let with_null: Envelope = serde_json::from_value(json!({
            "ok": true, "message": "done", "data": null, "timestamp": "2025-03-01T09:30:00.000Z"
        }))
        .unwrap();
        let without: Envelope = serde_json::from_value(json!({
            "ok": false, "message": "nope", "timestamp": "2025-03-01T09:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(with_null.data, Some(Value::Null));
        assert_eq!(without.data, None);
        assert!(!without.is_paginated());
    }

    #[test]
    fn test_kind() {
        let meta = PaginationMeta::new(1, 1, NonZeroU64::MIN);
        assert_eq!(Envelope::success(1, "x").kind(), "success");
        assert_eq!(Envelope::paginated(1, meta, "x").kind(), "paginated");
        assert_eq!(Envelope::<Value>::error("x", None).kind(), "error");
    }
}
