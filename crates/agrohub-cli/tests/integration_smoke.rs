use std::net::SocketAddr;

use agrohub_cli::smoke::{self, SmokeTestConfig};
use agrohub_core::{PaginationMeta, PaginationParams, error, paginated_success, success};
use axum::Router;
use axum::extract::Json;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::routing::{get, post};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const HARVESTS: [&str; 10] = [
    "maize", "wheat", "sorghum", "millet", "cassava", "yam", "cowpea", "groundnut", "rice",
    "barley",
];
const PASSWORD: &str = "harvest2025";
const VALID_TOKEN: &str = "valid-token";

async fn login(Json(body): Json<Value>) -> Response {
    let token = match (body["email"].as_str(), body["password"].as_str()) {
        (Some("farmer@agrohub.app"), Some(PASSWORD)) => VALID_TOKEN,
        (Some("revoked@agrohub.app"), Some(PASSWORD)) => "revoked-token",
        _ => return error("Invalid credentials", Some(StatusCode::UNAUTHORIZED), None),
    };

    success(json!({ "access_token": token }), Some("Login successful"), None)
}

async fn list_products(headers: HeaderMap, params: PaginationParams) -> Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if bearer != Some(VALID_TOKEN) {
        return error("Unauthorized", Some(StatusCode::UNAUTHORIZED), None);
    }

    let items: Vec<&str> = HARVESTS
        .iter()
        .skip(params.offset() as usize)
        .take(params.page_size().get() as usize)
        .copied()
        .collect();

    paginated_success(
        items,
        HARVESTS.len() as u64,
        params.page(),
        params.page_size(),
        None,
    )
}

async fn spawn_api() -> SocketAddr {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/products", get(list_products));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn config(addr: SocketAddr, email: &str, password: &str) -> SmokeTestConfig {
    SmokeTestConfig {
        base_url: format!("http://{addr}/"),
        email: email.to_string(),
        password: password.to_string(),
        page: 2,
        page_size: 3,
    }
}

#[tokio::test]
async fn test_smoke_run_logs_in_and_lists_page() {
    let addr = spawn_api().await;

    let report = smoke::run(&Client::new(), &config(addr, "farmer@agrohub.app", PASSWORD))
        .await
        .unwrap();

    assert_eq!(report.login_status, StatusCode::OK);
    assert_eq!(report.listing_status, StatusCode::OK);
    assert_eq!(report.items, Some(3));
    assert_eq!(
        report.pagination,
        Some(PaginationMeta {
            total: 10,
            current_page: 2,
            page_size: 3,
            total_pages: 4,
            has_next: true,
            has_previous: true,
        })
    );
}

#[tokio::test]
async fn test_smoke_run_fails_on_rejected_login() {
    let addr = spawn_api().await;

    let err = smoke::run(&Client::new(), &config(addr, "farmer@agrohub.app", "wrong"))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Login rejected"));
    assert!(message.contains("401"));
    assert!(message.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_smoke_run_fails_on_unauthorized_listing() {
    let addr = spawn_api().await;

    let err = smoke::run(&Client::new(), &config(addr, "revoked@agrohub.app", PASSWORD))
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Listing rejected"));
    assert!(message.contains("401"));
    assert!(message.contains("Unauthorized"));
}
