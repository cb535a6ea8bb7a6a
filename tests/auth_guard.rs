//! Access-guard integration tests.
//!
//! These spin up a real server on a random port with a trivial protected
//! route and no database, so they exercise the full request path: header
//! extraction, token verification, and identity propagation into the
//! handler.

use actix_web::{rt, web, App, HttpResponse, HttpServer, Responder};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::TcpListener;

use taskpad::auth::{issue_token, AuthGuard, Identity};
use taskpad::config::AuthConfig;

const SECRET: &str = "guard-integration-secret";

fn auth_config() -> AuthConfig {
    AuthConfig::new(SECRET, chrono::Duration::hours(1))
}

/// Echoes the identity the guard attached to the request.
async fn whoami(who: Identity) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "user_id": who.user_id,
        "email": who.email
    }))
}

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    rt::spawn(async move {
        HttpServer::new(|| {
            App::new().service(
                web::scope("/api").service(
                    web::scope("/private")
                        .wrap(AuthGuard::new(auth_config()))
                        .route("", web::get().to(whoami)),
                ),
            )
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    format!("http://127.0.0.1:{}/api/private", port)
}

async fn get_with_header(url: &str, header: Option<&str>) -> (reqwest::StatusCode, Value) {
    let client = reqwest::Client::new();
    let mut request = client.get(url);
    if let Some(value) = header {
        request = request.header("Authorization", value);
    }
    let response = request.send().await.expect("Failed to send request");
    let status = response.status();
    let body: Value = response.json().await.expect("Failed to read body");
    (status, body)
}

#[actix_rt::test]
async fn test_missing_header_is_rejected() {
    let url = spawn_server().await;

    let (status, body) = get_with_header(&url, None).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Authentication token not provided");
}

#[actix_rt::test]
async fn test_non_bearer_scheme_is_rejected() {
    let url = spawn_server().await;

    let (status, body) = get_with_header(&url, Some("Basic dXNlcjpwYXNz")).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid authorization header format");
}

#[actix_rt::test]
async fn test_extra_segments_are_rejected() {
    let url = spawn_server().await;
    let token = issue_token(1, "three@example.com", &auth_config()).unwrap();

    let header = format!("Bearer {} trailing", token);
    let (status, body) = get_with_header(&url, Some(&header)).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid authorization header format");
}

#[actix_rt::test]
async fn test_bare_scheme_is_rejected() {
    let url = spawn_server().await;

    let (status, body) = get_with_header(&url, Some("Bearer")).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid authorization header format");
}

#[actix_rt::test]
async fn test_garbage_token_is_rejected() {
    let url = spawn_server().await;

    let (status, body) = get_with_header(&url, Some("Bearer not.a.jwt")).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[actix_rt::test]
async fn test_token_from_other_secret_is_rejected() {
    let url = spawn_server().await;

    let other = AuthConfig::new("a-completely-different-secret", chrono::Duration::hours(1));
    let token = issue_token(1, "other@example.com", &other).unwrap();

    let header = format!("Bearer {}", token);
    let (status, body) = get_with_header(&url, Some(&header)).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[actix_rt::test]
async fn test_expired_token_is_rejected() {
    let url = spawn_server().await;

    let stale = AuthConfig::new(SECRET, chrono::Duration::hours(-1));
    let token = issue_token(1, "stale@example.com", &stale).unwrap();

    let header = format!("Bearer {}", token);
    let (status, _) = get_with_header(&url, Some(&header)).await;
    assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_valid_token_reaches_handler() {
    let url = spawn_server().await;
    let token = issue_token(42, "valid@example.com", &auth_config()).unwrap();

    let header = format!("Bearer {}", token);
    let (status, body) = get_with_header(&url, Some(&header)).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["user_id"], 42);
    assert_eq!(body["email"], "valid@example.com");
}

#[actix_rt::test]
async fn test_user_id_zero_authenticates() {
    let url = spawn_server().await;
    let token = issue_token(0, "zero@example.com", &auth_config()).unwrap();

    let header = format!("Bearer {}", token);
    let (status, body) = get_with_header(&url, Some(&header)).await;
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body["user_id"], 0);
}
