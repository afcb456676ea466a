use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use moodlist::{
    Error, ErrorKind,
    spotify::{SpotifyClient, http_client},
};
use serde_json::json;

type Calls = Arc<AtomicU32>;

/// Serves `app` on an ephemeral local port and returns its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A `/me` endpoint that answers with `failure` for the first `failures`
/// calls, then with a user profile.
async fn flaky_api(failures: u32, failure: fn() -> Response) -> (String, Calls) {
    let calls = Calls::default();
    let app = Router::new()
        .route(
            "/me",
            get(move |State(calls): State<Calls>| async move {
                if calls.fetch_add(1, Ordering::SeqCst) < failures {
                    failure()
                } else {
                    Json(json!({ "id": "listener", "display_name": "Listener" })).into_response()
                }
            }),
        )
        .with_state(calls.clone());
    (spawn(app).await, calls)
}

fn client(base: &str, timeout: Duration) -> SpotifyClient {
    SpotifyClient::new(http_client(timeout).unwrap(), base, "token".to_string())
}

fn bad_gateway() -> Response {
    StatusCode::BAD_GATEWAY.into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "no such user").into_response()
}

fn rate_limited_briefly() -> Response {
    (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "1")]).into_response()
}

fn rate_limited_for_long() -> Response {
    (StatusCode::TOO_MANY_REQUESTS, [(header::RETRY_AFTER, "600")]).into_response()
}

#[tokio::test]
async fn test_bad_gateway_is_retried() {
    let (base, calls) = flaky_api(1, bad_gateway).await;

    let user = client(&base, Duration::from_secs(5))
        .current_user()
        .await
        .unwrap();

    assert_eq!(user.id, "listener");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_bad_gateway_gives_up_after_three_attempts() {
    let (base, calls) = flaky_api(u32::MAX, bad_gateway).await;

    let err = client(&base, Duration::from_secs(5))
        .current_user()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Upstream {
            status: Some(502),
            retryable: true,
            ..
        }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_other_status_is_not_retried() {
    let (base, calls) = flaky_api(u32::MAX, not_found).await;

    let err = client(&base, Duration::from_secs(5))
        .current_user()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Upstream {
            status: Some(404),
            retryable: false,
            ..
        }
    ));
    assert!(err.to_string().contains("no such user"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_after_is_honoured() {
    let (base, calls) = flaky_api(1, rate_limited_briefly).await;

    let started = tokio::time::Instant::now();
    let user = client(&base, Duration::from_secs(5))
        .current_user()
        .await
        .unwrap();

    assert_eq!(user.id, "listener");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test]
async fn test_excessive_retry_after_fails_retryable() {
    let (base, calls) = flaky_api(u32::MAX, rate_limited_for_long).await;

    let err = client(&base, Duration::from_secs(5))
        .current_user()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Upstream {
            status: Some(429),
            ..
        }
    ));
    assert!(err.is_retryable());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_timeout_is_retryable_upstream_error() {
    let app = Router::new().route(
        "/me",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "id": "late" }))
        }),
    );
    let base = spawn(app).await;

    let err = client(&base, Duration::from_millis(200))
        .current_user()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamError);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_api_is_retryable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client(&base, Duration::from_secs(2))
        .current_user()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UpstreamError);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_api_url_is_config_error() {
    let err = client("not a url", Duration::from_secs(1))
        .current_user()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigError);
}

#[tokio::test]
async fn test_unexpected_payload_is_data_error() {
    let app = Router::new().route("/me", get(|| async { Json(json!({ "name": "no id" })) }));
    let base = spawn(app).await;

    let err = client(&base, Duration::from_secs(5))
        .current_user()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DataError);
}
