#![cfg(feature = "ssr")]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use deafability_web::{
    api::{ApiClient, CsrfSource, HttpTransport, JobQuery},
    config::ClientConfig,
    error::ApiError,
    player::{report_completion, CompletionStrategy},
};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
struct Seen {
    path: &'static str,
    csrf: Option<String>,
    accept: Option<String>,
    query: Option<String>,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn seen(path: &'static str, headers: &HeaderMap, query: Option<String>, body: Option<Value>) -> Seen {
    Seen {
        path,
        csrf: header_value(headers, "x-csrftoken"),
        accept: header_value(headers, "accept"),
        query,
        body,
    }
}

async fn jobs(State(log): State<Log>, headers: HeaderMap, RawQuery(query): RawQuery) -> Json<Value> {
    log.lock().unwrap().push(seen("/jobs/", &headers, query, None));
    Json(json!({"results": [{"id": 1, "title": "Clerk", "position_type": "Full time"}]}))
}

async fn enroll(State(log): State<Log>, headers: HeaderMap, body: String) -> StatusCode {
    let body = serde_json::from_str(&body).ok();
    log.lock().unwrap().push(seen("/courses/4/enroll/", &headers, None, body));
    StatusCode::NO_CONTENT
}

async fn progress(State(log): State<Log>, headers: HeaderMap, body: String) -> Json<Value> {
    let body = serde_json::from_str(&body).ok();
    log.lock().unwrap().push(seen("/courses/1/progress/", &headers, None, body));
    Json(json!({"percent": 50.0}))
}

async fn broken() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body>Server Error (500)</body></html>",
    )
}

/// Serves a tiny stand-in backend under `/api` and returns its API root.
async fn serve() -> (String, Log) {
    let log = Log::default();
    let app = Router::new()
        .route("/api/jobs/", get(jobs))
        .route("/api/courses/4/enroll/", post(enroll))
        .route("/api/courses/1/progress/", post(progress))
        .route("/api/courses/7/", get(broken))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), log)
}

fn client(api_root: &str, cookies: &str) -> ApiClient<HttpTransport> {
    let config = ClientConfig::resolve("localhost", Some(api_root));
    let transport = HttpTransport::new(config, CsrfSource::Fixed(cookies.to_string())).unwrap();
    ApiClient::new(transport)
}

#[tokio::test]
async fn job_filters_and_csrf_token_reach_the_backend() {
    let (root, log) = serve().await;
    let client = client(&root, "sessionid=s; csrftoken=t");

    let query = JobQuery {
        q: "a&b".to_string(),
        position_type: "Full time".to_string(),
    };
    let jobs = client.jobs(&query).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "Clerk");

    let blank = client.jobs(&JobQuery::default()).await.unwrap();
    assert_eq!(blank.len(), 1);

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].csrf.as_deref(), Some("t"));
    assert_eq!(seen[0].accept.as_deref(), Some("application/json"));
    assert_eq!(seen[0].query.as_deref(), Some("q=a%26b&position_type=Full+time"));
    assert_eq!(
        format!("?{}", seen[0].query.as_deref().unwrap_or_default()),
        query.to_query_string()
    );
    assert_eq!(seen[1].query, None);
}

#[tokio::test]
async fn writes_carry_token_and_json_body() {
    let (root, log) = serve().await;
    let client = client(&root, "csrftoken=t");

    client.enroll(4).await.unwrap();
    // The complete endpoint is missing here, so the progress update is used.
    let used = report_completion(&client, 1, 2).await.unwrap();
    assert_eq!(used, CompletionStrategy::ProgressUpdate);

    let seen = log.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].path, "/courses/4/enroll/");
    assert_eq!(seen[0].csrf.as_deref(), Some("t"));
    assert_eq!(seen[0].body, None);
    assert_eq!(seen[1].path, "/courses/1/progress/");
    assert_eq!(seen[1].csrf.as_deref(), Some("t"));
    assert_eq!(seen[1].body, Some(json!({"lesson_id": 2, "completed": true})));
}

#[tokio::test]
async fn missing_cookie_sends_no_token() {
    let (root, log) = serve().await;
    let client = client(&root, "sessionid=s");

    client.jobs(&JobQuery::default()).await.unwrap();
    assert_eq!(log.lock().unwrap()[0].csrf, None);
}

#[tokio::test]
async fn html_error_page_maps_to_status() {
    let (root, _log) = serve().await;
    let client = client(&root, "csrftoken=t");

    match client.course(7).await {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("Server Error (500)"), "{body}");
        }
        other => panic!("expected a status error, got {other:?}"),
    }

    assert_eq!(client.course(8).await, Err(ApiError::NotFound));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}/api"), "csrftoken=t");
    assert!(matches!(client.courses().await, Err(ApiError::Transport(_))));
}
