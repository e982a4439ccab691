use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use coachdesk_application::SessionGate;
use coachdesk_infrastructure::InMemoryBackend;
use serde_json::json;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use super::build_router;
use crate::state::AppState;
use crate::views::Templates;
use crate::workbenches::WorkbenchRegistry;

const ADMIN_EMAIL: &str = "coach@studio.example";
const ADMIN_PASSWORD: &str = "correct horse";
const BOUNDARY: &str = "coachdesk-test-boundary";

async fn test_app() -> Router {
    test_app_parts().await.0
}

async fn test_app_parts() -> (Router, WorkbenchRegistry, InMemoryBackend) {
    let backend = InMemoryBackend::new();
    backend.add_admin(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let seeded = backend
        .seed_row(
            "bookings",
            json!({
                "id": "booking-1",
                "full_name": "Amina Wanjiru",
                "email": "amina@example.com",
                "service": "Online Coaching",
                "is_contacted": false,
                "created_at": "2026-10-01T08:30:00Z"
            }),
        )
        .await;
    assert!(seeded.is_ok());

    let workbenches = WorkbenchRegistry::new(Duration::from_secs(30 * 60));
    let state = AppState {
        session_gate: SessionGate::new(Arc::new(backend.clone())),
        connector: Arc::new(backend.clone()),
        workbenches: workbenches.clone(),
        templates: Templates::new().unwrap_or_else(|_| unreachable!()),
        default_section: "bookings".to_owned(),
        dev_objects: Some(backend.clone()),
    };

    let router = build_router(state, SessionManagerLayer::new(MemoryStore::default()));
    (router, workbenches, backend)
}

fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_owned()))
        .unwrap_or_else(|_| unreachable!())
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::empty())
        .unwrap_or_else(|_| unreachable!())
}

fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_owned)
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!())
}

async fn sign_in(app: &Router) -> String {
    sign_in_with(app, None).await
}

async fn sign_in_with(app: &Router, cookie: Option<&str>) -> String {
    let response = send(
        app,
        form_request(
            "/auth/login",
            "email=coach%40studio.example&password=correct+horse",
            cookie,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    session_cookie(&response).unwrap_or_default()
}

async fn dashboard(app: &Router, cookie: &str) -> String {
    let response = send(app, get_request("/dashboard", Some(cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

fn form_token(page: &str) -> String {
    let marker = "name=\"form_token\" value=\"";
    page.split_once(marker)
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(token, _)| token.to_owned())
        .unwrap_or_default()
}

fn multipart_body(fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;
    let response = send(&app, get_request("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn dashboard_requires_sign_in() {
    let app = test_app().await;

    let response = send(&app, get_request("/dashboard", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));

    let response = send(
        &app,
        form_request("/dashboard/actions", "action=add&record_type=posts", None),
    )
    .await;
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn wrong_password_keeps_login_form_with_backend_message() {
    let app = test_app().await;

    let response = send(
        &app,
        form_request(
            "/auth/login",
            "email=coach%40studio.example&password=hunter2",
            None,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());
    let page = body_text(response).await;
    assert!(page.contains("id=\"login-form\""));
    assert!(page.contains("Invalid login credentials"));
    assert!(!page.contains("dashboard-section"));
}

#[tokio::test]
async fn sign_in_mounts_default_section_and_greets_once() {
    let app = test_app().await;
    let cookie = sign_in(&app).await;

    let first = dashboard(&app, &cookie).await;
    assert!(first.contains("Welcome back!"));
    assert!(first.contains("View Booking Requests"));
    assert!(first.contains("Amina Wanjiru - Online Coaching"));

    let second = dashboard(&app, &cookie).await;
    assert!(!second.contains("Welcome back!"));

    let login = send(&app, get_request("/login", Some(cookie.as_str()))).await;
    assert_eq!(location(&login), Some("/dashboard"));
}

#[tokio::test]
async fn delete_asks_for_confirmation_before_removing() {
    let app = test_app().await;
    let cookie = sign_in(&app).await;
    let _ = dashboard(&app, &cookie).await;

    let response = send(
        &app,
        form_request(
            "/dashboard/actions",
            "action=delete&record_type=bookings&record_id=booking-1",
            Some(cookie.as_str()),
        ),
    )
    .await;
    assert_eq!(location(&response), Some("/dashboard"));
    let page = dashboard(&app, &cookie).await;
    assert!(page.contains("Are you sure?"));
    assert!(page.contains("This action cannot be undone."));

    let _ = send(
        &app,
        form_request("/dashboard/confirmation", "decision=cancel", Some(cookie.as_str())),
    )
    .await;
    let page = dashboard(&app, &cookie).await;
    assert!(page.contains("Deletion cancelled."));
    assert!(page.contains("Amina Wanjiru"));

    let _ = send(
        &app,
        form_request(
            "/dashboard/actions",
            "action=delete&record_type=bookings&record_id=booking-1",
            Some(cookie.as_str()),
        ),
    )
    .await;
    let _ = send(
        &app,
        form_request("/dashboard/confirmation", "decision=confirm", Some(cookie.as_str())),
    )
    .await;
    let page = dashboard(&app, &cookie).await;
    assert!(page.contains("Item deleted successfully!"));
    assert!(page.contains("No booking requests yet."));
}

#[tokio::test]
async fn schedule_form_submission_lands_in_day_column() {
    let app = test_app().await;
    let cookie = sign_in(&app).await;

    let _ = send(
        &app,
        form_request("/dashboard/sections/schedule", "", Some(cookie.as_str())),
    )
    .await;
    let _ = send(
        &app,
        form_request(
            "/dashboard/actions",
            "action=add&record_type=schedule",
            Some(cookie.as_str()),
        ),
    )
    .await;
    let page = dashboard(&app, &cookie).await;
    assert!(page.contains("Add New Class"));
    let token = form_token(&page);
    assert!(!token.is_empty());

    let body = multipart_body(&[
        ("record_type", "schedule"),
        ("form_token", token.as_str()),
        ("class_name", "Mobility Flow"),
        ("day_of_week", "5"),
        ("start_time", "18:00"),
        ("end_time", "19:00"),
    ]);
    let request = Request::builder()
        .method("POST")
        .uri("/dashboard/forms")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, &cookie)
        .body(Body::from(body))
        .unwrap_or_else(|_| unreachable!());
    let response = send(&app, request).await;
    assert_eq!(location(&response), Some("/dashboard"));

    let page = dashboard(&app, &cookie).await;
    assert!(page.contains("Class added successfully!"));
    assert!(page.contains("Mobility Flow 18:00 - 19:00"));
}

#[tokio::test]
async fn cross_site_mutations_are_rejected() {
    let app = test_app().await;
    let mut request = form_request(
        "/auth/login",
        "email=coach%40studio.example&password=correct+horse",
        None,
    );
    request
        .headers_mut()
        .insert("sec-fetch-site", "cross-site".parse().unwrap_or_else(|_| unreachable!()));

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = test_app().await;
    let cookie = sign_in(&app).await;

    let response = send(&app, form_request("/auth/logout", "", Some(cookie.as_str()))).await;
    assert_eq!(location(&response), Some("/login"));

    let response = send(&app, get_request("/dashboard", Some(cookie.as_str()))).await;
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn signing_in_again_replaces_the_previous_workbench() {
    let (app, workbenches, _) = test_app_parts().await;
    let first = sign_in(&app).await;
    assert_eq!(workbenches.live_count().await, 1);

    let second = sign_in_with(&app, Some(first.as_str())).await;
    assert_eq!(workbenches.live_count().await, 1);

    let response = send(&app, get_request("/dashboard", Some(first.as_str()))).await;
    assert_eq!(location(&response), Some("/login"));
    let page = dashboard(&app, &second).await;
    assert!(page.contains("View Booking Requests"));
}

#[tokio::test]
async fn rejected_access_token_sends_admin_back_to_login() {
    let (app, workbenches, backend) = test_app_parts().await;
    let cookie = sign_in(&app).await;
    let _ = dashboard(&app, &cookie).await;

    backend.expire_sessions().await;
    let response = send(
        &app,
        form_request("/dashboard/sections/events", "", Some(cookie.as_str())),
    )
    .await;
    assert_eq!(location(&response), Some("/dashboard"));

    let response = send(&app, get_request("/dashboard", Some(cookie.as_str()))).await;
    assert_eq!(location(&response), Some("/login"));
    assert_eq!(workbenches.live_count().await, 0);

    let response = send(&app, get_request("/login", Some(cookie.as_str()))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn stored_post_markup_is_escaped_in_the_edit_form() {
    let (app, _, backend) = test_app_parts().await;
    let seeded = backend
        .seed_row(
            "posts",
            json!({
                "id": "post-1",
                "title": "Week 1",
                "post_type": "blog",
                "content": "<p>Hi</p><img src=x onerror=alert(1)>",
                "image_url": "/dev-storage/post-images/cover.jpg"
            }),
        )
        .await;
    assert!(seeded.is_ok());
    let cookie = sign_in(&app).await;

    let _ = send(
        &app,
        form_request("/dashboard/sections/posts", "", Some(cookie.as_str())),
    )
    .await;
    let _ = send(
        &app,
        form_request(
            "/dashboard/actions",
            "action=edit&record_type=posts&record_id=post-1",
            Some(cookie.as_str()),
        ),
    )
    .await;
    let page = dashboard(&app, &cookie).await;

    assert!(page.contains("Edit Post"));
    assert!(!page.contains("<img src=x onerror"));
    assert!(page.contains("&lt;img src=x onerror=alert(1)&gt;"));
    assert!(page.contains("dangerouslyPasteHTML(input.value)"));
}
