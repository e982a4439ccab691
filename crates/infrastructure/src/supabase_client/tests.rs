use coachdesk_application::ObjectStorage;
use coachdesk_core::AppError;
use reqwest::StatusCode;
use serde_json::json;

use super::auth::session_from_token_response;
use super::{SupabaseClient, backend_message, status_error};

fn client(base_url: &str) -> SupabaseClient {
    SupabaseClient::new(reqwest::Client::new(), base_url, "anon-key")
        .unwrap_or_else(|_| unreachable!())
}

#[test]
fn rejects_relative_or_non_http_base_urls() {
    assert!(SupabaseClient::new(reqwest::Client::new(), "project.supabase.co", "k").is_err());
    assert!(SupabaseClient::new(reqwest::Client::new(), "mailto:coach@example.com", "k").is_err());
}

#[test]
fn row_urls_carry_select_and_id_predicate() {
    let client = client("https://project.supabase.co");
    let url = client.row_url("event_bookings", "42");

    assert_eq!(url.path(), "/rest/v1/event_bookings");
    assert_eq!(url.query(), Some("select=*&id=eq.42"));
}

#[test]
fn base_url_trailing_slash_is_normalized() {
    let client = client("https://project.supabase.co/");
    assert_eq!(
        client.endpoint(&["auth", "v1", "logout"]).as_str(),
        "https://project.supabase.co/auth/v1/logout"
    );
}

#[test]
fn public_url_points_at_public_object_path() {
    let client = client("https://project.supabase.co");
    assert_eq!(
        client.public_url("post-images", "post-1700000000000-cover.jpg"),
        "https://project.supabase.co/storage/v1/object/public/post-images/post-1700000000000-cover.jpg"
    );
}

#[test]
fn backend_message_prefers_provider_fields() {
    assert_eq!(
        backend_message(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
        ),
        "Invalid login credentials"
    );
    assert_eq!(
        backend_message(StatusCode::NOT_FOUND, r#"{"message":"Bucket not found"}"#),
        "Bucket not found"
    );
    assert_eq!(
        backend_message(StatusCode::BAD_GATEWAY, ""),
        "backend responded with status 502 Bad Gateway"
    );
}

#[test]
fn token_response_becomes_session() {
    let session = session_from_token_response(&json!({
        "access_token": "jwt",
        "user": {"id": "8c1d", "email": "coach@studio.example"}
    }));

    let session = session.unwrap_or_else(|_| unreachable!());
    assert_eq!(session.access_token, "jwt");
    assert_eq!(session.identity.subject(), "8c1d");
}

#[test]
fn token_response_without_token_is_unauthorized() {
    let session = session_from_token_response(&json!({"user": {"id": "8c1d"}}));
    assert!(matches!(session, Err(AppError::Unauthorized(_))));
}

#[test]
fn expired_token_is_unauthorized_for_row_operations() {
    let expired = status_error(
        StatusCode::UNAUTHORIZED,
        r#"{"code":"PGRST301","message":"JWT expired"}"#,
        AppError::Persistence,
    );
    assert!(matches!(expired, AppError::Unauthorized(message) if message == "JWT expired"));

    let conflict = status_error(
        StatusCode::CONFLICT,
        r#"{"message":"duplicate key value"}"#,
        AppError::Persistence,
    );
    assert!(matches!(conflict, AppError::Persistence(message) if message == "duplicate key value"));
}
