use std::sync::Arc;

use coachdesk_application::{AuthSession, BackendConnector, BackendHandles};
use coachdesk_core::{AppError, AppResult};
use serde_json::Value;
use url::Url;

mod auth;
mod rest;
mod storage;

#[cfg(test)]
mod tests;

/// HTTP client for a Supabase-compatible backend (GoTrue auth, PostgREST rows
/// and Storage objects).
#[derive(Clone)]
pub struct SupabaseClient {
    http_client: reqwest::Client,
    base_url: Url,
    anon_key: String,
    access_token: Option<String>,
}

impl SupabaseClient {
    /// Creates an anonymous client for the project at `base_url`.
    pub fn new(
        http_client: reqwest::Client,
        base_url: &str,
        anon_key: impl Into<String>,
    ) -> AppResult<Self> {
        let base_url = Url::parse(base_url).map_err(|error| {
            AppError::Validation(format!("invalid backend URL '{base_url}': {error}"))
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "backend URL '{base_url}' must be an absolute http(s) URL"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            anon_key: anon_key.into(),
            access_token: None,
        })
    }

    /// Returns a copy whose row and storage calls carry the admin's access token.
    #[must_use]
    pub fn authorized(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            ..self.clone()
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let token = self.access_token.as_deref().unwrap_or(&self.anon_key);
        self.http_client
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token)
    }
}

/// Hands out per-session Supabase clients.
#[derive(Clone)]
pub struct SupabaseConnector {
    client: SupabaseClient,
}

impl SupabaseConnector {
    /// Creates a connector deriving session clients from `client`.
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl BackendConnector for SupabaseConnector {
    fn connect(&self, session: &AuthSession) -> BackendHandles {
        let client = Arc::new(self.client.authorized(session.access_token.as_str()));
        BackendHandles {
            records: client.clone(),
            storage: client,
        }
    }
}

/// Extracts the human-readable message of a failed backend response.
pub(crate) fn backend_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed.as_ref().and_then(|body| {
        ["msg", "message", "error_description", "error"]
            .into_iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
    });

    match message {
        Some(message) => message.to_owned(),
        None if !body.trim().is_empty() => body.trim().to_owned(),
        None => format!("backend responded with status {status}"),
    }
}

/// Maps a failed response. A 401 always means the access token was rejected,
/// whatever operation was running.
pub(crate) fn status_error(
    status: reqwest::StatusCode,
    body: &str,
    map_error: fn(String) -> AppError,
) -> AppError {
    let message = backend_message(status, body);
    if status == reqwest::StatusCode::UNAUTHORIZED {
        AppError::Unauthorized(message)
    } else {
        map_error(message)
    }
}

/// Reads a response, mapping non-success statuses with `map_error`.
pub(crate) async fn read_json(
    response: reqwest::Response,
    map_error: fn(String) -> AppError,
) -> AppResult<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| map_error(format!("failed to read backend response: {error}")))?;

    if !status.is_success() {
        return Err(status_error(status, &body, map_error));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body)
        .map_err(|error| map_error(format!("backend returned invalid JSON: {error}")))
}
