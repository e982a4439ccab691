use async_trait::async_trait;
use coachdesk_application::{AuthProvider, AuthSession, Credentials};
use coachdesk_core::{AdminIdentity, AppError, AppResult};
use serde_json::{Value, json};

use super::{SupabaseClient, read_json};

#[async_trait]
impl AuthProvider for SupabaseClient {
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<AuthSession> {
        let mut url = self.endpoint(&["auth", "v1", "token"]);
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .http_client
            .post(url)
            .header("apikey", self.anon_key.as_str())
            .json(&json!({
                "email": credentials.email.trim(),
                "password": credentials.password,
            }))
            .send()
            .await
            .map_err(|error| AppError::Unauthorized(format!("sign-in request failed: {error}")))?;

        let body = read_json(response, AppError::Unauthorized).await?;
        session_from_token_response(&body)
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint(&["auth", "v1", "logout"]))
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|error| AppError::Internal(format!("sign-out request failed: {error}")))?;

        read_json(response, AppError::Internal).await?;
        Ok(())
    }
}

pub(super) fn session_from_token_response(body: &Value) -> AppResult<AuthSession> {
    let access_token = body
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Unauthorized("token response has no access_token".to_owned()))?;
    let user = body
        .get("user")
        .ok_or_else(|| AppError::Unauthorized("token response has no user".to_owned()))?;
    let subject = user.get("id").and_then(Value::as_str).unwrap_or_default();
    let email = user.get("email").and_then(Value::as_str).unwrap_or_default();

    Ok(AuthSession {
        identity: AdminIdentity::new(subject, email),
        access_token: access_token.to_owned(),
    })
}
