use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use coachdesk_application::{Credentials, GateState, Workbench};
use coachdesk_core::{AdminIdentity, AppError};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub const SESSION_ADMIN_KEY: &str = "admin_identity";
const SESSION_WORKBENCH_KEY: &str = "workbench_id";
const SESSION_ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn login_page_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Response> {
    let identity = session
        .get::<AdminIdentity>(SESSION_ADMIN_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?;

    match GateState::from_session(identity) {
        GateState::Authenticated(_) => Ok(Redirect::to("/dashboard").into_response()),
        gate @ GateState::Unauthenticated { .. } => {
            Ok(state.templates.login_page(&gate)?.into_response())
        }
    }
}

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    let auth_session = match state.session_gate.login(&credentials).await {
        Ok(auth_session) => auth_session,
        Err(error) => {
            let status = match error {
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::UNAUTHORIZED,
            };
            let gate = GateState::Unauthenticated {
                login_error: Some(error.user_message()),
            };
            return Ok((status, state.templates.login_page(&gate)?).into_response());
        }
    };

    if let Some(previous) = session_workbench_id(&session).await? {
        state.workbenches.remove(previous).await;
    }

    let workbench = Workbench::new(
        auth_session.identity.clone(),
        state.connector.connect(&auth_session),
    );
    workbench.mount(&state.default_section).await;
    let workbench_id = state.workbenches.register(workbench).await;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to rotate session id: {error}")))?;
    session
        .insert(SESSION_ADMIN_KEY, &auth_session.identity)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;
    session
        .insert(SESSION_ACCESS_TOKEN_KEY, &auth_session.access_token)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;
    session
        .insert(SESSION_WORKBENCH_KEY, workbench_id)
        .await
        .map_err(|error| AppError::Internal(format!("failed to persist session: {error}")))?;

    info!(admin = %auth_session.identity.email(), "admin signed in");
    Ok(Redirect::to("/dashboard").into_response())
}

pub async fn logout_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Redirect> {
    let access_token = session
        .get::<String>(SESSION_ACCESS_TOKEN_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session token: {error}")))?;
    if let Some(access_token) = access_token {
        if let Err(error) = state.session_gate.logout(&access_token).await {
            warn!(error = %error, "backend sign-out failed, clearing local session anyway");
        }
    }

    end_session(&state, &session).await?;
    info!("admin signed out");
    Ok(Redirect::to("/login"))
}

pub async fn session_workbench_id(session: &Session) -> ApiResult<Option<Uuid>> {
    session
        .get::<Uuid>(SESSION_WORKBENCH_KEY)
        .await
        .map_err(|error| {
            ApiError::from(AppError::Internal(format!(
                "failed to read session workbench: {error}"
            )))
        })
}

/// Drops the admin's workbench and the session cookie.
pub async fn end_session(state: &AppState, session: &Session) -> ApiResult<()> {
    if let Some(workbench_id) = session_workbench_id(session).await? {
        state.workbenches.remove(workbench_id).await;
    }
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;
    Ok(())
}
