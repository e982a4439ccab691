use std::sync::Arc;

use axum::Form;
use axum::extract::{Extension, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use coachdesk_application::{ActionRequest, Workbench};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::warn;

use crate::auth::end_session;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ActionForm {
    action: String,
    record_type: String,
    record_id: Option<String>,
    current: Option<String>,
}

impl From<ActionForm> for ActionRequest {
    fn from(form: ActionForm) -> Self {
        Self {
            action: form.action,
            record_type: form.record_type,
            record_id: form.record_id.filter(|id| !id.trim().is_empty()),
            current: form.current,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConfirmationForm {
    decision: String,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(workbench): Extension<Arc<Workbench>>,
    session: Session,
) -> ApiResult<Response> {
    let view = workbench.snapshot().await;
    if view.session_expired {
        warn!(admin = %view.admin_email, "backend rejected the access token, signing out");
        end_session(&state, &session).await?;
        return Ok(Redirect::to("/login").into_response());
    }

    Ok(state.templates.dashboard_page(&view)?.into_response())
}

pub async fn select_section_handler(
    Extension(workbench): Extension<Arc<Workbench>>,
    Path(target_id): Path<String>,
) -> Redirect {
    workbench.select_section(&target_id).await;
    Redirect::to("/dashboard")
}

pub async fn action_handler(
    Extension(workbench): Extension<Arc<Workbench>>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    workbench.dispatch(&form.into()).await;
    Redirect::to("/dashboard")
}

pub async fn confirmation_handler(
    Extension(workbench): Extension<Arc<Workbench>>,
    Form(form): Form<ConfirmationForm>,
) -> Redirect {
    workbench
        .resolve_confirmation(form.decision == "confirm")
        .await;
    Redirect::to("/dashboard")
}
