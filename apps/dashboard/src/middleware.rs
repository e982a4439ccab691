use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use coachdesk_core::{AdminIdentity, AppError};
use tower_sessions::Session;
use tracing::debug;
use url::Url;

use crate::auth::{SESSION_ADMIN_KEY, session_workbench_id};
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the admin's workbench or sends the browser back to the login page.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<AdminIdentity>(SESSION_ADMIN_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?;
    let workbench_id = session_workbench_id(&session).await?;

    let workbench = match (identity, workbench_id) {
        (Some(_), Some(workbench_id)) => state.workbenches.get(workbench_id).await,
        _ => None,
    };
    let Some(workbench) = workbench else {
        debug!(path = %request.uri().path(), "no signed-in admin, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    };

    request.extensions_mut().insert(workbench);
    Ok(next.run(request).await)
}

/// Rejects state-changing requests coming from another site.
pub async fn require_same_origin_for_mutations(
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site") {
            if fetch_site == HeaderValue::from_static("cross-site") {
                return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
            }
        }

        let origin_host = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .filter(|origin| *origin != "null")
            .map(|origin| {
                Url::parse(origin)
                    .ok()
                    .and_then(|url| url.host_str().map(|host| (host.to_owned(), url.port())))
            });
        let request_host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if let Some(origin_host) = origin_host {
            let origin_is_allowed = origin_host.is_some_and(|(host, port)| match port {
                Some(port) => request_host == format!("{host}:{port}"),
                None => request_host == host,
            });
            if !origin_is_allowed {
                return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
            }
        }
    }

    Ok(next.run(request).await)
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
