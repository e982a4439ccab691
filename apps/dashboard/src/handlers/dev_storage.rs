use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use coachdesk_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Serves objects uploaded to the in-memory backend.
pub async fn dev_object_handler(
    State(state): State<AppState>,
    Path((bucket, path)): Path<(String, String)>,
) -> ApiResult<Response> {
    let object = match &state.dev_objects {
        Some(backend) => backend.object(&bucket, &path).await,
        None => None,
    };
    let object =
        object.ok_or_else(|| AppError::NotFound(format!("no object '{path}' in {bucket}")))?;

    Ok(([(header::CONTENT_TYPE, object.content_type)], object.bytes).into_response())
}
