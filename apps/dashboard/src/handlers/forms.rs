use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Extension, Multipart};
use axum::response::Redirect;
use coachdesk_application::{FormSubmission, StagedFile, Workbench};
use coachdesk_core::AppError;
use tracing::debug;

use crate::error::ApiResult;

const RECORD_TYPE_FIELD: &str = "record_type";
const FORM_TOKEN_FIELD: &str = "form_token";

pub async fn submit_form_handler(
    Extension(workbench): Extension<Arc<Workbench>>,
    mut multipart: Multipart,
) -> ApiResult<Redirect> {
    let mut record_type = String::new();
    let mut form_token = String::new();
    let mut values = BTreeMap::new();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::Validation(format!("invalid form upload: {error}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        if name.is_empty() {
            continue;
        }

        match field.file_name().map(str::to_owned) {
            Some(file_name) => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await.map_err(|error| {
                    AppError::Validation(format!("failed to read file '{name}': {error}"))
                })?;
                debug!(field = %name, size = bytes.len(), "received staged file");
                files.push(StagedFile {
                    field: name,
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            None => {
                let value = field.text().await.map_err(|error| {
                    AppError::Validation(format!("failed to read field '{name}': {error}"))
                })?;
                match name.as_str() {
                    RECORD_TYPE_FIELD => record_type = value,
                    FORM_TOKEN_FIELD => form_token = value,
                    _ => {
                        values.insert(name, value);
                    }
                }
            }
        }
    }

    workbench
        .submit_form(FormSubmission {
            record_type,
            form_token,
            values,
            files,
        })
        .await;
    Ok(Redirect::to("/dashboard"))
}
