use std::sync::Arc;

use chrono::Utc;
use coachdesk_core::{AppError, AppResult};
use coachdesk_domain::{RecordType, UploadFailurePolicy};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::backend_ports::ObjectStorage;
use crate::form_builder::{FormMode, FormSubmission};

/// Uploads the files of a form submission and writes their public URLs into
/// the record payload.
#[derive(Clone)]
pub struct UploadStager {
    storage: Arc<dyn ObjectStorage>,
}

impl UploadStager {
    /// Creates a stager writing into `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self { storage }
    }

    /// Stages every file field of `record_type` in field order.
    ///
    /// Missing required files are reported before the first upload. An empty
    /// file input on an edit form leaves the stored URL untouched.
    pub async fn stage(
        &self,
        record_type: &RecordType,
        mode: &FormMode,
        submission: &FormSubmission,
        fields: &mut Map<String, Value>,
    ) -> AppResult<()> {
        if *mode == FormMode::Create {
            let missing = record_type.fields().iter().find(|field| {
                field.upload_target().is_some()
                    && field.is_required()
                    && submission.file(field.name()).is_none()
            });
            if let Some(field) = missing {
                return Err(AppError::Validation(format!("{} is required.", field.label())));
            }
        }

        for field in record_type.fields() {
            let Some(target) = field.upload_target() else {
                continue;
            };
            let Some(file) = submission.file(field.name()) else {
                continue;
            };

            let path = object_path(target.path_prefix, &file.file_name);
            let uploaded = self
                .storage
                .upload_object(target.bucket, &path, &file.content_type, file.bytes.clone())
                .await;

            match uploaded {
                Ok(()) => {
                    let url = self.storage.public_url(target.bucket, &path);
                    info!(field = field.name(), bucket = target.bucket, path, "staged upload");
                    fields.insert(field.name().to_owned(), Value::String(url));
                }
                Err(error) => match target.failure_policy {
                    UploadFailurePolicy::AbortSubmit => {
                        return Err(AppError::Upload {
                            field: field.label().to_owned(),
                            message: error.user_message(),
                        });
                    }
                    UploadFailurePolicy::BestEffort => {
                        warn!(
                            field = field.name(),
                            bucket = target.bucket,
                            error = %error,
                            "optional upload failed, keeping previous value"
                        );
                    }
                },
            }
        }

        Ok(())
    }
}

/// Builds `{prefix}-{unix millis}-{sanitized file name}`.
#[must_use]
pub fn object_path(prefix: &str, file_name: &str) -> String {
    format!(
        "{prefix}-{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let sanitized: String = base
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() || matches!(character, '.' | '-' | '_') {
                character
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        return "upload".to_owned();
    }
    sanitized
}
