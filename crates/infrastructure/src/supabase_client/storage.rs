use async_trait::async_trait;
use coachdesk_application::ObjectStorage;
use coachdesk_core::{AppError, AppResult};
use reqwest::Method;
use tracing::debug;

use super::{SupabaseClient, read_json};

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<()> {
        let url = self.endpoint(&["storage", "v1", "object", bucket, path]);
        debug!(bucket, path, size = bytes.len(), "uploading object");
        let response = self
            .request(Method::POST, url)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|error| AppError::Persistence(format!("upload request failed: {error}")))?;

        read_json(response, AppError::Persistence).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&["storage", "v1", "object", "public", bucket, path])
            .to_string()
    }
}
