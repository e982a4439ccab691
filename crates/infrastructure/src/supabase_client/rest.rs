use async_trait::async_trait;
use coachdesk_application::RecordStore;
use coachdesk_core::{AppError, AppResult};
use coachdesk_domain::SortOrder;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use super::{SupabaseClient, read_json};

impl SupabaseClient {
    pub(super) fn rows_url(&self, collection: &str) -> Url {
        let mut url = self.endpoint(&["rest", "v1", collection]);
        url.query_pairs_mut().append_pair("select", "*");
        url
    }

    pub(super) fn row_url(&self, collection: &str, id: &str) -> Url {
        let mut url = self.rows_url(collection);
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        url
    }

    async fn send_rows(&self, builder: reqwest::RequestBuilder) -> AppResult<Vec<Value>> {
        let response = builder
            .send()
            .await
            .map_err(|error| AppError::Persistence(format!("backend request failed: {error}")))?;

        match read_json(response, AppError::Persistence).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

fn first_row(rows: Vec<Value>, collection: &str, id: Option<&str>) -> AppResult<Value> {
    rows.into_iter().next().ok_or_else(|| {
        AppError::Persistence(match id {
            Some(id) => format!("no row '{id}' in {collection}"),
            None => format!("backend returned no row for {collection}"),
        })
    })
}

#[async_trait]
impl RecordStore for SupabaseClient {
    async fn list_rows(&self, collection: &str, order: SortOrder) -> AppResult<Vec<Value>> {
        let mut url = self.rows_url(collection);
        url.query_pairs_mut().append_pair(
            "order",
            &format!("{}.{}", order.field, order.direction.as_str()),
        );
        debug!(collection, "listing rows");

        self.send_rows(self.request(Method::GET, url)).await
    }

    async fn find_row(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let rows = self
            .send_rows(self.request(Method::GET, self.row_url(collection, id)))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_row(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Value> {
        let rows = self
            .send_rows(
                self.request(Method::POST, self.rows_url(collection))
                    .header("Prefer", "return=representation")
                    .json(&Value::Object(fields)),
            )
            .await?;
        first_row(rows, collection, None)
    }

    async fn update_row(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Value> {
        let rows = self
            .send_rows(
                self.request(Method::PATCH, self.row_url(collection, id))
                    .header("Prefer", "return=representation")
                    .json(&Value::Object(fields)),
            )
            .await?;
        first_row(rows, collection, Some(id))
    }

    async fn delete_row(&self, collection: &str, id: &str) -> AppResult<()> {
        self.send_rows(self.request(Method::DELETE, self.row_url(collection, id)))
            .await?;
        Ok(())
    }
}
