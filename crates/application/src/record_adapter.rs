use std::sync::Arc;

use coachdesk_core::{AppError, AppResult};
use coachdesk_domain::{Record, RecordType};
use serde_json::{Map, Value};
use tracing::debug;

use crate::backend_ports::RecordStore;

/// CRUD gateway for one record type.
#[derive(Clone)]
pub struct RecordAdapter {
    record_type: &'static RecordType,
    store: Arc<dyn RecordStore>,
}

impl RecordAdapter {
    /// Creates an adapter for `record_type` backed by `store`.
    #[must_use]
    pub fn new(record_type: &'static RecordType, store: Arc<dyn RecordStore>) -> Self {
        Self { record_type, store }
    }

    /// Returns the record type this adapter serves.
    #[must_use]
    pub fn record_type(&self) -> &'static RecordType {
        self.record_type
    }

    /// Lists every record in the type's default order.
    pub async fn list(&self) -> AppResult<Vec<Record>> {
        let rows = self
            .store
            .list_rows(self.record_type.collection(), self.record_type.sort())
            .await?;
        debug!(record_type = %self.record_type.id(), rows = rows.len(), "listed records");

        rows.into_iter()
            .map(|row| Record::from_row(self.record_type.id(), row))
            .collect()
    }

    /// Returns one record by identifier.
    pub async fn get_one(&self, id: &str) -> AppResult<Record> {
        let row = self
            .store
            .find_row(self.record_type.collection(), id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} '{id}' does not exist",
                    self.record_type.noun()
                ))
            })?;

        Record::from_row(self.record_type.id(), row)
    }

    /// Inserts a new record.
    pub async fn create(&self, fields: Map<String, Value>) -> AppResult<Record> {
        let row = self
            .store
            .insert_row(self.record_type.collection(), fields)
            .await?;
        let record = Record::from_row(self.record_type.id(), row)?;
        debug!(record_type = %self.record_type.id(), record_id = record.id(), "created record");
        Ok(record)
    }

    /// Patches the supplied fields of an existing record.
    pub async fn update(&self, id: &str, fields: Map<String, Value>) -> AppResult<Record> {
        let row = self
            .store
            .update_row(self.record_type.collection(), id, fields)
            .await?;
        debug!(record_type = %self.record_type.id(), record_id = id, "updated record");
        Record::from_row(self.record_type.id(), row)
    }

    /// Deletes one record.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .delete_row(self.record_type.collection(), id)
            .await?;
        debug!(record_type = %self.record_type.id(), record_id = id, "deleted record");
        Ok(())
    }

    /// Writes exactly `{field: !current}` for one of the type's status toggles.
    pub async fn toggle(&self, id: &str, field: &str, current: bool) -> AppResult<Record> {
        if self.record_type.toggle(field).is_none() {
            return Err(AppError::Validation(format!(
                "'{field}' is not a status flag of {}",
                self.record_type.collection()
            )));
        }

        let mut patch = Map::new();
        patch.insert(field.to_owned(), Value::Bool(!current));
        self.update(id, patch).await
    }
}
