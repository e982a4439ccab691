use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use coachdesk_application::{
    AuthProvider, AuthSession, BackendConnector, BackendHandles, Credentials, ObjectStorage,
    RecordStore,
};
use coachdesk_core::{AdminIdentity, AppError, AppResult};
use coachdesk_domain::{SortDirection, SortOrder};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Path under which the dashboard serves in-memory objects.
pub const IN_MEMORY_OBJECT_ROUTE: &str = "/dev-storage";

/// Object kept by the in-memory storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Declared content type.
    pub content_type: String,
    /// Contents.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
struct InMemoryAdmin {
    subject: String,
    password: String,
}

#[derive(Debug, Default)]
struct InMemoryState {
    admins: RwLock<HashMap<String, InMemoryAdmin>>,
    sessions: RwLock<HashMap<String, AdminIdentity>>,
    rows: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
    objects: RwLock<HashMap<(String, String), StoredObject>>,
}

/// Process-local backend for development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<InMemoryState>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an administrator account.
    pub async fn add_admin(&self, email: &str, password: &str) {
        self.state.admins.write().await.insert(
            email.trim().to_ascii_lowercase(),
            InMemoryAdmin {
                subject: Uuid::new_v4().to_string(),
                password: password.to_owned(),
            },
        );
    }

    /// Inserts a row as-is, keeping its identifier when it has one.
    pub async fn seed_row(&self, collection: &str, row: Value) -> AppResult<()> {
        let Value::Object(mut row) = row else {
            return Err(AppError::Validation(format!(
                "seed row for '{collection}' must be a JSON object"
            )));
        };
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));

        self.state
            .rows
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(row);
        Ok(())
    }

    /// Returns the number of sessions that have not been signed out.
    pub async fn active_sessions(&self) -> usize {
        self.state.sessions.read().await.len()
    }

    /// Invalidates every issued access token, as when they expire.
    pub async fn expire_sessions(&self) {
        self.state.sessions.write().await.clear();
    }

    /// Returns one stored object.
    pub async fn object(&self, bucket: &str, path: &str) -> Option<StoredObject> {
        self.state
            .objects
            .read()
            .await
            .get(&(bucket.to_owned(), path.to_owned()))
            .cloned()
    }
}

fn row_id(row: &Map<String, Value>) -> Option<String> {
    match row.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(left)), Some(Value::Number(right))) => left
            .as_f64()
            .partial_cmp(&right.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(left)), Some(Value::String(right))) => left.cmp(right),
        (Some(Value::Bool(left)), Some(Value::Bool(right))) => left.cmp(right),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(left), Some(right)) => left.to_string().cmp(&right.to_string()),
    }
}

#[async_trait]
impl RecordStore for InMemoryBackend {
    async fn list_rows(&self, collection: &str, order: SortOrder) -> AppResult<Vec<Value>> {
        let rows = self.state.rows.read().await;
        let mut listed: Vec<Map<String, Value>> =
            rows.get(collection).cloned().unwrap_or_default();

        listed.sort_by(|left, right| {
            let ordering = compare_values(left.get(order.field), right.get(order.field));
            match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(listed.into_iter().map(Value::Object).collect())
    }

    async fn find_row(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        let rows = self.state.rows.read().await;
        Ok(rows
            .get(collection)
            .and_then(|rows| {
                rows.iter()
                    .find(|row| row_id(row).as_deref() == Some(id))
            })
            .cloned()
            .map(Value::Object))
    }

    async fn insert_row(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Value> {
        let mut row = fields;
        row.insert("id".to_owned(), Value::String(Uuid::new_v4().to_string()));
        row.insert("created_at".to_owned(), Value::String(Utc::now().to_rfc3339()));

        self.state
            .rows
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update_row(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Value> {
        let mut rows = self.state.rows.write().await;
        let row = rows
            .get_mut(collection)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|row| row_id(row).as_deref() == Some(id))
            })
            .ok_or_else(|| AppError::Persistence(format!("no row '{id}' in {collection}")))?;

        for (field, value) in fields {
            if field != "id" {
                row.insert(field, value);
            }
        }
        Ok(Value::Object(row.clone()))
    }

    async fn delete_row(&self, collection: &str, id: &str) -> AppResult<()> {
        let mut rows = self.state.rows.write().await;
        if let Some(rows) = rows.get_mut(collection) {
            rows.retain(|row| row_id(row).as_deref() != Some(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for InMemoryBackend {
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<()> {
        let mut objects = self.state.objects.write().await;
        let key = (bucket.to_owned(), path.to_owned());
        if objects.contains_key(&key) {
            return Err(AppError::Persistence(format!(
                "object '{path}' already exists in {bucket}"
            )));
        }

        objects.insert(
            key,
            StoredObject {
                content_type: content_type.to_owned(),
                bytes,
            },
        );
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{IN_MEMORY_OBJECT_ROUTE}/{bucket}/{path}")
    }
}

#[async_trait]
impl AuthProvider for InMemoryBackend {
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<AuthSession> {
        let email = credentials.email.trim().to_ascii_lowercase();
        let admin = self
            .state
            .admins
            .read()
            .await
            .get(&email)
            .filter(|admin| admin.password == credentials.password)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Invalid login credentials".to_owned()))?;

        let identity = AdminIdentity::new(admin.subject, email);
        let access_token = Uuid::new_v4().to_string();
        self.state
            .sessions
            .write()
            .await
            .insert(access_token.clone(), identity.clone());

        Ok(AuthSession {
            identity,
            access_token,
        })
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        self.state.sessions.write().await.remove(access_token);
        Ok(())
    }
}

impl BackendConnector for InMemoryBackend {
    fn connect(&self, session: &AuthSession) -> BackendHandles {
        let scoped = Arc::new(SessionScopedBackend {
            backend: self.clone(),
            access_token: session.access_token.clone(),
        });
        BackendHandles {
            records: scoped.clone(),
            storage: scoped,
        }
    }
}

/// Backend handle bound to one access token. Calls fail once it is revoked.
struct SessionScopedBackend {
    backend: InMemoryBackend,
    access_token: String,
}

impl SessionScopedBackend {
    async fn authorize(&self) -> AppResult<()> {
        if self
            .backend
            .state
            .sessions
            .read()
            .await
            .contains_key(&self.access_token)
        {
            Ok(())
        } else {
            Err(AppError::Unauthorized("JWT expired".to_owned()))
        }
    }
}

#[async_trait]
impl RecordStore for SessionScopedBackend {
    async fn list_rows(&self, collection: &str, order: SortOrder) -> AppResult<Vec<Value>> {
        self.authorize().await?;
        self.backend.list_rows(collection, order).await
    }

    async fn find_row(&self, collection: &str, id: &str) -> AppResult<Option<Value>> {
        self.authorize().await?;
        self.backend.find_row(collection, id).await
    }

    async fn insert_row(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Value> {
        self.authorize().await?;
        self.backend.insert_row(collection, fields).await
    }

    async fn update_row(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Value> {
        self.authorize().await?;
        self.backend.update_row(collection, id, fields).await
    }

    async fn delete_row(&self, collection: &str, id: &str) -> AppResult<()> {
        self.authorize().await?;
        self.backend.delete_row(collection, id).await
    }
}

#[async_trait]
impl ObjectStorage for SessionScopedBackend {
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<()> {
        self.authorize().await?;
        self.backend
            .upload_object(bucket, path, content_type, bytes)
            .await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.backend.public_url(bucket, path)
    }
}
