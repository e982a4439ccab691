use std::sync::Arc;

use async_trait::async_trait;
use coachdesk_core::{AdminIdentity, AppResult};
use coachdesk_domain::SortOrder;
use serde_json::{Map, Value};

/// Row storage port of the hosted backend.
///
/// Rows are plain JSON objects keyed by column name. Every failure is reported
/// as `AppError::Persistence` carrying the backend's message.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists every row of a collection in the requested order.
    async fn list_rows(&self, collection: &str, order: SortOrder) -> AppResult<Vec<Value>>;

    /// Returns one row by identifier.
    async fn find_row(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    /// Inserts one row and returns it as stored.
    async fn insert_row(&self, collection: &str, fields: Map<String, Value>) -> AppResult<Value>;

    /// Patches the given columns of one row and returns it as stored.
    async fn update_row(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<Value>;

    /// Deletes one row.
    async fn delete_row(&self, collection: &str, id: &str) -> AppResult<()>;
}

/// Object storage port for uploaded images.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores one object at `path` inside `bucket`.
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<()>;

    /// Resolves the public URL of a stored object.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// Email and password submitted on the login form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plain-text password, forwarded to the identity provider only.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session issued by the identity provider after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Signed-in administrator.
    pub identity: AdminIdentity,
    /// Bearer token used for row and storage calls.
    pub access_token: String,
}

/// Authentication port of the hosted backend.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for a session. Rejections are `AppError::Unauthorized`
    /// carrying the provider's message.
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<AuthSession>;

    /// Revokes a session.
    async fn sign_out(&self, access_token: &str) -> AppResult<()>;
}

/// Backend clients bound to one signed-in administrator.
#[derive(Clone)]
pub struct BackendHandles {
    /// Row storage.
    pub records: Arc<dyn RecordStore>,
    /// Object storage.
    pub storage: Arc<dyn ObjectStorage>,
}

/// Builds per-session backend clients.
pub trait BackendConnector: Send + Sync {
    /// Returns row and storage clients authorized with the session token.
    fn connect(&self, session: &AuthSession) -> BackendHandles;
}
