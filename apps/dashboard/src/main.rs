//! Coachdesk admin dashboard composition root.

#![forbid(unsafe_code)]

mod auth;
mod dashboard_config;
mod dashboard_router;
mod dev_seed;
mod error;
mod handlers;
mod middleware;
mod state;
mod views;
mod workbenches;

use std::sync::Arc;

use coachdesk_application::{AuthProvider, BackendConnector, SessionGate};
use coachdesk_core::AppError;
use coachdesk_infrastructure::{InMemoryBackend, SupabaseClient, SupabaseConnector};
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration as CookieDuration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::dashboard_config::{BackendProviderConfig, DashboardConfig, init_tracing};
use crate::state::AppState;
use crate::views::Templates;
use crate::workbenches::{WorkbenchRegistry, spawn_idle_sweeper};

/// Inactivity after which the session cookie and its workbench are dropped.
const SESSION_IDLE_SECS: i64 = 30 * 60;
const WORKBENCH_SWEEP_PERIOD: std::time::Duration = std::time::Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = DashboardConfig::load()?;
    let app_state = build_app_state(&config).await?;
    spawn_idle_sweeper(app_state.workbenches.clone(), WORKBENCH_SWEEP_PERIOD);

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(CookieDuration::seconds(SESSION_IDLE_SECS)));

    let app = dashboard_router::build_router(app_state, session_layer);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "coachdesk dashboard listening");
    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("server error: {error}")))
}

async fn build_app_state(config: &DashboardConfig) -> Result<AppState, AppError> {
    let (auth, connector, dev_objects): (
        Arc<dyn AuthProvider>,
        Arc<dyn BackendConnector>,
        Option<InMemoryBackend>,
    ) = match &config.backend {
        BackendProviderConfig::Supabase { url, anon_key } => {
            let http_client = reqwest::Client::builder()
                .timeout(config.backend_timeout)
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build HTTP client: {error}"))
                })?;
            let client = SupabaseClient::new(http_client, url, anon_key.as_str())?;
            info!(backend = %url, "using supabase backend");
            (
                Arc::new(client.clone()),
                Arc::new(SupabaseConnector::new(client)),
                None,
            )
        }
        BackendProviderConfig::Memory {
            admin_email,
            admin_password,
        } => {
            let backend = InMemoryBackend::new();
            dev_seed::run(&backend, admin_email, admin_password).await?;
            info!("using in-memory backend");
            (
                Arc::new(backend.clone()),
                Arc::new(backend.clone()),
                Some(backend),
            )
        }
    };

    Ok(AppState {
        session_gate: SessionGate::new(auth),
        connector,
        workbenches: WorkbenchRegistry::new(std::time::Duration::from_secs(
            SESSION_IDLE_SECS.unsigned_abs(),
        )),
        templates: Templates::new()?,
        default_section: config.default_section.clone(),
        dev_objects,
    })
}
