use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use coachdesk_core::AppError;
use tracing_subscriber::EnvFilter;

/// Where rows, objects and sign-in are served from.
#[derive(Debug, Clone)]
pub enum BackendProviderConfig {
    /// Hosted Supabase-compatible project.
    Supabase { url: String, anon_key: String },
    /// Process-local backend seeded with one admin account.
    Memory {
        admin_email: String,
        admin_password: String,
    },
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub backend: BackendProviderConfig,
    pub dashboard_host: String,
    pub dashboard_port: u16,
    pub cookie_secure: bool,
    pub backend_timeout: Duration,
    pub default_section: String,
}

impl DashboardConfig {
    pub fn load() -> Result<Self, AppError> {
        let backend = match env::var("BACKEND_PROVIDER")
            .unwrap_or_else(|_| "supabase".to_owned())
            .as_str()
        {
            "supabase" => BackendProviderConfig::Supabase {
                url: required_non_empty_env("SUPABASE_URL")?,
                anon_key: required_non_empty_env("SUPABASE_ANON_KEY")?,
            },
            "memory" => BackendProviderConfig::Memory {
                admin_email: env::var("DEV_ADMIN_EMAIL")
                    .unwrap_or_else(|_| "coach@coachdesk.local".to_owned()),
                admin_password: env::var("DEV_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "coachdesk".to_owned()),
            },
            other => {
                return Err(AppError::Validation(format!(
                    "BACKEND_PROVIDER must be either 'supabase' or 'memory', got '{other}'"
                )));
            }
        };

        let dashboard_host =
            env::var("DASHBOARD_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let dashboard_port = env::var("DASHBOARD_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);
        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");
        let backend_timeout = env::var("BACKEND_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .map_or(Duration::from_secs(30), Duration::from_secs);
        let default_section = env::var("DEFAULT_SECTION")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "bookings".to_owned());

        Ok(Self {
            backend,
            dashboard_host,
            dashboard_port,
            cookie_secure,
            backend_timeout,
            default_section,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.dashboard_host).map_err(|error| {
            AppError::Internal(format!(
                "invalid DASHBOARD_HOST '{}': {error}",
                self.dashboard_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.dashboard_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
