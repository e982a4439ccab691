use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use coachdesk_core::{AdminIdentity, AppError, AppResult};
use tracing::{info, warn};

use crate::backend_ports::{AuthProvider, AuthSession, Credentials};

/// Authentication state of a browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Login form is shown, optionally with the last sign-in error inline.
    Unauthenticated {
        /// Message reported by the identity provider.
        login_error: Option<String>,
    },
    /// Dashboard is shown.
    Authenticated(AdminIdentity),
}

impl GateState {
    /// Derives the initial state from the identity stored in the session, if any.
    #[must_use]
    pub fn from_session(identity: Option<AdminIdentity>) -> Self {
        match identity {
            Some(identity) => Self::Authenticated(identity),
            None => Self::Unauthenticated { login_error: None },
        }
    }
}

/// Sign-in and sign-out against the identity provider.
#[derive(Clone)]
pub struct SessionGate {
    auth: Arc<dyn AuthProvider>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SessionGate {
    /// Creates a gate over `auth`.
    #[must_use]
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Signs in. A second attempt for the same email while one is pending is rejected.
    pub async fn login(&self, credentials: &Credentials) -> AppResult<AuthSession> {
        let email = credentials.email.trim().to_ascii_lowercase();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_owned(),
            ));
        }

        let _guard = InFlightGuard::acquire(&self.in_flight, email.clone()).ok_or_else(|| {
            AppError::Validation("A sign-in for this account is already in progress.".to_owned())
        })?;

        match self.auth.sign_in(credentials).await {
            Ok(session) => {
                info!(subject = session.identity.subject(), "admin signed in");
                Ok(session)
            }
            Err(error) => {
                warn!(email = %email, error = %error, "sign-in rejected");
                Err(error)
            }
        }
    }

    /// Signs out at the identity provider.
    pub async fn logout(&self, access_token: &str) -> AppResult<()> {
        self.auth.sign_out(access_token).await?;
        info!("admin signed out");
        Ok(())
    }
}

struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
    email: String,
}

impl InFlightGuard {
    fn acquire(in_flight: &Arc<Mutex<HashSet<String>>>, email: String) -> Option<Self> {
        let inserted = in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(email.clone());

        inserted.then(|| Self {
            in_flight: Arc::clone(in_flight),
            email,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.email);
    }
}
