use serde::{Deserialize, Serialize};

/// Administrator information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    subject: String,
    email: String,
}

impl AdminIdentity {
    /// Creates an admin identity from the identity provider's claims.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email used to sign in.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the display name shown in the dashboard header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or("admin")
    }
}

#[cfg(test)]
mod tests {
    use super::AdminIdentity;

    #[test]
    fn display_name_defaults_to_email_local_part() {
        let identity = AdminIdentity::new("8c1d", "coach@studio.example");
        assert_eq!(identity.display_name(), "coach");
    }
}
