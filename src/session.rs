//! Session store
//!
//! Holds at most one authenticated principal for the life of the client.
//! Nothing is persisted: a reload starts anonymous again.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DemoAccount;
use crate::error::AuthError;

/// The authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    #[serde(rename = "displayName", alias = "display_name", alias = "name")]
    pub display_name: String,
    pub role: String,
}

/// Submitted login form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Decides whether submitted credentials identify a principal.
pub trait CredentialVerifier {
    fn verify(&self, credentials: &Credentials) -> Result<Principal, AuthError>;
}

impl CredentialVerifier for DemoAccount {
    fn verify(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if email == self.email && credentials.password == self.password {
            Ok(Principal {
                email: email.to_string(),
                display_name: self.display_name.clone(),
                role: self.role.clone(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore<V = DemoAccount> {
    state: SessionState,
    verifier: V,
}

impl Default for SessionStore<DemoAccount> {
    fn default() -> Self {
        Self::new(DemoAccount::default())
    }
}

impl<V: CredentialVerifier> SessionStore<V> {
    pub fn new(verifier: V) -> Self {
        Self {
            state: SessionState::Anonymous,
            verifier,
        }
    }

    /// Checks `credentials` and, on success, makes the principal current.
    /// A failed attempt leaves the store untouched.
    pub fn authenticate(&mut self, credentials: &Credentials) -> Result<Principal, AuthError> {
        let principal = self.verifier.verify(credentials)?;
        self.sign_in(principal.clone());
        Ok(principal)
    }

    /// Accepts a principal issued by an external login call.
    pub fn sign_in(&mut self, principal: Principal) {
        info!(email = %principal.email, "session authenticated");
        self.state = SessionState::Authenticated(principal);
    }

    pub fn deauthenticate(&mut self) {
        if let SessionState::Authenticated(principal) = &self.state {
            info!(email = %principal.email, "session closed");
        }
        self.state = SessionState::Anonymous;
    }

    pub fn current_principal(&self) -> Option<&Principal> {
        match &self.state {
            SessionState::Authenticated(principal) => Some(principal),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_principal().is_some()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_credentials_authenticate() {
        let mut store = SessionStore::new(DemoAccount::default());
        let principal = store
            .authenticate(&Credentials::new("admin@fscape.com", "admin123"))
            .unwrap();
        assert_eq!(principal.email, "admin@fscape.com");
        assert_eq!(store.current_principal(), Some(&principal));
        assert!(matches!(store.state(), SessionState::Authenticated(_)));
    }

    #[test]
    fn wrong_credentials_stay_anonymous() {
        let mut store = SessionStore::new(DemoAccount::default());
        let err = store
            .authenticate(&Credentials::new("wrong@x.com", "bad"))
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(store.state(), &SessionState::Anonymous);

        let err = store
            .authenticate(&Credentials::new("admin@fscape.com", "ADMIN123"))
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn blank_fields_are_rejected_before_comparison() {
        let mut store = SessionStore::new(DemoAccount::default());
        assert_eq!(
            store.authenticate(&Credentials::new("  ", "admin123")),
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(
            store.authenticate(&Credentials::new("admin@fscape.com", "")),
            Err(AuthError::MissingCredentials)
        );
    }

    #[test]
    fn surrounding_whitespace_in_email_is_ignored() {
        let mut store = SessionStore::new(DemoAccount::default());
        assert!(
            store
                .authenticate(&Credentials::new(" admin@fscape.com ", "admin123"))
                .is_ok()
        );
    }

    #[test]
    fn failed_attempt_keeps_existing_session() {
        let mut store = SessionStore::new(DemoAccount::default());
        store
            .authenticate(&Credentials::new("admin@fscape.com", "admin123"))
            .unwrap();
        let _ = store.authenticate(&Credentials::new("wrong@x.com", "bad"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn deauthenticate_is_idempotent() {
        let mut store = SessionStore::new(DemoAccount::default());
        store.sign_in(Principal {
            email: "ops@fscape.com".into(),
            display_name: "Ops".into(),
            role: "Manager".into(),
        });
        store.deauthenticate();
        store.deauthenticate();
        assert_eq!(store.current_principal(), None);
    }

    #[test]
    fn external_principal_accepts_name_key() {
        let principal: Principal =
            serde_json::from_str(r#"{"email":"a@b.c","name":"Minh","role":"Admin"}"#).unwrap();
        assert_eq!(principal.display_name, "Minh");
    }

    #[test]
    fn configured_account_replaces_the_default() {
        let account = DemoAccount {
            email: "staff@fscape.com".into(),
            password: "s3cret".into(),
            display_name: "Staff".into(),
            role: "Staff".into(),
        };
        let mut store = SessionStore::new(account);
        assert_eq!(
            store.authenticate(&Credentials::new("admin@fscape.com", "admin123")),
            Err(AuthError::InvalidCredentials)
        );
        assert!(store.authenticate(&Credentials::new("staff@fscape.com", "s3cret")).is_ok());
    }
}
