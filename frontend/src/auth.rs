//! Auth context
//!
//! Wraps the core [`SessionStore`] in one context-provided signal. The router
//! only sees the derived `is_authenticated` signal and redirects on changes,
//! so nothing here navigates.

use fscape_admin::{AuthError, Credentials, DemoAccount, Principal, SessionStore};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<SessionStore>,
}

impl AuthContext {
    pub fn new(account: DemoAccount) -> Self {
        Self {
            session: RwSignal::new(SessionStore::new(account)),
        }
    }

    /// Injected into the router service.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(SessionStore::is_authenticated))
    }

    pub fn principal(&self) -> Option<Principal> {
        self.session.with(|s| s.current_principal().cloned())
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Checks the credentials against a copy of the store so a failed attempt
/// never notifies subscribers.
pub fn login(ctx: &AuthContext, credentials: &Credentials) -> Result<Principal, AuthError> {
    let mut store = ctx.session.get_untracked();
    let principal = store.authenticate(credentials)?;
    ctx.session.set(store);
    Ok(principal)
}

pub fn logout(ctx: &AuthContext) {
    ctx.session.update(SessionStore::deauthenticate);
}
