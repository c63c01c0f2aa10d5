//! Route guard
//!
//! A pure function of the session: evaluate it on every navigation attempt,
//! never cache the decision.

use crate::route::AppRoute;
use crate::session::{CredentialVerifier, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow(AppRoute),
    RedirectTo(AppRoute),
}

impl NavigationDecision {
    /// Route that ends up rendered.
    pub fn target(&self) -> &AppRoute {
        match self {
            NavigationDecision::Allow(route) | NavigationDecision::RedirectTo(route) => route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, NavigationDecision::RedirectTo(_))
    }
}

/// Decides where a navigation to `route` lands.
pub fn check_route(route: AppRoute, authenticated: bool) -> NavigationDecision {
    if route.requires_auth() && !authenticated {
        return NavigationDecision::RedirectTo(AppRoute::auth_failure_redirect());
    }
    if route.should_redirect_when_authenticated() && authenticated {
        return NavigationDecision::RedirectTo(AppRoute::auth_success_redirect());
    }
    NavigationDecision::Allow(route)
}

/// Decides where a navigation to a raw location path lands. Unmatched paths
/// are sent to the fallback route, which is itself guarded.
pub fn check_path(path: &str, authenticated: bool) -> NavigationDecision {
    match AppRoute::from_path(path) {
        Some(route) => check_route(route, authenticated),
        None => NavigationDecision::RedirectTo(
            check_route(AppRoute::fallback(), authenticated)
                .target()
                .clone(),
        ),
    }
}

/// Convenience over [`check_path`] reading the session directly.
pub fn evaluate<V: CredentialVerifier>(path: &str, session: &SessionStore<V>) -> NavigationDecision {
    check_path(path, session.is_authenticated())
}
