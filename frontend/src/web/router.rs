//! Router service
//!
//! Owns every `window.history` call. Each navigation, popstate and session
//! change is run through the core route guard before the outlet re-renders.

use fscape_admin::AppRoute;
use fscape_admin::guard::{NavigationDecision, check_path, check_route};
use leptos::prelude::*;
use tracing::info;
use wasm_bindgen::prelude::*;

/// Path plus query of the current location.
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| {
            let location = w.location();
            let path = location.pathname().ok()?;
            let search = location.search().unwrap_or_default();
            Some(format!("{}{}", path, search))
        })
        .unwrap_or_else(|| "/".to_string())
}

/// Adds a history entry for `path`.
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Overwrites the current history entry.
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service
///
/// Drives the UI through the current-route signal. The session is injected
/// as a signal rather than read from context.
#[derive(Clone, Copy)]
pub struct RouterService {
    /// Route the outlet renders.
    current_route: ReadSignal<AppRoute>,
    /// Written only after the guard has decided.
    set_route: WriteSignal<AppRoute>,
    /// Injected by the app so the router never reads the session itself.
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// Guards the location the page was opened on. A refused initial path
    /// is replaced in history rather than pushed.
    fn new(is_authenticated: Signal<bool>) -> Self {
        let path = current_path();
        let decision = check_path(&path, is_authenticated.get_untracked());
        if decision.is_redirect() {
            info!(from = %path, to = %decision.target(), "initial location redirected");
            replace_history_state(&decision.target().to_path());
        }
        let (current_route, set_route) = signal(decision.target().clone());

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// Reactive current route.
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Guarded navigation to a location path.
    pub fn navigate(&self, path: &str) {
        let decision = check_path(path, self.is_authenticated.get_untracked());
        self.apply(path, decision, true);
    }

    /// Guarded navigation to a known route.
    pub fn go(&self, route: &AppRoute) {
        self.navigate(&route.to_path());
    }

    /// Writes the decision to history and the route signal. Redirects always
    /// record the final route, never the refused one.
    fn apply(&self, requested: &str, decision: NavigationDecision, use_push: bool) {
        if decision.is_redirect() {
            info!(from = %requested, to = %decision.target(), "navigation redirected");
        }
        let target = decision.target();
        if use_push {
            push_history_state(&target.to_path());
        } else {
            replace_history_state(&target.to_path());
        }
        self.set_route.set(target.clone());
    }

    /// Back/forward buttons go through the guard as well.
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let decision = check_path(&path, router.is_authenticated.get_untracked());
            if decision.is_redirect() {
                router.apply(&path, decision, false);
            } else {
                router.set_route.set(decision.target().clone());
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // the listener lives as long as the page
        closure.forget();
    }

    /// Re-runs the guard on the current route whenever the session flips.
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            let decision = check_route(route.clone(), is_auth);
            if decision.is_redirect() {
                router.apply(&route.to_path(), decision, true);
            }
        });
    }
}

/// Builds the service, wires its listeners and puts it in context.
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// The router provided by [`Router`].
///
/// # Panics
/// When called outside a `<Router>`.
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

/// Provides the router to `children`.
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// Renders whatever `matcher` returns for the current route.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link; highlighted while the current route is in its section.
#[component]
pub fn NavLink(route: AppRoute, children: Children) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();
    let section = route.section();

    let is_active = move || router.current_route().get().section() == section;
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.go(&route);
    };

    view! {
        <a href=href class:active=is_active on:click=on_click>
            {children()}
        </a>
    }
}
