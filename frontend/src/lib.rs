//! FScape admin frontend
//!
//! Leptos CSR shell over the `fscape-admin` core:
//! - `web::router`: guarded History API routing
//! - `auth`: session context
//! - `api`: configuration and client construction
//! - `components`: pages, dialogs and the generic list screen

mod api;
mod auth;
mod components {
    pub mod create_page;
    pub mod dashboard;
    pub mod form_dialog;
    pub mod form_fields;
    pub mod layout;
    pub mod login;
    pub mod modal;
    pub mod resource_page;
    pub mod room_detail;
    pub mod toast;
    pub mod views;
}
pub mod logging;

use fscape_admin::AppRoute;
use fscape_admin_shared::{Account, Asset, Building, Location, Room, RoomType, University};
use leptos::prelude::*;

use crate::api::ApiContext;
use crate::auth::AuthContext;
use crate::components::create_page::CreatePage;
use crate::components::dashboard::DashboardPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::resource_page::ResourcePage;
use crate::components::room_detail::RoomDetailPage;
use crate::components::toast::{ToastOutlet, provide_toasts};

// Browser API wrappers: fetch, LocalStorage and History.
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchTransport;
    pub use storage::Preferences;
}

use web::router::{Router, RouterOutlet, use_router};

fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::Forbidden => {
            let router = use_router();
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="text-center">
                        <h1 class="text-6xl font-bold text-error">"403"</h1>
                        <p class="text-xl mt-4">"You do not have access to this page"</p>
                        <button class="btn btn-primary mt-6" on:click=move |_| router.go(&AppRoute::Dashboard)>
                            "Back to overview"
                        </button>
                    </div>
                </div>
            }
            .into_any();
        }
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Accounts => view! { <ResourcePage<Account> /> }.into_any(),
        AppRoute::AccountCreate => view! { <CreatePage<Account> /> }.into_any(),
        AppRoute::Buildings => view! { <ResourcePage<Building> /> }.into_any(),
        AppRoute::BuildingCreate => view! { <CreatePage<Building> /> }.into_any(),
        AppRoute::Rooms => view! { <ResourcePage<Room> /> }.into_any(),
        AppRoute::RoomCreate => view! { <CreatePage<Room> /> }.into_any(),
        AppRoute::RoomDetail(id) => view! { <RoomDetailPage id=id /> }.into_any(),
        AppRoute::RoomTypes => view! { <ResourcePage<RoomType> /> }.into_any(),
        AppRoute::Assets => view! { <ResourcePage<Asset> /> }.into_any(),
        AppRoute::AssetCreate => view! { <CreatePage<Asset> /> }.into_any(),
        AppRoute::Locations => view! { <ResourcePage<Location> /> }.into_any(),
        AppRoute::Universities => view! { <ResourcePage<University> /> }.into_any(),
    };

    view! { <AppShell>{page}</AppShell> }.into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. configuration and API access
    let api = ApiContext::new();
    provide_context(api);

    // 2. session, checked against the configured demo account
    let auth = AuthContext::new(api.demo_account());
    provide_context(auth);

    provide_toasts();

    // 3. the router only sees the derived flag
    let is_authenticated = auth.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastOutlet />
    }
}
