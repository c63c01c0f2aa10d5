use fscape_admin::{AppRoute, DashboardSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::web::router::use_router;

fn count(value: Option<u64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let router = use_router();

    let (summary, set_summary) = signal(DashboardSummary::default());
    let (loading, set_loading) = signal(true);

    let load_summary = move || {
        let client = api.client();
        set_loading.set(true);
        spawn_local(async move {
            set_summary.set(client.dashboard_summary().await);
            set_loading.set(false);
        });
    };

    load_summary();

    let greeting = move || {
        auth.principal()
            .map(|p| format!("Welcome back, {}", p.display_name))
            .unwrap_or_default()
    };
    let occupancy = move || {
        summary
            .get()
            .occupancy_rate()
            .map(|rate| format!("{:.0}%", rate))
            .unwrap_or_else(|| "—".to_string())
    };

    view! {
        <div class="flex items-center justify-between">
            <div>
                <h2 class="text-2xl font-bold">{greeting}</h2>
                <p class="text-base-content/70 text-sm">"Portfolio at a glance."</p>
            </div>
            <button class="btn btn-ghost btn-sm" on:click=move |_| load_summary() disabled=loading>
                {move || if loading.get() {
                    view! { <span class="loading loading-spinner loading-sm"></span> }.into_any()
                } else {
                    "Refresh".into_any()
                }}
            </button>
        </div>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Rooms"</div>
                <div class="stat-value text-primary">{move || count(summary.get().rooms)}</div>
                <div class="stat-desc">{move || format!("{} occupied", count(summary.get().occupied_rooms))}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Occupancy"</div>
                <div class="stat-value text-success">{occupancy}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Buildings"</div>
                <div class="stat-value">{move || count(summary.get().buildings)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Active accounts"</div>
                <div class="stat-value text-secondary">{move || count(summary.get().active_accounts)}</div>
            </div>
        </div>

        <div class="flex flex-wrap gap-2">
            <button class="btn btn-primary btn-sm" on:click=move |_| router.go(&AppRoute::RoomCreate)>"New room"</button>
            <button class="btn btn-outline btn-sm" on:click=move |_| router.go(&AppRoute::BuildingCreate)>"New building"</button>
            <button class="btn btn-outline btn-sm" on:click=move |_| router.go(&AppRoute::AccountCreate)>"New account"</button>
        </div>
    }
}
