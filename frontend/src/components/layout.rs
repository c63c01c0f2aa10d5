use fscape_admin::AppRoute;
use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::web::router::NavLink;

const NAV_ITEMS: &[(&str, AppRoute)] = &[
    ("Overview", AppRoute::Dashboard),
    ("Accounts", AppRoute::Accounts),
    ("Buildings", AppRoute::Buildings),
    ("Rooms", AppRoute::Rooms),
    ("Room types", AppRoute::RoomTypes),
    ("Assets", AppRoute::Assets),
    ("Locations", AppRoute::Locations),
    ("Universities", AppRoute::Universities),
];

/// Sidebar and header around every protected page.
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let auth = use_auth();

    let display_name = move || auth.principal().map(|p| p.display_name).unwrap_or_default();
    let role = move || auth.principal().map(|p| p.role).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200 flex font-sans">
            <aside class="w-60 bg-base-100 shadow-xl hidden md:flex flex-col">
                <div class="p-6 text-2xl font-bold text-primary">"FScape"</div>
                <ul class="menu px-4 gap-1">
                    {NAV_ITEMS
                        .iter()
                        .map(|(label, route)| {
                            view! {
                                <li>
                                    <NavLink route=route.clone()>{*label}</NavLink>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </aside>

            <div class="flex-1 flex flex-col min-w-0">
                <div class="navbar bg-base-100 shadow px-4 md:px-8">
                    <div class="flex-1">
                        <span class="text-lg font-semibold">"Admin dashboard"</span>
                    </div>
                    <div class="flex-none gap-3 items-center">
                        <div class="text-right hidden sm:block">
                            <div class="font-medium">{display_name}</div>
                            <div class="text-xs text-base-content/60">{role}</div>
                        </div>
                        <button class="btn btn-outline btn-error btn-sm" on:click=move |_| logout(&auth)>
                            "Sign out"
                        </button>
                    </div>
                </div>

                <main class="p-4 md:p-8 space-y-6">{children()}</main>
            </div>
        </div>
    }
}
