use fscape_admin::AppRoute;
use fscape_admin_shared::date::display_date;
use fscape_admin_shared::{ResourceId, Room};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::views::money;
use crate::web::router::use_router;

#[derive(Debug, Clone)]
enum Detail {
    Loading,
    Loaded(Box<Room>),
    Failed(String),
}

fn row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <tr>
            <th class="w-48 text-base-content/70 font-normal">{label}</th>
            <td>{value}</td>
        </tr>
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn RoomDetailPage(id: ResourceId) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let detail = RwSignal::new(Detail::Loading);

    let client = api.client();
    spawn_local(async move {
        let next = match client.fetch_one::<Room>(&id).await {
            Ok(room) => Detail::Loaded(Box::new(room)),
            Err(e) => Detail::Failed(e.to_string()),
        };
        detail.set(next);
    });

    let body = move || match detail.get() {
        Detail::Loading => view! {
            <div class="flex justify-center py-12">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        Detail::Failed(message) => view! {
            <div role="alert" class="alert alert-error">
                <span>{message}</span>
            </div>
        }
        .into_any(),
        Detail::Loaded(room) => {
            let images = room.images.clone();
            view! {
                <h3 class="card-title">{format!("Room {}", room.room_number)}</h3>
                <div class="badge badge-outline">{room.status.label()}</div>
                <table class="table">
                    <tbody>
                        {row("Building", or_dash(room.building_name.clone()))}
                        {row("Room type", or_dash(room.room_type_name.clone()))}
                        {row("Floor", or_dash(room.floor.map(|f| f.to_string())))}
                        {row("Monthly price", money(room.price))}
                        {row("Area", or_dash(room.area.map(|a| format!("{} m²", a))))}
                        {row("Max occupancy", or_dash(room.max_occupancy.map(|n| n.to_string())))}
                        {row("Description", or_dash(room.description.clone()))}
                        {row("Created", display_date(room.created_at.as_ref()))}
                        {row("Updated", display_date(room.updated_at.as_ref()))}
                    </tbody>
                </table>
                <div class="flex flex-wrap gap-2">
                    {images
                        .into_iter()
                        .map(|url| view! { <img src=url class="h-40 rounded-box object-cover" /> })
                        .collect_view()}
                </div>
            }
            .into_any()
        }
    };

    view! {
        <button class="btn btn-ghost btn-sm" on:click=move |_| router.go(&AppRoute::Rooms)>
            "« Back to rooms"
        </button>
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">{body}</div>
        </div>
    }
}
