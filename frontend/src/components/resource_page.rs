//! Generic list page
//!
//! Every collection screen is this component over a [`ResourceView`]. The
//! controller and dialog live in signals; each query change hands back a
//! fetch ticket that is run here and applied with `complete_fetch`, which
//! drops responses that arrive out of order.

use fscape_admin::query::{ALL_FILTER_VALUE, SortDirection};
use fscape_admin::{ActivityFilter, DialogState, FetchTicket, ListController, ResourceError};
use fscape_admin_shared::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::form_dialog::FormDialog;
use crate::components::modal::ConfirmDialog;
use crate::components::toast::use_toasts;
use crate::components::views::ResourceView;
use crate::web::router::use_router;

#[component]
pub fn ResourcePage<V: ResourceView>() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();
    let router = use_router();

    let controller = RwSignal::new(ListController::<V>::new(api.page_size()));
    let dialog = RwSignal::new(DialogState::<V>::Closed);
    let busy = RwSignal::new(false);

    let fetch = move |ticket: FetchTicket| {
        let client = api.client();
        spawn_local(async move {
            let outcome = client.list::<V>(ticket.request()).await;
            controller.update(|c| {
                c.complete_fetch(ticket, outcome);
            });
        });
    };
    let apply = move |change: Option<Result<Option<FetchTicket>, ResourceError>>| match change {
        Some(Ok(Some(ticket))) => fetch(ticket),
        Some(Err(e)) => toasts.error(e.to_string()),
        _ => {}
    };

    if let Some(ticket) = controller.try_update(|c| c.refresh()) {
        fetch(ticket);
    }

    // ---- query controls ----

    let on_search = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        if let Some(Some(ticket)) = controller.try_update(|c| c.set_search(&text)) {
            fetch(ticket);
        }
    };
    let on_activity = move |ev: web_sys::Event| {
        let raw = event_target_value(&ev);
        let activity = ActivityFilter::from_value(Some(raw.as_str()));
        apply(controller.try_update(|c| c.set_activity(activity)));
    };
    let on_sort = move |field: &'static str| apply(controller.try_update(|c| c.set_sort(field)));
    let go_to_page = move |page: u32| {
        apply(controller.try_update(|c| c.set_page(page).map(Some)));
    };
    let on_retry = move |_| {
        if let Some(Some(ticket)) = controller.try_update(|c| c.retry()) {
            fetch(ticket);
        }
    };

    // ---- confirmed mutations ----
    //
    // The drivers need the controller across an await, so they run on a copy
    // that is stored back afterwards. The open modal keeps the list controls
    // idle meanwhile; a fetch still in flight is dropped by its older ticket.

    let confirm_toggle = move || {
        let Some(confirmed) = dialog.with_untracked(|d| d.confirm_toggle()) else {
            return;
        };
        let title = confirmed.target().title();
        let state = if confirmed.next_active() { "activated" } else { "deactivated" };
        let client = api.client();
        busy.set(true);
        spawn_local(async move {
            let mut list = controller.get_untracked();
            match list.toggle_active(&client, confirmed).await {
                Ok(()) => {
                    controller.set(list);
                    toasts.success(format!("{} {}", title, state));
                    dialog.update(DialogState::close);
                }
                Err(e) => toasts.error(e.to_string()),
            }
            busy.set(false);
        });
    };

    let confirm_delete = move || {
        let Some(confirmed) = dialog.with_untracked(|d| d.confirm_delete()) else {
            return;
        };
        let title = confirmed.target().title();
        let client = api.client();
        busy.set(true);
        spawn_local(async move {
            let mut list = controller.get_untracked();
            match list.remove(&client, confirmed).await {
                Ok(()) => {
                    controller.set(list);
                    toasts.success(format!("{} deleted", title));
                    dialog.update(DialogState::close);
                }
                Err(e) => toasts.error(e.to_string()),
            }
            busy.set(false);
        });
    };

    let close_dialog = Callback::new(move |_| dialog.update(DialogState::close));

    let on_create = move |_| match V::create_route() {
        Some(route) => router.go(&route),
        None => dialog.update(DialogState::open_create),
    };

    // ---- derived view state ----

    let is_loading = move || controller.with(ListController::is_loading);
    let error = move || controller.with(|c| c.error().map(str::to_string));
    let total_pages = move || controller.with(ListController::total_pages);
    let current_page = move || controller.with(ListController::current_page);
    let sort_marker = move |field: &'static str| {
        controller.with(|c| match c.query().sort() {
            Some(sort) if sort.field == field => match sort.direction {
                SortDirection::Asc => " ▲",
                SortDirection::Desc => " ▼",
            },
            _ => "",
        })
    };
    let activity_filter = V::ACTIVE_FIELD
        .filter(|field| V::FILTER_KEYS.contains(field))
        .is_some();
    let colspan = (V::COLUMNS.len() + 1).to_string();
    let colspan_empty = colspan.clone();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex flex-wrap items-center justify-between gap-2 p-6 pb-2">
                    <div>
                        <h3 class="card-title">{V::HEADING}</h3>
                        <p class="text-base-content/70 text-sm">
                            {move || format!("{} total", controller.with(ListController::total_count))}
                        </p>
                    </div>
                    <button class="btn btn-primary btn-sm" on:click=on_create>
                        {format!("New {}", V::NAME)}
                    </button>
                </div>

                <div class="flex flex-wrap gap-2 px-6 pb-4">
                    <input
                        type="search"
                        placeholder="Search..."
                        class="input input-bordered input-sm w-full max-w-xs"
                        prop:value=move || controller.with(|c| c.query().search().to_string())
                        on:change=on_search
                    />
                    {activity_filter.then(|| view! {
                        <select class="select select-bordered select-sm" on:change=on_activity>
                            {ActivityFilter::ALL
                                .into_iter()
                                .map(|a| {
                                    let value = a.value().unwrap_or(ALL_FILTER_VALUE);
                                    let selected = move || controller.with(ListController::activity) == a;
                                    view! { <option value=value selected=selected>{a.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    })}
                    {V::FILTERS
                        .iter()
                        .map(|spec| {
                            let key = spec.key;
                            view! {
                                <select
                                    class="select select-bordered select-sm"
                                    on:change=move |ev| {
                                        let value = Some(event_target_value(&ev));
                                        apply(controller.try_update(|c| c.set_filter(key, value)));
                                    }
                                >
                                    <option value=ALL_FILTER_VALUE>{format!("{}: all", spec.label)}</option>
                                    {spec
                                        .options
                                        .iter()
                                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                        .collect_view()}
                                </select>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || error().is_some()>
                    <div role="alert" class="alert alert-error mx-6 mb-4 text-sm">
                        <span>{move || error().unwrap_or_default()}</span>
                        <button class="btn btn-sm" on:click=on_retry>"Retry"</button>
                    </div>
                </Show>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                {V::COLUMNS
                                    .iter()
                                    .map(|column| match column.sort {
                                        Some(field) => view! {
                                            <th class="cursor-pointer select-none" on:click=move |_| on_sort(field)>
                                                {column.label}
                                                {move || sort_marker(field)}
                                            </th>
                                        }
                                        .into_any(),
                                        None => view! { <th>{column.label}</th> }.into_any(),
                                    })
                                    .collect_view()}
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || is_loading() && controller.with(|c| c.items().is_empty())>
                                <tr>
                                    <td colspan=colspan.clone() class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span>
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !is_loading() && error().is_none() && controller.with(|c| c.items().is_empty())>
                                <tr>
                                    <td colspan=colspan_empty.clone() class="text-center py-8 text-base-content/50">
                                        "Nothing here yet."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || controller.with(|c| c.items().to_vec())
                                key=|item: &V| item.id().clone()
                                children=move |item: V| {
                                    let detail = item.detail_route();
                                    let active = item.active_flag();
                                    let for_edit = item.clone();
                                    let for_toggle = item.clone();
                                    let for_delete = item.clone();
                                    view! {
                                        <tr class:opacity-60=move || is_loading()>
                                            {item.cells().into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                            <td class="whitespace-nowrap text-right">
                                                {detail.map(|route| view! {
                                                    <button class="btn btn-ghost btn-xs" on:click=move |_| router.go(&route)>
                                                        "View"
                                                    </button>
                                                })}
                                                <button
                                                    class="btn btn-ghost btn-xs"
                                                    on:click=move |_| dialog.update(|d| d.open_edit(for_edit.clone()))
                                                >
                                                    "Edit"
                                                </button>
                                                {active.map(|is_active| view! {
                                                    <button
                                                        class="btn btn-ghost btn-xs"
                                                        on:click=move |_| {
                                                            let target = for_toggle.clone();
                                                            let asked = dialog.try_update(|d| d.ask_toggle(target));
                                                            if let Some(Err(e)) = asked {
                                                                toasts.error(e.to_string());
                                                            }
                                                        }
                                                    >
                                                        {if is_active { "Deactivate" } else { "Activate" }}
                                                    </button>
                                                })}
                                                <button
                                                    class="btn btn-ghost btn-xs text-error"
                                                    on:click=move |_| dialog.update(|d| d.ask_delete(for_delete.clone()))
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>

                <div class="flex items-center justify-end gap-2 p-4">
                    <span class="text-sm text-base-content/70">
                        {move || format!("Page {} of {}", current_page(), total_pages())}
                    </span>
                    <div class="join">
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || is_loading() || current_page() <= 1
                            on:click=move |_| go_to_page(current_page().saturating_sub(1))
                        >
                            "«"
                        </button>
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || is_loading() || current_page() >= total_pages()
                            on:click=move |_| go_to_page(current_page() + 1)
                        >
                            "»"
                        </button>
                    </div>
                </div>
            </div>
        </div>

        <FormDialog<V> dialog=dialog controller=controller />

        <ConfirmDialog
            open=Signal::derive(move || dialog.with(|d| matches!(d, DialogState::ConfirmingDelete(_))))
            title=Signal::derive(move || format!("Delete {}?", V::NAME))
            message=Signal::derive(move || {
                dialog.with(|d| {
                    d.target()
                        .map(|t| format!("{} will be removed permanently.", t.title()))
                        .unwrap_or_default()
                })
            })
            confirm_label="Delete"
            busy=busy
            danger=true
            on_confirm=Callback::new(move |_| confirm_delete())
            on_cancel=close_dialog
        />

        <ConfirmDialog
            open=Signal::derive(move || dialog.with(|d| matches!(d, DialogState::ConfirmingToggle(_))))
            title=Signal::derive(move || format!("Change {} status?", V::NAME))
            message=Signal::derive(move || {
                dialog.with(|d| match d.target() {
                    Some(t) if t.active_flag() == Some(true) => format!("{} will be deactivated.", t.title()),
                    Some(t) => format!("{} will be activated.", t.title()),
                    None => String::new(),
                })
            })
            confirm_label="Confirm"
            busy=busy
            on_confirm=Callback::new(move |_| confirm_toggle())
            on_cancel=close_dialog
        />
    }
}

