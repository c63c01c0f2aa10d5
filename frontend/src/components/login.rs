use fscape_admin::Credentials;
use leptos::prelude::*;
use tracing::warn;

use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::modal::Modal;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (api_base, set_api_base) = signal(api.api_base());
    let (show_advanced, set_show_advanced) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (contact_open, set_contact_open) = signal(false);

    // The router's auth watcher moves us off this page on success.
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let base = api_base.get_untracked();
        if base != api.api_base() {
            api.set_api_base(&base);
        }

        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());
        if let Err(e) = login(&auth, &credentials) {
            warn!(email = %credentials.email, error = %e, "sign-in rejected");
            set_password.set(String::new());
            set_error_msg.set(Some(e.to_string()));
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"FScape Admin"</h1>
                    <p class="text-base-content/70">"Sign in to manage buildings, rooms and residents"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="admin@fscape.com"
                                autocomplete="username"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>

                        <button
                            type="button"
                            class="link link-hover text-xs text-base-content/60 text-left mt-2"
                            on:click=move |_| set_show_advanced.update(|v| *v = !*v)
                        >
                            "API server"
                        </button>
                        <Show when=move || show_advanced.get()>
                            <div class="form-control">
                                <input
                                    id="api_base"
                                    type="url"
                                    placeholder="https://fscape-api.onrender.com"
                                    on:input=move |ev| set_api_base.set(event_target_value(&ev))
                                    prop:value=api_base
                                    class="input input-bordered input-sm"
                                />
                                <label class="label">
                                    <span class="label-text-alt text-base-content/50">"Leave blank for the default server"</span>
                                </label>
                            </div>
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary">"Sign in"</button>
                        </div>
                        <p class="text-center text-sm text-base-content/70 mt-2">
                            "Trouble signing in? "
                            <button
                                type="button"
                                class="link link-primary link-hover"
                                on:click=move |_| set_contact_open.set(true)
                            >
                                "Contact us."
                            </button>
                        </p>
                    </form>
                </div>
            </div>
        </div>

        <ContactDialog open=contact_open on_close=Callback::new(move |_| set_contact_open.set(false)) />
    }
}

/// Static card with the administrator's email and phone.
#[component]
fn ContactDialog(#[prop(into)] open: Signal<bool>, on_close: Callback<()>) -> impl IntoView {
    let support = use_api().support();
    let mailto = support.mailto_href();
    let tel = support.tel_href();

    view! {
        <Modal open=open on_close=on_close>
            <h3 class="font-bold text-lg">"Contact the administrator"</h3>
            <div class="space-y-3 pt-3">
                <a href=mailto class="flex flex-col rounded-lg border border-base-300 px-4 py-3 hover:bg-base-200">
                    <span class="text-xs text-base-content/60">"Email"</span>
                    <span class="font-semibold">{support.email}</span>
                </a>
                <a href=tel class="flex flex-col rounded-lg border border-base-300 px-4 py-3 hover:bg-base-200">
                    <span class="text-xs text-base-content/60">"Phone"</span>
                    <span class="font-semibold">{support.phone}</span>
                </a>
            </div>
            <div class="modal-action">
                <button type="button" class="btn" on:click=move |_| on_close.run(())>"Close"</button>
            </div>
        </Modal>
    }
}
