use fscape_admin::SubmitError;
use fscape_admin::form::{FormDraft, FormWorkflow, NoUploader};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::form_dialog::capitalize;
use crate::components::form_fields::{FormFields, ImageField};
use crate::components::toast::use_toasts;
use crate::components::views::ResourceView;
use crate::web::router::use_router;

/// Full-page create form. Picked images go through the uploader before the
/// record is saved; the list page is shown afterwards.
#[component]
pub fn CreatePage<V: ResourceView>() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();
    let router = use_router();

    let form = RwSignal::new(Some(FormWorkflow::<V::Draft>::create()));
    let saving = RwSignal::new(false);

    let submit_error = move || form.with(|f| f.as_ref().and_then(|f| f.submit_error().map(str::to_string)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        // Work on a copy while awaiting; the inputs are disabled meanwhile.
        let Some(mut working) = form.get_untracked() else {
            return;
        };
        let client = api.client();
        saving.set(true);
        spawn_local(async move {
            let outcome = working.save_with_uploads(&client, &NoUploader).await;
            form.set(Some(working));
            saving.set(false);
            match outcome {
                Ok(()) => {
                    toasts.success(format!("{} created", capitalize(V::NAME)));
                    router.go(&V::list_route());
                }
                Err(SubmitError::Invalid(_)) => {}
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-4xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">{format!("New {}", V::NAME)}</h3>

                <Show when=move || submit_error().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || submit_error().unwrap_or_default()}</span>
                    </div>
                </Show>

                <fieldset disabled=move || saving.get()>
                    <FormFields<V::Draft> form=form />
                    {<V::Draft as FormDraft>::ACCEPTS_IMAGES.then(|| view! { <ImageField<V::Draft> form=form allow_new=true /> })}
                </fieldset>

                <div class="card-actions justify-end mt-4">
                    <button type="button" class="btn btn-ghost" on:click=move |_| router.go(&V::list_route())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || saving.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                        "Create"
                    </button>
                </div>
            </form>
        </div>
    }
}
