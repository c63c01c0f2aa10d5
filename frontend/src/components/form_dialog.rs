use fscape_admin::form::{FormDraft, FormMode, FormWorkflow};
use fscape_admin::{DialogState, ListController, SubmitError};
use fscape_admin_shared::Resource;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::form_fields::{FormFields, ImageField};
use crate::components::modal::Modal;
use crate::components::toast::use_toasts;
use crate::components::views::ResourceView;

/// Create/edit modal bound to a list page's dialog state. The form is rebuilt
/// whenever the dialog opens on a new target; a successful save refetches the
/// page through `controller` and closes the dialog.
#[component]
pub fn FormDialog<V: ResourceView>(
    dialog: RwSignal<DialogState<V>>,
    controller: RwSignal<ListController<V>>,
) -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();
    let form = RwSignal::new(None::<FormWorkflow<V::Draft>>);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        let next = dialog.with(FormWorkflow::<V::Draft>::for_dialog);
        form.set(next);
    });

    let open = Signal::derive(move || dialog.with(DialogState::is_form));
    let title = move || match dialog.with(|d| d.target().map(|t| t.title())) {
        Some(name) => format!("Edit {}", name),
        None => format!("New {}", V::NAME),
    };
    let submit_error = move || form.with(|f| f.as_ref().and_then(|f| f.submit_error().map(str::to_string)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(mut working) = form.get_untracked() else {
            return;
        };
        let client = api.client();
        saving.set(true);
        // Form and controller are driven as copies and stored back; the
        // inputs are disabled until then.
        spawn_local(async move {
            let mut list = controller.get_untracked();
            let outcome = working.submit(&mut list, &client).await;
            let created = matches!(working.mode(), FormMode::Create);
            form.set(Some(working));
            saving.set(false);
            match outcome {
                Ok(()) => {
                    controller.set(list);
                    let verb = if created { "created" } else { "updated" };
                    toasts.success(format!("{} {}", capitalize(V::NAME), verb));
                    dialog.update(DialogState::close);
                }
                // Field errors are shown inline.
                Err(SubmitError::Invalid(_)) => {}
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <Modal open=open on_close=Callback::new(move |_| dialog.update(DialogState::close)) wide=true>
            <h3 class="font-bold text-lg mb-2">{title}</h3>
            <form on:submit=on_submit class="space-y-2">
                <Show when=move || submit_error().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || submit_error().unwrap_or_default()}</span>
                    </div>
                </Show>

                <fieldset disabled=move || saving.get()>
                    <FormFields<V::Draft> form=form />
                    {<V::Draft as FormDraft>::ACCEPTS_IMAGES.then(|| view! { <ImageField<V::Draft> form=form /> })}
                </fieldset>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| dialog.update(DialogState::close)>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || saving.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                        "Save"
                    </button>
                </div>
            </form>
        </Modal>
    }
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
