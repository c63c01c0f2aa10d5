//! Field rendering driven by a draft's `FieldSpec` table.

use std::collections::BTreeMap;

use fscape_admin::form::{FieldKind, FieldSpec, FormDraft, FormWorkflow, TOGGLE_OPTIONS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;
use wasm_bindgen::JsCast;

use crate::api::{reference_options, use_api};
use crate::components::toast::use_toasts;

type References = RwSignal<BTreeMap<&'static str, Vec<(String, String)>>>;

/// Loads every reference select the draft declares.
fn load_references<D: FormDraft>() -> References {
    let api = use_api();
    let references: References = RwSignal::new(BTreeMap::new());

    for spec in D::FIELDS {
        let FieldKind::Reference(path) = spec.kind else {
            continue;
        };
        let client = api.client();
        spawn_local(async move {
            match reference_options(&client, path).await {
                Ok(options) => references.update(|r| {
                    r.insert(path, options);
                }),
                Err(e) => warn!(path, error = %e, "select options unavailable"),
            }
        });
    }
    references
}

/// Inputs for every field visible in the form's mode.
#[component]
pub fn FormFields<D: FormDraft + Send + Sync>(form: RwSignal<Option<FormWorkflow<D>>>) -> impl IntoView {
    let references = load_references::<D>();
    // Changes only with the form mode, so typing never rebuilds the inputs.
    let fields = Memo::new(move |_| {
        form.with(|f| {
            f.as_ref()
                .map(|f| f.fields().collect::<Vec<&'static FieldSpec>>())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-x-4">
            {move || {
                fields
                    .get()
                    .into_iter()
                    .map(|spec| field_input(spec, form, references))
                    .collect_view()
            }}
        </div>
    }
}

fn field_input<D: FormDraft + Send + Sync>(
    spec: &'static FieldSpec,
    form: RwSignal<Option<FormWorkflow<D>>>,
    references: References,
) -> AnyView {
    let key = spec.key;
    let value = move || form.with(|f| f.as_ref().map(|f| f.value(key).to_string()).unwrap_or_default());
    let error = move || form.with(|f| f.as_ref().and_then(|f| f.error(key).map(str::to_string)));
    let set = move |raw: String| {
        form.update(|f| {
            if let Some(f) = f {
                f.set_field(key, raw);
            }
        })
    };

    let choice = move |options: Vec<(String, String)>, placeholder: bool| {
        view! {
            <select
                class="select select-bordered w-full"
                on:change=move |ev| set(event_target_value(&ev))
            >
                {placeholder.then(|| view! { <option value="">"Select..."</option> })}
                {options
                    .into_iter()
                    .map(|(v, label)| {
                        let selected = {
                            let v = v.clone();
                            move || value() == v
                        };
                        view! { <option value=v selected=selected>{label}</option> }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    };

    let control = match spec.kind {
        FieldKind::TextArea => view! {
            <textarea
                class="textarea textarea-bordered w-full"
                rows="3"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Choice(options) => choice(owned(options), false),
        FieldKind::Toggle => choice(owned(TOGGLE_OPTIONS), false),
        FieldKind::Reference(path) => {
            let options = move || references.with(|r| r.get(path).cloned().unwrap_or_default());
            (move || choice(options(), true)).into_any()
        }
        kind => {
            let input_type = match kind {
                FieldKind::Email => "email",
                FieldKind::Password => "password",
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    class="input input-bordered w-full"
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    let wrapper = if matches!(spec.kind, FieldKind::TextArea) {
        "form-control w-full md:col-span-2"
    } else {
        "form-control w-full"
    };

    view! {
        <label class=wrapper>
            <div class="label">
                <span class="label-text">{spec.label} {spec.required.then_some(" *")}</span>
            </div>
            {control}
            <div class="label min-h-6 py-1">
                <span class="label-text-alt text-error">{error}</span>
            </div>
        </label>
    }
    .into_any()
}

fn owned(options: &'static [(&'static str, &'static str)]) -> Vec<(String, String)> {
    options
        .iter()
        .map(|(v, l)| (v.to_string(), l.to_string()))
        .collect()
}

/// Stored images plus locally picked ones. New files are only offered when
/// `allow_new` is set, since only the create pages upload.
#[component]
pub fn ImageField<D: FormDraft + Send + Sync>(
    form: RwSignal<Option<FormWorkflow<D>>>,
    #[prop(optional)] allow_new: bool,
) -> impl IntoView {
    let toasts = use_toasts();

    let stored = move || form.with(|f| f.as_ref().map(|f| f.images().to_vec()).unwrap_or_default());
    let pending = move || {
        form.with(|f| {
            f.as_ref()
                .map(|f| f.attachments().images().to_vec())
                .unwrap_or_default()
        })
    };

    let on_pick = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        let mut rejected = Vec::new();
        for i in 0..files.length() {
            let Some(file) = files.get(i) else { continue };
            let Ok(preview) = web_sys::Url::create_object_url_with_blob(&file) else {
                continue;
            };
            form.update(|f| {
                if let Some(f) = f {
                    if let Err(e) = f.attachments_mut().add(file.name(), &file.type_(), preview.clone()) {
                        let _ = web_sys::Url::revoke_object_url(&preview);
                        rejected.push(e.to_string());
                    }
                }
            });
        }
        input.set_value("");
        for message in rejected {
            toasts.error(message);
        }
    };

    view! {
        <div class="form-control w-full">
            <div class="label">
                <span class="label-text">"Images"</span>
            </div>
            <div class="flex flex-wrap gap-2">
                {move || {
                    stored()
                        .into_iter()
                        .map(|url| {
                            let remove = url.clone();
                            view! {
                                <div class="relative">
                                    <img src=url class="h-20 w-20 object-cover rounded-box" />
                                    <button
                                        type="button"
                                        class="btn btn-xs btn-circle btn-error absolute -top-2 -right-2"
                                        on:click=move |_| form.update(|f| {
                                            if let Some(f) = f {
                                                f.remove_image(&remove);
                                            }
                                        })
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
                {move || {
                    pending()
                        .into_iter()
                        .map(|image| {
                            let id = image.id;
                            view! {
                                <div class="relative opacity-80">
                                    <img src=image.preview_url title=image.file_name class="h-20 w-20 object-cover rounded-box border border-dashed" />
                                    <button
                                        type="button"
                                        class="btn btn-xs btn-circle absolute -top-2 -right-2"
                                        on:click=move |_| form.update(|f| {
                                            if let Some(removed) = f.as_mut().and_then(|f| f.attachments_mut().remove(id)) {
                                                let _ = web_sys::Url::revoke_object_url(&removed.preview_url);
                                            }
                                        })
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
            {allow_new.then(|| view! {
                <input
                    type="file"
                    accept="image/*"
                    multiple
                    class="file-input file-input-bordered file-input-sm w-full mt-2"
                    on:change=on_pick
                />
            })}
        </div>
    }
}
