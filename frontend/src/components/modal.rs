use leptos::prelude::*;

/// Native `<dialog>` shown modally while `open` is true. Escape and the
/// backdrop report through `on_close`.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(optional)] wide: bool,
    children: Children,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let box_class = if wide { "modal-box max-w-3xl" } else { "modal-box" };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| on_close.run(())>
            <div class=box_class>{children()}</div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

/// Yes/no confirmation for destructive or state-flipping actions.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    #[prop(into)] message: Signal<String>,
    #[prop(into)] confirm_label: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(optional)] danger: bool,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_class = if danger { "btn btn-error" } else { "btn btn-primary" };

    view! {
        <Modal open=open on_close=on_cancel>
            <h3 class="font-bold text-lg">{title}</h3>
            <p class="py-4 text-base-content/70">{message}</p>
            <div class="modal-action">
                <button class="btn btn-ghost" on:click=move |_| on_cancel.run(()) disabled=busy>
                    "Cancel"
                </button>
                <button class=confirm_class on:click=move |_| on_confirm.run(()) disabled=busy>
                    {move || busy.get().then(|| view! { <span class="loading loading-spinner"></span> })}
                    {confirm_label}
                </button>
            </div>
        </Modal>
    }
}
