use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const TOAST_MILLIS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

/// Single-slot notification area; a newer toast replaces the current one.
#[derive(Clone, Copy)]
pub struct Toasts {
    current: RwSignal<Option<Toast>>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.show(Toast {
            message: message.into(),
            is_error: false,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Toast {
            message: message.into(),
            is_error: true,
        });
    }

    fn show(&self, toast: Toast) {
        let current = self.current;
        current.set(Some(toast.clone()));
        // only clear if nothing newer arrived meanwhile
        Timeout::new(TOAST_MILLIS, move || {
            if current.with_untracked(|c| c.as_ref() == Some(&toast)) {
                current.set(None);
            }
        })
        .forget();
    }
}

pub fn provide_toasts() -> Toasts {
    let toasts = Toasts {
        current: RwSignal::new(None),
    };
    provide_context(toasts);
    toasts
}

pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().expect("Toasts should be provided")
}

#[component]
pub fn ToastOutlet() -> impl IntoView {
    let toasts = use_toasts();

    move || {
        toasts.current.get().map(|toast| {
            let class = if toast.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class>
                        <span>{toast.message}</span>
                    </div>
                </div>
            }
        })
    }
}
