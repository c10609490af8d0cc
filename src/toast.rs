//! Transient error toasts. Each toast lives for 3.3 s: visible class added
//! after 100 ms, removed at 3 s, the element dropped 300 ms later so the
//! hide transition can finish. Toasts stack independently.

use leptos::*;
use std::time::Duration;

#[derive(Clone)]
pub struct Toast {
    pub id: u64,
    pub text: String,
    pub shown: RwSignal<bool>,
}

#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            items: create_rw_signal(Vec::new()),
            next_id: create_rw_signal(0),
        }
    }

    pub fn error(&self, text: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        let shown = create_rw_signal(false);
        self.items.update(|items| {
            items.push(Toast {
                id,
                text: text.into(),
                shown,
            })
        });
        set_timeout(move || shown.set(true), Duration::from_millis(100));
        set_timeout(move || shown.set(false), Duration::from_millis(3000));
        let items = self.items;
        set_timeout(
            move || items.update(|items| items.retain(|toast| toast.id != id)),
            Duration::from_millis(3300),
        );
    }

    fn items(&self) -> Vec<Toast> {
        self.items.get()
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<Toasts>();
    view! {
        <div class="toast-container">
            {move || {
                toasts
                    .items()
                    .into_iter()
                    .map(|toast| {
                        let shown = toast.shown;
                        view! {
                            <div class="error-toast" class:show=move || shown.get()>
                                {toast.text.clone()}
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
