use crate::chat::ChatPane;
use crate::directory;
use crate::session::Session;
use crate::sidebar::Sidebar;
use crate::theme;
use crate::toast::{ToastHost, Toasts};
use leptos::*;

#[component]
pub fn App() -> impl IntoView {
    let session = Session::new();
    let toasts = Toasts::new();
    provide_context(session);
    provide_context(toasts);

    theme::init();
    directory::load_initial(session, toasts);

    view! {
        <div class="app-container">
            <Sidebar />
            <ChatPane />
            <ToastHost />
        </div>
    }
}
