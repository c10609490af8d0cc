mod api;
mod app;
mod attachment;
mod chat;
mod directory;
mod markdown;
mod message;
mod session;
mod sidebar;
mod state;
mod theme;
mod toast;

use app::*;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App /> }
    })
}
