use crate::directory;
use crate::session::Session;
use crate::state::Chat;
use crate::theme::ThemeToggle;
use crate::toast::Toasts;
use ev::MouseEvent;
use leptos::*;

const TITLE_LIMIT: usize = 20;
const TITLE_KEPT: usize = 17;

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_LIMIT {
        let kept: String = title.chars().take(TITLE_KEPT).collect();
        format!("{kept}...")
    } else {
        title.to_owned()
    }
}

/// One sidebar row as plain data, so ordering and active marking can be
/// tested without a DOM.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarItem {
    pub id: u32,
    pub label: String,
    pub title: String,
    pub active: bool,
}

pub fn sidebar_items(chats: &[Chat], current: Option<u32>) -> Vec<SidebarItem> {
    chats
        .iter()
        .map(|chat| SidebarItem {
            id: chat.id,
            label: truncate_title(&chat.title),
            title: chat.title.clone(),
            active: current == Some(chat.id),
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<Session>();
    let toasts = expect_context::<Toasts>();
    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <button class="new-chat" on:click=move |_| directory::create_chat(session, toasts)>
                    "+ New chat"
                </button>
                <ThemeToggle />
            </div>
            <div class="chat-history">
                {move || {
                    sidebar_items(&session.chats.get(), session.current_chat.get())
                        .into_iter()
                        .map(|item| {
                            let id = item.id;
                            let select = move |_| directory::load_chat(session, toasts, id);
                            let remove = move |ev: MouseEvent| {
                                // Keep the click off the row's select handler.
                                ev.stop_propagation();
                                directory::delete_chat(session, toasts, id);
                            };
                            let rename_title = item.title.clone();
                            let rename = move |ev: MouseEvent| {
                                ev.prevent_default();
                                directory::rename_chat(
                                    session,
                                    toasts,
                                    id,
                                    rename_title.clone(),
                                );
                            };
                            view! {
                                <div
                                    class="chat-item"
                                    class:active=item.active
                                    title=item.title.clone()
                                    on:click=select
                                    on:dblclick=rename
                                >
                                    <span class="chat-title">{item.label.clone()}</span>
                                    <button class="delete-chat" title="Delete chat" on:click=remove>
                                        <svg viewBox="0 0 24 24" width="14" height="14" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round">
                                            <path d="M3 6h18M8 6V4a1 1 0 0 1 1-1h6a1 1 0 0 1 1 1v2m3 0v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6" />
                                        </svg>
                                    </button>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_at_the_limit_render_unmodified() {
        let title = "a".repeat(20);
        assert_eq!(truncate_title(&title), title);
        assert_eq!(truncate_title("short"), "short");
    }

    #[test]
    fn titles_over_the_limit_keep_seventeen_chars_plus_ellipsis() {
        let title = "b".repeat(21);
        let truncated = truncate_title(&title);
        assert_eq!(truncated, format!("{}...", "b".repeat(17)));
        assert_eq!(truncated.chars().count(), 20);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let title = "я".repeat(21);
        assert_eq!(truncate_title(&title), format!("{}...", "я".repeat(17)));
    }

    fn chats() -> Vec<Chat> {
        vec![
            Chat { id: 7, title: "first".to_owned() },
            Chat { id: 3, title: "second".to_owned() },
            Chat { id: 9, title: "third".to_owned() },
        ]
    }

    #[test]
    fn rows_follow_server_order() {
        let items = sidebar_items(&chats(), None);
        let ids: Vec<u32> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, [7, 3, 9]);
    }

    #[test]
    fn exactly_one_row_matches_the_active_chat() {
        let items = sidebar_items(&chats(), Some(3));
        let active: Vec<u32> = items.iter().filter(|i| i.active).map(|i| i.id).collect();
        assert_eq!(active, [3]);
    }

    #[test]
    fn no_row_is_active_without_a_current_chat() {
        let items = sidebar_items(&chats(), None);
        assert!(items.iter().all(|item| !item.active));
    }
}
