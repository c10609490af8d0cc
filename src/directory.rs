//! Chat directory operations and the session loader. Every function logs
//! its failure and raises a toast; successful responses that outlived a
//! session change are discarded instead of rendered.

use crate::api;
use crate::message::MessageView;
use crate::session::Session;
use crate::state::Chat;
use crate::toast::Toasts;
use leptos::logging::error;
use leptos::*;

pub const DEFAULT_CHAT_TITLE: &str = "New chat";

/// Initial load: populate the sidebar, then open the first chat or create
/// one when none exist yet.
pub fn load_initial(session: Session, toasts: Toasts) {
    spawn_local(async move {
        match api::list_chats().await {
            Ok(chats) => {
                let first = chats.first().map(|chat| chat.id);
                session.chats.set(chats);
                match first {
                    Some(id) => load_chat(session, toasts, id),
                    None => create_chat(session, toasts),
                }
            }
            Err(err) => {
                error!("failed to load chats: {err}");
                toasts.error("Failed to load chats");
            }
        }
    });
}

/// Re-fetches the directory, keeping the backend's order. Returns the list
/// actually shown afterward so callers can pick a follow-up chat from it.
async fn refresh(session: Session, toasts: Toasts) -> Vec<Chat> {
    match api::list_chats().await {
        Ok(chats) => {
            session.chats.set(chats.clone());
            chats
        }
        Err(err) => {
            error!("failed to refresh chats: {err}");
            toasts.error("Failed to load chats");
            session.chats.get_untracked()
        }
    }
}

pub fn load_chat(session: Session, toasts: Toasts, id: u32) {
    // Active immediately, before the round trip resolves.
    let token = session.activate(Some(id));
    spawn_local(async move {
        match api::fetch_chat(id).await {
            Ok(detail) if session.is_current(token) => {
                let views = detail.messages.iter().map(MessageView::from_message).collect();
                session.replace_messages(views);
            }
            Ok(_) => {}
            Err(err) => {
                error!("failed to load chat {id}: {err}");
                toasts.error("Failed to load chat");
            }
        }
    });
}

pub fn create_chat(session: Session, toasts: Toasts) {
    spawn_local(async move {
        match api::create_chat(DEFAULT_CHAT_TITLE).await {
            Ok(chat) => {
                session.activate(Some(chat.id));
                session.clear_messages();
                refresh(session, toasts).await;
            }
            Err(err) => {
                error!("failed to create chat: {err}");
                toasts.error("Failed to create chat");
            }
        }
    });
}

pub fn delete_chat(session: Session, toasts: Toasts, id: u32) {
    let confirmed = window()
        .confirm_with_message("Delete this chat?")
        .unwrap_or(false);
    if !confirmed {
        return;
    }
    spawn_local(async move {
        match api::delete_chat(id).await {
            Ok(()) => {
                let chats = refresh(session, toasts).await;
                if session.current_chat.get_untracked() == Some(id) {
                    session.activate(None);
                    session.clear_messages();
                    match chats.first() {
                        Some(next) => load_chat(session, toasts, next.id),
                        None => create_chat(session, toasts),
                    }
                }
            }
            Err(err) => {
                error!("failed to delete chat {id}: {err}");
                toasts.error("Failed to delete chat");
            }
        }
    });
}

pub fn rename_chat(session: Session, toasts: Toasts, id: u32, current_title: String) {
    let input = window()
        .prompt_with_message_and_default("Rename chat", &current_title)
        .ok()
        .flatten();
    let Some(title) = input else {
        return;
    };
    let title = title.trim().to_owned();
    if title.is_empty() || title == current_title {
        return;
    }
    spawn_local(async move {
        match api::rename_chat(id, &title).await {
            Ok(()) => {
                refresh(session, toasts).await;
            }
            Err(err) => {
                error!("failed to rename chat {id}: {err}");
                toasts.error("Failed to rename chat");
            }
        }
    });
}
