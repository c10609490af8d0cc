//! The message pane and the submission pipeline: optimistic user message,
//! generating indicator, one multipart request, assistant reply or inline
//! error. The indicator always comes back down.

use crate::api;
use crate::attachment::{self, Attachment};
use crate::message::{ImageSrc, MessageBubble, MessageView};
use crate::session::Session;
use crate::state::Role;
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;
use wasm_bindgen::prelude::*;

pub const DEFAULT_IMAGE_PROMPT: &str = "Analyze these images";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = hljs, js_name = highlightAll)]
    fn highlight_all() -> Result<(), JsValue>;
}

/// Decides what actually gets submitted: typed text wins, attachments alone
/// fall back to the fixed caption, and nothing at all submits nothing.
pub fn effective_prompt(text: &str, has_attachments: bool) -> Option<String> {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        Some(trimmed.to_owned())
    } else if has_attachments {
        Some(DEFAULT_IMAGE_PROMPT.to_owned())
    } else {
        None
    }
}

pub fn generation_failure(err: &api::ApiError) -> String {
    format!("Error: {err}")
}

pub fn send_message(session: Session, text: &str, attachments: Vec<Attachment>) {
    let Some(chat_id) = session.current_chat.get_untracked() else {
        return;
    };
    let Some(prompt) = effective_prompt(text, !attachments.is_empty()) else {
        return;
    };

    let previews = attachments
        .iter()
        .map(|attachment| ImageSrc::Preview {
            name: attachment.name.clone(),
            data_url: attachment.data_url(),
        })
        .collect();
    session.push_message(MessageView::new(Role::User, &prompt, previews));
    session.generating.set(true);

    let token = session.token();
    spawn_local(async move {
        match api::generate(chat_id, &prompt, &attachments).await {
            Ok(reply) if session.is_current(token) => {
                let images = reply.images().iter().cloned().map(ImageSrc::Stored).collect();
                session.push_message(MessageView::new(Role::Assistant, &reply.content, images));
            }
            // The user moved on; drop the reply instead of painting over
            // the new chat.
            Ok(_) => {}
            Err(err) => {
                error!("generation failed: {err}");
                if session.is_current(token) {
                    session.push_message(MessageView::new(
                        Role::Assistant,
                        &generation_failure(&err),
                        Vec::new(),
                    ));
                }
            }
        }
        session.generating.set(false);
    });
}

#[component]
pub fn ChatPane() -> impl IntoView {
    let session = expect_context::<Session>();
    let (draft, set_draft) = create_signal(String::new());
    let pane = create_node_ref::<html::Div>();
    let file_input = create_node_ref::<html::Input>();

    // Pin the scroll and re-run highlighting after every pane change.
    create_effect(move |_| {
        session.messages.track();
        session.generating.track();
        if let Some(el) = pane.get() {
            request_animation_frame(move || {
                el.set_scroll_top(el.scroll_height());
                if let Err(err) = highlight_all() {
                    error!("highlight.js unavailable: {err:?}");
                }
            });
        }
    });

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if session.current_chat.get_untracked().is_none() {
            return;
        }
        let text = draft.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        send_message(session, &text, Vec::new());
        set_draft.set(String::new());
    };

    let attach = move |_| {
        if let Some(input) = file_input.get() {
            input.click();
        }
    };

    let on_files = move |_| {
        let Some(input) = file_input.get() else {
            return;
        };
        let Some(files) = input.files() else {
            return;
        };
        if files.length() == 0 || session.current_chat.get_untracked().is_none() {
            return;
        }
        let text = draft.get_untracked();
        spawn_local(async move {
            let attachments = attachment::read_all(&files).await;
            if !attachments.is_empty() {
                send_message(session, &text, attachments);
            }
        });
        input.set_value("");
    };

    view! {
        <main class="chat-container">
            <div class="chat-messages" node_ref=pane>
                {move || {
                    session
                        .messages
                        .get()
                        .into_iter()
                        .map(|message| view! { <MessageBubble view=message /> })
                        .collect::<Vec<_>>()
                }}
            </div>
            <div
                class="typing-indicator"
                style:display=move || if session.generating.get() { "flex" } else { "none" }
            >
                <span></span>
                <span></span>
                <span></span>
            </div>
            <form id="chat-form" on:submit=submit>
                <button type="button" class="attach-button" title="Attach images" on:click=attach>
                    <svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round">
                        <rect x="3" y="3" width="18" height="18" rx="2" />
                        <circle cx="8.5" cy="8.5" r="1.5" />
                        <path d="m21 15-5-5L5 21" />
                    </svg>
                </button>
                <input
                    type="file"
                    id="file-input"
                    accept="image/*"
                    multiple
                    hidden
                    node_ref=file_input
                    on:change=on_files
                />
                <input
                    id="chat-input"
                    placeholder="Your message..."
                    autocomplete="off"
                    prop:value=draft
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                />
                <button type="submit" class="send-button" title="Send message">
                    <svg viewBox="0 0 24 24" width="18" height="18" fill="currentColor">
                        <path d="m2 21 21-9L2 3v7l15 2-15 2v7Z" />
                    </svg>
                </button>
            </form>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_text_is_submitted_trimmed() {
        assert_eq!(effective_prompt("  hi  ", false).as_deref(), Some("hi"));
        assert_eq!(effective_prompt("hi", true).as_deref(), Some("hi"));
    }

    #[test]
    fn blank_text_with_attachments_uses_the_default_caption() {
        assert_eq!(
            effective_prompt("", true).as_deref(),
            Some("Analyze these images")
        );
        assert_eq!(
            effective_prompt("   ", true).as_deref(),
            Some(DEFAULT_IMAGE_PROMPT)
        );
    }

    #[test]
    fn blank_text_without_attachments_submits_nothing() {
        assert_eq!(effective_prompt("", false), None);
        assert_eq!(effective_prompt("  \n ", false), None);
    }

    #[test]
    fn failed_generation_reads_as_an_error_message() {
        let err = api::ApiError::Status(reqwest::StatusCode::BAD_GATEWAY);
        let content = generation_failure(&err);
        assert!(content.starts_with("Error: "));
        assert!(content.contains("502"));
    }
}
