//! The single active chat session. All chat-scoped UI state lives here and
//! is mutated through these methods only; ad hoc writes from components are
//! off the table.

use crate::message::MessageView;
use crate::state::Chat;
use leptos::*;

#[derive(Clone, Copy)]
pub struct Session {
    pub current_chat: RwSignal<Option<u32>>,
    pub chats: RwSignal<Vec<Chat>>,
    pub messages: RwSignal<Vec<MessageView>>,
    pub generating: RwSignal<bool>,
    // Bumped on every session-changing action; in-flight responses carry the
    // value they started with and are discarded when it no longer matches.
    epoch: RwSignal<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            current_chat: create_rw_signal(None),
            chats: create_rw_signal(Vec::new()),
            messages: create_rw_signal(Vec::new()),
            generating: create_rw_signal(false),
            epoch: create_rw_signal(0),
        }
    }

    /// Makes `id` the active chat and returns a freshness token for the
    /// round trip that follows.
    pub fn activate(&self, id: Option<u32>) -> u64 {
        self.current_chat.set(id);
        self.epoch.update(|epoch| *epoch += 1);
        self.epoch.get_untracked()
    }

    pub fn token(&self) -> u64 {
        self.epoch.get_untracked()
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.epoch.get_untracked() == token
    }

    pub fn clear_messages(&self) {
        self.messages.update(|messages| messages.clear());
    }

    pub fn replace_messages(&self, views: Vec<MessageView>) {
        self.messages.set(views);
    }

    pub fn push_message(&self, view: MessageView) {
        self.messages.update(|messages| messages.push(view));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    #[test]
    fn activation_invalidates_older_tokens() {
        let runtime = create_runtime();
        let session = Session::new();

        let first = session.activate(Some(1));
        assert!(session.is_current(first));
        assert_eq!(session.current_chat.get_untracked(), Some(1));

        let second = session.activate(Some(2));
        assert!(!session.is_current(first));
        assert!(session.is_current(second));

        let cleared = session.activate(None);
        assert!(session.is_current(cleared));
        assert_eq!(session.current_chat.get_untracked(), None);

        runtime.dispose();
    }
}
