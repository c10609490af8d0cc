use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Chat {
    pub id: u32,
    pub title: String,
}

/// Envelope of `GET /api/chats`; the order of `chats` is the sidebar order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatList {
    pub chats: Vec<Chat>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatDetail {
    pub id: u32,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    // The backend stores null when a message carries no images.
    #[serde(default)]
    images: Option<Vec<String>>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>, images: Vec<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: if images.is_empty() { None } else { Some(images) },
        }
    }

    pub fn images(&self) -> &[String] {
        self.images.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn css_class(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Reply of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Generated {
    pub content: String,
    #[serde(default)]
    images: Option<Vec<String>>,
}

impl Generated {
    pub fn images(&self) -> &[String] {
        self.images.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        let role: Role = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn message_images_tolerate_null_and_absence() {
        let with_null: Message =
            serde_json::from_str(r#"{"role":"user","content":"hi","images":null}"#).unwrap();
        assert!(with_null.images().is_empty());

        let without: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"hi"}"#).unwrap();
        assert!(without.images().is_empty());

        let with_images: Message =
            serde_json::from_str(r#"{"role":"user","content":"hi","images":["a.png","b.png"]}"#)
                .unwrap();
        assert_eq!(with_images.images(), ["a.png", "b.png"]);
    }

    #[test]
    fn chat_detail_defaults_to_no_messages() {
        let detail: ChatDetail = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert_eq!(detail.id, 3);
        assert!(detail.messages.is_empty());
    }
}
