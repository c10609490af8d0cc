use crate::markdown;
use crate::state::{Message, Role};
use chrono::Local;
use leptos::*;

/// Where a displayed image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSrc {
    /// Server-stored reference, served under the static image namespace.
    Stored(String),
    /// Freshly selected attachment, previewed before it is persisted.
    Preview { name: String, data_url: String },
}

impl ImageSrc {
    pub fn href(&self) -> String {
        match self {
            ImageSrc::Stored(path) => format!("/static/images/{path}"),
            ImageSrc::Preview { data_url, .. } => data_url.clone(),
        }
    }

    pub fn alt(&self) -> String {
        match self {
            ImageSrc::Stored(path) => path.clone(),
            ImageSrc::Preview { name, .. } => name.clone(),
        }
    }
}

/// A message ready for display: images first, then the rendered body.
/// The stamp is taken at render time since the backend keeps none.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub role: Role,
    pub html: String,
    pub images: Vec<ImageSrc>,
    pub time: String,
}

impl MessageView {
    pub fn new(role: Role, content: &str, images: Vec<ImageSrc>) -> Self {
        Self {
            role,
            html: markdown::render_markdown(content),
            images,
            time: Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn from_message(message: &Message) -> Self {
        let images = message
            .images()
            .iter()
            .cloned()
            .map(ImageSrc::Stored)
            .collect();
        Self::new(message.role, &message.content, images)
    }
}

#[component]
pub fn MessageBubble(view: MessageView) -> impl IntoView {
    let images = view
        .images
        .iter()
        .map(|image| {
            view! {
                <div class="message-image-container">
                    <img class="message-image" src=image.href() alt=image.alt() loading="lazy" />
                </div>
            }
        })
        .collect::<Vec<_>>();
    view! {
        <div class=format!("message {}-message", view.role.css_class())>
            <div class="message-content">{images} <div inner_html=view.html.clone() /></div>
            <div class="message-time">{view.time.clone()}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_images_resolve_under_the_static_namespace() {
        let src = ImageSrc::Stored("plot.png".to_owned());
        assert_eq!(src.href(), "/static/images/plot.png");
        assert_eq!(src.alt(), "plot.png");
    }

    #[test]
    fn previews_use_their_data_url() {
        let src = ImageSrc::Preview {
            name: "cat.jpg".to_owned(),
            data_url: "data:image/jpeg;base64,AQID".to_owned(),
        };
        assert_eq!(src.href(), "data:image/jpeg;base64,AQID");
        assert_eq!(src.alt(), "cat.jpg");
    }

    #[test]
    fn view_keeps_image_order_and_renders_the_body() {
        let message = Message::new(
            Role::Assistant,
            "see *these*",
            vec!["a.png".to_owned(), "b.png".to_owned()],
        );
        let view = MessageView::from_message(&message);
        assert_eq!(view.role, Role::Assistant);
        assert_eq!(
            view.images,
            vec![
                ImageSrc::Stored("a.png".to_owned()),
                ImageSrc::Stored("b.png".to_owned()),
            ]
        );
        assert_eq!(view.html, "<p>see <em>these</em></p>\n");
        assert_eq!(view.time.len(), 5);
    }
}
