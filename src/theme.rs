//! Light/dark theme handling: one localStorage key, a `data-theme`
//! attribute on the document element and a `theme-color` meta tag.

use leptos::*;
use web_sys::Document;

const STORAGE_KEY: &str = "theme";
const DARK_META_COLOR: &str = "#121212";
const LIGHT_META_COLOR: &str = "#f5f6fa";

pub fn is_dark(stored: Option<&str>) -> bool {
    stored == Some("dark")
}

pub fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

pub fn meta_color(dark: bool) -> &'static str {
    if dark {
        DARK_META_COLOR
    } else {
        LIGHT_META_COLOR
    }
}

pub fn stored_dark() -> bool {
    let stored = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    is_dark(stored.as_deref())
}

pub fn store(dark: bool) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(STORAGE_KEY, theme_name(dark));
    }
}

fn storage() -> Option<web_sys::Storage> {
    window().local_storage().ok().flatten()
}

pub fn init() {
    apply(stored_dark());
}

pub fn apply(dark: bool) {
    let document = document();
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme_name(dark));
    }
    set_meta_color(&document, meta_color(dark));
    force_reflow(&document);
}

fn set_meta_color(document: &Document, color: &str) {
    let existing = document
        .query_selector("meta[name=\"theme-color\"]")
        .ok()
        .flatten();
    let meta = match existing {
        Some(meta) => meta,
        None => {
            let meta = document.create_element("meta").expect("create meta element");
            let _ = meta.set_attribute("name", "theme-color");
            if let Some(head) = document.head() {
                let _ = head.append_child(&meta);
            }
            meta
        }
    };
    let _ = meta.set_attribute("content", color);
}

// Hide the body for one layout pass while the attribute swap settles,
// otherwise half the page repaints in the old theme.
fn force_reflow(document: &Document) {
    if let Some(body) = document.body() {
        let style = body.style();
        let _ = style.set_property("visibility", "hidden");
        let _ = body.offset_height();
        let _ = style.set_property("visibility", "visible");
    }
}

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let (dark, set_dark) = create_signal(stored_dark());
    let toggle = move |_| {
        let next = !dark.get_untracked();
        set_dark.set(next);
        store(next);
        apply(next);
    };
    view! {
        <button
            id="theme-toggle"
            type="button"
            on:click=toggle
            title=move || {
                if dark.get() { "Switch to light theme" } else { "Switch to dark theme" }
            }
        >
            {move || {
                if dark.get() {
                    // sun
                    view! {
                        <svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round">
                            <circle cx="12" cy="12" r="5" />
                            <path d="M12 1v2M12 21v2M4.22 4.22l1.42 1.42M18.36 18.36l1.42 1.42M1 12h2M21 12h2M4.22 19.78l1.42-1.42M18.36 5.64l1.42-1.42" />
                        </svg>
                    }
                } else {
                    // moon
                    view! {
                        <svg viewBox="0 0 24 24" width="18" height="18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round">
                            <path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79Z" />
                        </svg>
                    }
                }
            }}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_dark_marker_enables_dark_mode() {
        assert!(is_dark(Some("dark")));
        assert!(!is_dark(Some("light")));
        assert!(!is_dark(None));
    }

    #[test]
    fn toggling_twice_restores_the_stored_value() {
        let original = is_dark(Some("dark"));
        let toggled = !original;
        let restored = !toggled;
        assert_eq!(theme_name(restored), "dark");
        assert_eq!(is_dark(Some(theme_name(restored))), original);
    }

    #[test]
    fn meta_colors_match_the_theme() {
        assert_eq!(meta_color(true), "#121212");
        assert_eq!(meta_color(false), "#f5f6fa");
    }
}
