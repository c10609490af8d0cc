//! Typed HTTP client for the chat backend. On wasm, reqwest compiles down to
//! the browser fetch API; requests need absolute URLs, so every endpoint is
//! resolved against the page origin.

use crate::attachment::Attachment;
use crate::state::{Chat, ChatDetail, ChatList, Generated};
use leptos::window;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
}

fn endpoint(path: &str) -> Url {
    let origin = window().location().origin().expect("window origin");
    let base = Url::parse(&origin).expect("origin is a valid url");
    base.join(path).expect("endpoint path")
}

fn check(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

#[derive(Serialize)]
struct CreateChat<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct DeleteChat {
    id: u32,
}

#[derive(Serialize)]
struct RenameChat<'a> {
    id: u32,
    title: &'a str,
}

pub async fn list_chats() -> Result<Vec<Chat>, ApiError> {
    let response = check(Client::new().get(endpoint("/api/chats")).send().await?)?;
    Ok(response.json::<ChatList>().await?.chats)
}

pub async fn create_chat(title: &str) -> Result<Chat, ApiError> {
    let response = check(
        Client::new()
            .post(endpoint("/api/chats"))
            .json(&CreateChat { title })
            .send()
            .await?,
    )?;
    Ok(response.json().await?)
}

pub async fn rename_chat(id: u32, title: &str) -> Result<(), ApiError> {
    check(
        Client::new()
            .put(endpoint("/api/chats"))
            .json(&RenameChat { id, title })
            .send()
            .await?,
    )?;
    Ok(())
}

// The backend takes the id in the request body, not the path.
pub async fn delete_chat(id: u32) -> Result<(), ApiError> {
    check(
        Client::new()
            .delete(endpoint("/api/chats"))
            .json(&DeleteChat { id })
            .send()
            .await?,
    )?;
    Ok(())
}

pub async fn fetch_chat(id: u32) -> Result<ChatDetail, ApiError> {
    let response = check(
        Client::new()
            .get(endpoint(&format!("/api/chat/{id}")))
            .send()
            .await?,
    )?;
    Ok(response.json().await?)
}

pub async fn generate(
    chat_id: u32,
    prompt: &str,
    images: &[Attachment],
) -> Result<Generated, ApiError> {
    let mut form = Form::new()
        .text("prompt", prompt.to_owned())
        .text("chat_id", chat_id.to_string());
    for image in images {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.mime)?;
        form = form.part("images", part);
    }
    let response = check(
        Client::new()
            .post(endpoint("/api/generate"))
            .multipart(form)
            .send()
            .await?,
    )?;
    Ok(response.json().await?)
}
