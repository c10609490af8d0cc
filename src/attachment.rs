use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::join_all;
use js_sys::Uint8Array;
use leptos::logging::error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList};

const FALLBACK_MIME: &str = "application/octet-stream";

/// An image selected for upload, read fully into memory so the same bytes
/// back both the inline preview and the multipart request body.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub async fn read(file: File) -> Result<Self, JsValue> {
        let name = file.name();
        let mime = match file.type_() {
            t if t.is_empty() => FALLBACK_MIME.to_owned(),
            t => t,
        };
        let buffer = JsFuture::from(file.array_buffer()).await?;
        let bytes = Uint8Array::new(&buffer).to_vec();
        Ok(Self { name, mime, bytes })
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Reads every file concurrently but yields the results in selection order.
/// Unreadable files are dropped with a console diagnostic.
pub async fn read_all(files: &FileList) -> Vec<Attachment> {
    let reads = (0..files.length())
        .filter_map(|i| files.item(i))
        .map(Attachment::read);
    join_all(reads)
        .await
        .into_iter()
        .filter_map(|result| match result {
            Ok(attachment) => Some(attachment),
            Err(err) => {
                error!("failed to read attachment: {err:?}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_url_encodes_mime_and_bytes() {
        let attachment = Attachment {
            name: "dot.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(attachment.data_url(), "data:image/png;base64,AQID");
    }
}
