//! Browser helpers for saving and sharing transcripts.
//!
//! Each helper is a no-op failure when rendered on the server.

/// Offers `text` as a file download named `filename`.
///
/// # Errors
///
/// Returns a description of the DOM call that failed.
#[cfg(feature = "hydrate")]
pub fn download_text(filename: &str, text: &str) -> Result<(), String> {
    use wasm_bindgen::{JsCast, JsValue};

    let window = web_sys::window().ok_or("no window".to_string())?;
    let document = window.document().ok_or("no document".to_string())?;

    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "blob: failed to create".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "url: create_object_url failed".to_string())?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "document: create_element failed".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "document: anchor cast failed".to_string())?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
pub fn download_text(_filename: &str, _text: &str) -> Result<(), String> {
    Err("downloads need a browser".to_string())
}

/// Writes `text` to the system clipboard.
///
/// # Errors
///
/// Returns an error if there is no window or the clipboard rejects the write.
#[cfg(feature = "hydrate")]
pub async fn copy_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;
    let clipboard = window.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| format!("clipboard: {:?}", e))
}

#[cfg(not(feature = "hydrate"))]
pub async fn copy_text(_text: &str) -> Result<(), String> {
    Err("clipboard needs a browser".to_string())
}

/// Shows a blocking alert.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
    }
}
