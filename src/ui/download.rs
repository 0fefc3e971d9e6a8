/// Browser download of the export file

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Url};

use crate::error::FavoritesError;

/// Offer `json` to the user as a download named `filename`
pub fn download_json(json: &str, filename: &str) -> Result<(), FavoritesError> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(json));

    let opts = BlobPropertyBag::new();
    opts.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|e| FavoritesError::Download(format!("Failed to create blob: {:?}", e)))?;

    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|e| FavoritesError::Download(format!("Failed to create blob URL: {:?}", e)))?;

    let result = trigger_download(&url, filename);
    let _ = Url::revoke_object_url(&url);
    result
}

fn trigger_download(blob_url: &str, filename: &str) -> Result<(), FavoritesError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| FavoritesError::Download("no document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| FavoritesError::Download("no document body".to_string()))?;

    let link = document
        .create_element("a")
        .map_err(|e| FavoritesError::Download(format!("{:?}", e)))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FavoritesError::Download("anchor is not an HtmlElement".to_string()))?;
    let _ = link.set_attribute("href", blob_url);
    let _ = link.set_attribute("download", filename);
    let _ = link.set_attribute("style", "display:none");

    body.append_child(&link)
        .map_err(|e| FavoritesError::Download(format!("{:?}", e)))?;
    link.click();
    let _ = body.remove_child(&link);
    Ok(())
}
