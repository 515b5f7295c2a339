//! Build-info loading for the viewer landing page.
//!
//! Fetches small static text files (build timestamps) and shows them in
//! the page. A failed fetch leaves the page untouched: no retry, no error
//! display.

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Fetch a build-info file and hand its body to `on_loaded`.
///
/// `on_loaded` fires exactly once with the full body text on a success
/// status, and never otherwise.
#[wasm_bindgen]
pub fn load_build_info(url: String, on_loaded: Function) {
    spawn_local(async move {
        if let Some(text) = fetch_text(&url).await {
            let _ = on_loaded.call1(&JsValue::NULL, &JsValue::from_str(&text));
        }
    });
}

/// Fetch a build-info file and write its body into the element with the
/// given id.
///
/// A failed fetch, or a missing target element, leaves the page unchanged.
#[wasm_bindgen]
pub fn display_build_info(url: String, element_id: String) {
    spawn_local(async move {
        if let Some(text) = fetch_text(&url).await {
            write_text(&element_id, &text);
        }
    });
}

/// Fetch `url` as text. Any failure, including a non-success status,
/// yields `None`.
async fn fetch_text(url: &str) -> Option<String> {
    let window = web_sys::window()?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).ok()?;
    let response = JsFuture::from(window.fetch_with_request(&request)).await.ok()?;
    let response: Response = response.dyn_into().ok()?;

    if !response.ok() {
        web_sys::console::warn_1(
            &format!("build info fetch for {} returned {}", url, response.status()).into(),
        );
        return None;
    }

    let text = JsFuture::from(response.text().ok()?).await.ok()?;
    text.as_string()
}

fn write_text(element_id: &str, text: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id));

    if let Some(element) = element {
        element.set_inner_html(text);
    }
}
