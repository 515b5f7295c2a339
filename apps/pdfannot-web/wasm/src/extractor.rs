//! Annotation extraction through the browser's pdf.js library.
//!
//! Document parsing stays entirely inside pdf.js; this module only drives
//! it: open the document from decoded bytes, request every page's
//! annotation list, and normalize the results through `annot-core`.

use annot_core::{convert_pages, decode_document, Annotation, AnnotationError, RawAnnotation};
use js_sys::{Array, Function, Object, Promise, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};

/// Check if pdf.js is available in the browser environment
#[wasm_bindgen]
pub fn pdfjs_available() -> bool {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return false,
    };

    match Reflect::get(&window, &JsValue::from_str("pdfjsLib")) {
        Ok(val) => !val.is_undefined(),
        Err(_) => false,
    }
}

/// Extract highlight and text annotations from a base64-encoded document.
///
/// Resolves with the normalized annotation list (page order, then in-page
/// order). Rejects with the decode failure, the document-open failure, or
/// the first failing page fetch; partial results are discarded.
#[wasm_bindgen]
pub async fn extract_annotations(base64_document: String) -> Result<JsValue, JsValue> {
    let annotations = extract(&base64_document).await?;

    serde_wasm_bindgen::to_value(&annotations)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Callback form of [`extract_annotations`].
///
/// Invokes `callback(null, annotations)` on success or `callback(error)` on
/// failure, exactly once either way.
#[wasm_bindgen]
pub fn extract_annotations_with_callback(base64_document: String, callback: Function) {
    spawn_local(async move {
        match extract_annotations(base64_document).await {
            Ok(annotations) => {
                let _ = callback.call2(&JsValue::NULL, &JsValue::NULL, &annotations);
            }
            Err(err) => {
                let _ = callback.call1(&JsValue::NULL, &err);
            }
        }
    });
}

async fn extract(base64_document: &str) -> Result<Vec<Annotation>, JsValue> {
    let bytes = decode_document(base64_document).map_err(error_to_js)?;
    let document = open_document(&bytes).await?;

    let page_count = Reflect::get(&document, &JsValue::from_str("numPages"))?
        .as_f64()
        .unwrap_or(0.0) as u32;

    // Every page request is in flight before the first await.
    let pending: Vec<(u32, Promise)> = (1..=page_count)
        .map(|page_number| (page_number, page_annotations(&document, page_number)))
        .collect();
    let pages = join_settled(pending).await?;

    let raw_pages: Vec<Vec<RawAnnotation>> = pages
        .iter()
        .map(|list| list.iter().map(|annot| raw_annotation(&annot)).collect())
        .collect();

    Ok(convert_pages(&raw_pages))
}

/// Open a document through `pdfjsLib.getDocument`.
async fn open_document(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;

    let pdfjs = Reflect::get(&window, &JsValue::from_str("pdfjsLib"))?;
    if pdfjs.is_undefined() {
        return Err(error_to_js(AnnotationError::DocumentOpen(
            "pdf.js not loaded".to_string(),
        )));
    }

    let get_document = method(&pdfjs, "getDocument")?;

    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("data"), &Uint8Array::from(bytes))?;

    let loading_task = get_document.call1(&pdfjs, &options)?;

    // Current pdf.js returns a loading task carrying the promise; older
    // builds returned the promise itself.
    let promise = Reflect::get(&loading_task, &JsValue::from_str("promise"))?;
    let promise: Promise = if promise.is_undefined() {
        loading_task
            .dyn_into()
            .map_err(|_| JsValue::from_str("getDocument did not return a promise"))?
    } else {
        promise
            .dyn_into()
            .map_err(|_| JsValue::from_str("getDocument promise slot is not a promise"))?
    };

    JsFuture::from(promise)
        .await
        .map_err(|e| error_to_js(AnnotationError::DocumentOpen(reason(&e))))
}

/// Request one page's annotation list. The returned promise is already
/// running; pdf.js pages are 1-indexed.
fn page_annotations(document: &JsValue, page_number: u32) -> Promise {
    let document = document.clone();

    future_to_promise(async move {
        let get_page = method(&document, "getPage")?;
        let page_promise: Promise = get_page
            .call1(&document, &JsValue::from_f64(page_number as f64))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("getPage did not return a promise"))?;
        let page = JsFuture::from(page_promise).await?;

        let get_annotations = method(&page, "getAnnotations")?;
        let annotations_promise: Promise = get_annotations
            .call0(&page)?
            .dyn_into()
            .map_err(|_| JsValue::from_str("getAnnotations did not return a promise"))?;

        JsFuture::from(annotations_promise).await
    })
}

/// Wait for every page request to settle.
///
/// Results are collected in page order; the first error observed wins and
/// discards all page results, but only after every request has settled.
async fn join_settled(pending: Vec<(u32, Promise)>) -> Result<Vec<Array>, JsValue> {
    let mut pages = Vec::with_capacity(pending.len());
    let mut first_error: Option<JsValue> = None;

    for (page_number, promise) in pending {
        match JsFuture::from(promise).await {
            Ok(list) => pages.push(list.unchecked_into::<Array>()),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(error_to_js(AnnotationError::PageFetch {
                        page: page_number,
                        reason: reason(&e),
                    }));
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(pages),
    }
}

/// Read the fields the converter cares about off an annotation object.
fn raw_annotation(annot: &JsValue) -> RawAnnotation {
    RawAnnotation {
        subtype: get(annot, "subtype").as_string(),
        annotation_type: get(annot, "annotationType").as_f64().map(|v| v as u32),
        rect: number_array(get(annot, "rect")),
        color: number_array(get(annot, "color")),
        creation_date: get(annot, "creationDate").as_string(),
        modification_date: get(annot, "modificationDate").as_string(),
        quad_points: number_array(get(annot, "quadPoints")),
        content: get(annot, "content").as_string(),
        author: get(annot, "author").as_string(),
        title: get(annot, "title").as_string(),
    }
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

/// Read a numeric sequence (plain or typed array). Anything that is not a
/// flat sequence of numbers reads as absent.
fn number_array(value: JsValue) -> Option<Vec<f64>> {
    if value.is_undefined() || value.is_null() {
        return None;
    }

    let iter = js_sys::try_iter(&value).ok()??;
    let mut numbers = Vec::new();
    for item in iter {
        numbers.push(item.ok()?.as_f64()?);
    }
    Some(numbers)
}

fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("{} is not a function", name)))
}

fn reason(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn error_to_js(error: AnnotationError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
