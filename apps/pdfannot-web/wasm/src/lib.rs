//! WASM glue for the PDF viewer pages.
//!
//! Three independent units, each usable on its own from JavaScript:
//! - annotation extraction through the browser's pdf.js library
//! - the message bridge to the embedded viewer plugin
//! - the landing-page build-info loader
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, {
//!     extract_annotations_with_callback,
//!     PluginBridge,
//!     display_build_info,
//! } from './pkg/pdfannot_wasm.js';
//!
//! await init();
//!
//! // Annotation extraction
//! extract_annotations_with_callback(base64Pdf, (err, annotations) => {
//!     if (err) return console.error(err);
//!     render(annotations);
//! });
//!
//! // Plugin messaging
//! const bridge = new PluginBridge();
//! bridge.bind("viewer", onMessage, onError);
//! bridge.send({ command: "selectEntry", id: 42 });
//!
//! // Landing page build info
//! display_build_info("/stable/build/web/creation", "last-update-stable");
//! display_build_info("/dev/build/web/creation", "last-update-dev");
//! ```

pub mod bridge;
pub mod build_info;
pub mod extractor;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use bridge::PluginBridge;
pub use build_info::{display_build_info, load_build_info};
pub use extractor::{extract_annotations, extract_annotations_with_callback, pdfjs_available};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
