//! Message bridge to the embedded viewer plugin.
//!
//! The plugin lives behind a DOM element and exposes its native object on
//! the element's `impl` property. The native object receives messages
//! through a `postMessage` method and delivers them through the
//! `onMessage`/`onError` slots of its `messageHandler`. Message payloads
//! are opaque to this module; their schema belongs to the plugin.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Handle to the plugin of the most recently bound element.
///
/// Owned by the caller; binding another element replaces the handle
/// wholesale, so the last bind wins.
#[wasm_bindgen]
pub struct PluginBridge {
    plugin: Option<JsValue>,
}

impl Default for PluginBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PluginBridge {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { plugin: None }
    }

    /// Bind the plugin embedded in the element with the given id.
    ///
    /// Installs `on_message` and `on_error` as the plugin's receive slots
    /// and makes this plugin the target of [`PluginBridge::send`]. When no
    /// such element exists the call does nothing and an earlier binding
    /// stays live.
    #[wasm_bindgen]
    pub fn bind(
        &mut self,
        element_id: &str,
        on_message: &Function,
        on_error: &Function,
    ) -> Result<(), JsValue> {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return Ok(()),
        };

        let element = match document.get_element_by_id(element_id) {
            Some(e) => e,
            None => return Ok(()),
        };

        let plugin = Reflect::get(&element, &JsValue::from_str("impl"))?;

        let handler = Object::new();
        Reflect::set(&handler, &JsValue::from_str("onMessage"), on_message)?;
        Reflect::set(&handler, &JsValue::from_str("onError"), on_error)?;
        Reflect::set(&plugin, &JsValue::from_str("messageHandler"), &handler)?;

        self.plugin = Some(plugin);
        Ok(())
    }

    /// Forward a message to the bound plugin, opaquely.
    ///
    /// No-op while nothing is bound.
    #[wasm_bindgen]
    pub fn send(&self, message: &JsValue) -> Result<(), JsValue> {
        let plugin = match &self.plugin {
            Some(p) => p,
            None => return Ok(()),
        };

        let post_message: Function = Reflect::get(plugin, &JsValue::from_str("postMessage"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("plugin has no postMessage method"))?;
        post_message.call1(plugin, message)?;

        Ok(())
    }

    /// Whether a plugin is currently bound.
    #[wasm_bindgen]
    pub fn is_bound(&self) -> bool {
        self.plugin.is_some()
    }
}
