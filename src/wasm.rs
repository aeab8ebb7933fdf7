//! WASM bindings for manforge
//!
//! This module provides JavaScript-accessible functions for rendering a
//! JSON document tree to man(7) roff.

use wasm_bindgen::prelude::*;

use serde::{Deserialize, Serialize};

use crate::{render_document, Block, Document, RenderError, RenderOptions};

/// Render options exposed to WASM callers
#[derive(Serialize, Deserialize, Default)]
pub struct WasmRenderOptions {
    /// Document title (the manpage name); required
    pub title: String,
    /// Manual volume section
    #[serde(default = "default_section")]
    pub section: String,
    /// Date stamp; today when unset
    #[serde(default)]
    pub date: Option<String>,
    /// Source (project/version) for the `.TH` line
    #[serde(default)]
    pub source: Option<String>,
    /// Manual name for the `.TH` line
    #[serde(default)]
    pub manual: Option<String>,
    /// Also return warnings as a JSON array on the result object
    #[serde(default)]
    pub collect_warnings: bool,
}

fn default_section() -> String {
    "1".to_string()
}

/// Rendering result passed back to JavaScript
#[derive(Serialize, Deserialize)]
pub struct WasmRenderResult {
    pub content: String,
    pub warnings: Vec<String>,
}

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render a JSON block tree to roff.
///
/// `blocks_json` is a JSON array of block nodes; `options` is a
/// [`WasmRenderOptions`] object.
#[wasm_bindgen]
pub fn render_manpage(blocks_json: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options: WasmRenderOptions = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("invalid options: {}", e)))?;
    let blocks: Vec<Block> = serde_json::from_str(blocks_json)
        .map_err(|e| JsValue::from_str(&RenderError::invalid(e.to_string()).to_string()))?;

    let render_options = RenderOptions {
        title: options.title,
        section: options.section,
        date: options.date,
        source: options.source,
        manual: options.manual,
        ..Default::default()
    };

    let doc = Document { blocks };
    let output = render_document(&doc, &render_options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = WasmRenderResult {
        content: output.content,
        warnings: if options.collect_warnings {
            output.warnings.iter().map(|w| w.to_string()).collect()
        } else {
            Vec::new()
        },
    };
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}
