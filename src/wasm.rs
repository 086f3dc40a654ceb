//! JavaScript bindings for browser front ends.
//!
//! Structured values (descriptors, the mapping view, the change report) cross the
//! boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::session::StandardizerSession;
use crate::svg::constants::{DOWNLOAD_FILENAME, SVG_MIME_TYPE};

/// Sets up panic reporting and `log` output to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only when a logger is already installed.
    console_log::init_with_level(log::Level::Info).ok();
}

#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct WasmSession {
    inner: StandardizerSession,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmSession {
        Default::default()
    }

    /// Loads SVG text read from a file. Throws on malformed XML.
    pub fn load(&mut self, svg: &str) -> Result<(), JsError> {
        self.inner.load(svg)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    #[wasm_bindgen(js_name = isolatedOriginal)]
    pub fn isolated_original(&self) -> Option<String> {
        self.inner.isolated_original().map(str::to_string)
    }

    pub fn modified(&self) -> Option<String> {
        self.inner.modified().map(str::to_string)
    }

    #[wasm_bindgen(js_name = uniqueSizes)]
    pub fn unique_sizes(&self) -> Vec<f64> {
        self.inner.unique_sizes().iter().map(|size| size.value()).collect()
    }

    /// Text descriptors as a JSON array.
    pub fn descriptors(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.descriptors())?)
    }

    /// The mapping UI model as JSON.
    #[wasm_bindgen(js_name = mappingView)]
    pub fn mapping_view(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.inner.mapping_view())?)
    }

    #[wasm_bindgen(js_name = setMapping)]
    pub fn set_mapping(&mut self, size: f64, standard: f64) -> Result<(), JsError> {
        self.inner.set_mapping(size, standard)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = fontFamily)]
    pub fn font_family(&self) -> String {
        self.inner.font_family().to_string()
    }

    #[wasm_bindgen(js_name = setFontFamily)]
    pub fn set_font_family(&mut self, family: &str) -> Result<(), JsError> {
        self.inner.set_font_family(family)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = sizeInputs)]
    pub fn size_inputs(&self) -> Vec<String> {
        self.inner.size_inputs().values().to_vec()
    }

    #[wasm_bindgen(js_name = setSizeInputs)]
    pub fn set_size_inputs(&mut self, values: Vec<String>) {
        self.inner.set_size_inputs(values);
    }

    #[wasm_bindgen(js_name = addSizeInput)]
    pub fn add_size_input(&mut self, value: &str) -> usize {
        self.inner.add_size_input(value)
    }

    #[wasm_bindgen(js_name = setSizeInput)]
    pub fn set_size_input(&mut self, index: usize, value: &str) -> Result<(), JsError> {
        self.inner.set_size_input(index, value)?;
        Ok(())
    }

    /// Throws when the input is the last one left.
    #[wasm_bindgen(js_name = removeSizeInput)]
    pub fn remove_size_input(&mut self, index: usize) -> Result<(), JsError> {
        self.inner.remove_size_input(index)?;
        Ok(())
    }

    /// Standardizes the loaded document and returns the new SVG text.
    pub fn apply(&mut self) -> Result<String, JsError> {
        Ok(self.inner.apply()?.to_string())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Markdown diff between the original and the last output.
    #[wasm_bindgen(js_name = changeReport)]
    pub fn change_report(&self) -> Result<Option<String>, JsError> {
        match self.inner.change_report() {
            Some(report) => Ok(Some(report?.markdown_report)),
            None => Ok(None),
        }
    }

    #[wasm_bindgen(js_name = downloadFilename)]
    pub fn download_filename() -> String {
        DOWNLOAD_FILENAME.to_string()
    }

    #[wasm_bindgen(js_name = downloadMime)]
    pub fn download_mime() -> String {
        SVG_MIME_TYPE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_round_trip_through_bindings() {
        let mut session = WasmSession::new();
        session.set_size_inputs(vec!["12".to_string(), "24".to_string()]);
        assert!(session
            .load(r#"<svg><text style="font-size: 11px">a</text></svg>"#)
            .is_ok());
        assert_eq!(session.unique_sizes(), vec![11.0]);

        let view: serde_json::Value = serde_json::from_str(&session.mapping_view().ok().unwrap()).unwrap();
        assert_eq!(view["rows"][0]["selected"], 12.0);

        let output = session.apply().ok().unwrap();
        assert!(output.contains("font-size: 12px; font-family: Arial;"));
        assert_eq!(session.modified(), Some(output));
        assert_eq!(WasmSession::download_filename(), "standardized.svg");
    }
}
