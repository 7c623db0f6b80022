pub mod config;
pub mod dsp;
pub mod error;

use crate::config::GeneratorConfig;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the wavesmith-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: build a generator from a configuration object and pull
/// `count` samples as mono f32 for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_samples(config: JsValue, count: usize) -> Result<Vec<f32>, JsValue> {
    let config: GeneratorConfig =
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let mut generator = config.build().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    dsp::renderer::render_f32(generator.as_mut(), count)
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: build a generator from a configuration object and render
/// `count` samples to a mono 16-bit WAV byte array.
#[wasm_bindgen]
pub fn render_wav(config: JsValue, count: usize) -> Result<Vec<u8>, JsValue> {
    let config: GeneratorConfig =
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let mut generator = config.build().map_err(|e| JsValue::from_str(&format!("{e}")))?;
    dsp::renderer::render_wav(generator.as_mut(), count, dsp::SAMPLING_RATE)
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}
