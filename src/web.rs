//! Browser host bindings
//!
//! JavaScript owns the canvas and the `requestAnimationFrame` loop; it feeds
//! timestamps into [`WebSession::frame`] and uploads the returned vertex
//! batch itself.

use wasm_bindgen::prelude::*;

use crate::renderer::vertex::BACKGROUND;
use crate::renderer::{MeshRenderer, Renderer};
use crate::{PileTally, Session, Settings};

fn init_logging() {
    console_error_panic_hook::set_once();
    // Fails only when a previous session already installed the logger
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One board running in the page
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    renderer: MeshRenderer,
    /// Last `requestAnimationFrame` timestamp (ms)
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebSession {
    /// Start a board; a `None` seed uses the current time
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebSession {
        init_logging();
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Galton Drop (web) starting...");

        let session = Session::new(seed);
        let (min, max) = Session::bounds();
        let mut renderer = MeshRenderer::default();
        renderer.init(min, max);

        Self {
            session,
            renderer,
            last_time: None,
        }
    }

    /// Start a board from a settings JSON document
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: &str) -> Result<WebSession, JsValue> {
        init_logging();
        let settings = Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        Ok(Self::new(Some(seed)))
    }

    /// Advance to the given animation timestamp (ms). Returns steps taken.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_time = Some(now_ms);
        self.session.frame(dt, &mut self.renderer)
    }

    /// Interleaved vertex data from the last frame (x, y, r, g, b, a)
    pub fn vertices(&self) -> js_sys::Float32Array {
        let floats: &[f32] = bytemuck::cast_slice(self.renderer.vertices());
        js_sys::Float32Array::from(floats)
    }

    /// Clear color (r, g, b, a) to use before drawing the batch
    pub fn background(&self) -> Vec<f32> {
        BACKGROUND.to_vec()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.renderer.vertices().len()
    }

    pub fn settled(&self) -> usize {
        self.session.settled()
    }

    pub fn falling(&self) -> usize {
        self.session.falling()
    }

    /// Current pile histogram as JSON
    pub fn tally(&self) -> String {
        let tally = PileTally::from_scene(self.session.scene(), self.session.board().floor);
        serde_json::to_string(&tally).unwrap_or_default()
    }
}
