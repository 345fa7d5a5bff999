//! Browser bridge
//!
//! The page owns the camera, the face-mesh model and the canvas. It calls
//! into `WebSession` with each landmark result and once per animation frame,
//! then reads back HUD values and a JSON snapshot to draw.

use wasm_bindgen::prelude::*;

use crate::session::{EndReason, SessionController, SessionError};
use crate::settings::Settings;
use crate::signal::FaceLandmarks;
use crate::sim::Viewport;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Face Blaster starting...");
}

#[wasm_bindgen]
pub struct WebSession {
    session: SessionController,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebSession {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebSession {
        let mut settings = Settings::load();
        settings.seed = super::resolve_seed(settings.seed);
        log::info!("Session seed: {}", settings.seed);
        WebSession {
            session: SessionController::new(settings, Viewport::new(width, height)),
            last_time: None,
        }
    }

    pub fn start(&mut self) {
        self.last_time = None;
        self.session.start();
    }

    pub fn end(&mut self) {
        self.session.end();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    pub fn recalibrate(&mut self) {
        self.session.recalibrate();
    }

    #[wasm_bindgen(js_name = setSensitivity)]
    pub fn set_sensitivity(&mut self, sensitivity: u8) {
        self.session.set_sensitivity(sensitivity);
        self.session.settings().save();
    }

    /// One face detected: flat xyz landmark buffer
    #[wasm_bindgen(js_name = onLandmarks)]
    pub fn on_landmarks(&mut self, coords: &js_sys::Float32Array) {
        let face = FaceLandmarks::from_flat(&coords.to_vec());
        self.session.on_frame(Some(&face));
    }

    /// Frame processed, no face in it
    #[wasm_bindgen(js_name = onNoFace)]
    pub fn on_no_face(&mut self) {
        self.session.on_frame(None);
    }

    #[wasm_bindgen(js_name = onCaptureError)]
    pub fn on_capture_error(&mut self, message: String) {
        self.session.on_capture_error(SessionError::Capture(message));
    }

    #[wasm_bindgen(js_name = onInferenceError)]
    pub fn on_inference_error(&mut self, message: String) {
        self.session.on_capture_error(SessionError::Inference(message));
    }

    /// Animation frame callback (`time` in ms, from requestAnimationFrame)
    pub fn frame(&mut self, time: f64) -> bool {
        let elapsed = match self.last_time {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time);
        self.session.advance(elapsed);
        self.session.is_running()
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        matches!(self.session.end_reason(), Some(EndReason::GameOver))
    }

    /// Human-readable failure, if the session halted on an error
    #[wasm_bindgen(js_name = errorMessage)]
    pub fn error_message(&self) -> Option<String> {
        match self.session.end_reason() {
            Some(EndReason::Failed(e)) => Some(e.to_string()),
            _ => None,
        }
    }

    #[wasm_bindgen(js_name = reticleX)]
    pub fn reticle_x(&self) -> f32 {
        self.session.reticle().x
    }

    #[wasm_bindgen(js_name = reticleY)]
    pub fn reticle_y(&self) -> f32 {
        self.session.reticle().y
    }

    #[wasm_bindgen(js_name = faceDetected)]
    pub fn face_detected(&self) -> bool {
        self.session.aim_signal().detected
    }

    #[wasm_bindgen(js_name = fireIntent)]
    pub fn fire_intent(&self) -> bool {
        self.session.aim_signal().fire_intent
    }

    /// Full game state for the renderer
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.state()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    pub fn events(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
