//! Animated noise backdrop for a page canvas.
//!
//! The decision logic (frame pacing, aspect normalization, resize
//! reconciliation, the persisted time offset, layout configuration types) is
//! target-independent and tests on the host; only the WebGL2 plumbing in
//! [`wasm`] requires a browser.

pub mod aspect;
pub mod bento;
pub mod error;
pub mod frame;
pub mod shaders;
pub mod timing;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    pub mod observe;
    pub mod render;

    use crate::timing::FixedRate;

    /// Id of the canvas the backdrop renders into.
    const SURFACE_ID: &str = "background-canvas";

    /// Fallback rate when no external frame-rate collaborator is wired up.
    const TARGET_FPS: f64 = 60.0;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        render::start(SURFACE_ID, Rc::new(FixedRate(TARGET_FPS)))
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
