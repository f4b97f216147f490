//! Per-frame computation and the fixed draw sequence.
//!
//! `plan_frame` turns the host timer value and the observed surface size into
//! the uniform values for one frame; `render_frame` replays the plan against a
//! [`FrameSink`]. The wasm renderer backs the sink with the real WebGL2
//! context; tests drive a recording fake.

use crate::aspect::{self, DisplaySize};
use crate::timing;

/// Uniform values and bookkeeping for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePlan {
    /// Seconds fed to `u_time`
    pub time: f64,
    /// Offset persisted to storage this frame
    pub stored_offset: f64,
    /// Backing-store size the viewport is set to
    pub viewport: DisplaySize,
    /// Aspect-normalized pair fed to `u_res`
    pub resolution: (f32, f32),
}

/// `now_ms` is the host timer reading in milliseconds since the timer
/// origin; `offset` the animation offset read at bootstrap.
pub fn plan_frame(now_ms: f64, offset: f64, size: DisplaySize) -> FramePlan {
    let t = now_ms * 0.001 + offset;
    FramePlan {
        time: t,
        stored_offset: timing::advance_offset(t),
        viewport: size,
        resolution: aspect::aspect_resolution(size),
    }
}

/// Draw-call surface for one frame.
pub trait FrameSink {
    fn set_viewport(&mut self, size: DisplaySize);
    fn clear(&mut self);
    fn bind_pipeline(&mut self);
    fn set_time(&mut self, t: f32);
    fn set_resolution(&mut self, res: (f32, f32));
    fn draw_quad(&mut self);
}

/// Issues the frame sequence in its fixed order: viewport, clear, program and
/// vertex array, uniforms, one triangle-fan draw over the quad.
pub fn render_frame<S: FrameSink + ?Sized>(sink: &mut S, plan: &FramePlan) {
    sink.set_viewport(plan.viewport);
    sink.clear();
    sink.bind_pipeline();
    sink.set_time(plan.time as f32);
    sink.set_resolution(plan.resolution);
    sink.draw_quad();
}
