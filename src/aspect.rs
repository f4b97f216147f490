//! Display-size bookkeeping: device-pixel measurements, backing-store
//! reconciliation and the aspect-normalized resolution fed to the shader.

/// A surface size in device pixels.
///
/// Written only by the resize observer callback, read by the frame loop
/// before each draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

/// Backing size a canvas reports before any observer callback has fired.
pub const DEFAULT_DISPLAY_SIZE: DisplaySize = DisplaySize {
    width: 300,
    height: 150,
};

impl DisplaySize {
    pub fn new(width: u32, height: u32) -> Self {
        DisplaySize { width, height }
    }

    /// Converts a CSS-pixel measurement to device pixels, rounding to the
    /// nearest integer. Callers that already hold a device-pixel reading
    /// pass `dpr = 1.0`.
    pub fn from_css_pixels(width: f64, height: f64, dpr: f64) -> Self {
        DisplaySize {
            width: (width * dpr).round() as u32,
            height: (height * dpr).round() as u32,
        }
    }
}

/// The pixel buffer behind a drawing surface, distinct from its layout size.
pub trait BackingStore {
    fn backing_size(&self) -> DisplaySize;
    fn set_backing_size(&mut self, size: DisplaySize);
}

/// Mutates the backing store to the recorded display size if they differ.
/// Returns whether a resize happened.
pub fn reconcile<S: BackingStore + ?Sized>(surface: &mut S, display: DisplaySize) -> bool {
    if surface.backing_size() == display {
        return false;
    }
    surface.set_backing_size(display);
    true
}

/// Normalizes the surface size so the longer side carries the ratio and the
/// shorter side stays 1, keeping the noise pattern undistorted at any aspect.
pub fn aspect_resolution(size: DisplaySize) -> (f32, f32) {
    let w = size.width as f32;
    let h = size.height as f32;
    if size.width > size.height {
        (w / h, 1.0)
    } else {
        (1.0, h / w)
    }
}
