//! Error types for renderer bootstrap.

use std::fmt;

use thiserror::Error;

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, BackdropError>;

/// Which half of the program a shader object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors detected during bootstrap. All of them are terminal for the page
/// load: the caller logs the error and leaves the backdrop blank.
#[derive(Error, Debug)]
pub enum BackdropError {
    /// No element with the given id in the document
    #[error("surface element `{0}` not found")]
    SurfaceNotFound(String),

    /// The environment cannot provide a WebGL2 context
    #[error("WebGL2 context unavailable")]
    ContextUnavailable,

    /// A shader object failed to compile; carries the driver's info log
    #[error("{kind} shader failed to compile: {log}")]
    ShaderCompileFailed { kind: ShaderKind, log: String },

    /// The program failed to link; carries the driver's info log
    #[error("program failed to link: {0}")]
    ProgramLinkFailed(String),
}

#[cfg(target_arch = "wasm32")]
impl From<BackdropError> for wasm_bindgen::JsValue {
    fn from(err: BackdropError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
