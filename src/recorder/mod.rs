//! Frame recording and encoding.
//!
//! A [`FrameRecorder`] rasterizes one frame per simulation step into an
//! in-memory buffer and encodes the whole buffer on request:
//!
//! ```text
//! new ──> create_window(bg) ──> update_agents(entities)* ──> save_video / save_gif*
//!                 ^                      │                          │
//!                 │                      └──── clear_frames ◄───────┘
//!                 └───────────────────── close
//! ```
//!
//! GIFs are encoded in-process. Other containers are produced by piping raw
//! RGB24 frames into an external encoder (ffmpeg by default), which selects
//! the format from the output extension.

mod encode;
mod recorder;

pub use encode::{Container, EncodeStats};
pub use recorder::{FrameRecorder, SessionState};

use crate::color::ColorError;
use crate::render::RenderError;
use crate::schema::ConfigError;

/// Error type for recording and encoding.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid background color: {0}")]
    Background(#[from] ColorError),

    #[error("Capture failed: {0}")]
    Render(#[from] RenderError),

    #[error("Recording session is closed")]
    SessionClosed,

    #[error("Frame rate must be positive")]
    InvalidFps,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Encoder '{program}' could not be started: {source}")]
    EncoderNotFound {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoder failed: {0}")]
    EncoderFailed(String),
}
