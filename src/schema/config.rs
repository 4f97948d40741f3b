//! Configuration types for recording sessions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::DEFAULT_BACKGROUND;
use crate::render::Viewport;

fn default_ppm() -> u32 {
    6
}

fn default_headless() -> bool {
    true
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_owned()
}

fn default_preview_path() -> PathBuf {
    PathBuf::from("preview.png")
}

/// Top-level recording configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// World width in world units (meters).
    pub width: f64,
    /// World height in world units (meters).
    pub height: f64,
    /// Pixels per world unit.
    #[serde(default = "default_ppm")]
    pub ppm: u32,
    /// Record frames for encoding instead of driving a live preview.
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Background color token.
    #[serde(default = "default_background")]
    pub background: String,
    /// Image refreshed on every step when not headless.
    #[serde(default = "default_preview_path")]
    pub preview_path: PathBuf,
    /// Video encoder settings.
    #[serde(default)]
    pub encoder: EncoderConfig,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            width: 120.0,
            height: 120.0,
            ppm: default_ppm(),
            headless: default_headless(),
            background: default_background(),
            preview_path: default_preview_path(),
            encoder: EncoderConfig::default(),
        }
    }
}

impl RecorderConfig {
    pub fn new(width: f64, height: f64, ppm: u32) -> Self {
        Self {
            width,
            height,
            ppm,
            ..Default::default()
        }
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport {
            world_width: self.width,
            world_height: self.height,
            ppm: self.ppm,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ConfigError::InvalidExtent {
                width: self.width,
                height: self.height,
            });
        }
        if self.ppm == 0 {
            return Err(ConfigError::InvalidDensity);
        }
        let (w, h) = crate::render::surface_size(self.width, self.height, self.ppm);
        if w as u64 * h as u64 > MAX_FRAME_PIXELS {
            return Err(ConfigError::FrameTooLarge { width: w, height: h });
        }
        if self.encoder.program.is_empty() {
            return Err(ConfigError::MissingEncoder);
        }
        Ok(())
    }
}

/// Upper bound on pixels per frame (about 64 megapixels).
const MAX_FRAME_PIXELS: u64 = 1 << 26;

/// Settings for the external video encoder.
///
/// Frames are piped as raw RGB24 into `program`, which picks the container
/// from the output path's extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Encoder executable (looked up on `PATH` if not absolute).
    pub program: String,
    /// Output video codec.
    pub codec: String,
    /// Output pixel format.
    pub pixel_format: String,
    /// Constant rate factor (lower = better, 18-28 typical).
    pub crf: u8,
    /// Encoding speed/quality preset.
    pub preset: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_owned(),
            codec: "libx264".to_owned(),
            pixel_format: "yuv420p".to_owned(),
            crf: 23,
            preset: "medium".to_owned(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("World extent must be positive and finite (got {width} x {height})")]
    InvalidExtent { width: f64, height: f64 },
    #[error("Pixel density must be non-zero")]
    InvalidDensity,
    #[error("Frame of {width}x{height} pixels is too large")]
    FrameTooLarge { width: u32, height: u32 },
    #[error("Encoder program must be set")]
    MissingEncoder,
}
