//! Headless recorder that captures entity snapshots into an in-memory frame buffer.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use super::RecordError;
use super::encode::{Container, EncodeStats, write_gif, write_video};
use crate::color::resolve_token;
use crate::geometry::Entity;
use crate::render::{Frame, rasterize, surface_size};
use crate::schema::RecorderConfig;

/// Lifecycle of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, background not yet set. Captures use the configured background.
    Pending,
    /// `create_window` was called.
    Active,
    /// `close` was called. Captures fail until `create_window` is called again.
    Closed,
}

/// Records one frame per simulation step and encodes the sequence on demand.
///
/// Frames are held in memory until cleared: the buffer costs
/// `width * height * ppm^2 * 3` bytes per captured step, so long runs at high
/// pixel density grow large. See [`FrameRecorder::memory_bytes`].
///
/// Usage:
/// ```ignore
/// let mut recorder = FrameRecorder::new(RecorderConfig::new(120.0, 120.0, 6))?;
/// recorder.create_window("gray");
/// for step in 0..300 {
///     world.tick();
///     recorder.update_agents(&world.snapshot())?;
/// }
/// recorder.save_video("rollout.mp4", 10)?;
/// recorder.save_gif("rollout.gif", 10)?;
/// ```
pub struct FrameRecorder {
    config: RecorderConfig,
    background: String,
    state: SessionState,
    frames: Vec<Frame>,
}

impl FrameRecorder {
    /// Create a recorder for a validated configuration.
    pub fn new(config: RecorderConfig) -> Result<Self, RecordError> {
        config.validate()?;
        let background = config.background.clone();
        Ok(Self {
            config,
            background,
            state: SessionState::Pending,
            frames: Vec::new(),
        })
    }

    /// Store the background color and mark the session active.
    ///
    /// No window is created; this keeps the call sequence of a live display.
    pub fn create_window(&mut self, background: &str) {
        self.background = background.to_owned();
        self.state = SessionState::Active;
    }

    /// True between `create_window` and `close`.
    #[inline]
    pub fn window_created(&self) -> bool {
        self.state == SessionState::Active
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    #[inline]
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Render `entities` (in z-order) to a new frame and append it.
    ///
    /// On error the frame buffer is left unchanged.
    pub fn update_agents(&mut self, entities: &[Entity]) -> Result<(), RecordError> {
        if self.state == SessionState::Closed {
            return Err(RecordError::SessionClosed);
        }
        let frame = self.render(entities)?;
        self.frames.push(frame);
        debug!(
            "captured frame {} ({} entities)",
            self.frames.len(),
            entities.len()
        );
        Ok(())
    }

    /// Render a frame without recording it.
    pub fn render(&self, entities: &[Entity]) -> Result<Frame, RecordError> {
        // Resolved once so the ring holes match this capture's background.
        let background = resolve_token(Some(&self.background))?;
        Ok(rasterize(self.config.viewport(), background, entities)?)
    }

    /// Encode all frames into `path`, choosing GIF or video from the extension.
    ///
    /// Returns `Ok(None)` without touching the filesystem when no frames
    /// have been captured.
    pub fn save_video<P: AsRef<Path>>(
        &self,
        path: P,
        fps: u32,
    ) -> Result<Option<EncodeStats>, RecordError> {
        let path = path.as_ref();
        self.save(path, fps, Container::from_path(path))
    }

    /// Encode all frames into `path` as a looping GIF regardless of extension.
    pub fn save_gif<P: AsRef<Path>>(
        &self,
        path: P,
        fps: u32,
    ) -> Result<Option<EncodeStats>, RecordError> {
        self.save(path.as_ref(), fps, Container::Gif)
    }

    fn save(
        &self,
        path: &Path,
        fps: u32,
        container: Container,
    ) -> Result<Option<EncodeStats>, RecordError> {
        if self.frames.is_empty() {
            warn!("no frames to save to {}", path.display());
            return Ok(None);
        }
        if fps == 0 {
            return Err(RecordError::InvalidFps);
        }

        match container {
            Container::Gif => write_gif(&self.frames, path, fps)?,
            Container::Video => write_video(&self.frames, path, fps, &self.config.encoder)?,
        }

        let (width, height) = self.frame_dimensions();
        let stats = EncodeStats {
            path: path.to_path_buf(),
            frame_count: self.frames.len(),
            fps,
            width,
            height,
            container,
        };
        info!("saved {stats}");
        Ok(Some(stats))
    }

    /// Write every frame as `<prefix>_<index>.png` under `dir`.
    pub fn export_frames<P: AsRef<Path>>(
        &self,
        dir: P,
        prefix: &str,
    ) -> Result<Vec<PathBuf>, RecordError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let digits = self.frames.len().max(1).to_string().len();
        let mut paths = Vec::with_capacity(self.frames.len());
        for (i, frame) in self.frames.iter().enumerate() {
            let path = dir.join(format!("{prefix}_{i:0digits$}.png"));
            frame
                .to_rgb_image()
                .save_with_format(&path, image::ImageFormat::Png)?;
            paths.push(path);
        }
        Ok(paths)
    }

    /// Drop all captured frames. Background and dimensions are kept.
    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Mark the session inactive. Frames stay available for saving.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Pixel size shared by every frame of this recorder.
    pub fn frame_dimensions(&self) -> (u32, u32) {
        surface_size(self.config.width, self.config.height, self.config.ppm)
    }

    /// Bytes held by the frame buffer.
    pub fn memory_bytes(&self) -> usize {
        self.frames.iter().map(Frame::byte_len).sum()
    }
}
