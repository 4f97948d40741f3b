//! Display backends behind a common interface.
//!
//! Simulation code drives a [`Visualizer`] without knowing whether frames are
//! recorded for later encoding or shown as they are produced. The backend is
//! chosen once, from [`RecorderConfig::headless`].

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info};

use crate::color::resolve_token;
use crate::geometry::Entity;
use crate::recorder::{FrameRecorder, RecordError};
use crate::render::rasterize;
use crate::schema::RecorderConfig;

/// Capabilities shared by every display backend.
pub trait Visualizer {
    /// Set the background and start (or restart) the session.
    fn initialize(&mut self, background: &str);

    /// Draw one step's entities, in z-order.
    fn submit_frame(&mut self, entities: &[Entity]) -> Result<(), RecordError>;

    /// End the session.
    fn finalize(&mut self);

    /// True between `initialize` and `finalize`.
    fn is_active(&self) -> bool;

    /// The frame recorder, for backends that keep frames.
    fn recorder(&self) -> Option<&FrameRecorder> {
        None
    }

    fn recorder_mut(&mut self) -> Option<&mut FrameRecorder> {
        None
    }
}

/// Build the backend selected by `config.headless`.
pub fn from_config(config: RecorderConfig) -> Result<Box<dyn Visualizer>, RecordError> {
    if config.headless {
        Ok(Box::new(FrameRecorder::new(config)?))
    } else {
        Ok(Box::new(PreviewDisplay::new(config)?))
    }
}

impl Visualizer for FrameRecorder {
    fn initialize(&mut self, background: &str) {
        self.create_window(background);
    }

    fn submit_frame(&mut self, entities: &[Entity]) -> Result<(), RecordError> {
        self.update_agents(entities)
    }

    fn finalize(&mut self) {
        self.close();
    }

    fn is_active(&self) -> bool {
        self.window_created()
    }

    fn recorder(&self) -> Option<&FrameRecorder> {
        Some(self)
    }

    fn recorder_mut(&mut self) -> Option<&mut FrameRecorder> {
        Some(self)
    }
}

/// Live display: every submitted step replaces a single image on disk, so an
/// image viewer watching that file shows the simulation as it runs.
///
/// Nothing is buffered.
pub struct PreviewDisplay {
    config: RecorderConfig,
    background: String,
    active: bool,
    steps_shown: u64,
}

impl PreviewDisplay {
    pub fn new(config: RecorderConfig) -> Result<Self, RecordError> {
        config.validate()?;
        let background = config.background.clone();
        Ok(Self {
            config,
            background,
            active: false,
            steps_shown: 0,
        })
    }

    /// File refreshed on each step.
    pub fn path(&self) -> &Path {
        &self.config.preview_path
    }

    pub fn steps_shown(&self) -> u64 {
        self.steps_shown
    }

    /// Write through a sibling file and rename, so readers never see a
    /// half-written image.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path()
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path().with_file_name(name)
    }
}

impl Visualizer for PreviewDisplay {
    fn initialize(&mut self, background: &str) {
        self.background = background.to_owned();
        self.active = true;
        info!("preview at {}", self.path().display());
    }

    fn submit_frame(&mut self, entities: &[Entity]) -> Result<(), RecordError> {
        if !self.active {
            return Err(RecordError::SessionClosed);
        }
        let background = resolve_token(Some(&self.background))?;
        let frame = rasterize(self.config.viewport(), background, entities)?;

        let staging = self.staging_path();
        frame
            .to_rgb_image()
            .save_with_format(&staging, ImageFormat::Png)?;
        fs::rename(&staging, self.path())?;

        self.steps_shown += 1;
        debug!("preview step {}", self.steps_shown);
        Ok(())
    }

    fn finalize(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use tempfile::tempdir;

    fn scene() -> Vec<Entity> {
        vec![Entity::circle(Point::new(5.0, 5.0), 2.0, "red")]
    }

    #[test]
    fn test_headless_backend_records() {
        let mut vis = from_config(RecorderConfig::new(10.0, 10.0, 2)).unwrap();
        vis.initialize("gray");
        assert!(vis.is_active());
        vis.submit_frame(&scene()).unwrap();
        vis.submit_frame(&scene()).unwrap();
        assert_eq!(vis.recorder().unwrap().frame_count(), 2);
        vis.finalize();
        assert!(!vis.is_active());
        assert!(vis.submit_frame(&scene()).is_err());
    }

    #[test]
    fn test_preview_backend_overwrites_image() {
        let dir = tempdir().unwrap();
        let mut config = RecorderConfig::new(10.0, 10.0, 2);
        config.headless = false;
        config.preview_path = dir.path().join("live.png");

        let mut vis = from_config(config).unwrap();
        assert!(vis.recorder().is_none());
        // Not initialized yet.
        assert!(vis.submit_frame(&scene()).is_err());

        vis.initialize("white");
        vis.submit_frame(&scene()).unwrap();
        vis.submit_frame(&[]).unwrap();

        let img = image::open(dir.path().join("live.png")).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (20, 20));
        // The last step was empty, so the image is plain background.
        assert!(img.pixels().all(|p| p.0 == [255u8, 255, 255]));
        assert!(!dir.path().join("live.png.tmp").exists());
    }
}
