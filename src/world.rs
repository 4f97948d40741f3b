//! Minimal world harness: simulation clock, entity list and one display.
//!
//! Kinematics, collisions and control policies belong to the caller, which
//! updates entities through [`World::entity_mut`] between ticks.

use std::path::Path;

use log::warn;

use crate::geometry::Entity;
use crate::recorder::{EncodeStats, RecordError};
use crate::schema::RecorderConfig;
use crate::visualizer::{self, Visualizer};

/// Handle to an entity added to a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(usize);

pub struct World {
    dt: f64,
    time: f64,
    steps: u64,
    width: f64,
    height: f64,
    entities: Vec<Entity>,
    visualizer: Box<dyn Visualizer>,
}

impl World {
    /// Create a world and start its display session with the configured
    /// background.
    pub fn new(dt: f64, config: RecorderConfig) -> Result<Self, RecordError> {
        let (width, height) = (config.width, config.height);
        let background = config.background.clone();
        let mut visualizer = visualizer::from_config(config)?;
        visualizer.initialize(&background);
        Ok(Self {
            dt,
            time: 0.0,
            steps: 0,
            width,
            height,
            entities: Vec::new(),
            visualizer,
        })
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Simulated seconds elapsed.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[inline]
    pub fn extent(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Add an entity on top of everything added before it.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    /// Entities in draw order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Advance the clock by one step.
    pub fn tick(&mut self) {
        self.steps += 1;
        self.time = self.steps as f64 * self.dt;
    }

    /// Hand the current snapshot to the display.
    pub fn render(&mut self) -> Result<(), RecordError> {
        self.visualizer.submit_frame(&self.entities)
    }

    pub fn visualizer(&self) -> &dyn Visualizer {
        self.visualizer.as_ref()
    }

    /// Encode the recorded frames. A no-op on display backends.
    pub fn save_video<P: AsRef<Path>>(
        &self,
        path: P,
        fps: u32,
    ) -> Result<Option<EncodeStats>, RecordError> {
        match self.visualizer.recorder() {
            Some(recorder) => recorder.save_video(path, fps),
            None => {
                warn!("display backend keeps no frames; nothing to save");
                Ok(None)
            }
        }
    }

    pub fn save_gif<P: AsRef<Path>>(
        &self,
        path: P,
        fps: u32,
    ) -> Result<Option<EncodeStats>, RecordError> {
        match self.visualizer.recorder() {
            Some(recorder) => recorder.save_gif(path, fps),
            None => {
                warn!("display backend keeps no frames; nothing to save");
                Ok(None)
            }
        }
    }

    pub fn clear_frames(&mut self) {
        if let Some(recorder) = self.visualizer.recorder_mut() {
            recorder.clear_frames();
        }
    }

    pub fn close(&mut self) {
        self.visualizer.finalize();
    }
}
