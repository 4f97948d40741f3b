//! Recorded scene files: a configuration plus per-step entity snapshots.

use serde::{Deserialize, Serialize};

use super::RecorderConfig;
use crate::geometry::Entity;

fn default_fps() -> u32 {
    10
}

/// A complete run as handed over by the simulation: one entity list per step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub config: RecorderConfig,
    /// Output frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Entities drawn under every step, before the step's own entities.
    #[serde(default)]
    pub background_entities: Vec<Entity>,
    /// Per-step entity snapshots, in simulation order.
    pub steps: Vec<Vec<Entity>>,
}

impl SceneFile {
    /// Full draw list for step `index`: static entities first, then the step's.
    pub fn step_entities(&self, index: usize) -> Option<Vec<Entity>> {
        let step = self.steps.get(index)?;
        let mut all = Vec::with_capacity(self.background_entities.len() + step.len());
        all.extend_from_slice(&self.background_entities);
        all.extend_from_slice(step);
        Some(all)
    }
}
