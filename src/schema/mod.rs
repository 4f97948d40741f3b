//! Schema module - Configuration and scene file types.

mod config;
mod scene;

pub use config::*;
pub use scene::*;
