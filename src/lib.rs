//! Headless frame capture for 2D multi-agent simulations.
//!
//! This crate turns per-step snapshots of a simulated world (cars, buildings,
//! lane markings) into raster frames and encodes them into a video or an
//! animated GIF, with no display attached.
//!
//! # Architecture
//!
//! - `geometry`: Points, shapes and entity snapshots
//! - `color`: Symbolic color tokens and their RGB values
//! - `render`: Software rasterizer producing RGB frames
//! - `schema`: Configuration and scene file types
//! - `recorder`: Frame buffer, session lifecycle and encoding
//! - `visualizer`: Headless-recording and live-preview backends
//! - `world`: Simulation clock and entity list driving a visualizer
//!
//! # Example
//!
//! ```rust,no_run
//! use sim_recorder::{Entity, FrameRecorder, Point, RecorderConfig};
//!
//! let mut recorder = FrameRecorder::new(RecorderConfig::new(120.0, 120.0, 6))?;
//! recorder.create_window("gray");
//!
//! for step in 0..100 {
//!     let x = 10.0 + step as f64;
//!     recorder.update_agents(&[
//!         Entity::ring(Point::new(60.0, 60.0), 37.5, 86.0, "gray80"),
//!         Entity::circle(Point::new(x, 60.0), 2.0, "red"),
//!     ])?;
//! }
//!
//! recorder.save_video("rollout.mp4", 10)?;
//! recorder.save_gif("rollout.gif", 10)?;
//! # Ok::<(), sim_recorder::RecordError>(())
//! ```

pub mod color;
pub mod demo;
pub mod geometry;
pub mod recorder;
pub mod render;
pub mod schema;
pub mod visualizer;
pub mod world;

// Re-export commonly used types
pub use color::{ColorSpec, translate_color};
pub use geometry::{Entity, Point, Shape};
pub use recorder::{EncodeStats, FrameRecorder, RecordError};
pub use render::Frame;
pub use schema::{RecorderConfig, SceneFile};
pub use visualizer::Visualizer;
pub use world::World;
