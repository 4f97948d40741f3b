//! Rasterize a list of entity snapshots into one frame.

use log::debug;

use crate::color::{ColorError, Rgb8, resolve_token};
use crate::geometry::{Entity, Point, Shape};

use super::{Canvas, Frame};

/// Errors raised while drawing a single entity. Any of them aborts the whole
/// capture; partially drawn frames are never produced.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Entity {index}: {source}")]
    Color {
        index: usize,
        #[source]
        source: ColorError,
    },
    #[error("Entity {index} ({kind}): {reason}")]
    InvalidGeometry {
        index: usize,
        kind: &'static str,
        reason: &'static str,
    },
}

/// Fixed parameters of the drawing surface.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub world_width: f64,
    pub world_height: f64,
    pub ppm: u32,
}

/// Draw `entities` in order over `background`. Later entities paint over
/// earlier ones. Unknown shapes are skipped.
///
/// `background` is also the color used to cut the hole out of rings, so it
/// must be the background of this same capture.
pub fn rasterize(
    viewport: Viewport,
    background: Rgb8,
    entities: &[Entity],
) -> Result<Frame, RenderError> {
    let mut canvas = Canvas::new(
        viewport.world_width,
        viewport.world_height,
        viewport.ppm,
        background,
    );

    for (index, entity) in entities.iter().enumerate() {
        let invalid = |reason| RenderError::InvalidGeometry {
            index,
            kind: entity.shape.kind(),
            reason,
        };

        if matches!(entity.shape, Shape::Unknown) {
            debug!("skipping entity {index} with unrecognized shape");
            continue;
        }

        let color = resolve_token(entity.color.as_deref())
            .map_err(|source| RenderError::Color { index, source })?;

        match &entity.shape {
            Shape::Ring {
                center,
                inner_radius,
                outer_radius,
            } => {
                check_point(*center).map_err(invalid)?;
                check_radius(*inner_radius).map_err(invalid)?;
                check_radius(*outer_radius).map_err(invalid)?;
                if inner_radius >= outer_radius {
                    return Err(invalid("inner radius must be smaller than outer radius"));
                }
                canvas.fill_disk(*center, *outer_radius, color);
                canvas.fill_disk(*center, *inner_radius, background);
            }
            Shape::Circle { center, radius } => {
                check_point(*center).map_err(invalid)?;
                check_radius(*radius).map_err(invalid)?;
                canvas.fill_disk(*center, *radius, color);
            }
            Shape::Rectangle { corners } => {
                for corner in corners {
                    check_point(*corner).map_err(invalid)?;
                }
                canvas.fill_polygon(corners, color);
            }
            Shape::Unknown => {}
        }
    }

    Ok(canvas.into_frame())
}

fn check_point(p: Point) -> Result<(), &'static str> {
    if p.is_finite() {
        Ok(())
    } else {
        Err("non-finite coordinate")
    }
}

fn check_radius(r: f64) -> Result<(), &'static str> {
    if r.is_finite() && r >= 0.0 {
        Ok(())
    } else {
        Err("radius must be finite and non-negative")
    }
}
