//! World-space geometry and entity snapshots.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D coordinate in world units. Also used as a (width, height) pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate counter-clockwise about the origin.
    pub fn rotate(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Drawable geometry of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    /// Filled disk.
    Circle { center: Point, radius: f64 },
    /// Annulus between two concentric radii.
    Ring {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
    },
    /// Simple closed polygon through four ordered corners.
    Rectangle { corners: [Point; 4] },
    /// A shape kind this renderer does not know. Skipped at capture time.
    #[serde(other)]
    Unknown,
}

impl Shape {
    /// Rectangle centered at `center`, rotated by `heading` radians. `size.x`
    /// extends along the heading and `size.y` across it.
    ///
    /// Corners are returned counter-clockwise starting from the rear-right.
    pub fn oriented_rectangle(center: Point, size: Point, heading: f64) -> Self {
        let hw = size.x / 2.0;
        let hh = size.y / 2.0;
        let local = [
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ];
        Shape::Rectangle {
            corners: local.map(|p| center + p.rotate(heading)),
        }
    }

    /// Short name of the shape kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Ring { .. } => "ring",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Unknown => "unknown",
        }
    }
}

/// Read-only description of one drawable object at capture time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub shape: Shape,
    /// Symbolic color token. `None` renders in the default color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Entity {
    pub fn new(shape: Shape, color: Option<&str>) -> Self {
        Self {
            shape,
            color: color.map(str::to_owned),
        }
    }

    pub fn circle(center: Point, radius: f64, color: &str) -> Self {
        Self::new(Shape::Circle { center, radius }, Some(color))
    }

    pub fn ring(center: Point, inner_radius: f64, outer_radius: f64, color: &str) -> Self {
        Self::new(
            Shape::Ring {
                center,
                inner_radius,
                outer_radius,
            },
            Some(color),
        )
    }

    pub fn rectangle(corners: [Point; 4], color: &str) -> Self {
        Self::new(Shape::Rectangle { corners }, Some(color))
    }
}
