//! Software rasterization surface.

use crate::color::Rgb8;
use crate::geometry::Point;

use super::Frame;

/// An RGB8 drawing surface mapped onto the world rectangle.
///
/// World (0, 0) is the bottom-left corner of the surface and
/// (width, height) the top-right. One world unit spans `ppm` pixels on both
/// axes. Primitives are sampled at pixel centers without antialiasing, so a
/// pixel is either untouched or set to exactly the fill color.
pub struct Canvas {
    width: u32,
    height: u32,
    ppm: f64,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a surface for a `world_width` x `world_height` world and fill
    /// it with `background`.
    pub fn new(world_width: f64, world_height: f64, ppm: u32, background: Rgb8) -> Self {
        let (width, height) = surface_size(world_width, world_height, ppm);
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..width as usize * height as usize {
            pixels.extend_from_slice(&background);
        }
        Self {
            width,
            height,
            ppm: ppm as f64,
            pixels,
        }
    }

    #[inline]
    fn set_pixel(&mut self, col: u32, row: u32, color: Rgb8) {
        let idx = (row as usize * self.width as usize + col as usize) * 3;
        self.pixels[idx..idx + 3].copy_from_slice(&color);
    }

    /// World-space x of the center of column `col`.
    #[inline]
    fn col_x(&self, col: u32) -> f64 {
        (col as f64 + 0.5) / self.ppm
    }

    /// World-space y of the center of row `row`.
    #[inline]
    fn row_y(&self, row: u32) -> f64 {
        (self.height as f64 - row as f64 - 0.5) / self.ppm
    }

    /// Columns whose centers fall in `[x0, x1]` (world units), clipped.
    fn col_span(&self, x0: f64, x1: f64) -> Option<(u32, u32)> {
        let first = (x0 * self.ppm - 0.5).ceil().max(0.0);
        let last = (x1 * self.ppm - 0.5).floor().min(self.width as f64 - 1.0);
        (first <= last).then_some((first as u32, last as u32))
    }

    /// Columns whose centers fall in `[x0, x1)`, clipped. Half-open so that
    /// polygons sharing an edge never paint the same pixel.
    fn col_span_half_open(&self, x0: f64, x1: f64) -> Option<(u32, u32)> {
        let first = (x0 * self.ppm - 0.5).ceil().max(0.0);
        let last = ((x1 * self.ppm - 0.5).ceil() - 1.0).min(self.width as f64 - 1.0);
        (first <= last).then_some((first as u32, last as u32))
    }

    /// Rows whose centers fall in `[y0, y1]` (world units), clipped.
    fn row_span(&self, y0: f64, y1: f64) -> Option<(u32, u32)> {
        let h = self.height as f64;
        let first = (h - y1 * self.ppm - 0.5).ceil().max(0.0);
        let last = (h - y0 * self.ppm - 0.5).floor().min(h - 1.0);
        (first <= last).then_some((first as u32, last as u32))
    }

    /// Fill every pixel whose center lies within `radius` of `center`.
    pub fn fill_disk(&mut self, center: Point, radius: f64, color: Rgb8) {
        let Some((r0, r1)) = self.row_span(center.y - radius, center.y + radius) else {
            return;
        };
        let Some((c0, c1)) = self.col_span(center.x - radius, center.x + radius) else {
            return;
        };
        let r2 = radius * radius;
        for row in r0..=r1 {
            let dy = self.row_y(row) - center.y;
            for col in c0..=c1 {
                let dx = self.col_x(col) - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(col, row, color);
                }
            }
        }
    }

    /// Fill the interior of a simple polygon (even-odd rule).
    ///
    /// A pixel is filled when its center is inside; centers exactly on a left
    /// edge count as inside, on a right edge as outside.
    pub fn fill_polygon(&mut self, vertices: &[Point], color: Rgb8) {
        if vertices.len() < 3 {
            return;
        }
        let (min_y, max_y) = vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
        let Some((r0, r1)) = self.row_span(min_y, max_y) else {
            return;
        };

        let n = vertices.len();
        let mut crossings: Vec<f64> = Vec::with_capacity(n);
        for row in r0..=r1 {
            let y = self.row_y(row);
            crossings.clear();

            let mut j = n - 1;
            for i in 0..n {
                let pi = vertices[i];
                let pj = vertices[j];
                if (pi.y > y) != (pj.y > y) {
                    crossings.push(pi.x + (y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y));
                }
                j = i;
            }
            crossings.sort_by(f64::total_cmp);

            for pair in crossings.chunks_exact(2) {
                if let Some((c0, c1)) = self.col_span_half_open(pair[0], pair[1]) {
                    for col in c0..=c1 {
                        self.set_pixel(col, row, color);
                    }
                }
            }
        }
    }

    /// Consume the surface, yielding its pixels as a [`Frame`].
    pub fn into_frame(self) -> Frame {
        Frame::from_raw(self.width, self.height, self.pixels)
    }
}

/// Pixel dimensions of the surface for a world extent and density.
pub fn surface_size(world_width: f64, world_height: f64, ppm: u32) -> (u32, u32) {
    let px = |extent: f64| (extent * ppm as f64).round().max(1.0) as u32;
    (px(world_width), px(world_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb8 = [128, 128, 128];
    const FG: Rgb8 = [255, 0, 0];

    fn count(frame: &Frame, color: Rgb8) -> usize {
        let (w, h) = frame.dimensions();
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| frame.pixel(x, y) == color)
            .count()
    }

    #[test]
    fn test_surface_size() {
        assert_eq!(surface_size(120.0, 120.0, 6), (720, 720));
        assert_eq!(surface_size(10.0, 5.0, 4), (40, 20));
        assert_eq!(surface_size(0.1, 0.1, 1), (1, 1));
    }

    #[test]
    fn test_background_fill() {
        let canvas = Canvas::new(4.0, 2.0, 2, BG);
        let frame = canvas.into_frame();
        assert_eq!(frame.dimensions(), (8, 4));
        assert_eq!(count(&frame, BG), 32);
    }

    #[test]
    fn test_y_axis_points_up() {
        let mut canvas = Canvas::new(10.0, 10.0, 1, BG);
        // Unit square in the bottom-left corner of the world.
        canvas.fill_polygon(
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ],
            FG,
        );
        let frame = canvas.into_frame();
        assert_eq!(frame.pixel(0, 9), FG);
        assert_eq!(frame.pixel(0, 0), BG);
        assert_eq!(count(&frame, FG), 1);
    }

    #[test]
    fn test_disk_is_symmetric() {
        let mut canvas = Canvas::new(20.0, 20.0, 1, BG);
        canvas.fill_disk(Point::new(10.0, 10.0), 3.0, FG);
        let frame = canvas.into_frame();
        for y in 0..20 {
            for x in 0..20 {
                assert_eq!(frame.pixel(x, y), frame.pixel(19 - x, y));
                assert_eq!(frame.pixel(x, y), frame.pixel(x, 19 - y));
            }
        }
        // Pixel centers within radius 3 of a pixel corner: 32 of them.
        assert_eq!(count(&frame, FG), 32);
    }

    #[test]
    fn test_disk_clipped_at_edges() {
        let mut canvas = Canvas::new(10.0, 10.0, 2, BG);
        canvas.fill_disk(Point::new(0.0, 0.0), 2.0, FG);
        canvas.fill_disk(Point::new(-50.0, -50.0), 2.0, FG);
        let frame = canvas.into_frame();
        assert_eq!(frame.pixel(0, 19), FG);
        assert_eq!(frame.pixel(19, 0), BG);
    }

    #[test]
    fn test_adjacent_rectangles_do_not_overlap() {
        let mut canvas = Canvas::new(4.0, 1.0, 1, BG);
        let left = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let right = [
            Point::new(2.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(2.0, 1.0),
        ];
        canvas.fill_polygon(&left, FG);
        canvas.fill_polygon(&right, [0, 0, 255]);
        let frame = canvas.into_frame();
        assert_eq!(count(&frame, FG), 2);
        assert_eq!(count(&frame, [0, 0, 255]), 2);
    }

    #[test]
    fn test_rotated_square_interior() {
        let mut canvas = Canvas::new(20.0, 20.0, 1, BG);
        // Diamond centered at (10, 10) with half-diagonal 5.
        let diamond = [
            Point::new(10.0, 5.0),
            Point::new(15.0, 10.0),
            Point::new(10.0, 15.0),
            Point::new(5.0, 10.0),
        ];
        canvas.fill_polygon(&diamond, FG);
        let frame = canvas.into_frame();
        // Center pixel (world 9.5..10.5) inside, corners of the canvas outside.
        assert_eq!(frame.pixel(9, 9), FG);
        assert_eq!(frame.pixel(0, 0), BG);
        assert_eq!(frame.pixel(19, 19), BG);
        // Every filled pixel center satisfies |dx| + |dy| <= 5.
        for y in 0..20u32 {
            for x in 0..20u32 {
                let cx = x as f64 + 0.5 - 10.0;
                let cy = (20 - y) as f64 - 0.5 - 10.0;
                let inside = cx.abs() + cy.abs() < 5.0;
                if inside {
                    assert_eq!(frame.pixel(x, y), FG, "({x}, {y})");
                } else if cx.abs() + cy.abs() > 5.0 {
                    assert_eq!(frame.pixel(x, y), BG, "({x}, {y})");
                }
            }
        }
    }
}
