//! Open polylines drawn with Bresenham's integer line algorithm.

use super::{map_color, ClipBox};
use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::surface::{Surface, SurfaceLock};

/// How a segment walks its pixels.
///
/// The sign of `dx`/`dy` picks the step direction on each axis and the major axis
/// picks the loop, which together cover all eight octants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stepping {
    /// `dy == 0`.
    Horizontal,
    /// `dx == 0`.
    Vertical,
    /// `|dx| >= |dy|`, x advances every pixel.
    Shallow,
    /// `|dy| > |dx|`, y advances every pixel.
    Steep,
}

impl Stepping {
    fn classify(dx: i32, dy: i32) -> Self {
        if dy == 0 {
            Self::Horizontal
        } else if dx == 0 {
            Self::Vertical
        } else if dx.abs() >= dy.abs() {
            Self::Shallow
        } else {
            Self::Steep
        }
    }
}

/// Draw an open polyline through `points`.
///
/// An empty slice draws nothing and a single point draws one pixel. Pixels outside
/// the surface or the optional clip rectangle are skipped.
///
/// # Example
///
/// ```
/// use pickframe::prelude::*;
///
/// let mut surface = Surface::new(10, 10).unwrap();
/// let points = [Point::new(0, 0), Point::new(9, 0), Point::new(9, 9)];
/// draw_polyline(&mut surface, &points, Rgba::RED, None);
///
/// assert_eq!(surface.get_pixel(5, 0), Some(Rgba::RED));
/// assert_eq!(surface.get_pixel(9, 5), Some(Rgba::RED));
/// ```
pub fn draw_polyline(surface: &mut Surface, points: &[Point], color: Rgba, clip: Option<&Rect>) {
    let Some(&first) = points.first() else {
        return;
    };
    let bounds = ClipBox::new(surface, clip);
    if bounds.is_empty() {
        return;
    }
    let packed = map_color(surface, color);
    let mut lock = surface.lock();

    if points.len() == 1 {
        plot(&mut lock, &bounds, first.x, first.y, packed);
        return;
    }
    for pair in points.windows(2) {
        draw_segment(&mut lock, &bounds, pair[0], pair[1], packed);
    }
}

#[inline]
fn plot(lock: &mut SurfaceLock<'_>, bounds: &ClipBox, x: i32, y: i32, packed: u32) {
    if bounds.contains(x, y) {
        lock.put(x, y, packed);
    }
}

fn draw_segment(lock: &mut SurfaceLock<'_>, bounds: &ClipBox, from: Point, to: Point, packed: u32) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let adx = dx.abs();
    let ady = dy.abs();
    let (mut x, mut y) = (from.x, from.y);

    match Stepping::classify(dx, dy) {
        Stepping::Horizontal => {
            // Also covers the degenerate zero-length segment.
            loop {
                plot(lock, bounds, x, y, packed);
                if x == to.x {
                    break;
                }
                x += sx;
            }
        }
        Stepping::Vertical => loop {
            plot(lock, bounds, x, y, packed);
            if y == to.y {
                break;
            }
            y += sy;
        },
        Stepping::Shallow => {
            let mut err = 0;
            loop {
                plot(lock, bounds, x, y, packed);
                if x == to.x {
                    break;
                }
                x += sx;
                err += ady;
                if 2 * err > adx {
                    y += sy;
                    err -= adx;
                }
            }
        }
        Stepping::Steep => {
            let mut err = 0;
            loop {
                plot(lock, bounds, x, y, packed);
                if y == to.y {
                    break;
                }
                y += sy;
                err += adx;
                if 2 * err > ady {
                    x += sx;
                    err -= ady;
                }
            }
        }
    }
}
