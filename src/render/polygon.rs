//! Filled polygons via scanline sweep over an active edge list.

use super::{map_color, ClipBox};
use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::surface::Surface;

/// One non-horizontal polygon edge while it is being swept.
///
/// Coordinates are widened to `i64` so that edges between far-apart `i32`
/// vertices cannot overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    /// Scanline on which the edge retires.
    ymax: i64,
    /// Current x intersection.
    x: i64,
    /// Direction x moves as y grows.
    sx: i64,
    /// `|dx|` of the whole edge.
    adx: i64,
    /// `dy` of the whole edge (always positive).
    dy: i64,
    /// Error accumulator, kept in `(-dy/2, dy/2]`.
    err: i64,
}

impl Edge {
    /// Build an edge oriented top to bottom. Horizontal edges yield `None`.
    fn new(a: Point, b: Point) -> Option<(i64, Self)> {
        if a.y == b.y {
            return None;
        }
        let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
        let dx = i64::from(bottom.x) - i64::from(top.x);
        Some((
            i64::from(top.y),
            Self {
                ymax: i64::from(bottom.y),
                x: i64::from(top.x),
                sx: dx.signum(),
                adx: dx.abs(),
                dy: i64::from(bottom.y) - i64::from(top.y),
                err: 0,
            },
        ))
    }

    /// Move the intersection down one scanline.
    ///
    /// Rounds half toward the starting x, like the steep line octants.
    #[inline]
    fn step(&mut self) {
        self.advance(1);
    }

    /// Move the intersection down `rows` scanlines at once.
    ///
    /// Same result as `rows` calls to [`Edge::step`].
    fn advance(&mut self, rows: i64) {
        let dy = i128::from(self.dy);
        let err = i128::from(self.err) + i128::from(self.adx) * i128::from(rows);
        // Smallest k with 2 * (err - k * dy) <= dy.
        let k = if 2 * err > dy { (2 * err + dy - 1) / (2 * dy) } else { 0 };
        // Callers never advance past ymax, so k stays within |dx| + 1.
        self.x += self.sx * k as i64;
        self.err = (err - k * dy) as i64;
    }
}

/// Edges sorted by the scanline they start on, handed out as the sweep reaches them.
#[derive(Debug)]
struct EdgeTable {
    edges: Vec<(i64, Edge)>,
    next: usize,
}

impl EdgeTable {
    fn build(points: &[Point]) -> Option<Self> {
        let n = points.len();
        let mut edges: Vec<(i64, Edge)> = (0..n)
            .filter_map(|i| Edge::new(points[i], points[(i + 1) % n]))
            .collect();
        if edges.is_empty() {
            return None;
        }
        edges.sort_by_key(|(ymin, _)| *ymin);
        Some(Self { edges, next: 0 })
    }

    /// Start row of the next edge not yet handed out.
    fn next_line(&self) -> Option<i64> {
        self.edges.get(self.next).map(|(ymin, _)| *ymin)
    }

    /// Move every edge starting at or above `y` into `active`, advanced to row `y`.
    fn activate(&mut self, y: i64, active: &mut Vec<Edge>) {
        while let Some(&(ymin, mut edge)) = self.edges.get(self.next) {
            if ymin > y {
                break;
            }
            self.next += 1;
            if edge.ymax <= y {
                continue;
            }
            if ymin < y {
                edge.advance(y - ymin);
            }
            active.push(edge);
        }
    }

    fn is_drained(&self) -> bool {
        self.next == self.edges.len()
    }
}

/// Fill the polygon through `points`; the last point connects back to the first.
///
/// Each scanline is filled between successive pairs of edge intersections in
/// `[x_a, x_b)`. An unpaired trailing intersection fills to the right edge of the
/// drawable area. Horizontal edges contribute nothing.
///
/// # Example
///
/// ```
/// use pickframe::prelude::*;
///
/// let mut surface = Surface::new(10, 10).unwrap();
/// let square = [
///     Point::new(2, 2),
///     Point::new(6, 2),
///     Point::new(6, 6),
///     Point::new(2, 6),
/// ];
/// draw_polygon(&mut surface, &square, Rgba::BLUE, None);
///
/// assert_eq!(surface.get_pixel(2, 2), Some(Rgba::BLUE));
/// assert_eq!(surface.get_pixel(5, 5), Some(Rgba::BLUE));
/// assert_eq!(surface.get_pixel(6, 6), Some(Rgba::TRANSPARENT));
/// ```
pub fn draw_polygon(surface: &mut Surface, points: &[Point], color: Rgba, clip: Option<&Rect>) {
    if points.len() < 2 {
        return;
    }
    let bounds = ClipBox::new(surface, clip);
    if bounds.is_empty() {
        return;
    }
    let Some(mut table) = EdgeTable::build(points) else {
        return;
    };
    let packed = map_color(surface, color);
    let mut lock = surface.lock();

    let mut active: Vec<Edge> = Vec::new();
    let (left, right) = (i64::from(bounds.left), i64::from(bounds.right));
    // Rows above the drawable area are skipped arithmetically.
    let mut y = match table.next_line() {
        Some(first) => first.max(i64::from(bounds.top)),
        None => return,
    };

    loop {
        table.activate(y, &mut active);
        active.retain(|edge| edge.ymax > y);
        if active.is_empty() {
            match table.next_line() {
                Some(next) => y = next,
                None => break,
            }
            continue;
        }
        // Nothing below the drawable area can be painted.
        if y >= i64::from(bounds.bottom) {
            break;
        }

        active.sort_by_key(|edge| edge.x);

        // bounds.top <= y < bounds.bottom, so the row fits in i32.
        let row = y as i32;
        for pair in active.chunks(2) {
            let start = pair[0].x.clamp(left, right) as i32;
            let end = pair.get(1).map_or(right, |edge| edge.x.clamp(left, right)) as i32;
            lock.fill_span(row, start, end, packed);
        }

        for edge in &mut active {
            edge.step();
        }
        y += 1;
    }
}
