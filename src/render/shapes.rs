//! Point paths for common widget outlines.
//!
//! These only build `Vec<Point>`s; pass them to
//! [`draw_polygon`](super::draw_polygon) or [`draw_polyline`](super::draw_polyline).

use crate::geometry::{Point, Rect};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Number of straight segments approximating an arc.
pub const ARC_SEGMENTS: usize = 20;

/// Which part of a rounded frame to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePart {
    /// Upper-left half, cut along the diagonal band.
    Top,
    /// Lower-right half, cut along the diagonal band.
    Bottom,
    /// Whole outline.
    Full,
}

/// Points along a circular arc, counter-clockwise from `start` to `end` radians.
///
/// Angles follow the usual math convention with y pointing down on screen, so
/// `PI / 2` is straight up. An `end` smaller than `start` wraps around once. A
/// zero radius yields the single center point.
#[must_use]
pub fn arc(center: Point, radius: i32, start: f64, end: f64) -> Vec<Point> {
    if radius <= 0 {
        return vec![center];
    }
    let end = if end < start { end + 2.0 * PI } else { end };
    let step = (end - start) / ARC_SEGMENTS as f64;
    let r = f64::from(radius);

    (0..=ARC_SEGMENTS)
        .map(|i| {
            let angle = start + step * i as f64;
            Point::new(
                center.x + (r * angle.cos()).round() as i32,
                center.y - (r * angle.sin()).round() as i32,
            )
        })
        .collect()
}

/// Outline of `rect` with corners rounded by `radius`.
///
/// The radius is limited to half the shorter side. [`FramePart::Top`] and
/// [`FramePart::Bottom`] split the frame along a band running from the
/// bottom-left to the top-right corner, inset by half the shorter side; they are
/// used to paint raised or sunken relief.
#[must_use]
pub fn rounded_frame(rect: &Rect, radius: i32, part: FramePart) -> Vec<Point> {
    let (x, y) = (rect.left(), rect.top());
    let (w, h) = (rect.size.width, rect.size.height);
    let half = w.min(h) / 2;
    let r = radius.clamp(0, half);

    let top_left = Point::new(x + r, y + r);
    let bottom_left = Point::new(x + r, y + h - r);
    let bottom_right = Point::new(x + w - r, y + h - r);
    let top_right = Point::new(x + w - r, y + r);

    let mut path = Vec::with_capacity(4 * (ARC_SEGMENTS + 1) + 2);
    match part {
        FramePart::Full => {
            path.extend(arc(top_left, r, FRAC_PI_2, PI));
            path.extend(arc(bottom_left, r, PI, 3.0 * FRAC_PI_2));
            path.extend(arc(bottom_right, r, 3.0 * FRAC_PI_2, 2.0 * PI));
            path.extend(arc(top_right, r, 0.0, FRAC_PI_2));
        }
        FramePart::Top => {
            path.extend(arc(top_left, r, FRAC_PI_2, PI));
            path.extend(arc(bottom_left, r, PI, 5.0 * FRAC_PI_4));
            path.push(Point::new(x + half, y + h - half));
            path.push(Point::new(x + w - half, y + half));
            path.extend(arc(top_right, r, FRAC_PI_4, FRAC_PI_2));
        }
        FramePart::Bottom => {
            path.extend(arc(bottom_left, r, 5.0 * FRAC_PI_4, 3.0 * FRAC_PI_2));
            path.extend(arc(bottom_right, r, 3.0 * FRAC_PI_2, 2.0 * PI));
            path.extend(arc(top_right, r, 0.0, FRAC_PI_4));
            path.push(Point::new(x + w - half, y + half));
            path.push(Point::new(x + half, y + h - half));
        }
    }
    path.dedup();
    path
}

/// The four corners of `rect`, clockwise from the top-left.
///
/// Filling this path with [`draw_polygon`](super::draw_polygon) covers exactly
/// the pixels of `rect`.
#[must_use]
pub fn rectangle_path(rect: &Rect) -> Vec<Point> {
    vec![
        rect.top_left,
        Point::new(rect.right(), rect.top()),
        Point::new(rect.right(), rect.bottom()),
        Point::new(rect.left(), rect.bottom()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_endpoints() {
        let points = arc(Point::new(10, 10), 5, 0.0, FRAC_PI_2);
        assert_eq!(points.len(), ARC_SEGMENTS + 1);
        assert_eq!(points.first(), Some(&Point::new(15, 10)));
        assert_eq!(points.last(), Some(&Point::new(10, 5)));
    }

    #[test]
    fn test_arc_points_stay_on_circle() {
        let center = Point::new(50, 50);
        for point in arc(center, 30, FRAC_PI_4, PI + FRAC_PI_4) {
            let dx = f64::from(point.x - center.x);
            let dy = f64::from(point.y - center.y);
            // Rounding each coordinate moves a point by at most sqrt(0.5).
            approx::assert_abs_diff_eq!(dx.hypot(dy), 30.0, epsilon = 0.75);
        }
    }

    #[test]
    fn test_arc_zero_radius() {
        assert_eq!(arc(Point::new(3, 4), 0, 0.0, PI), vec![Point::new(3, 4)]);
    }

    #[test]
    fn test_arc_wraps_when_end_precedes_start() {
        let points = arc(Point::ORIGIN, 10, 3.0 * FRAC_PI_2, 0.0);
        assert_eq!(points.first(), Some(&Point::new(0, 10)));
        assert_eq!(points.last(), Some(&Point::new(10, 0)));
    }

    #[test]
    fn test_square_frame_without_radius_is_rectangle() {
        let rect = Rect::from_xywh(2, 3, 10, 6);
        let path = rounded_frame(&rect, 0, FramePart::Full);
        assert_eq!(
            path,
            vec![
                Point::new(2, 3),
                Point::new(2, 9),
                Point::new(12, 9),
                Point::new(12, 3),
            ]
        );
    }

    #[test]
    fn test_radius_is_limited() {
        let rect = Rect::from_xywh(0, 0, 10, 4);
        let path = rounded_frame(&rect, 50, FramePart::Full);
        assert!(path.iter().all(|p| p.x >= 0 && p.x <= 10 && p.y >= 0 && p.y <= 4));
    }

    #[test]
    fn test_relief_halves_share_the_band() {
        let rect = Rect::from_xywh(0, 0, 40, 20);
        let top = rounded_frame(&rect, 5, FramePart::Top);
        let bottom = rounded_frame(&rect, 5, FramePart::Bottom);
        let band = [Point::new(10, 10), Point::new(30, 10)];
        assert!(band.iter().all(|p| top.contains(p)));
        assert!(band.iter().all(|p| bottom.contains(p)));
    }

    #[test]
    fn test_rectangle_path_corners() {
        let rect = Rect::from_xywh(1, 2, 3, 4);
        assert_eq!(
            rectangle_path(&rect),
            vec![
                Point::new(1, 2),
                Point::new(4, 2),
                Point::new(4, 6),
                Point::new(1, 6),
            ]
        );
    }
}
