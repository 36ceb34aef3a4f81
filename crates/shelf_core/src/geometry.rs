use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SHELF_H, MIN_SHELF_W};

/// A point or extent in container pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Vec2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2f {
    type Output = Vec2f;
    fn add(self, rhs: Vec2f) -> Vec2f {
        Vec2f::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2f {
    type Output = Vec2f;
    fn sub(self, rhs: Vec2f) -> Vec2f {
        Vec2f::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Clamps a shelf position so its full bounding box stays inside the container.
///
/// A container smaller than the shelf clamps to the top-left corner.
pub fn clamp_position(pos: Vec2f, size: Vec2f, container: Vec2f) -> Vec2f {
    let max_x = (container.x - size.x).max(0.0);
    let max_y = (container.y - size.y).max(0.0);
    Vec2f::new(pos.x.clamp(0.0, max_x), pos.y.clamp(0.0, max_y))
}

/// Clamps a shelf size to the usable floor, width and height independently.
pub fn clamp_size(size: Vec2f) -> Vec2f {
    Vec2f::new(size.x.max(MIN_SHELF_W), size.y.max(MIN_SHELF_H))
}

pub fn euclidean(a: Vec2f, b: Vec2f) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Min/max linear normalization of arbitrary points into a margined pixel box.
///
/// Built from the full point set once, then applied per point. A degenerate
/// axis (all values equal) maps onto the margin edge with unit scale.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    min: Vec2f,
    scale: Vec2f,
    margin: f32,
}

impl LinearScale {
    pub fn from_points<I>(points: I, container: Vec2f, margin: f32) -> Self
    where
        I: IntoIterator<Item = Vec2f>,
    {
        let mut min = Vec2f::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2f::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        if !min.x.is_finite() {
            // empty point set, identity placement at the margin
            min = Vec2f::default();
            max = Vec2f::default();
        }

        let span_x = if max.x > min.x { max.x - min.x } else { 1.0 };
        let span_y = if max.y > min.y { max.y - min.y } else { 1.0 };
        Self {
            min,
            scale: Vec2f::new(
                (container.x - 2.0 * margin) / span_x,
                (container.y - 2.0 * margin) / span_y,
            ),
            margin,
        }
    }

    pub fn apply(&self, p: Vec2f) -> Vec2f {
        Vec2f::new(
            (p.x - self.min.x) * self.scale.x + self.margin,
            (p.y - self.min.y) * self.scale.y + self.margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_position_inside_container() {
        let pos = Vec2f::new(50.0, 60.0);
        let size = Vec2f::new(140.0, 90.0);
        let container = Vec2f::new(500.0, 400.0);
        assert_eq!(clamp_position(pos, size, container), pos);
    }

    #[test]
    fn test_clamp_position_negative_delta() {
        // Dragging a 140x90 shelf at (0,0) by (-50,-50) stays at (0,0)
        let pos = Vec2f::new(-50.0, -50.0);
        let size = Vec2f::new(140.0, 90.0);
        let container = Vec2f::new(500.0, 400.0);
        assert_eq!(clamp_position(pos, size, container), Vec2f::new(0.0, 0.0));
    }

    #[test]
    fn test_clamp_position_far_corner() {
        let pos = Vec2f::new(9999.0, 9999.0);
        let size = Vec2f::new(140.0, 90.0);
        let container = Vec2f::new(500.0, 400.0);
        assert_eq!(
            clamp_position(pos, size, container),
            Vec2f::new(360.0, 310.0)
        );
    }

    #[test]
    fn test_clamp_position_container_smaller_than_shelf() {
        let pos = Vec2f::new(30.0, 30.0);
        let size = Vec2f::new(140.0, 90.0);
        let container = Vec2f::new(100.0, 50.0);
        assert_eq!(clamp_position(pos, size, container), Vec2f::new(0.0, 0.0));
    }

    #[test]
    fn test_clamp_size_floor() {
        // A delta of -9999 clamps to the floor on both axes
        let clamped = clamp_size(Vec2f::new(-9999.0, -9999.0));
        assert_eq!(clamped, Vec2f::new(MIN_SHELF_W, MIN_SHELF_H));

        // Axes clamp independently
        let clamped = clamp_size(Vec2f::new(300.0, 10.0));
        assert_eq!(clamped, Vec2f::new(300.0, MIN_SHELF_H));
    }

    #[test]
    fn test_euclidean() {
        let d = euclidean(Vec2f::new(0.0, 0.0), Vec2f::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_scale_maps_extremes_to_margins() {
        let points = [Vec2f::new(10.0, 20.0), Vec2f::new(110.0, 220.0)];
        let container = Vec2f::new(460.0, 260.0);
        let scale = LinearScale::from_points(points, container, 30.0);

        let lo = scale.apply(points[0]);
        assert!((lo.x - 30.0).abs() < 1e-4);
        assert!((lo.y - 30.0).abs() < 1e-4);

        let hi = scale.apply(points[1]);
        assert!((hi.x - 430.0).abs() < 1e-4);
        assert!((hi.y - 230.0).abs() < 1e-4);
    }

    #[test]
    fn test_linear_scale_degenerate_axis() {
        // All points share an x value, scale must stay finite
        let points = [Vec2f::new(50.0, 0.0), Vec2f::new(50.0, 100.0)];
        let scale = LinearScale::from_points(points, Vec2f::new(400.0, 400.0), 30.0);
        let p = scale.apply(Vec2f::new(50.0, 50.0));
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!((p.x - 30.0).abs() < 1e-4);
    }
}
