//! Axis-aligned collision tests
//!
//! Everything in the field is a rectangle: the bird's bounding box, and each
//! pipe's top and bottom segments. Comparisons are strict, so touching edges
//! never count as a hit.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strictly inside after growing the box by `margin` on every side
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        point.x > self.min.x - margin
            && point.x < self.max.x + margin
            && point.y > self.min.y - margin
            && point.y < self.max.y + margin
    }
}

/// Bird's bottom edge is below the floor
pub fn hits_ground(bird: &Bird, field_height: f32) -> bool {
    bird.pos.y + bird.size.y > field_height
}

/// Bird overlaps the pipe column and is not fully inside the gap
pub fn hits_pipe(bird: &Bird, pipe: &Pipe, field_height: f32) -> bool {
    let bird_box = bird.aabb();
    let in_column = bird_box.min.x < pipe.x + pipe.width && bird_box.max.x > pipe.x;
    if !in_column {
        return false;
    }
    bird_box.min.y < pipe.top || bird_box.max.y > pipe.bottom_edge(field_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird_at(x: f32, y: f32, size: f32) -> Bird {
        let mut bird = Bird::new(Vec2::new(x, y), size);
        bird.vel = 0.0;
        bird
    }

    fn pipe(x: f32, top: f32, gap: f32, height: f32) -> Pipe {
        Pipe::new(0, x, 80.0, top, gap, height)
    }

    #[test]
    fn test_contains_with_margin() {
        let r = Aabb::from_pos_size(Vec2::new(100.0, 100.0), Vec2::new(160.0, 45.0));
        assert!(r.contains_with_margin(Vec2::new(150.0, 120.0), 0.0));
        assert!(!r.contains_with_margin(Vec2::new(97.0, 120.0), 0.0));
        assert!(r.contains_with_margin(Vec2::new(97.0, 120.0), 6.0));
        assert!(!r.contains_with_margin(Vec2::new(94.0, 120.0), 6.0));
    }

    #[test]
    fn test_ground_hit_is_strict() {
        // 750 + 56 = 806 > 800
        assert!(hits_ground(&bird_at(80.0, 750.0, 56.0), 800.0));
        // 744 + 56 = 800, resting exactly on the floor is fine
        assert!(!hits_ground(&bird_at(80.0, 744.0, 56.0), 800.0));
    }

    #[test]
    fn test_bird_inside_gap_is_safe() {
        let p = pipe(60.0, 300.0, 176.0, 800.0);
        assert!(!hits_pipe(&bird_at(80.0, 350.0, 56.0), &p, 800.0));
    }

    #[test]
    fn test_bird_above_gap_hits_top_segment() {
        let p = pipe(60.0, 300.0, 176.0, 800.0);
        assert!(hits_pipe(&bird_at(80.0, 299.0, 56.0), &p, 800.0));
    }

    #[test]
    fn test_bird_below_gap_hits_bottom_segment() {
        let p = pipe(60.0, 300.0, 176.0, 800.0);
        // gap spans 300..476, bird bottom at 477
        assert!(hits_pipe(&bird_at(80.0, 421.0, 56.0), &p, 800.0));
    }

    #[test]
    fn test_pipe_outside_column_never_hits() {
        let p = pipe(300.0, 300.0, 176.0, 800.0);
        assert!(!hits_pipe(&bird_at(80.0, 0.0, 56.0), &p, 800.0));
    }
}
