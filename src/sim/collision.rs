//! Collision detection between the bird and pipes
//!
//! The bird's hitbox is inset from its sprite on every side.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned box in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl Hitbox {
    /// Bird rect inset by `tolerance` of its size on each side
    pub fn for_bird(bird: &Bird, tolerance: f32) -> Self {
        let inset = bird.size * tolerance;
        let min = bird.pos + inset;
        Self {
            min,
            max: min + bird.size * (1.0 - 2.0 * tolerance),
        }
    }

    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }
}

/// Does the bird touch either solid region of `pipe`?
pub fn pipe_hit(bird: &Bird, pipe: &Pipe, surface_height: f32, tolerance: f32) -> bool {
    let hitbox = Hitbox::for_bird(bird, tolerance);

    let (left, right) = pipe.capped_span();
    if !hitbox.overlaps_x(left, right) {
        return false;
    }

    hitbox.min.y < pipe.top || hitbox.max.y > pipe.bottom_y(surface_height)
}
