//! Bird physics: gravity integration, jump impulses and surface bounds

use serde::{Deserialize, Serialize};

use super::state::{Bird, Surface};
use crate::consts::{STRONG_LIFT_FACTOR, STRONG_LIFT_WINDOW_MS};

/// Result of clamping the bird to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    Inside,
    /// Hit the ceiling; velocity zeroed, run continues
    Ceiling,
    /// Hit the ground; the run is over
    Ground,
}

/// One tick of gravity
pub fn integrate(bird: &mut Bird) {
    bird.velocity += bird.gravity;
    bird.pos.y += bird.velocity;
}

/// Replace the current velocity with the lift impulse
pub fn apply_impulse(bird: &mut Bird, strength: f32) {
    bird.velocity = bird.lift * strength;
}

/// Keep the bird within `[0, height - bird height]`
pub fn clamp_to_surface(bird: &mut Bird, surface: Surface) -> Bounds {
    let floor = surface.height - bird.size.y;
    if bird.pos.y > floor {
        bird.pos.y = floor;
        bird.velocity = 0.0;
        Bounds::Ground
    } else if bird.pos.y < 0.0 {
        bird.pos.y = 0.0;
        bird.velocity = 0.0;
        Bounds::Ceiling
    } else {
        Bounds::Inside
    }
}

/// Debounce for jump input
///
/// Jumps closer than `min_interval_ms` to the last accepted one are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpGate {
    pub min_interval_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl JumpGate {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Forget the last jump so the next one is always accepted
    pub fn clear(&mut self) {
        self.last_accepted_ms = None;
    }

    /// Pretend a jump happened at `now_ms` (used on resume from pause)
    pub fn anchor(&mut self, now_ms: f64) {
        self.last_accepted_ms = Some(now_ms);
    }

    pub fn last_accepted(&self) -> Option<f64> {
        self.last_accepted_ms
    }

    /// Try to accept a jump at `at_ms`
    pub fn try_accept(&mut self, at_ms: f64) -> JumpVerdict {
        let since_last_ms = self.last_accepted_ms.map(|last| at_ms - last);
        if since_last_ms.is_some_and(|since| since < self.min_interval_ms) {
            return JumpVerdict::Debounced;
        }
        self.last_accepted_ms = Some(at_ms);
        JumpVerdict::Accepted { since_last_ms }
    }
}

/// Outcome of a jump request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpVerdict {
    /// `since_last_ms` is `None` for the first jump of a run
    Accepted { since_last_ms: Option<f64> },
    Debounced,
}

impl JumpVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, JumpVerdict::Accepted { .. })
    }
}

/// Lift multiplier for a jump `since_last_ms` after the previous one
pub fn lift_strength(since_last_ms: Option<f64>, strong_lift: bool) -> f32 {
    match since_last_ms {
        Some(since) if strong_lift && since <= STRONG_LIFT_WINDOW_MS => STRONG_LIFT_FACTOR,
        _ => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn bird(gravity: f32, lift: f32) -> Bird {
        let mut bird = Bird::new(&Tuning {
            gravity,
            lift,
            ..Tuning::default()
        });
        bird.fit_to_surface(Surface::new(480.0, 640.0));
        bird
    }

    #[test]
    fn test_integrate_one_tick() {
        let mut b = bird(0.15, -5.0);
        b.pos.y = 0.0;
        b.velocity = 0.0;
        integrate(&mut b);
        assert!((b.velocity - 0.15).abs() < 1e-6);
        assert!((b.pos.y - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let mut b = bird(0.15, -5.0);
        b.velocity = 7.5;
        apply_impulse(&mut b, 1.0);
        assert_eq!(b.velocity, -5.0);
    }

    #[test]
    fn test_ground_clamp() {
        let surface = Surface::new(480.0, 640.0);
        let mut b = bird(0.3, -6.0);
        b.pos.y = 630.0;
        b.velocity = 4.0;
        assert_eq!(clamp_to_surface(&mut b, surface), Bounds::Ground);
        assert_eq!(b.pos.y, 640.0 - b.size.y);
        assert_eq!(b.velocity, 0.0);
    }

    #[test]
    fn test_ceiling_clamp() {
        let surface = Surface::new(480.0, 640.0);
        let mut b = bird(0.3, -6.0);
        b.pos.y = -3.0;
        b.velocity = -6.0;
        assert_eq!(clamp_to_surface(&mut b, surface), Bounds::Ceiling);
        assert_eq!(b.pos.y, 0.0);
        assert_eq!(b.velocity, 0.0);
    }

    #[test]
    fn test_jump_gate_debounce() {
        let mut gate = JumpGate::new(200.0);
        assert_eq!(
            gate.try_accept(1000.0),
            JumpVerdict::Accepted { since_last_ms: None }
        );
        assert_eq!(gate.try_accept(1150.0), JumpVerdict::Debounced);
        // Dropped jumps do not move the anchor
        assert_eq!(
            gate.try_accept(1200.0),
            JumpVerdict::Accepted { since_last_ms: Some(200.0) }
        );
        assert_eq!(gate.last_accepted(), Some(1200.0));
    }

    #[test]
    fn test_jump_gate_anchor_blocks_immediate_jump() {
        let mut gate = JumpGate::new(200.0);
        gate.anchor(5000.0);
        assert!(!gate.try_accept(5010.0).is_accepted());
        gate.clear();
        assert!(gate.try_accept(5010.0).is_accepted());
    }

    #[test]
    fn test_strong_lift_only_when_enabled() {
        assert_eq!(lift_strength(Some(250.0), false), 1.0);
        assert_eq!(lift_strength(Some(250.0), true), STRONG_LIFT_FACTOR);
        assert_eq!(lift_strength(Some(900.0), true), 1.0);
        assert_eq!(lift_strength(None, true), 1.0);
    }

    proptest! {
        #[test]
        fn prop_integration_is_pure(v in -10.0f32..10.0, y in 0.0f32..500.0, g in 0.01f32..1.0) {
            let mut b = bird(g, -6.0);
            b.velocity = v;
            b.pos.y = y;
            integrate(&mut b);
            prop_assert_eq!(b.velocity, v + g);
            prop_assert_eq!(b.pos.y, y + (v + g));
        }

        #[test]
        fn prop_debounced_jumps_rejected(first in 0.0f64..1e6, delta in 0.0f64..199.999) {
            let mut gate = JumpGate::new(200.0);
            prop_assert!(gate.try_accept(first).is_accepted());
            prop_assert_eq!(gate.try_accept(first + delta), JumpVerdict::Debounced);
            prop_assert_eq!(gate.last_accepted(), Some(first));
        }
    }
}
