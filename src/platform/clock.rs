//! Frame pacing
//!
//! The browser calls back once per display refresh. By default every
//! callback runs one tick; `Pacing::Fixed` instead accumulates wall time so
//! the game runs at the same speed on 60 Hz and 144 Hz displays.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Pacing {
    /// One tick per display frame
    #[default]
    PerFrame,
    /// One tick per `step_ms` of elapsed time
    Fixed { step_ms: f64 },
}

/// Decides how many ticks each display frame runs
#[derive(Debug, Clone)]
pub struct FrameClock {
    pacing: Pacing,
    last_ms: Option<f64>,
    accumulator_ms: f64,
}

impl FrameClock {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            last_ms: None,
            accumulator_ms: 0.0,
        }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Forget timing history (after stop, or a long background pause)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator_ms = 0.0;
    }

    /// Number of ticks to run for a frame arriving at `now_ms`
    pub fn ticks_for_frame(&mut self, now_ms: f64) -> u32 {
        let step_ms = match self.pacing {
            Pacing::PerFrame => {
                self.last_ms = Some(now_ms);
                return 1;
            }
            Pacing::Fixed { step_ms } => step_ms.max(1.0),
        };

        let elapsed = match self.last_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            // First frame runs exactly one step
            None => step_ms,
        };
        self.last_ms = Some(now_ms);
        self.accumulator_ms += elapsed;

        let mut ticks = 0;
        while self.accumulator_ms >= step_ms && ticks < MAX_SUBSTEPS {
            self.accumulator_ms -= step_ms;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator_ms = self.accumulator_ms.min(step_ms);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_frame_always_one() {
        let mut clock = FrameClock::new(Pacing::PerFrame);
        assert_eq!(clock.ticks_for_frame(0.0), 1);
        assert_eq!(clock.ticks_for_frame(3.0), 1);
        assert_eq!(clock.ticks_for_frame(500.0), 1);
    }

    #[test]
    fn test_fixed_on_fast_display_skips_frames() {
        let mut clock = FrameClock::new(Pacing::Fixed { step_ms: 16.0 });
        assert_eq!(clock.ticks_for_frame(0.0), 1);
        // 144 Hz: ~7ms per frame
        let mut total = 0;
        let mut now = 0.0;
        for _ in 0..144 {
            now += 7.0;
            total += clock.ticks_for_frame(now);
        }
        // 1008ms of frames at 16ms per tick
        assert_eq!(total, 63);
    }

    #[test]
    fn test_fixed_caps_substeps() {
        let mut clock = FrameClock::new(Pacing::Fixed { step_ms: 10.0 });
        clock.ticks_for_frame(0.0);
        // A huge hitch is clamped and capped
        assert_eq!(clock.ticks_for_frame(5000.0), MAX_SUBSTEPS);
        assert!(clock.ticks_for_frame(5010.0) <= 2);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut clock = FrameClock::new(Pacing::Fixed { step_ms: 10.0 });
        clock.ticks_for_frame(100.0);
        assert_eq!(clock.ticks_for_frame(50.0), 0);
    }
}
