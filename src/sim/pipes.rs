//! Pipe lifecycle: spawning, advancing, scoring and retirement

use rand::Rng;

use super::collision::pipe_hit;
use super::difficulty::on_score_increment;
use super::state::{GameState, Pipe, Surface};
use crate::consts::*;

/// Vertical layout of a pipe: `top + gap + bottom == surface height`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapLayout {
    pub top: f32,
    pub bottom: f32,
    pub gap: f32,
}

/// Range the top solid height is drawn from
pub fn top_range(surface_height: f32, gap: f32) -> (f32, f32) {
    let margin = surface_height * SPAWN_MARGIN_RATIO;
    let lo = margin;
    let hi = (surface_height - gap - margin).max(lo);
    (lo, hi)
}

/// Lay out a pipe around a drawn top height.
///
/// Both solids are held to `MIN_SOLID`; when the bottom is clamped the top
/// is recomputed so the gap stays exact. Surfaces too short for that shrink
/// the gap, and as a last resort the solids split what is left.
pub fn gap_layout(surface_height: f32, gap: f32, drawn_top: f32) -> GapLayout {
    let mut min_solid = MIN_SOLID;
    let mut gap = gap.min(surface_height - 2.0 * min_solid);
    if gap < MIN_GAP_FLOOR {
        gap = MIN_GAP_FLOOR.min(surface_height);
        min_solid = ((surface_height - gap) / 2.0).min(MIN_SOLID);
    }

    let mut top = drawn_top.max(min_solid);
    let mut bottom = surface_height - top - gap;
    if bottom < min_solid {
        bottom = min_solid;
        top = surface_height - bottom - gap;
    }

    GapLayout { top, bottom, gap }
}

/// Create a pipe at the right edge when the spawn interval comes up
pub fn maybe_spawn(state: &mut GameState, surface: Surface) {
    let interval = u64::from(state.difficulty.spawn_interval.max(1));
    if state.frame_count % interval != 0 {
        return;
    }

    let (lo, hi) = top_range(surface.height, state.difficulty.gap);
    let drawn = if hi > lo {
        state.rng.random_range(lo..=hi)
    } else {
        lo
    };
    let layout = gap_layout(surface.height, state.difficulty.gap, drawn);

    log::debug!(
        "Spawn pipe at frame {}: top {:.1}, gap {:.1}, bottom {:.1}",
        state.frame_count,
        layout.top,
        layout.gap,
        layout.bottom
    );

    state.pipes.push(Pipe {
        x: surface.width,
        top: layout.top,
        bottom: layout.bottom,
        scored: false,
    });
}

/// Result of moving pipes for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceOutcome {
    pub collided: bool,
    pub scored: u32,
    pub retired: usize,
}

/// Move every pipe left, test collisions, score passed pipes and drop the
/// ones that left the screen.
///
/// After the first collision the remaining pipes still move, but nothing
/// else changes the game for this tick.
pub fn advance(state: &mut GameState, surface: Surface) -> AdvanceOutcome {
    let mut outcome = AdvanceOutcome::default();
    let speed = state.difficulty.speed;
    let tolerance = state.tuning.hitbox_tolerance;

    for i in 0..state.pipes.len() {
        state.pipes[i].x -= speed;

        if outcome.collided {
            continue;
        }

        if pipe_hit(&state.bird, &state.pipes[i], surface.height, tolerance) {
            outcome.collided = true;
            continue;
        }

        let pipe = &mut state.pipes[i];
        if !pipe.scored && pipe.center_x() < state.bird.left() {
            pipe.scored = true;
            state.score += 1;
            outcome.scored += 1;
            on_score_increment(state);
        }
    }

    outcome.retired = retire(state);
    outcome
}

/// Move pipes without collisions or scoring, for the tick a run ends on the
/// ground. Returns how many pipes were retired.
pub fn drift(state: &mut GameState) -> usize {
    let speed = state.difficulty.speed;
    for pipe in &mut state.pipes {
        pipe.x -= speed;
    }
    retire(state)
}

fn retire(state: &mut GameState) -> usize {
    let before = state.pipes.len();
    state.pipes.retain(|p| p.x >= -PIPE_EDGE_WIDTH);
    let retired = before - state.pipes.len();
    if retired > 0 {
        log::debug!("Retired {} pipe(s), {} live", retired, state.pipes.len());
    }
    retired
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running_state(surface: Surface) -> GameState {
        let mut state = GameState::new(42, Tuning::default());
        state.reset_run(surface);
        state
    }

    #[test]
    fn test_layout_from_draw() {
        let layout = gap_layout(640.0, 200.0, 300.0);
        assert_eq!(layout.top, 300.0);
        assert_eq!(layout.bottom, 140.0);
        assert_eq!(layout.top + layout.bottom + layout.gap, 640.0);
    }

    #[test]
    fn test_layout_clamps_bottom_and_recomputes_top() {
        let layout = gap_layout(640.0, 200.0, 420.0);
        assert_eq!(layout.bottom, MIN_SOLID);
        assert_eq!(layout.top, 390.0);
    }

    #[test]
    fn test_layout_clamps_top() {
        let layout = gap_layout(640.0, 200.0, 10.0);
        assert_eq!(layout.top, MIN_SOLID);
        assert_eq!(layout.bottom, 390.0);
    }

    #[test]
    fn test_layout_short_surface_shrinks_gap() {
        let layout = gap_layout(220.0, 200.0, 30.0);
        assert_eq!(layout.gap, 120.0);
        assert_eq!(layout.top, MIN_SOLID);
        assert_eq!(layout.bottom, MIN_SOLID);

        let tiny = gap_layout(60.0, 200.0, 5.0);
        assert!(tiny.gap > 0.0);
        assert!(tiny.top >= 0.0 && tiny.bottom >= 0.0);
        assert_eq!(tiny.top + tiny.bottom + tiny.gap, 60.0);
    }

    #[test]
    fn test_spawn_only_on_interval() {
        let surface = Surface::new(480.0, 640.0);
        let mut state = running_state(surface);
        state.difficulty.spawn_interval = 150;

        maybe_spawn(&mut state, surface);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, 480.0);

        state.frame_count = 149;
        maybe_spawn(&mut state, surface);
        assert_eq!(state.pipes.len(), 1);

        state.frame_count = 300;
        maybe_spawn(&mut state, surface);
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_spawn_is_deterministic_per_seed() {
        let surface = Surface::new(480.0, 640.0);
        let mut a = running_state(surface);
        let mut b = running_state(surface);
        for frame in 0..10 {
            a.frame_count = frame * 150;
            b.frame_count = frame * 150;
            maybe_spawn(&mut a, surface);
            maybe_spawn(&mut b, surface);
        }
        assert_eq!(a.pipes, b.pipes);
    }

    #[test]
    fn test_scoring_once_at_center_crossing() {
        let surface = Surface::new(480.0, 640.0);
        let mut state = running_state(surface);
        state.difficulty.speed = 2.0;
        let bird_x = state.bird.left();
        // Wide-open pipe whose center sits 1px right of the bird
        state.pipes.push(Pipe {
            x: bird_x - PIPE_WIDTH / 2.0 + 1.0,
            top: 0.0,
            bottom: 0.0,
            scored: false,
        });

        let outcome = advance(&mut state, surface);
        assert_eq!(outcome.scored, 1);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].scored);

        let outcome = advance(&mut state, surface);
        assert_eq!(outcome.scored, 0);
        assert_eq!(state.score, 1);
        assert!(state.events.contains(&GameEvent::Scored { score: 1 }));
    }

    #[test]
    fn test_collision_stops_game_effects_but_pipes_keep_moving() {
        let surface = Surface::new(480.0, 640.0);
        let mut state = running_state(surface);
        state.difficulty.speed = 1.0;
        let bird_x = state.bird.left();
        // Solid wall over the bird, then a passed pipe that would score
        state.pipes.push(Pipe { x: bird_x, top: 640.0, bottom: 0.0, scored: false });
        state.pipes.push(Pipe { x: bird_x - 40.0, top: 0.0, bottom: 0.0, scored: false });

        let outcome = advance(&mut state, surface);
        assert!(outcome.collided);
        assert_eq!(state.score, 0);
        assert_eq!(state.pipes[1].x, bird_x - 41.0);
        assert!(!state.pipes[1].scored);
    }

    #[test]
    fn test_retire_past_left_edge() {
        let surface = Surface::new(480.0, 640.0);
        let mut state = running_state(surface);
        state.difficulty.speed = 2.0;
        state.pipes.push(Pipe { x: -PIPE_EDGE_WIDTH + 1.0, top: 0.0, bottom: 0.0, scored: true });
        state.pipes.push(Pipe { x: 300.0, top: 100.0, bottom: 100.0, scored: false });

        let outcome = advance(&mut state, surface);
        assert_eq!(outcome.retired, 1);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, 298.0);
    }

    #[test]
    fn test_drift_moves_without_scoring() {
        let surface = Surface::new(480.0, 640.0);
        let mut state = running_state(surface);
        state.difficulty.speed = 3.0;
        let bird_x = state.bird.left();
        state.pipes.push(Pipe { x: bird_x, top: 640.0, bottom: 0.0, scored: false });
        state.pipes.push(Pipe { x: bird_x - 40.0, top: 0.0, bottom: 0.0, scored: false });
        state.pipes.push(Pipe { x: -PIPE_EDGE_WIDTH + 1.0, top: 0.0, bottom: 0.0, scored: true });

        assert_eq!(drift(&mut state), 1);
        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.pipes[0].x, bird_x - 3.0);
        assert_eq!(state.pipes[1].x, bird_x - 43.0);
        assert!(!state.pipes[1].scored);
        assert_eq!(state.score, 0);
    }

    proptest! {
        #[test]
        fn prop_layout_sums_to_height(h in 60.0f32..2000.0, gap in 40.0f32..400.0, draw in 0.0f32..2000.0) {
            let layout = gap_layout(h, gap, draw);
            prop_assert!(layout.gap > 0.0);
            prop_assert!(layout.top >= 0.0);
            prop_assert!(layout.bottom >= 0.0);
            prop_assert!((layout.top + layout.bottom + layout.gap - h).abs() <= h * 1e-5);
        }
    }
}
