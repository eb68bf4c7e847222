//! Demo mode: a simple autopilot that flaps through the next gap

use super::state::{GamePhase, GameState};

/// How far below the gap centre the bird may sink before flapping
const SINK_ALLOWANCE: f32 = 0.15;

/// Should the autopilot jump this tick?
pub fn wants_jump(state: &GameState) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }

    let bird = &state.bird;
    let height = state.surface.height;

    // First pipe whose right edge is still ahead of the bird
    let target_y = state
        .pipes
        .iter()
        .find(|p| p.x + crate::consts::PIPE_WIDTH > bird.left())
        .map(|p| p.top + p.gap(height) * (0.5 + SINK_ALLOWANCE))
        .unwrap_or(height * 0.5);

    bird.velocity >= 0.0 && bird.bottom() > target_y
}

/// Should the autopilot restart after a game over?
pub fn wants_restart(state: &GameState) -> bool {
    state.phase == GamePhase::Ended || state.phase == GamePhase::Initial
}
