//! Scoring and difficulty progression
//!
//! The level is always derived from the score, never stored.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::consts::LEVEL_THRESHOLD;

/// Current level (1-based)
pub fn level(score: u32) -> u32 {
    score / LEVEL_THRESHOLD + 1
}

/// Progress toward the next level in `[0, 1)`
pub fn level_progress(score: u32) -> f32 {
    (score % LEVEL_THRESHOLD) as f32 / LEVEL_THRESHOLD as f32
}

/// Score values that trigger a level-up
pub fn is_level_up(score: u32) -> bool {
    score > 0 && score % LEVEL_THRESHOLD == 0
}

/// Pipe palette by level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeTheme {
    Brick,
    Bamboo,
    Wood,
    Stone,
}

impl PipeTheme {
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => PipeTheme::Brick,
            2 => PipeTheme::Bamboo,
            3 => PipeTheme::Wood,
            _ => PipeTheme::Stone,
        }
    }
}

/// Called once per pipe passed, after the score has been incremented
pub fn on_score_increment(state: &mut GameState) {
    let score = state.score;
    state.emit(GameEvent::Scored { score });

    if !is_level_up(score) {
        return;
    }

    let tuning = &state.tuning;
    let growth = tuning.speed_growth();
    let shrink = tuning.shrink_factor();
    let interval_floor = tuning.spawn_interval_floor;
    let gap_floor = tuning.gap_floor;

    let params = &mut state.difficulty;
    params.speed *= growth;

    // Strictly fewer ticks each level until the floor
    let shrunk = (params.spawn_interval as f32 * shrink).round() as u32;
    params.spawn_interval = shrunk
        .min(params.spawn_interval.saturating_sub(1))
        .max(interval_floor)
        .min(params.spawn_interval);

    // A floor above the current value must not make the game easier
    params.gap = (params.gap * shrink).round().max(gap_floor).min(params.gap);

    let new_level = level(score);
    log::info!(
        "Level {} reached: speed {:.2}, spawn interval {}, gap {}",
        new_level,
        params.speed,
        params.spawn_interval,
        params.gap
    );
    state.emit(GameEvent::LevelUp { level: new_level });
}
