//! Read-only view of a tick's result for renderers and HUDs

use serde::{Deserialize, Serialize};

use super::difficulty::{PipeTheme, level, level_progress};
use super::state::{GamePhase, GameState, Surface};
use crate::consts::{PIPE_CAP_HEIGHT, PIPE_CAP_OVERHANG, PIPE_WIDTH};

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawable pieces of one pipe: two bodies and two caps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub top_body: Rect,
    pub top_cap: Rect,
    pub bottom_body: Rect,
    pub bottom_cap: Rect,
}

impl PipeView {
    fn new(x: f32, top: f32, bottom: f32, surface_height: f32) -> Self {
        let cap_x = x - PIPE_CAP_OVERHANG;
        let cap_w = PIPE_WIDTH + 2.0 * PIPE_CAP_OVERHANG;
        let bottom_y = surface_height - bottom;
        Self {
            top_body: Rect::new(x, 0.0, PIPE_WIDTH, top),
            top_cap: Rect::new(cap_x, top - PIPE_CAP_HEIGHT, cap_w, PIPE_CAP_HEIGHT),
            bottom_body: Rect::new(x, bottom_y, PIPE_WIDTH, bottom),
            bottom_cap: Rect::new(cap_x, bottom_y, cap_w, PIPE_CAP_HEIGHT),
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub surface: Surface,
    pub phase: GamePhase,
    pub bird: Rect,
    /// Bird velocity, for tilting the sprite
    pub bird_velocity: f32,
    pub pipes: Vec<PipeView>,
    pub theme: PipeTheme,
    pub score: u32,
    pub level: u32,
    pub level_progress: f32,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let bird = &state.bird;
        let surface = state.surface;
        let level = level(state.score);
        Self {
            surface,
            phase: state.phase,
            bird: Rect::new(bird.pos.x, bird.pos.y, bird.size.x, bird.size.y),
            bird_velocity: bird.velocity,
            pipes: state
                .pipes
                .iter()
                .map(|p| PipeView::new(p.x, p.top, p.bottom, surface.height))
                .collect(),
            theme: PipeTheme::for_level(level),
            score: state.score,
            level,
            level_progress: level_progress(state.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Pipe;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_pipe_geometry() {
        let mut state = GameState::new(3, Tuning::default());
        let surface = Surface::new(480.0, 640.0);
        state.reset_run(surface);
        state.surface = surface;
        state.score = 12;
        state.pipes.push(Pipe { x: 200.0, top: 300.0, bottom: 140.0, scored: false });

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.level, 2);
        assert_eq!(snap.theme, PipeTheme::Bamboo);
        let pipe = snap.pipes[0];
        assert_eq!(pipe.top_body, Rect::new(200.0, 0.0, 50.0, 300.0));
        assert_eq!(pipe.bottom_body, Rect::new(200.0, 500.0, 50.0, 140.0));
        assert_eq!(pipe.top_cap, Rect::new(195.0, 285.0, 60.0, 15.0));
        assert_eq!(pipe.bottom_cap.y, 500.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(3, Tuning::default());
        let json = serde_json::to_string(&RenderSnapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Initial\""));
    }
}
