//! Game state and core simulation types
//!
//! Everything a run needs lives in one owned `GameState`; there are no
//! globals and no independent phase flags.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::physics::JumpGate;
use crate::consts::*;
use crate::tuning::Tuning;

/// Pixel dimensions of the render surface for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A misbehaving host can report zero, negative or NaN sizes
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start; bird shown in its idle pose
    #[default]
    Initial,
    /// Full simulation active
    Running,
    /// Frozen, still rendered
    Paused,
    /// Run over, waiting for a restart
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    PipeCollision,
    Ground,
}

/// Events emitted during a tick, consumed by audio and UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Scored { score: u32 },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    GameOver { score: u32, cause: EndCause },
}

/// The player-controlled bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner in surface pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels per tick, positive is down)
    pub velocity: f32,
    pub gravity: f32,
    pub lift: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::new(BIRD_MIN_WIDTH, BIRD_MIN_HEIGHT),
            velocity: 0.0,
            gravity: tuning.gravity,
            lift: tuning.lift,
        }
    }

    /// Size and x-anchor follow the surface width; y is left alone
    pub fn fit_to_surface(&mut self, surface: Surface) {
        self.size = Vec2::new(
            (surface.width * BIRD_WIDTH_RATIO).max(BIRD_MIN_WIDTH),
            (surface.width * BIRD_HEIGHT_RATIO).max(BIRD_MIN_HEIGHT),
        );
        self.pos.x = surface.width * BIRD_X_RATIO;
    }

    /// Vertically centred, left-anchored, at rest
    pub fn reset(&mut self, surface: Surface) {
        self.fit_to_surface(surface);
        self.pos.y = surface.height / 2.0 - self.size.y / 2.0;
        self.velocity = 0.0;
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A gated obstacle: solid at the top and bottom, passable in between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge of the pipe body
    pub x: f32,
    /// Height of the solid region hanging from the top
    pub top: f32,
    /// Height of the solid region rising from the bottom
    pub bottom: f32,
    pub scored: bool,
}

impl Pipe {
    pub fn center_x(&self) -> f32 {
        self.x + PIPE_WIDTH / 2.0
    }

    /// Horizontal solid span including the caps
    pub fn capped_span(&self) -> (f32, f32) {
        (
            self.x - PIPE_CAP_OVERHANG,
            self.x + PIPE_WIDTH + PIPE_CAP_OVERHANG,
        )
    }

    /// y coordinate where the bottom solid begins
    pub fn bottom_y(&self, surface_height: f32) -> f32 {
        surface_height - self.bottom
    }

    pub fn gap(&self, surface_height: f32) -> f32 {
        surface_height - self.top - self.bottom
    }
}

/// Obstacle parameters that harden with each level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pipe speed (pixels per tick)
    pub speed: f32,
    /// Ticks between spawns
    pub spawn_interval: u32,
    pub gap: f32,
}

impl Difficulty {
    pub fn base(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.base_speed,
            spawn_interval: tuning.base_spawn_interval.max(1),
            gap: tuning.base_gap,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Running-tick counter, reset on every start
    pub frame_count: u64,
    pub bird: Bird,
    /// Live pipes in spawn order (left to right)
    pub pipes: Vec<Pipe>,
    pub difficulty: Difficulty,
    pub tuning: Tuning,
    pub jump_gate: JumpGate,
    /// Surface seen by the latest tick
    pub surface: Surface,
    /// Events from the latest tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed. `tuning` is sanitized first.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Initial,
            score: 0,
            frame_count: 0,
            bird: Bird::new(&tuning),
            pipes: Vec::new(),
            difficulty: Difficulty::base(&tuning),
            jump_gate: JumpGate::new(tuning.min_jump_interval_ms),
            tuning,
            surface: Surface::default(),
            events: Vec::new(),
        }
    }

    /// Reset everything a fresh run needs. Phase is left to the caller.
    pub fn reset_run(&mut self, surface: Surface) {
        self.score = 0;
        self.frame_count = 0;
        self.pipes.clear();
        self.difficulty = Difficulty::base(&self.tuning);
        self.bird.gravity = self.tuning.gravity;
        self.bird.lift = self.tuning.lift;
        self.bird.reset(surface);
        self.jump_gate.clear();
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_usable() {
        assert!(Surface::new(480.0, 640.0).is_usable());
        assert!(!Surface::new(0.0, 640.0).is_usable());
        assert!(!Surface::new(480.0, -1.0).is_usable());
        assert!(!Surface::new(f32::NAN, 640.0).is_usable());
    }

    #[test]
    fn test_bird_size_follows_width() {
        let mut bird = Bird::new(&Tuning::default());
        bird.fit_to_surface(Surface::new(600.0, 800.0));
        assert_eq!(bird.size, Vec2::new(60.0, 42.0));
        assert_eq!(bird.pos.x, 120.0);

        // Narrow surfaces fall back to the minimum size
        bird.fit_to_surface(Surface::new(100.0, 800.0));
        assert_eq!(bird.size, Vec2::new(BIRD_MIN_WIDTH, BIRD_MIN_HEIGHT));
    }

    #[test]
    fn test_reset_run_restores_base() {
        let surface = Surface::new(480.0, 640.0);
        let mut state = GameState::new(7, Tuning::default());
        state.score = 23;
        state.frame_count = 900;
        state.difficulty.speed = 9.0;
        state.pipes.push(Pipe { x: 10.0, top: 100.0, bottom: 100.0, scored: true });
        state.bird.velocity = 4.0;

        state.reset_run(surface);

        assert_eq!(state.score, 0);
        assert_eq!(state.frame_count, 0);
        assert!(state.pipes.is_empty());
        assert_eq!(state.difficulty, Difficulty::base(&state.tuning));
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.bird.pos.y, surface.height / 2.0 - state.bird.size.y / 2.0);
    }
}
