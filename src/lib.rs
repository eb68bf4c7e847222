//! Flappy - an endless side-scrolling gate runner
//!
//! Core modules:
//! - `sim`: Simulation (physics, pipes, collisions, scoring, game phases)
//! - `game`: Frame driver that owns the simulation and feeds it input
//! - `platform`: Host-neutral frame pacing and input buffering
//! - `audio`: Sound cue routing and the Web Audio synthesizer
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `tuning`: Data-driven game balance (desktop / mobile profiles)

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::{Profile, Tuning};

/// Game configuration constants (desktop profile unless noted)
pub mod consts {
    /// Downward acceleration applied to the bird every tick
    pub const GRAVITY: f32 = 0.3;
    pub const GRAVITY_MOBILE: f32 = 0.25;
    /// Velocity set on an accepted jump (negative is up)
    pub const LIFT: f32 = -6.0;
    pub const LIFT_MOBILE: f32 = -5.0;

    /// Minimum time between accepted jumps (ms)
    pub const MIN_JUMP_INTERVAL_MS: f64 = 200.0;
    pub const MIN_JUMP_INTERVAL_MS_MOBILE: f64 = 300.0;
    /// Re-taps inside this window get the strong lift when enabled (ms)
    pub const STRONG_LIFT_WINDOW_MS: f64 = 350.0;
    pub const STRONG_LIFT_FACTOR: f32 = 1.2;

    /// Hitbox inset ratio per axis
    pub const HITBOX_TOLERANCE: f32 = 0.10;
    pub const HITBOX_TOLERANCE_MOBILE: f32 = 0.12;

    /// Bird size relative to surface width, with absolute minimums
    pub const BIRD_WIDTH_RATIO: f32 = 0.1;
    pub const BIRD_HEIGHT_RATIO: f32 = 0.07;
    pub const BIRD_MIN_WIDTH: f32 = 30.0;
    pub const BIRD_MIN_HEIGHT: f32 = 20.0;
    /// Bird x-anchor as a fraction of surface width
    pub const BIRD_X_RATIO: f32 = 0.2;

    /// Pipe body width in pixels
    pub const PIPE_WIDTH: f32 = 50.0;
    /// Cap overhang on each side of the body
    pub const PIPE_CAP_OVERHANG: f32 = 5.0;
    /// Cap height (render only)
    pub const PIPE_CAP_HEIGHT: f32 = 15.0;
    /// Pipes are retired once x < -PIPE_EDGE_WIDTH
    pub const PIPE_EDGE_WIDTH: f32 = PIPE_WIDTH + 2.0 * PIPE_CAP_OVERHANG;

    /// Smallest solid extent at the top or bottom of a pipe
    pub const MIN_SOLID: f32 = 50.0;
    /// Spawn margin as a fraction of surface height
    pub const SPAWN_MARGIN_RATIO: f32 = 0.1;

    /// Level 1 pipe speed (pixels per tick)
    pub const BASE_PIPE_SPEED: f32 = 1.5;
    /// Level 1 ticks between spawns
    pub const BASE_SPAWN_INTERVAL: u32 = 150;
    pub const BASE_SPAWN_INTERVAL_MOBILE: u32 = 180;
    /// Level 1 gap size
    pub const BASE_GAP: f32 = 200.0;
    pub const BASE_GAP_MOBILE: f32 = 220.0;

    /// Points per level
    pub const LEVEL_THRESHOLD: u32 = 10;
    /// Speed multiplier per level-up; interval and gap shrink by half the step
    pub const DIFFICULTY_STEP: f32 = 0.15;
    pub const DIFFICULTY_STEP_MOBILE: f32 = 0.10;
    /// Spawn interval never drops below this (ticks)
    pub const SPAWN_INTERVAL_FLOOR: u32 = 60;
    /// Gap never shrinks below this through difficulty
    pub const GAP_FLOOR: f32 = 120.0;
    /// Absolute smallest gap for degenerate surfaces
    pub const MIN_GAP_FLOOR: f32 = 40.0;

    /// Maximum ticks per frame in fixed pacing
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Elapsed time per frame is clamped to this (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;
}
