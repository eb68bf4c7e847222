//! Simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One tick per call, no wall-clock reads (times arrive with input)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod demo;
pub mod difficulty;
pub mod physics;
pub mod pipes;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, pipe_hit};
pub use difficulty::{PipeTheme, level, level_progress};
pub use physics::JumpGate;
pub use snapshot::{PipeView, Rect, RenderSnapshot};
pub use state::{Bird, Difficulty, EndCause, GameEvent, GamePhase, GameState, Pipe, Surface};
pub use tick::{Action, TickInput, TimedAction, tick};
