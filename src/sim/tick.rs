//! Per-frame simulation tick and the game phase state machine
//!
//! One call to `tick` runs to completion: buffered actions first, then (only
//! while running) physics, spawning, pipe movement, collisions and scoring.

use serde::{Deserialize, Serialize};

use super::physics::{self, Bounds, JumpVerdict};
use super::pipes;
use super::state::{EndCause, GameEvent, GamePhase, GameState, Surface};

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Jump,
    TogglePause,
    /// Pause if running; never resumes
    Pause,
    /// Start from the title screen or restart after a game over
    Start,
}

/// An action stamped with the host time it happened (ms)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    pub action: Action,
    pub at_ms: f64,
}

impl TimedAction {
    pub fn new(action: Action, at_ms: f64) -> Self {
        Self { action, at_ms }
    }
}

/// Everything a tick consumes from the outside world
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Actions since the previous tick, in arrival order
    pub actions: Vec<TimedAction>,
    /// Surface size sampled for this tick
    pub surface: Surface,
}

impl TickInput {
    pub fn new(surface: Surface) -> Self {
        Self {
            actions: Vec::new(),
            surface,
        }
    }

    pub fn with_action(mut self, action: Action, at_ms: f64) -> Self {
        self.actions.push(TimedAction::new(action, at_ms));
        self
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let surface = input.surface;
    if !surface.is_usable() {
        log::debug!("Skipping tick: unusable surface {:?}", surface);
        return;
    }
    state.surface = surface;
    state.bird.fit_to_surface(surface);
    if state.phase == GamePhase::Initial {
        // Idle pose until the first start
        state.bird.reset(surface);
    }

    for action in &input.actions {
        handle_action(state, *action, surface);
    }

    if state.phase != GamePhase::Running {
        return;
    }

    physics::integrate(&mut state.bird);
    match physics::clamp_to_surface(&mut state.bird, surface) {
        Bounds::Ground => {
            // Pipes finish this tick's move, as they do on a collision
            pipes::maybe_spawn(state, surface);
            pipes::drift(state);
            end_run(state, EndCause::Ground);
        }
        Bounds::Inside | Bounds::Ceiling => {
            pipes::maybe_spawn(state, surface);
            let outcome = pipes::advance(state, surface);
            if outcome.collided {
                end_run(state, EndCause::PipeCollision);
            }
        }
    }

    state.frame_count += 1;
}

fn handle_action(state: &mut GameState, action: TimedAction, surface: Surface) {
    match (action.action, state.phase) {
        (Action::Start, GamePhase::Initial | GamePhase::Ended) => start_run(state, surface),
        (Action::TogglePause | Action::Pause, GamePhase::Running) => {
            state.phase = GamePhase::Paused;
            state.emit(GameEvent::Paused);
        }
        (Action::TogglePause, GamePhase::Paused) => {
            state.phase = GamePhase::Running;
            // A tap that resumed the game must not also count as a jump
            state.jump_gate.anchor(action.at_ms);
            state.emit(GameEvent::Resumed);
        }
        (Action::Jump, GamePhase::Running) => try_jump(state, action.at_ms),
        (action, phase) => {
            log::trace!("Ignoring {:?} while {:?}", action, phase);
        }
    }
}

fn try_jump(state: &mut GameState, at_ms: f64) {
    match state.jump_gate.try_accept(at_ms) {
        JumpVerdict::Accepted { since_last_ms } => {
            let strength = physics::lift_strength(since_last_ms, state.tuning.strong_lift);
            physics::apply_impulse(&mut state.bird, strength);
            state.emit(GameEvent::Jumped);
        }
        JumpVerdict::Debounced => {}
    }
}

fn start_run(state: &mut GameState, surface: Surface) {
    state.reset_run(surface);
    state.phase = GamePhase::Running;
    state.emit(GameEvent::Started);
    log::info!("Run started (seed {})", state.seed);
}

fn end_run(state: &mut GameState, cause: EndCause) {
    state.phase = GamePhase::Ended;
    let score = state.score;
    state.emit(GameEvent::GameOver { score, cause });
    log::info!("Game over ({:?}) with score {}", cause, score);
}
