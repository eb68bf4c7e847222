//! Frame driver
//!
//! `Game` owns the simulation plus everything that feeds it: the frame
//! clock, buffered input, and the sound cue router. The host calls
//! `frame` once per display refresh and draws `snapshot()` afterwards.

use crate::audio::{CueRouter, CueSink};
use crate::platform::{FrameClock, InputQueue};
use crate::settings::Settings;
use crate::sim::{Action, GameEvent, GamePhase, GameState, RenderSnapshot, Surface, TickInput, demo, tick};
use crate::tuning::Tuning;

#[derive(Debug)]
pub struct Game<S: CueSink> {
    state: GameState,
    clock: FrameClock,
    input: InputQueue,
    audio: CueRouter<S>,
    running: bool,
    demo_mode: bool,
    /// Events from every tick of the latest frame
    frame_events: Vec<GameEvent>,
}

impl<S: CueSink> Game<S> {
    pub fn new(seed: u64, tuning: Tuning, settings: &Settings, sink: S) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            clock: FrameClock::new(settings.pacing),
            input: InputQueue::new(),
            audio: CueRouter::new(sink),
            running: false,
            demo_mode: settings.demo_mode,
            frame_events: Vec::new(),
        }
    }

    /// Begin accepting frames
    pub fn start(&mut self) {
        if !self.running {
            log::info!("Driver started ({:?})", self.clock.pacing());
        }
        self.running = true;
        self.clock.reset();
    }

    /// Stop accepting frames; the host should stop scheduling them
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Driver stopped");
        }
        self.running = false;
        self.input.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Buffer a player action until the next frame
    pub fn push_action(&mut self, action: Action, at_ms: f64) {
        self.input.push(action, at_ms);
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    pub fn set_demo_mode(&mut self, enabled: bool) {
        self.demo_mode = enabled;
        log::info!("Demo mode: {}", enabled);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Events produced during the latest frame, in order
    pub fn frame_events(&self) -> &[GameEvent] {
        &self.frame_events
    }

    pub fn audio(&self) -> &CueRouter<S> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut CueRouter<S> {
        &mut self.audio
    }

    /// Run one display frame. Returns whether another frame should be scheduled.
    pub fn frame(&mut self, now_ms: f64, surface: Surface) -> bool {
        if !self.running {
            return false;
        }
        self.frame_events.clear();
        self.audio.pump();

        // Input waits for a surface we can lay out on
        if !surface.is_usable() {
            log::debug!("Skipping frame: unusable surface {:?}", surface);
            return true;
        }

        if self.demo_mode {
            self.drive_demo(now_ms);
        }

        let ticks = self.clock.ticks_for_frame(now_ms);
        for i in 0..ticks {
            let mut input = TickInput::new(surface);
            if i == 0 {
                input.actions = self.input.drain();
            }
            tick(&mut self.state, &input);
            self.audio.request_for_events(&self.state.events);
            self.frame_events.extend_from_slice(&self.state.events);
        }
        true
    }

    fn drive_demo(&mut self, now_ms: f64) {
        if demo::wants_restart(&self.state) {
            self.input.push(Action::Start, now_ms);
        } else if demo::wants_jump(&self.state) {
            self.input.push(Action::Jump, now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioEvent, SoundCue};
    use crate::platform::Pacing;

    const SURFACE: Surface = Surface::new(480.0, 640.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug, Default)]
    struct Recorder {
        played: Vec<SoundCue>,
        announced: bool,
    }

    impl CueSink for Recorder {
        fn play(&mut self, cue: SoundCue) -> bool {
            self.played.push(cue);
            false
        }

        fn poll_events(&mut self) -> Vec<AudioEvent> {
            if std::mem::replace(&mut self.announced, true) {
                Vec::new()
            } else {
                vec![AudioEvent::Ready]
            }
        }
    }

    fn game_with(settings: Settings) -> Game<Recorder> {
        let mut game = Game::new(42, Tuning::default(), &settings, Recorder::default());
        game.start();
        game
    }

    fn game() -> Game<Recorder> {
        game_with(Settings::default())
    }

    #[test]
    fn test_stopped_driver_does_nothing() {
        let mut game = Game::new(42, Tuning::default(), &Settings::default(), Recorder::default());
        game.push_action(Action::Start, 0.0);
        assert!(!game.frame(0.0, SURFACE));
        assert_eq!(game.phase(), GamePhase::Initial);
    }

    #[test]
    fn test_start_plays_cue() {
        let mut game = game();
        game.push_action(Action::Start, 0.0);
        assert!(game.frame(0.0, SURFACE));
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.frame_events().contains(&GameEvent::Started));
        assert_eq!(game.audio().sink().played, vec![SoundCue::Start]);
    }

    #[test]
    fn test_unusable_surface_keeps_input() {
        let mut game = game();
        game.push_action(Action::Start, 0.0);
        assert!(game.frame(0.0, Surface::new(0.0, 0.0)));
        assert_eq!(game.phase(), GamePhase::Initial);
        assert_eq!(game.pending_input(), 1);

        game.frame(FRAME_MS, SURFACE);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.pending_input(), 0);
    }

    #[test]
    fn test_fixed_pacing_holds_input_until_a_tick() {
        let mut game = game_with(Settings {
            pacing: Pacing::Fixed { step_ms: 16.0 },
            ..Default::default()
        });
        game.frame(0.0, SURFACE);
        assert_eq!(game.state().frame_count, 0);

        game.push_action(Action::Start, 4.0);
        game.frame(8.0, SURFACE);
        assert_eq!(game.phase(), GamePhase::Initial);
        assert_eq!(game.pending_input(), 1);

        game.frame(16.0, SURFACE);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_paused_and_ended_keep_scheduling() {
        let mut game = game();
        game.push_action(Action::Start, 0.0);
        game.frame(0.0, SURFACE);
        game.push_action(Action::TogglePause, 10.0);
        assert!(game.frame(FRAME_MS, SURFACE));
        assert_eq!(game.phase(), GamePhase::Paused);

        game.push_action(Action::TogglePause, 20.0);
        game.frame(2.0 * FRAME_MS, SURFACE);
        let mut now = 3.0 * FRAME_MS;
        while game.phase() == GamePhase::Running {
            game.frame(now, SURFACE);
            now += FRAME_MS;
        }
        assert_eq!(game.phase(), GamePhase::Ended);
        assert!(game.frame(now, SURFACE));
        assert!(game.audio().sink().played.contains(&SoundCue::GameOver));
    }

    #[test]
    fn test_stop_ends_scheduling() {
        let mut game = game();
        game.push_action(Action::Start, 0.0);
        game.stop();
        assert_eq!(game.pending_input(), 0);
        assert!(!game.frame(0.0, SURFACE));
    }

    #[test]
    fn test_demo_mode_starts_and_scores() {
        let mut game = game_with(Settings {
            demo_mode: true,
            ..Default::default()
        });
        let mut now = 0.0;
        for _ in 0..3000 {
            game.frame(now, SURFACE);
            now += FRAME_MS;
        }
        assert_ne!(game.phase(), GamePhase::Initial);
        assert!(game.audio().sink().played.contains(&SoundCue::Score));
    }
}
