//! Sound cues
//!
//! The simulation never talks to an audio backend directly. Game events are
//! mapped to cues, and the `CueRouter` decides what actually reaches the
//! backend:
//! - cues requested before the backend is ready are dropped
//! - a jump requested while the start jingle plays waits for it to finish
//!   (one slot, the latest jump wins)
//!
//! Backend completions arrive as `AudioEvent`s that the driver feeds in at
//! the start of the next frame.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use std::cell::RefCell;
use std::rc::Rc;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Run started
    Start,
    /// Accepted jump
    Jump,
    /// Pipe passed
    Score,
    /// Run ended
    GameOver,
    /// New level reached
    LevelUp,
}

impl SoundCue {
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundCue::Start),
            GameEvent::Jumped => Some(SoundCue::Jump),
            GameEvent::Scored { .. } => Some(SoundCue::Score),
            GameEvent::LevelUp { .. } => Some(SoundCue::LevelUp),
            GameEvent::GameOver { .. } => Some(SoundCue::GameOver),
            GameEvent::Paused | GameEvent::Resumed => None,
        }
    }
}

/// Completion notices from an audio backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Backend can play sounds now
    Ready,
    /// The start jingle finished
    StartFinished,
}

/// Shared queue a backend posts `AudioEvent`s into
pub type Mailbox = Rc<RefCell<Vec<AudioEvent>>>;

/// Something that can play a cue
pub trait CueSink {
    /// Fire and forget. Returns false if the cue could not be started.
    fn play(&mut self, cue: SoundCue) -> bool;

    /// Events the backend produced since the last call
    fn poll_events(&mut self) -> Vec<AudioEvent> {
        Vec::new()
    }
}

/// Sink for hosts without audio: logs cues and is ready immediately
#[derive(Debug, Default)]
pub struct LogSink {
    announced: bool,
}

impl CueSink for LogSink {
    fn play(&mut self, cue: SoundCue) -> bool {
        log::debug!("cue: {:?}", cue);
        // Nothing keeps playing, so the start jingle ends at once
        false
    }

    fn poll_events(&mut self) -> Vec<AudioEvent> {
        if self.announced {
            return Vec::new();
        }
        self.announced = true;
        vec![AudioEvent::Ready]
    }
}

/// Applies readiness and the start/jump ordering rule in front of a sink
#[derive(Debug)]
pub struct CueRouter<S: CueSink> {
    sink: S,
    ready: bool,
    start_playing: bool,
    jump_queued: bool,
}

impl<S: CueSink> CueRouter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            ready: false,
            start_playing: false,
            jump_queued: false,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_start_playing(&self) -> bool {
        self.start_playing
    }

    /// Drain backend completions; call once at the start of each frame
    pub fn pump(&mut self) {
        for event in self.sink.poll_events() {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::Ready => {
                if !self.ready {
                    log::info!("Audio ready");
                }
                self.ready = true;
            }
            AudioEvent::StartFinished => {
                self.start_playing = false;
                if std::mem::take(&mut self.jump_queued) {
                    self.sink.play(SoundCue::Jump);
                }
            }
        }
    }

    /// Request a cue
    pub fn request(&mut self, cue: SoundCue) {
        if !self.ready {
            log::trace!("Audio not ready, dropping {:?}", cue);
            return;
        }
        match cue {
            SoundCue::Jump if self.start_playing => {
                self.jump_queued = true;
            }
            SoundCue::Start => {
                self.jump_queued = false;
                self.start_playing = self.sink.play(SoundCue::Start);
            }
            other => {
                self.sink.play(other);
            }
        }
    }

    /// Request the cues for a tick's events, in order
    pub fn request_for_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.request(cue);
        }
    }
}
