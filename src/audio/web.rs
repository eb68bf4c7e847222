//! Audio backend using the Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::{AudioEvent, CueSink, Mailbox, SoundCue};

/// Audio backend for the browser
pub struct WebAudio {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    announced_ready: bool,
    mailbox: Mailbox,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            announced_ready: false,
            mailbox: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Post `StartFinished` once `osc` stops
    fn notify_when_ended(&self, osc: &OscillatorNode) {
        let mailbox = Rc::clone(&self.mailbox);
        let closure = Closure::once(move || {
            mailbox.borrow_mut().push(AudioEvent::StartFinished);
        });
        osc.set_onended(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Start - rising four-note jingle. Returns the last note's oscillator.
    fn play_start(&self, ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let mut last = None;
        for (i, freq) in [400.0, 500.0, 600.0, 800.0].iter().enumerate() {
            let delay = i as f64 * 0.12;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.5).ok();
                last = Some(osc);
            }
        }
        last
    }

    /// Jump - quick whoosh up
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 200.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Score - two-note ding
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [520.0, 680.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Level up - celebratory
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
            let delay = i as f64 * 0.08;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}

impl CueSink for WebAudio {
    fn play(&mut self, cue: SoundCue) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }

        let Some(ctx) = &self.ctx else { return false };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Start => match self.play_start(ctx, vol) {
                Some(last) => {
                    self.notify_when_ended(&last);
                    return true;
                }
                None => return false,
            },
            SoundCue::Jump => self.play_jump(ctx, vol),
            SoundCue::Score => self.play_score(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
            SoundCue::LevelUp => self.play_level_up(ctx, vol),
        }
        true
    }

    fn poll_events(&mut self) -> Vec<AudioEvent> {
        let mut events = std::mem::take(&mut *self.mailbox.borrow_mut());
        if !self.announced_ready {
            let running = self
                .ctx
                .as_ref()
                .is_some_and(|ctx| ctx.state() == AudioContextState::Running);
            if running {
                self.announced_ready = true;
                events.insert(0, AudioEvent::Ready);
            }
        }
        events
    }
}
