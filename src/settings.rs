//! Game settings and preferences
//!
//! Read once at startup; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::platform::Pacing;
use crate::tuning::{Profile, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Pause when the window loses focus
    pub pause_on_blur: bool,

    // === Gameplay ===
    /// How display frames map to simulation ticks
    pub pacing: Pacing,
    /// Let the autopilot play
    pub demo_mode: bool,
    /// Force a balance profile instead of detecting it
    pub profile: Option<Profile>,
    /// Run seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Partial `Tuning` fields applied over the profile's balance
    pub tuning: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            pause_on_blur: true,
            pacing: Pacing::PerFrame,
            demo_mode: false,
            profile: None,
            seed: None,
            tuning: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = clamp_volume(settings.master_volume);
        settings.sfx_volume = clamp_volume(settings.sfx_volume);
        Ok(settings)
    }

    /// Profile override, or the detected one
    pub fn effective_profile(&self, detected: Profile) -> Profile {
        self.profile.unwrap_or(detected)
    }

    /// Balance for the effective profile with any overrides applied.
    /// Invalid overrides are logged and ignored.
    pub fn tuning(&self, detected: Profile) -> Tuning {
        let base = Tuning::for_profile(self.effective_profile(detected));
        let Some(overrides) = &self.tuning else {
            return base;
        };
        match base.with_overrides(overrides) {
            Ok(tuning) => {
                log::info!("Applied {} tuning override(s)", overrides.len());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning overrides ({}), using profile defaults", e);
                base
            }
        }
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 1.0 }
}
