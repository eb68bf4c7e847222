//! Data-driven game balance
//!
//! Touch devices get a gentler profile: weaker gravity, a longer jump
//! debounce, wider gaps and a more forgiving hitbox.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Input/device profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Profile {
    #[default]
    Desktop,
    Mobile,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Desktop => "Desktop",
            Profile::Mobile => "Mobile",
        }
    }

    /// Guess the profile from a browser user agent string
    pub fn from_user_agent(ua: &str) -> Self {
        const MOBILE_MARKERS: [&str; 8] = [
            "Android",
            "webOS",
            "iPhone",
            "iPad",
            "iPod",
            "BlackBerry",
            "IEMobile",
            "Opera Mini",
        ];
        let ua = ua.to_lowercase();
        if MOBILE_MARKERS
            .iter()
            .any(|m| ua.contains(&m.to_lowercase()))
        {
            Profile::Mobile
        } else {
            Profile::Desktop
        }
    }
}

/// Balance knobs for one run. Missing JSON fields fall back to desktop values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub lift: f32,
    pub min_jump_interval_ms: f64,
    /// Faster re-taps jump higher
    pub strong_lift: bool,
    pub hitbox_tolerance: f32,
    pub base_speed: f32,
    pub base_spawn_interval: u32,
    pub base_gap: f32,
    /// Speed grows by `1 + step` per level, interval and gap shrink by `1 - step / 2`
    pub difficulty_step: f32,
    pub spawn_interval_floor: u32,
    pub gap_floor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            lift: LIFT,
            min_jump_interval_ms: MIN_JUMP_INTERVAL_MS,
            strong_lift: false,
            hitbox_tolerance: HITBOX_TOLERANCE,
            base_speed: BASE_PIPE_SPEED,
            base_spawn_interval: BASE_SPAWN_INTERVAL,
            base_gap: BASE_GAP,
            difficulty_step: DIFFICULTY_STEP,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            gap_floor: GAP_FLOOR,
        }
    }
}

impl Tuning {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Desktop => Self::default(),
            Profile::Mobile => Self {
                gravity: GRAVITY_MOBILE,
                lift: LIFT_MOBILE,
                min_jump_interval_ms: MIN_JUMP_INTERVAL_MS_MOBILE,
                hitbox_tolerance: HITBOX_TOLERANCE_MOBILE,
                base_spawn_interval: BASE_SPAWN_INTERVAL_MOBILE,
                base_gap: BASE_GAP_MOBILE,
                difficulty_step: DIFFICULTY_STEP_MOBILE,
                ..Self::default()
            },
        }
    }

    /// Parse overrides from JSON, then clamp them into a playable range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Apply a partial override object on top of these values
    pub fn with_overrides(
        &self,
        overrides: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut value {
            for (key, v) in overrides {
                fields.insert(key.clone(), v.clone());
            }
        }
        let tuning: Self = serde_json::from_value(value)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            log::warn!("Invalid gravity {}, using default", self.gravity);
            self.gravity = GRAVITY;
        }
        if !self.lift.is_finite() || self.lift >= 0.0 {
            log::warn!("Invalid lift {}, using default", self.lift);
            self.lift = LIFT;
        }
        self.min_jump_interval_ms = self.min_jump_interval_ms.max(0.0);
        self.hitbox_tolerance = self.hitbox_tolerance.clamp(0.0, 0.45);
        if !self.base_speed.is_finite() || self.base_speed <= 0.0 {
            self.base_speed = BASE_PIPE_SPEED;
        }
        self.spawn_interval_floor = self.spawn_interval_floor.max(1);
        self.base_spawn_interval = self.base_spawn_interval.max(self.spawn_interval_floor);
        self.gap_floor = self.gap_floor.max(MIN_GAP_FLOOR);
        self.base_gap = self.base_gap.max(self.gap_floor);
        self.difficulty_step = self.difficulty_step.clamp(0.01, 0.5);
        self
    }

    /// Speed multiplier applied on level-up
    pub fn speed_growth(&self) -> f32 {
        1.0 + self.difficulty_step
    }

    /// Interval/gap multiplier applied on level-up
    pub fn shrink_factor(&self) -> f32 {
        1.0 - self.difficulty_step / 2.0
    }
}
