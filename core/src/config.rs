//! Tunable parameters for charge-release sessions.
//!
//! Every field carries a default, so configuration files only need to name the
//! values they override. Values are checked by [`MinigameConfig::validate`]
//! when a session starts rather than when they are parsed, which lets adapters
//! assemble a configuration piecemeal.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ResolutionStep;

const DEFAULT_CHARGE_DURATION_SECS: f32 = 3.0;
const DEFAULT_CHARGE_PER_CLICK: f32 = 0.04;
const DEFAULT_MAX_CHARGE: f32 = 1.0;
const DEFAULT_VICTORY_THRESHOLD: f32 = 0.85;

/// Complete configuration surface of a charge-release session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinigameConfig {
    /// Length of the charging window in seconds.
    pub charge_duration_secs: f32,
    /// Charge gained per click while no difficulty adjustment is active.
    pub base_charge_per_click: f32,
    /// Upper bound of the charge value.
    pub max_charge: f32,
    /// Charge lost per second while charging. Zero disables decay.
    pub charge_decay_per_sec: f32,
    /// Minimum normalized charge that wins the round.
    pub victory_threshold: f32,
    /// Normalized charge that upgrades a win to the perfect tier, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfect_threshold: Option<f32>,
    /// Assistance granted after failed rounds.
    pub difficulty: DifficultyRamp,
    /// Durations of the resolution sequence.
    pub resolution: ResolutionTiming,
}

impl Default for MinigameConfig {
    fn default() -> Self {
        Self {
            charge_duration_secs: DEFAULT_CHARGE_DURATION_SECS,
            base_charge_per_click: DEFAULT_CHARGE_PER_CLICK,
            max_charge: DEFAULT_MAX_CHARGE,
            charge_decay_per_sec: 0.0,
            victory_threshold: DEFAULT_VICTORY_THRESHOLD,
            perfect_threshold: None,
            difficulty: DifficultyRamp::default(),
            resolution: ResolutionTiming::default(),
        }
    }
}

impl MinigameConfig {
    /// Length of the charging window.
    ///
    /// Returns [`Duration::ZERO`] for values that cannot be represented, which
    /// [`MinigameConfig::validate`] rejects.
    #[must_use]
    pub fn charge_duration(&self) -> Duration {
        seconds(self.charge_duration_secs)
    }

    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.charge_duration_secs) {
            return Err(ConfigError::NonPositiveChargeDuration {
                secs: self.charge_duration_secs,
            });
        }
        if !is_representable(self.charge_duration_secs) || self.charge_duration().is_zero() {
            return Err(ConfigError::DurationOutOfRange {
                field: "charge_duration_secs",
                secs: self.charge_duration_secs,
            });
        }
        if !is_positive(self.max_charge) {
            return Err(ConfigError::NonPositiveMaxCharge {
                max_charge: self.max_charge,
            });
        }
        if !is_positive(self.base_charge_per_click) {
            return Err(ConfigError::NonPositiveChargePerClick {
                charge_per_click: self.base_charge_per_click,
            });
        }
        if !is_non_negative(self.charge_decay_per_sec) {
            return Err(ConfigError::NegativeDecay {
                decay_per_sec: self.charge_decay_per_sec,
            });
        }
        if !is_unit_fraction(self.victory_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                threshold: "victory_threshold",
                value: self.victory_threshold,
            });
        }
        if let Some(perfect) = self.perfect_threshold {
            if !is_unit_fraction(perfect) {
                return Err(ConfigError::ThresholdOutOfRange {
                    threshold: "perfect_threshold",
                    value: perfect,
                });
            }
            if perfect < self.victory_threshold {
                return Err(ConfigError::PerfectBelowVictory {
                    perfect,
                    victory: self.victory_threshold,
                });
            }
        }

        self.difficulty.validate(self.base_charge_per_click)?;
        self.resolution.validate()
    }
}

/// Constants of the adaptive difficulty ramp.
///
/// The ramp only ever makes the game easier: the first failure scales the base
/// gain, the second jumps to a fixed gain, later failures add a fixed
/// increment. The result never exceeds `base * cap_multiplier`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DifficultyRamp {
    /// Multiplier applied to the base gain after the first failure.
    pub first_fail_multiplier: f32,
    /// Gain used after the second failure, independent of the prior value.
    pub charge_after_two_fails: f32,
    /// Gain added for every failure beyond the second.
    pub extra_charge_per_fail: f32,
    /// Cap on the gain, expressed as a multiple of the base gain.
    pub cap_multiplier: f32,
}

impl Default for DifficultyRamp {
    fn default() -> Self {
        Self {
            first_fail_multiplier: 1.2,
            charge_after_two_fails: 0.05,
            extra_charge_per_fail: 0.015,
            cap_multiplier: 3.0,
        }
    }
}

impl DifficultyRamp {
    fn validate(&self, base_charge_per_click: f32) -> Result<(), ConfigError> {
        if !self.first_fail_multiplier.is_finite() || self.first_fail_multiplier < 1.0 {
            return Err(ConfigError::InvalidRamp {
                field: "first_fail_multiplier",
                value: self.first_fail_multiplier,
            });
        }
        if !is_positive(self.charge_after_two_fails) {
            return Err(ConfigError::InvalidRamp {
                field: "charge_after_two_fails",
                value: self.charge_after_two_fails,
            });
        }
        if !is_non_negative(self.extra_charge_per_fail) {
            return Err(ConfigError::InvalidRamp {
                field: "extra_charge_per_fail",
                value: self.extra_charge_per_fail,
            });
        }
        if !self.cap_multiplier.is_finite() || self.cap_multiplier < 1.0 {
            return Err(ConfigError::InvalidRamp {
                field: "cap_multiplier",
                value: self.cap_multiplier,
            });
        }
        // The second failure may not grant less than the first one did.
        let after_one_fail = base_charge_per_click
            * self.first_fail_multiplier.min(self.cap_multiplier);
        if self.charge_after_two_fails < after_one_fail {
            return Err(ConfigError::InvalidRamp {
                field: "charge_after_two_fails",
                value: self.charge_after_two_fails,
            });
        }
        Ok(())
    }
}

/// Seconds spent in each step of the resolution sequence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolutionTiming {
    /// Hammer pulls back.
    pub wind_up_secs: f32,
    /// Hammer grows before the swing.
    pub grow_secs: f32,
    /// Hammer travels to the striking plate.
    pub swing_secs: f32,
    /// Impact shake.
    pub impact_secs: f32,
    /// Weight climbs the tower toward the normalized charge.
    pub weight_rise_secs: f32,
    /// Hammer returns to its resting pose.
    pub recover_secs: f32,
    /// Pause before the verdict is announced.
    pub settle_secs: f32,
}

impl Default for ResolutionTiming {
    fn default() -> Self {
        Self {
            wind_up_secs: 0.1,
            grow_secs: 0.1,
            swing_secs: 0.067,
            impact_secs: 0.15,
            weight_rise_secs: 1.0,
            recover_secs: 0.2,
            settle_secs: 0.5,
        }
    }
}

impl ResolutionTiming {
    /// Timing that resolves rounds without any visible sequence.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            wind_up_secs: 0.0,
            grow_secs: 0.0,
            swing_secs: 0.0,
            impact_secs: 0.0,
            weight_rise_secs: 0.0,
            recover_secs: 0.0,
            settle_secs: 0.0,
        }
    }

    /// Configured length of the provided step in seconds.
    #[must_use]
    pub const fn secs_of(&self, step: ResolutionStep) -> f32 {
        match step {
            ResolutionStep::WindUp => self.wind_up_secs,
            ResolutionStep::Grow => self.grow_secs,
            ResolutionStep::Swing => self.swing_secs,
            ResolutionStep::Impact => self.impact_secs,
            ResolutionStep::WeightRise => self.weight_rise_secs,
            ResolutionStep::Recover => self.recover_secs,
            ResolutionStep::Settle => self.settle_secs,
        }
    }

    /// Configured length of the provided step.
    #[must_use]
    pub fn duration_of(&self, step: ResolutionStep) -> Duration {
        seconds(self.secs_of(step))
    }

    /// Total length of the sequence.
    #[must_use]
    pub fn total(&self) -> Duration {
        ResolutionStep::ALL
            .iter()
            .map(|step| self.duration_of(*step))
            .sum()
    }

    const fn field_of(step: ResolutionStep) -> &'static str {
        match step {
            ResolutionStep::WindUp => "resolution.wind_up_secs",
            ResolutionStep::Grow => "resolution.grow_secs",
            ResolutionStep::Swing => "resolution.swing_secs",
            ResolutionStep::Impact => "resolution.impact_secs",
            ResolutionStep::WeightRise => "resolution.weight_rise_secs",
            ResolutionStep::Recover => "resolution.recover_secs",
            ResolutionStep::Settle => "resolution.settle_secs",
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for step in ResolutionStep::ALL {
            let secs = self.secs_of(step);
            if !is_non_negative(secs) {
                return Err(ConfigError::NegativeStepDuration { step, secs });
            }
            if !is_representable(secs) {
                return Err(ConfigError::DurationOutOfRange {
                    field: Self::field_of(step),
                    secs,
                });
            }
        }
        Ok(())
    }
}

/// Reasons a configuration is rejected when a session starts.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The charging window must last a positive amount of time.
    #[error("charge_duration_secs must be positive (received {secs})")]
    NonPositiveChargeDuration {
        /// Rejected duration in seconds.
        secs: f32,
    },
    /// The charge bound must be positive so it can normalize the charge.
    #[error("max_charge must be positive (received {max_charge})")]
    NonPositiveMaxCharge {
        /// Rejected bound.
        max_charge: f32,
    },
    /// Clicks must add a positive amount of charge.
    #[error("base_charge_per_click must be positive (received {charge_per_click})")]
    NonPositiveChargePerClick {
        /// Rejected gain.
        charge_per_click: f32,
    },
    /// Decay cannot add charge.
    #[error("charge_decay_per_sec must not be negative (received {decay_per_sec})")]
    NegativeDecay {
        /// Rejected decay rate.
        decay_per_sec: f32,
    },
    /// Thresholds compare against a normalized charge in `(0, 1]`.
    #[error("{threshold} must lie in (0, 1] (received {value})")]
    ThresholdOutOfRange {
        /// Name of the offending threshold.
        threshold: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A perfect result must also be a win.
    #[error("perfect_threshold {perfect} is below victory_threshold {victory}")]
    PerfectBelowVictory {
        /// Configured perfect threshold.
        perfect: f32,
        /// Configured victory threshold.
        victory: f32,
    },
    /// A difficulty ramp constant is out of range.
    #[error("difficulty.{field} is out of range (received {value})")]
    InvalidRamp {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A duration is too long to be represented.
    #[error("{field} is out of range (received {secs} s)")]
    DurationOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected duration in seconds.
        secs: f32,
    },
    /// Resolution steps cannot take negative time.
    #[error("resolution step {step:?} has a negative duration ({secs} s)")]
    NegativeStepDuration {
        /// Step with the invalid duration.
        step: ResolutionStep,
        /// Rejected duration in seconds.
        secs: f32,
    },
}

fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO)
}

fn is_representable(secs: f32) -> bool {
    Duration::try_from_secs_f32(secs).is_ok()
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_unit_fraction(value: f32) -> bool {
    is_positive(value) && value <= 1.0
}
