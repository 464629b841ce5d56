#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the High Striker minigame engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the session executes them via its `apply`
//! entry point, and then broadcasts [`Event`] values for systems to react to
//! deterministically. Systems consume event streams and respond exclusively
//! with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{ConfigError, DifficultyRamp, MinigameConfig, ResolutionTiming};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Step right up and test your strength!";

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the configuration used by the next session.
    Configure {
        /// Configuration to install.
        config: MinigameConfig,
    },
    /// Begins a new session.
    StartGame,
    /// Forcibly terminates the active session.
    EndGame,
    /// Starts the charging phase without counting a click.
    BeginRound,
    /// Registers a single player click.
    Click,
    /// Advances the session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Replaces the charge gained per click for subsequent rounds.
    SetChargePerClick {
        /// New gain per click.
        charge_per_click: f32,
    },
    /// Announces that the resolution sequence reached a new step.
    EnterResolutionStep {
        /// Step that became active.
        step: ResolutionStep,
    },
    /// Announces that the resolution sequence finished.
    FinishResolution,
    /// Settles the round currently awaiting a verdict.
    ConcludeRound {
        /// Verdict reached for the round.
        verdict: Verdict,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a session started with the provided configuration.
    GameStarted {
        /// Configuration that stays fixed for the whole session.
        config: MinigameConfig,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Reports that the charge and timer were reset for an upcoming round.
    RoundReset {
        /// Charge snapshot after the reset.
        charge: ChargeSnapshot,
        /// Full length of the upcoming charging window.
        duration: Duration,
    },
    /// Confirms that the charging window opened.
    RoundStarted {
        /// One-based attempt number within the session.
        attempt: u32,
        /// Length of the charging window.
        duration: Duration,
    },
    /// Reports a change of the accumulated charge.
    ChargeChanged {
        /// Charge snapshot after the change.
        charge: ChargeSnapshot,
    },
    /// Reports the time left in the charging window.
    TimerTicked {
        /// Remaining time, saturated at zero.
        remaining: Duration,
    },
    /// Announces that the charging window closed.
    TimerExpired {
        /// Final charge divided by the maximum charge.
        normalized_charge: f32,
        /// Clicks registered during the round.
        click_count: u32,
    },
    /// Reports the charge gain the session will use for clicks.
    ChargePerClickChanged {
        /// Gain per click now in effect.
        charge_per_click: f32,
    },
    /// Announces that the resolution sequence reached a new step.
    ResolutionStepEntered {
        /// Step that became active.
        step: ResolutionStep,
    },
    /// Announces that the resolution sequence completed and a verdict is due.
    ResolutionFinished {
        /// Final charge divided by the maximum charge.
        normalized_charge: f32,
    },
    /// Reports the verdict of a round.
    RoundResolved {
        /// One-based attempt number within the session.
        attempt: u32,
        /// Final charge divided by the maximum charge.
        normalized_charge: f32,
        /// Verdict reached for the round.
        verdict: Verdict,
    },
    /// Announces that the player won and the session is about to end.
    GameWon {
        /// Winning verdict.
        verdict: Verdict,
    },
    /// Announces that a round was lost and another attempt will follow.
    RoundFailed {
        /// One-based attempt number that failed.
        attempt: u32,
    },
    /// Announces that the session ended.
    GameCompleted {
        /// Cause of the session ending.
        reason: CompletionReason,
    },
}

/// Lifecycle phase of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No session is active.
    #[default]
    Idle,
    /// A session is active and waits for the click that opens the next round.
    WaitingForStart,
    /// The charging window is open and clicks add charge.
    Charging,
    /// The charging window closed and the resolution sequence is playing.
    Resolving,
}

impl Phase {
    /// Reports whether the phase belongs to an active session.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Result of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The normalized charge met the victory threshold.
    Win,
    /// The normalized charge fell short of the victory threshold.
    Fail,
}

/// Optional grading applied to winning rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Regular result.
    #[default]
    Standard,
    /// The normalized charge met the configured perfect threshold.
    Perfect,
}

/// Outcome of a round paired with its tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    outcome: Outcome,
    tier: Tier,
}

impl Verdict {
    /// Winning verdict in the standard tier.
    pub const WIN: Self = Self::new(Outcome::Win, Tier::Standard);
    /// Winning verdict in the perfect tier.
    pub const PERFECT: Self = Self::new(Outcome::Win, Tier::Perfect);
    /// Failing verdict.
    pub const FAIL: Self = Self::new(Outcome::Fail, Tier::Standard);

    /// Creates a verdict. Failing verdicts are always graded [`Tier::Standard`].
    #[must_use]
    pub const fn new(outcome: Outcome, tier: Tier) -> Self {
        let tier = match outcome {
            Outcome::Win => tier,
            Outcome::Fail => Tier::Standard,
        };
        Self { outcome, tier }
    }

    /// Outcome of the round.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Tier assigned to the round.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Reports whether the verdict ends the session with a win.
    #[must_use]
    pub const fn is_win(&self) -> bool {
        matches!(self.outcome, Outcome::Win)
    }
}

/// Cause of a session ending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionReason {
    /// The player won a round.
    Won,
    /// The session was terminated externally.
    Cancelled,
}

/// Ordered steps of the resolution sequence that follows the charging window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResolutionStep {
    /// Hammer pulls back.
    WindUp,
    /// Hammer grows before the swing.
    Grow,
    /// Hammer travels to the striking plate.
    Swing,
    /// Hammer hits and shakes.
    Impact,
    /// Weight climbs the tower toward the normalized charge.
    WeightRise,
    /// Hammer returns to its resting pose.
    Recover,
    /// Pause before the verdict is announced.
    Settle,
}

impl ResolutionStep {
    /// Every step in playback order.
    pub const ALL: [Self; 7] = [
        Self::WindUp,
        Self::Grow,
        Self::Swing,
        Self::Impact,
        Self::WeightRise,
        Self::Recover,
        Self::Settle,
    ];

    /// Step that follows this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::WindUp => Some(Self::Grow),
            Self::Grow => Some(Self::Swing),
            Self::Swing => Some(Self::Impact),
            Self::Impact => Some(Self::WeightRise),
            Self::WeightRise => Some(Self::Recover),
            Self::Recover => Some(Self::Settle),
            Self::Settle => None,
        }
    }
}

/// Immutable view of the accumulated charge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargeSnapshot {
    /// Accumulated charge in `[0, max_charge]`.
    pub charge: f32,
    /// Upper bound of the charge.
    pub max_charge: f32,
    /// Clicks registered during the current round.
    pub click_count: u32,
    /// Gain applied by the next click.
    pub charge_per_click: f32,
}

impl ChargeSnapshot {
    /// Charge expressed as a fraction of the maximum charge.
    #[must_use]
    pub fn normalized(&self) -> f32 {
        normalize(self.charge, self.max_charge)
    }
}

/// Maps a charge into `[0, 1]` relative to `max_charge`.
///
/// A non-positive bound yields zero.
#[must_use]
pub fn normalize(charge: f32, max_charge: f32) -> f32 {
    if max_charge > 0.0 {
        (charge / max_charge).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
