#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the High Striker minigame.

mod charge;
mod timer;

use std::time::Duration;

use high_striker_core::{
    Command, CompletionReason, ConfigError, Event, MinigameConfig, Phase, ResolutionStep, Verdict,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use charge::ChargeState;
use timer::RoundTimer;

/// Errors reported when a command cannot be executed.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SessionError {
    /// The configuration was rejected when the session started.
    #[error("invalid minigame configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// The configuration is read-only while a session is active.
    #[error("configuration cannot change while the session is {phase:?}")]
    ConfigurationLocked {
        /// Phase the session was in when the change was requested.
        phase: Phase,
    },
}

/// Represents the authoritative state of one minigame instance.
#[derive(Debug)]
pub struct Session {
    config: MinigameConfig,
    phase: Phase,
    charge: ChargeState,
    timer: RoundTimer,
    attempt: u32,
    resolution_step: Option<ResolutionStep>,
    awaiting_verdict: bool,
}

impl Session {
    /// Creates an idle session that will use the provided configuration.
    ///
    /// The configuration is validated when the session starts.
    #[must_use]
    pub fn new(config: MinigameConfig) -> Self {
        let charge = ChargeState::new(config.max_charge, config.base_charge_per_click);
        let timer = RoundTimer::new(config.charge_duration());
        Self {
            config,
            phase: Phase::Idle,
            charge,
            timer,
            attempt: 0,
            resolution_step: None,
            awaiting_verdict: false,
        }
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn reset_round(&mut self, out_events: &mut Vec<Event>) {
        self.charge.reset();
        self.timer.rearm();
        self.resolution_step = None;
        self.awaiting_verdict = false;
        out_events.push(Event::RoundReset {
            charge: self.charge.snapshot(),
            duration: self.timer.duration(),
        });
        self.set_phase(Phase::WaitingForStart, out_events);
    }

    fn open_round(&mut self, out_events: &mut Vec<Event>) {
        self.attempt = self.attempt.saturating_add(1);
        self.timer.start();
        debug!(attempt = self.attempt, "charging window opened");
        out_events.push(Event::RoundStarted {
            attempt: self.attempt,
            duration: self.timer.duration(),
        });
        self.set_phase(Phase::Charging, out_events);
    }

    fn register_click(&mut self, out_events: &mut Vec<Event>) {
        self.charge.register_click();
        out_events.push(Event::ChargeChanged {
            charge: self.charge.snapshot(),
        });
    }

    fn advance_charging(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.charge.decay(self.config.charge_decay_per_sec, dt) {
            out_events.push(Event::ChargeChanged {
                charge: self.charge.snapshot(),
            });
        }

        let expired = self.timer.advance(dt);
        out_events.push(Event::TimerTicked {
            remaining: self.timer.remaining(),
        });

        if expired {
            let normalized_charge = self.charge.normalized();
            debug!(
                attempt = self.attempt,
                clicks = self.charge.click_count(),
                normalized_charge,
                "charging window closed"
            );
            out_events.push(Event::TimerExpired {
                normalized_charge,
                click_count: self.charge.click_count(),
            });
            self.set_phase(Phase::Resolving, out_events);
        }
    }

    fn conclude(&mut self, verdict: Verdict, out_events: &mut Vec<Event>) {
        let normalized_charge = self.charge.normalized();
        self.awaiting_verdict = false;
        info!(
            attempt = self.attempt,
            normalized_charge,
            outcome = ?verdict.outcome(),
            tier = ?verdict.tier(),
            "round resolved"
        );
        out_events.push(Event::RoundResolved {
            attempt: self.attempt,
            normalized_charge,
            verdict,
        });

        if verdict.is_win() {
            out_events.push(Event::GameWon { verdict });
            self.resolution_step = None;
            self.set_phase(Phase::Idle, out_events);
            out_events.push(Event::GameCompleted {
                reason: CompletionReason::Won,
            });
        } else {
            out_events.push(Event::RoundFailed {
                attempt: self.attempt,
            });
            self.reset_round(out_events);
        }
    }
}

/// Applies the provided command to the session, mutating state deterministically.
///
/// Commands that do not apply to the current phase are ignored. Errors are only
/// reported for configuration problems.
pub fn apply(
    session: &mut Session,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), SessionError> {
    match command {
        Command::Configure { config } => {
            if session.phase.is_active() {
                warn!(phase = ?session.phase, "rejected configuration change during a session");
                return Err(SessionError::ConfigurationLocked {
                    phase: session.phase,
                });
            }
            session.config = config;
        }
        Command::StartGame => {
            if session.phase.is_active() {
                debug!(phase = ?session.phase, "ignoring start request for an active session");
                return Ok(());
            }
            session.config.validate()?;

            session.charge = ChargeState::new(
                session.config.max_charge,
                session.config.base_charge_per_click,
            );
            session.timer = RoundTimer::new(session.config.charge_duration());
            session.attempt = 0;
            info!(
                duration_secs = session.config.charge_duration_secs,
                victory_threshold = session.config.victory_threshold,
                "session started"
            );
            out_events.push(Event::GameStarted {
                config: session.config.clone(),
            });
            session.reset_round(out_events);
        }
        Command::EndGame => {
            if !session.phase.is_active() {
                return Ok(());
            }
            session.timer.stop();
            session.charge.reset();
            session.resolution_step = None;
            session.awaiting_verdict = false;
            info!(attempt = session.attempt, phase = ?session.phase, "session cancelled");
            session.set_phase(Phase::Idle, out_events);
            out_events.push(Event::GameCompleted {
                reason: CompletionReason::Cancelled,
            });
        }
        Command::BeginRound => {
            if session.phase == Phase::WaitingForStart {
                session.open_round(out_events);
            }
        }
        Command::Click => match session.phase {
            Phase::WaitingForStart => {
                session.open_round(out_events);
                session.register_click(out_events);
            }
            Phase::Charging => session.register_click(out_events),
            Phase::Idle | Phase::Resolving => {}
        },
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            if session.phase == Phase::Charging {
                session.advance_charging(dt, out_events);
            }
        }
        Command::SetChargePerClick { charge_per_click } => {
            if !(charge_per_click.is_finite() && charge_per_click > 0.0) {
                warn!(charge_per_click, "ignoring non-positive charge per click");
                return Ok(());
            }
            session.charge.set_charge_per_click(charge_per_click);
            out_events.push(Event::ChargePerClickChanged { charge_per_click });
        }
        Command::EnterResolutionStep { step } => {
            if session.phase == Phase::Resolving && !session.awaiting_verdict {
                session.resolution_step = Some(step);
                out_events.push(Event::ResolutionStepEntered { step });
            }
        }
        Command::FinishResolution => {
            if session.phase == Phase::Resolving && !session.awaiting_verdict {
                session.awaiting_verdict = true;
                out_events.push(Event::ResolutionFinished {
                    normalized_charge: session.charge.normalized(),
                });
            }
        }
        Command::ConcludeRound { verdict } => {
            if session.phase == Phase::Resolving && session.awaiting_verdict {
                session.conclude(verdict, out_events);
            }
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use high_striker_core::{ChargeSnapshot, MinigameConfig, Phase, ResolutionStep};

    use super::Session;

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(session: &Session) -> Phase {
        session.phase
    }

    /// Configuration used by the active session, or by the next one when idle.
    #[must_use]
    pub fn config(session: &Session) -> &MinigameConfig {
        &session.config
    }

    /// Snapshot of the accumulated charge.
    #[must_use]
    pub fn charge(session: &Session) -> ChargeSnapshot {
        session.charge.snapshot()
    }

    /// Gain applied by the next click.
    #[must_use]
    pub fn charge_per_click(session: &Session) -> f32 {
        session.charge.charge_per_click()
    }

    /// Time left in the charging window.
    #[must_use]
    pub fn timer_remaining(session: &Session) -> Duration {
        session.timer.remaining()
    }

    /// Reports whether the charging window is counting down.
    #[must_use]
    pub fn timer_running(session: &Session) -> bool {
        session.timer.is_running()
    }

    /// One-based number of the current or most recent attempt; zero before the first round.
    #[must_use]
    pub fn attempt(session: &Session) -> u32 {
        session.attempt
    }

    /// Step of the resolution sequence last reported while resolving.
    #[must_use]
    pub fn resolution_step(session: &Session) -> Option<ResolutionStep> {
        session.resolution_step
    }
}
