#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure adaptive difficulty system that eases the game after failed rounds.

use high_striker_core::{Command, DifficultyRamp, Event, MinigameConfig};

/// Failure streak and the gain it grants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyState {
    fail_count: u32,
    charge_per_click: f32,
}

impl DifficultyState {
    /// Creates the state of a fresh session.
    #[must_use]
    pub const fn baseline(base_charge_per_click: f32) -> Self {
        Self {
            fail_count: 0,
            charge_per_click: base_charge_per_click,
        }
    }

    /// Failed rounds since the session started or was last won.
    #[must_use]
    pub const fn fail_count(&self) -> u32 {
        self.fail_count
    }

    /// Gain granted per click.
    #[must_use]
    pub const fn charge_per_click(&self) -> f32 {
        self.charge_per_click
    }

    /// Escalates the assistance after a failed round and returns the new gain.
    ///
    /// The first failure scales the base gain, the second jumps to the fixed
    /// override, later failures add the fixed increment. Every step is capped
    /// at `base * cap_multiplier`.
    pub fn record_failure(&mut self, base_charge_per_click: f32, ramp: &DifficultyRamp) -> f32 {
        self.fail_count = self.fail_count.saturating_add(1);
        let escalated = match self.fail_count {
            1 => base_charge_per_click * ramp.first_fail_multiplier,
            2 => ramp.charge_after_two_fails,
            _ => self.charge_per_click + ramp.extra_charge_per_fail,
        };
        let cap = base_charge_per_click * ramp.cap_multiplier;
        self.charge_per_click = escalated.min(cap);
        self.charge_per_click
    }

    /// Clears the failure streak after a win.
    pub fn record_win(&mut self, base_charge_per_click: f32) {
        *self = Self::baseline(base_charge_per_click);
    }
}

/// Difficulty system that answers round verdicts with new click gains.
#[derive(Clone, Debug)]
pub struct Difficulty {
    base_charge_per_click: f32,
    ramp: DifficultyRamp,
    state: DifficultyState,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::from_config(&MinigameConfig::default())
    }
}

impl Difficulty {
    /// Creates a difficulty system using the ramp of the provided configuration.
    #[must_use]
    pub fn from_config(config: &MinigameConfig) -> Self {
        Self {
            base_charge_per_click: config.base_charge_per_click,
            ramp: config.difficulty,
            state: DifficultyState::baseline(config.base_charge_per_click),
        }
    }

    /// Current failure streak and gain.
    #[must_use]
    pub const fn state(&self) -> DifficultyState {
        self.state
    }

    /// Consumes session events and emits gain adjustments.
    ///
    /// A session start latches its configuration and resets the streak.
    /// Failed rounds escalate the gain; a win restores the baseline.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { config } => {
                    *self = Self::from_config(config);
                }
                Event::RoundResolved { verdict, .. } => {
                    let before = self.state.charge_per_click();
                    if verdict.is_win() {
                        self.state.record_win(self.base_charge_per_click);
                    } else {
                        let _ = self
                            .state
                            .record_failure(self.base_charge_per_click, &self.ramp);
                    }

                    let charge_per_click = self.state.charge_per_click();
                    if charge_per_click != before {
                        out.push(Command::SetChargePerClick { charge_per_click });
                    }
                }
                _ => {}
            }
        }
    }
}
