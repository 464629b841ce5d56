#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure outcome system that grades finished rounds.

use high_striker_core::{Command, Event, MinigameConfig, Outcome, Tier, Verdict};

/// Thresholds a normalized charge is compared against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Minimum normalized charge that wins.
    pub victory: f32,
    /// Minimum normalized charge graded as perfect, when the tier is enabled.
    pub perfect: Option<f32>,
}

impl Thresholds {
    /// Extracts the thresholds from a configuration.
    #[must_use]
    pub const fn from_config(config: &MinigameConfig) -> Self {
        Self {
            victory: config.victory_threshold,
            perfect: config.perfect_threshold,
        }
    }
}

/// Decides whether a normalized charge wins.
///
/// Reaching the threshold exactly wins. A NaN charge always fails.
#[must_use]
pub fn resolve(normalized_charge: f32, victory_threshold: f32) -> Outcome {
    if normalized_charge >= victory_threshold {
        Outcome::Win
    } else {
        Outcome::Fail
    }
}

/// Resolves the outcome and grades wins against the optional perfect tier.
#[must_use]
pub fn grade(normalized_charge: f32, thresholds: Thresholds) -> Verdict {
    let outcome = resolve(normalized_charge, thresholds.victory);
    let tier = match thresholds.perfect {
        Some(perfect) if normalized_charge >= perfect => Tier::Perfect,
        _ => Tier::Standard,
    };
    Verdict::new(outcome, tier)
}

/// Outcome system that answers finished resolutions with a verdict.
#[derive(Clone, Debug)]
pub struct OutcomeDispatcher {
    thresholds: Thresholds,
}

impl Default for OutcomeDispatcher {
    fn default() -> Self {
        Self::new(Thresholds::from_config(&MinigameConfig::default()))
    }
}

impl OutcomeDispatcher {
    /// Creates a dispatcher using the provided thresholds.
    #[must_use]
    pub const fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds currently in effect.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Consumes session events and emits verdicts for finished rounds.
    ///
    /// A session start latches the thresholds of its configuration.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { config } => {
                    self.thresholds = Thresholds::from_config(config);
                }
                Event::ResolutionFinished { normalized_charge } => {
                    out.push(Command::ConcludeRound {
                        verdict: grade(*normalized_charge, self.thresholds),
                    });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{grade, resolve, Thresholds};
    use high_striker_core::{Outcome, Verdict};

    const WITH_PERFECT: Thresholds = Thresholds {
        victory: 0.85,
        perfect: Some(1.0),
    };

    #[test]
    fn threshold_boundary_wins() {
        assert_eq!(resolve(0.85, 0.85), Outcome::Win);
        assert_eq!(resolve(0.849_99, 0.85), Outcome::Fail);
    }

    #[test]
    fn resolve_is_repeatable() {
        for charge in [0.0, 0.4, 0.85, 0.88, 1.0] {
            assert_eq!(resolve(charge, 0.85), resolve(charge, 0.85));
        }
    }

    #[test]
    fn nan_fails() {
        assert_eq!(resolve(f32::NAN, 0.85), Outcome::Fail);
    }

    #[test]
    fn perfect_tier_requires_the_perfect_threshold() {
        assert_eq!(grade(1.0, WITH_PERFECT), Verdict::PERFECT);
        assert_eq!(grade(0.9, WITH_PERFECT), Verdict::WIN);
        assert_eq!(grade(0.4, WITH_PERFECT), Verdict::FAIL);
    }

    #[test]
    fn perfect_tier_is_absent_unless_configured() {
        let thresholds = Thresholds {
            victory: 0.85,
            perfect: None,
        };
        assert_eq!(grade(1.0, thresholds), Verdict::WIN);
    }
}
