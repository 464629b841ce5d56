//! Simulated player that mashes the button at a jittered rate.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fastest rate the player can click at.
const MAX_CLICKS_PER_SECOND: f32 = 100.0;
/// Largest fraction by which a single frame's clicking rate may deviate.
const RATE_JITTER: f32 = 0.5;
/// Seconds the player hesitates before opening a round.
const MIN_REACTION_SECS: f32 = 0.2;
const MAX_REACTION_SECS: f32 = 0.8;

/// Deterministic stand-in for a human clicking as fast as they can.
#[derive(Debug)]
pub(crate) struct SimulatedPlayer {
    rng: ChaCha8Rng,
    clicks_per_second: f32,
    pending: f32,
    hesitation: Option<Duration>,
}

impl SimulatedPlayer {
    pub(crate) fn new(seed: u64, clicks_per_second: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            clicks_per_second: if clicks_per_second.is_finite() {
                clicks_per_second.clamp(0.0, MAX_CLICKS_PER_SECOND)
            } else {
                0.0
            },
            pending: 0.0,
            hesitation: None,
        }
    }

    /// Reports whether the player opens the next round after waiting `dt`.
    pub(crate) fn ready(&mut self, dt: Duration) -> bool {
        let remaining = match self.hesitation {
            Some(remaining) => remaining,
            None => Duration::from_secs_f32(
                self.rng.gen_range(MIN_REACTION_SECS..MAX_REACTION_SECS),
            ),
        };

        if remaining <= dt {
            self.hesitation = None;
            self.pending = 0.0;
            true
        } else {
            self.hesitation = Some(remaining - dt);
            false
        }
    }

    /// Clicks landed during a frame of length `dt`.
    pub(crate) fn clicks(&mut self, dt: Duration) -> u32 {
        let jitter = self
            .rng
            .gen_range(1.0 - RATE_JITTER..=1.0 + RATE_JITTER);
        self.pending += self.clicks_per_second * dt.as_secs_f32() * jitter;
        let whole = self.pending.floor();
        self.pending -= whole;
        whole as u32
    }
}
