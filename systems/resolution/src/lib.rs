#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic resolution sequence played between the charging window and the verdict.
//!
//! The sequence starts when the session reports that the charging window
//! closed, advances only on `Event::TimeAdvanced`, and stops for good when the
//! session ends. Step changes are announced through
//! `Command::EnterResolutionStep`; `Command::FinishResolution` is emitted once
//! the last step elapses.

use std::time::Duration;

use high_striker_core::{Command, Event, MinigameConfig, ResolutionStep, ResolutionTiming};

/// Presentation-ready state of the sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolutionFrame {
    /// Step currently playing.
    pub step: ResolutionStep,
    /// Fraction of the current step that elapsed, in `[0, 1]`.
    pub progress: f32,
    /// Height of the tower weight as a fraction of the tower, in `[0, 1]`.
    pub weight_height: f32,
}

#[derive(Clone, Copy, Debug)]
struct Playback {
    step: ResolutionStep,
    elapsed: Duration,
    target_height: f32,
}

/// Resolution system driving the post-charge sequence.
#[derive(Clone, Debug)]
pub struct Resolution {
    timing: ResolutionTiming,
    playback: Option<Playback>,
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(MinigameConfig::default().resolution)
    }
}

impl Resolution {
    /// Creates a resolution system with the provided step durations.
    #[must_use]
    pub const fn new(timing: ResolutionTiming) -> Self {
        Self {
            timing,
            playback: None,
        }
    }

    /// Reports whether a sequence is playing.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Captures the current frame of the sequence, if one is playing.
    #[must_use]
    pub fn frame(&self) -> Option<ResolutionFrame> {
        let playback = self.playback?;
        let length = self.timing.duration_of(playback.step);
        let progress = if length.is_zero() {
            1.0
        } else {
            (playback.elapsed.as_secs_f32() / length.as_secs_f32()).clamp(0.0, 1.0)
        };
        let weight_height = match playback.step {
            ResolutionStep::WindUp
            | ResolutionStep::Grow
            | ResolutionStep::Swing
            | ResolutionStep::Impact => 0.0,
            ResolutionStep::WeightRise => playback.target_height * ease_out_cubic(progress),
            ResolutionStep::Recover | ResolutionStep::Settle => playback.target_height,
        };

        Some(ResolutionFrame {
            step: playback.step,
            progress,
            weight_height,
        })
    }

    /// Consumes session events and emits resolution progress commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameStarted { config } => {
                    self.timing = config.resolution;
                    self.playback = None;
                }
                Event::TimerExpired {
                    normalized_charge, ..
                } => {
                    let first = ResolutionStep::WindUp;
                    self.playback = Some(Playback {
                        step: first,
                        elapsed: Duration::ZERO,
                        target_height: normalized_charge.clamp(0.0, 1.0),
                    });
                    out.push(Command::EnterResolutionStep { step: first });
                    self.advance(Duration::ZERO, out);
                }
                Event::TimeAdvanced { dt } => self.advance(*dt, out),
                Event::GameCompleted { .. } | Event::RoundResolved { .. } => {
                    self.playback = None;
                }
                _ => {}
            }
        }
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        let Some(mut playback) = self.playback else {
            return;
        };
        playback.elapsed = playback.elapsed.saturating_add(dt);

        loop {
            let length = self.timing.duration_of(playback.step);
            if playback.elapsed < length {
                self.playback = Some(playback);
                return;
            }
            playback.elapsed -= length;

            match playback.step.next() {
                Some(next) => {
                    playback.step = next;
                    out.push(Command::EnterResolutionStep { step: next });
                }
                None => {
                    self.playback = None;
                    out.push(Command::FinishResolution);
                    return;
                }
            }
        }
    }
}

/// Cubic ease-out: fast start, gentle arrival.
#[must_use]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
