use high_striker_core::{CompletionReason, Verdict};
use serde::{Deserialize, Serialize};

/// Result of a single attempt.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// One-based attempt number.
    pub attempt: u32,
    /// Clicks registered while the charging window was open.
    pub clicks: u32,
    /// Final charge divided by the maximum charge.
    pub normalized_charge: f32,
    /// Verdict reached for the attempt.
    pub verdict: Verdict,
}

/// Record of the most recent session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Attempts in the order they were resolved.
    pub attempts: Vec<AttemptRecord>,
    /// How the session ended, once it has.
    pub completion: Option<CompletionReason>,
    #[serde(skip)]
    pending_clicks: u32,
}

impl SessionSummary {
    /// Verdict of the last resolved attempt.
    #[must_use]
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.attempts.last().map(|record| record.verdict)
    }

    /// Reports whether the session ended with a win.
    #[must_use]
    pub fn won(&self) -> bool {
        self.completion == Some(CompletionReason::Won)
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn charging_closed(&mut self, clicks: u32) {
        self.pending_clicks = clicks;
    }

    pub(crate) fn attempt_resolved(&mut self, attempt: u32, normalized_charge: f32, verdict: Verdict) {
        self.attempts.push(AttemptRecord {
            attempt,
            clicks: self.pending_clicks,
            normalized_charge,
            verdict,
        });
        self.pending_clicks = 0;
    }

    pub(crate) fn completed(&mut self, reason: CompletionReason) {
        self.completion = Some(reason);
    }
}
