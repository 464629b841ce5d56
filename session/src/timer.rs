use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Armed,
    Running,
    Expired,
}

/// Countdown that closes the charging window.
///
/// The countdown saturates at zero and fires its expiry exactly once per
/// `start`.
#[derive(Clone, Debug)]
pub(crate) struct RoundTimer {
    duration: Duration,
    remaining: Duration,
    state: TimerState,
}

impl RoundTimer {
    pub(crate) const fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            state: TimerState::Armed,
        }
    }

    pub(crate) fn start(&mut self) {
        self.remaining = self.duration;
        self.state = TimerState::Running;
    }

    /// Counts down by `dt`. Returns `true` on the tick that reaches zero.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.state = TimerState::Expired;
            return true;
        }
        false
    }

    /// Halts the countdown where it stands.
    pub(crate) fn stop(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Armed;
        }
    }

    pub(crate) fn rearm(&mut self) {
        self.remaining = self.duration;
        self.state = TimerState::Armed;
    }

    pub(crate) const fn remaining(&self) -> Duration {
        self.remaining
    }

    pub(crate) const fn duration(&self) -> Duration {
        self.duration
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}
