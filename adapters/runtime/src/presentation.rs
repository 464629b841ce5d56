use std::time::Duration;

use high_striker_core::{ChargeSnapshot, Phase, ResolutionStep, Verdict};

/// Presentation backend notified of every visible change of a session.
///
/// All hooks default to doing nothing so adapters only implement what they
/// display. Hooks fire synchronously, in event order, while the runtime pumps
/// a command.
pub trait PresentationAdapter {
    /// The session entered a new phase.
    fn on_phase_changed(&mut self, _phase: Phase) {}

    /// Charge and timer were reset ahead of a round.
    fn on_round_reset(&mut self, _charge: ChargeSnapshot, _duration: Duration) {}

    /// The charging window opened.
    fn on_round_started(&mut self, _attempt: u32, _duration: Duration) {}

    /// The accumulated charge changed. Adapters typically pulse feedback here.
    fn on_charge_changed(&mut self, _charge: ChargeSnapshot) {}

    /// The charging window counted down.
    fn on_timer_tick(&mut self, _remaining: Duration) {}

    /// The charging window closed.
    fn on_timer_expired(&mut self, _normalized_charge: f32, _click_count: u32) {}

    /// The resolution sequence reached a new step.
    fn on_resolution_step(&mut self, _step: ResolutionStep) {}

    /// A round received its verdict.
    fn on_round_resolved(&mut self, _attempt: u32, _normalized_charge: f32, _verdict: Verdict) {}
}
