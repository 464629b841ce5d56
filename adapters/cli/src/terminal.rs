//! Text transcript of a session written to any [`Write`] sink.

use std::{io::Write, time::Duration};

use high_striker_core::{ChargeSnapshot, Outcome, ResolutionStep, Tier, Verdict};
use high_striker_runtime::PresentationAdapter;

const METER_WIDTH: usize = 20;

/// Presentation adapter that narrates the session line by line.
#[derive(Debug)]
pub(crate) struct TerminalPresentation<W> {
    out: W,
    last_second: Option<u64>,
}

impl<W: Write> TerminalPresentation<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            last_second: None,
        }
    }

    fn line(&mut self, text: &str) {
        // Write failures, such as a closed pipe, are ignored.
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> PresentationAdapter for TerminalPresentation<W> {
    fn on_round_reset(&mut self, _charge: ChargeSnapshot, _duration: Duration) {
        self.last_second = None;
    }

    fn on_round_started(&mut self, attempt: u32, duration: Duration) {
        self.line(&format!(
            "attempt {attempt}: mash for {:.1}s!",
            duration.as_secs_f32()
        ));
    }

    fn on_timer_tick(&mut self, remaining: Duration) {
        let second = remaining.as_secs_f32().ceil() as u64;
        if second > 0 && self.last_second != Some(second) {
            self.last_second = Some(second);
            self.line(&format!("  {second}..."));
        }
    }

    fn on_timer_expired(&mut self, normalized_charge: f32, click_count: u32) {
        self.line(&format!(
            "  time! {click_count} clicks [{}] {}%",
            meter(normalized_charge),
            percent(normalized_charge)
        ));
    }

    fn on_resolution_step(&mut self, step: ResolutionStep) {
        if step == ResolutionStep::Impact {
            self.line("  *CLANG*");
        }
    }

    fn on_round_resolved(&mut self, attempt: u32, normalized_charge: f32, verdict: Verdict) {
        let message = match (verdict.outcome(), verdict.tier()) {
            (Outcome::Win, Tier::Perfect) => "MAXIMUM! You're a champion!".to_owned(),
            (Outcome::Win, Tier::Standard) => "VICTORY! Nice muscles!".to_owned(),
            (Outcome::Fail, _) => format!(
                "Only {}%! Try again! (attempt {})",
                percent(normalized_charge),
                attempt + 1
            ),
        };
        self.line(&format!("  {message}"));
    }
}

/// Short name of a verdict for summaries.
pub(crate) fn verdict_label(verdict: Verdict) -> &'static str {
    match (verdict.outcome(), verdict.tier()) {
        (Outcome::Win, Tier::Perfect) => "perfect",
        (Outcome::Win, Tier::Standard) => "win",
        (Outcome::Fail, _) => "fail",
    }
}

pub(crate) fn percent(normalized: f32) -> u32 {
    (normalized.clamp(0.0, 1.0) * 100.0).round() as u32
}

fn meter(normalized: f32) -> String {
    let filled = (normalized.clamp(0.0, 1.0) * METER_WIDTH as f32).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(METER_WIDTH - filled));
    bar
}
