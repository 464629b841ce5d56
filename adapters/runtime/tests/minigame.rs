use std::{cell::RefCell, rc::Rc, time::Duration};

use high_striker_core::{
    ChargeSnapshot, CompletionReason, ConfigError, DifficultyRamp, MinigameConfig, Phase,
    ResolutionStep, Verdict,
};
use high_striker_runtime::{GameListener, Minigame, PresentationAdapter, SessionError};

const FRAME: Duration = Duration::from_millis(50);

type Log = Rc<RefCell<Vec<&'static str>>>;

struct Recorder(Log);

impl GameListener for Recorder {
    fn on_game_win(&mut self) {
        self.0.borrow_mut().push("win");
    }

    fn on_game_fail(&mut self) {
        self.0.borrow_mut().push("fail");
    }

    fn on_game_complete(&mut self) {
        self.0.borrow_mut().push("complete");
    }
}

#[derive(Default)]
struct Frames {
    charges: Vec<ChargeSnapshot>,
    ticks: usize,
    steps: Vec<ResolutionStep>,
    verdicts: Vec<Verdict>,
}

struct FrameRecorder(Rc<RefCell<Frames>>);

impl PresentationAdapter for FrameRecorder {
    fn on_charge_changed(&mut self, charge: ChargeSnapshot) {
        self.0.borrow_mut().charges.push(charge);
    }

    fn on_timer_tick(&mut self, _remaining: Duration) {
        self.0.borrow_mut().ticks += 1;
    }

    fn on_resolution_step(&mut self, step: ResolutionStep) {
        self.0.borrow_mut().steps.push(step);
    }

    fn on_round_resolved(&mut self, _attempt: u32, _normalized_charge: f32, verdict: Verdict) {
        self.0.borrow_mut().verdicts.push(verdict);
    }
}

fn recorded(minigame: &mut Minigame) -> Log {
    let log = Log::default();
    let _ = minigame.subscribe(Recorder(Rc::clone(&log)));
    log
}

fn started(config: MinigameConfig) -> Minigame {
    let mut minigame = Minigame::new(config);
    minigame.start_game().expect("valid configuration");
    minigame
}

/// Clicks `clicks` times, then ticks until the round leaves the charging and resolving phases.
fn play_round(minigame: &mut Minigame, clicks: u32) {
    for _ in 0..clicks {
        minigame.click();
    }
    if clicks == 0 {
        minigame.begin_round();
    }
    let mut frames = 0;
    while matches!(minigame.phase(), Phase::Charging | Phase::Resolving) {
        minigame.advance(FRAME);
        frames += 1;
        assert!(frames < 10_000, "round never resolved");
    }
}

#[test]
fn twenty_two_clicks_win() {
    let mut minigame = started(MinigameConfig::default());
    let log = recorded(&mut minigame);

    for _ in 0..22 {
        minigame.click();
    }
    assert!((minigame.charge().charge - 0.88).abs() < 1e-5);
    play_round(&mut minigame, 0);

    assert_eq!(minigame.phase(), Phase::Idle);
    assert_eq!(*log.borrow(), vec!["win", "complete"]);
    assert_eq!(minigame.summary().last_verdict(), Some(Verdict::WIN));
    assert!(minigame.summary().won());
    assert_eq!(minigame.summary().attempts[0].clicks, 22);
}

#[test]
fn ten_clicks_fail_and_ease_the_next_round() {
    let mut minigame = started(MinigameConfig::default());
    let log = recorded(&mut minigame);

    play_round(&mut minigame, 10);

    assert_eq!(minigame.phase(), Phase::WaitingForStart);
    assert_eq!(*log.borrow(), vec!["fail"]);
    assert_eq!(minigame.difficulty().fail_count(), 1);
    assert!((minigame.difficulty().charge_per_click() - 0.048).abs() < 1e-6);
    assert!((minigame.charge().charge_per_click - 0.048).abs() < 1e-6);
    let record = minigame.summary().attempts[0];
    assert!((record.normalized_charge - 0.40).abs() < 1e-5);
    assert_eq!(record.verdict, Verdict::FAIL);
}

#[test]
fn win_after_failures_resets_difficulty() {
    let mut minigame = started(MinigameConfig::default());
    let log = recorded(&mut minigame);

    play_round(&mut minigame, 10);
    play_round(&mut minigame, 5);
    assert_eq!(minigame.difficulty().fail_count(), 2);
    assert!((minigame.charge().charge_per_click - 0.05).abs() < 1e-6);

    play_round(&mut minigame, 20);

    assert_eq!(*log.borrow(), vec!["fail", "fail", "win", "complete"]);
    assert_eq!(minigame.difficulty().fail_count(), 0);
    assert!((minigame.difficulty().charge_per_click() - 0.04).abs() < 1e-6);
    assert_eq!(minigame.summary().attempts.len(), 3);
    assert_eq!(minigame.attempt(), 3);
}

#[test]
fn idle_timer_still_resolves_the_round() {
    let mut minigame = started(MinigameConfig::default());
    let log = recorded(&mut minigame);

    play_round(&mut minigame, 0);

    assert_eq!(*log.borrow(), vec!["fail"]);
    assert_eq!(minigame.summary().attempts[0].clicks, 0);
}

#[test]
fn end_game_when_idle_is_silent() {
    let mut minigame = Minigame::new(MinigameConfig::default());
    let log = recorded(&mut minigame);

    minigame.end_game();
    minigame.end_game();

    assert!(log.borrow().is_empty());
    assert_eq!(minigame.phase(), Phase::Idle);
    assert_eq!(minigame.listener_count(), 1);
}

#[test]
fn cancelling_mid_resolution_skips_the_verdict() {
    let mut minigame = started(MinigameConfig::default());
    let log = recorded(&mut minigame);

    for _ in 0..25 {
        minigame.click();
    }
    while minigame.phase() == Phase::Charging {
        minigame.advance(FRAME);
    }
    minigame.advance(Duration::from_millis(150));
    assert_eq!(minigame.phase(), Phase::Resolving);
    assert!(minigame.resolution_frame().is_some());

    minigame.end_game();
    for _ in 0..100 {
        minigame.advance(FRAME);
    }

    assert_eq!(*log.borrow(), vec!["complete"]);
    assert_eq!(minigame.phase(), Phase::Idle);
    assert_eq!(minigame.resolution_frame(), None);
    assert_eq!(minigame.resolution_step(), None);
    assert!(minigame.summary().attempts.is_empty());
    assert_eq!(
        minigame.summary().completion,
        Some(CompletionReason::Cancelled)
    );
}

#[test]
fn listeners_are_scoped_to_one_session() {
    let mut minigame = started(MinigameConfig::default());
    let first = recorded(&mut minigame);
    play_round(&mut minigame, 25);
    assert_eq!(minigame.listener_count(), 0);

    minigame.start_game().expect("valid configuration");
    let second = recorded(&mut minigame);
    play_round(&mut minigame, 25);

    assert_eq!(*first.borrow(), vec!["win", "complete"]);
    assert_eq!(*second.borrow(), vec!["win", "complete"]);
}

#[test]
fn unsubscribed_listeners_hear_nothing() {
    let mut minigame = started(MinigameConfig::default());
    let log = Log::default();
    let id = minigame.subscribe(Recorder(Rc::clone(&log)));

    assert!(minigame.unsubscribe(id));
    play_round(&mut minigame, 25);

    assert!(log.borrow().is_empty());
}

#[test]
fn restart_during_a_session_is_ignored() {
    let mut minigame = started(MinigameConfig::default());
    minigame.click();
    minigame.click();

    minigame.start_game().expect("ignored without error");

    assert_eq!(minigame.phase(), Phase::Charging);
    assert_eq!(minigame.charge().click_count, 2);
}

#[test]
fn invalid_configuration_fails_loudly() {
    let mut minigame = Minigame::new(MinigameConfig {
        charge_duration_secs: 0.0,
        ..MinigameConfig::default()
    });

    let result = minigame.start_game();

    assert_eq!(
        result,
        Err(SessionError::InvalidConfig(
            ConfigError::NonPositiveChargeDuration { secs: 0.0 }
        ))
    );
    assert_eq!(minigame.phase(), Phase::Idle);
}

#[test]
fn ramp_that_would_harden_the_game_is_rejected() {
    let mut config = MinigameConfig::default();
    config.difficulty.charge_after_two_fails = 0.01;
    let mut minigame = Minigame::new(config);

    let result = minigame.start_game();

    assert_eq!(
        result,
        Err(SessionError::InvalidConfig(ConfigError::InvalidRamp {
            field: "charge_after_two_fails",
            value: 0.01,
        }))
    );
    assert_eq!(minigame.phase(), Phase::Idle);
}

#[test]
fn configuration_applies_to_the_next_session_only() {
    let mut minigame = started(MinigameConfig::default());
    let locked = minigame.configure(MinigameConfig {
        base_charge_per_click: 0.5,
        difficulty: DifficultyRamp {
            charge_after_two_fails: 0.7,
            ..DifficultyRamp::default()
        },
        ..MinigameConfig::default()
    });
    assert!(matches!(
        locked,
        Err(SessionError::ConfigurationLocked { .. })
    ));

    minigame.end_game();
    minigame
        .configure(MinigameConfig {
            base_charge_per_click: 0.5,
            difficulty: DifficultyRamp {
                charge_after_two_fails: 0.7,
                ..DifficultyRamp::default()
            },
            ..MinigameConfig::default()
        })
        .expect("idle sessions accept configuration");
    minigame.start_game().expect("valid configuration");
    minigame.click();

    assert!((minigame.charge().charge - 0.5).abs() < 1e-6);
}

#[test]
fn perfect_tier_is_reported_when_configured() {
    let mut minigame = started(MinigameConfig {
        perfect_threshold: Some(1.0),
        ..MinigameConfig::default()
    });

    play_round(&mut minigame, 30);

    assert_eq!(minigame.summary().last_verdict(), Some(Verdict::PERFECT));
}

#[test]
fn presentation_sees_charge_timer_and_sequence() {
    let frames = Rc::new(RefCell::new(Frames::default()));
    let mut minigame = Minigame::new(MinigameConfig::default())
        .with_presentation(FrameRecorder(Rc::clone(&frames)));
    minigame.start_game().expect("valid configuration");

    play_round(&mut minigame, 3);

    let frames = frames.borrow();
    assert_eq!(frames.charges.len(), 3);
    assert_eq!(frames.charges[2].click_count, 3);
    assert_eq!(frames.ticks, 60);
    assert_eq!(frames.steps, ResolutionStep::ALL.to_vec());
    assert_eq!(frames.verdicts, vec![Verdict::FAIL]);
}

#[test]
fn replays_are_deterministic() {
    fn replay() -> Vec<(u32, u32, Verdict)> {
        let mut minigame = started(MinigameConfig::default());
        for clicks in [8, 12, 16, 18] {
            play_round(&mut minigame, clicks);
        }
        minigame
            .summary()
            .attempts
            .iter()
            .map(|record| (record.attempt, record.clicks, record.verdict))
            .collect()
    }

    let first = replay();
    assert_eq!(first, replay());
    assert_eq!(first.last().map(|entry| entry.2), Some(Verdict::WIN));
}
