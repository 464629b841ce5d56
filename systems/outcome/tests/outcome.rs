use high_striker_core::{Command, Event, MinigameConfig, Verdict};
use high_striker_system_outcome::{OutcomeDispatcher, Thresholds};

fn finished(normalized_charge: f32) -> Event {
    Event::ResolutionFinished { normalized_charge }
}

#[test]
fn finished_resolution_produces_a_verdict() {
    let mut dispatcher = OutcomeDispatcher::default();
    let mut commands = Vec::new();

    dispatcher.handle(&[finished(0.88), finished(0.40)], &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::ConcludeRound {
                verdict: Verdict::WIN,
            },
            Command::ConcludeRound {
                verdict: Verdict::FAIL,
            },
        ]
    );
}

#[test]
fn unrelated_events_are_ignored() {
    let mut dispatcher = OutcomeDispatcher::default();
    let mut commands = Vec::new();

    dispatcher.handle(
        &[
            Event::TimerExpired {
                normalized_charge: 1.0,
                click_count: 30,
            },
            Event::RoundFailed { attempt: 1 },
        ],
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn session_start_latches_thresholds() {
    let config = MinigameConfig {
        victory_threshold: 0.5,
        perfect_threshold: Some(0.9),
        ..MinigameConfig::default()
    };
    let mut dispatcher = OutcomeDispatcher::default();
    let mut commands = Vec::new();

    dispatcher.handle(
        &[
            Event::GameStarted { config },
            finished(0.6),
            finished(0.95),
        ],
        &mut commands,
    );

    assert_eq!(
        dispatcher.thresholds(),
        Thresholds {
            victory: 0.5,
            perfect: Some(0.9),
        }
    );
    assert_eq!(
        commands,
        vec![
            Command::ConcludeRound {
                verdict: Verdict::WIN,
            },
            Command::ConcludeRound {
                verdict: Verdict::PERFECT,
            },
        ]
    );
}
