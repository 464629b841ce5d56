use std::{fs, path::PathBuf, process::Command};

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_high-striker"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch high-striker")
}

fn summary(args: &[&str]) -> serde_json::Value {
    let output = run(args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("summary is JSON")
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::write(&path, contents).expect("scratch file is writable");
    path
}

#[test]
fn fast_player_wins_the_first_attempt() {
    let summary = summary(&["--json", "--clicks-per-second", "15"]);

    assert_eq!(summary["completion"], "Won");
    assert_eq!(summary["attempts"].as_array().map(Vec::len), Some(1));
    assert_eq!(summary["attempts"][0]["verdict"]["outcome"], "Win");
}

#[test]
fn absurd_click_rates_are_capped() {
    let summary = summary(&["--json", "--clicks-per-second", "1e12"]);

    assert_eq!(summary["completion"], "Won");
    let clicks = summary["attempts"][0]["clicks"].as_u64().expect("click count");
    assert!(clicks <= 400, "registered {clicks} clicks in one round");
}

#[test]
fn idle_player_gives_up_after_the_attempt_limit() {
    let summary = summary(&["--json", "--clicks-per-second", "0", "--max-attempts", "2"]);

    assert_eq!(summary["completion"], "Cancelled");
    let attempts = summary["attempts"].as_array().expect("attempt list");
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().all(|attempt| attempt["verdict"]["outcome"] == "Fail"));
}

#[test]
fn same_seed_replays_identically() {
    let args = ["--json", "--seed", "11", "--clicks-per-second", "6"];

    assert_eq!(run(&args).stdout, run(&args).stdout);
}

#[test]
fn printed_default_configuration_is_loadable() {
    let output = run(&["--print-default-config"]);
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(text.contains("charge_duration_secs = 3.0"), "{text}");

    let path = scratch_file("defaults.toml", &text);
    let summary = summary(&["--json", "--config", path.to_str().expect("utf-8 path")]);
    assert!(summary["completion"].is_string());
}

#[test]
fn invalid_configuration_is_reported() {
    let path = scratch_file("broken.toml", "victory_threshold = 1.5\n");
    let output = run(&["--config", path.to_str().expect("utf-8 path")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("victory_threshold"), "{stderr}");
}

#[test]
fn transcript_narrates_the_round() {
    let output = run(&["--clicks-per-second", "15"]);
    assert!(output.status.success());
    let transcript = String::from_utf8_lossy(&output.stdout);

    assert!(transcript.contains("attempt 1: mash for 3.0s!"), "{transcript}");
    assert!(transcript.contains("VICTORY!"), "{transcript}");
    assert!(transcript.contains("result: won"), "{transcript}");
}
