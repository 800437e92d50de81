use std::fs;

use handreel_cli::run;
use handreel_engine::action::{Action, ActionKind};
use handreel_engine::cards::Card;
use handreel_engine::codec::encode;
use handreel_engine::hand::{Hand, Player, StreetRecord, Streets, Variant, Winner};
use tempfile::tempdir;

fn raise_call() -> Hand {
    let c = |s: &str| s.parse::<Card>().unwrap();
    Hand {
        id: "20250102-000001".into(),
        table_name: "Main".into(),
        variant: Variant::Holdem,
        stakes: "1/2".into(),
        timestamp: 1_735_776_000_000,
        button_seat: 1,
        players: vec![
            Player::new(1, "alice", 200).with_hole_cards(vec![c("As"), c("Ks")]),
            Player::new(2, "bob", 200).with_hole_cards(vec![c("2c"), c("7d")]),
        ],
        streets: Streets {
            preflop: StreetRecord::new(vec![], vec![Action::raise(1, 6), Action::call(2, 6)]),
            ..Streets::default()
        },
        pot_total: 12,
        winners: vec![Winner { seat: 1, amount: 12 }],
    }
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn encode_then_decode_reproduces_the_hand() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hand.json");
    fs::write(&path, serde_json::to_string_pretty(&raise_call()).unwrap()).unwrap();

    let (code, out, err) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {err}");
    let token = out.trim();
    assert_eq!(token, encode(&raise_call()).as_str());

    let (code, out, _) = run_cli(&["handreel", "decode", "--token", token]);
    assert_eq!(code, 0);
    let back: Hand = serde_json::from_str(&out).unwrap();
    assert_eq!(back, raise_call());
}

#[test]
fn jsonl_input_yields_one_token_per_hand() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let mut second = raise_call();
    second.id = "20250102-000002".into();
    let body = format!(
        "{}\n{}\n",
        serde_json::to_string(&raise_call()).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    fs::write(&path, body).unwrap();

    let (code, out, _) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    let tokens: Vec<&str> = out.lines().collect();
    assert_eq!(tokens.len(), 2);
    assert_ne!(tokens[0], tokens[1]);
}

#[test]
fn zstd_compressed_input_is_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hand.json.zst");
    let json = serde_json::to_vec(&raise_call()).unwrap();
    fs::write(&path, zstd::bulk::compress(&json, 3).unwrap()).unwrap();

    let (code, out, _) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), encode(&raise_call()).as_str());
}

#[test]
fn inconsistent_hand_is_rejected_before_encoding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let mut hand = raise_call();
    hand.pot_total = 13;
    fs::write(&path, serde_json::to_string(&hand).unwrap()).unwrap();

    let (code, out, err) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Invalid input"), "{err}");
}

#[test]
fn malformed_json_and_missing_file_exit_two() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"id\": ").unwrap();
    let (code, _, err) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(err.contains("hand 1"), "{err}");

    let missing = dir.path().join("nope.json");
    let (code, _, err) = run_cli(&["handreel", "encode", "--input", missing.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(err.contains("Failed to read"), "{err}");
}

#[test]
fn long_names_warn_about_truncation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long.json");
    let mut hand = raise_call();
    hand.players[1].name = "a-very-long-screen-name".into();
    fs::write(&path, serde_json::to_string(&hand).unwrap()).unwrap();

    let (code, out, err) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(!out.trim().is_empty());
    assert!(err.contains("WARNING"), "{err}");
    assert!(err.contains("seat 2"), "{err}");
}

#[test]
fn long_ids_encode_whole_without_warning() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("long_id.json");
    let mut hand = raise_call();
    hand.id = "tournament-2025-main-event-day-3-table-17-hand-000451".into();
    hand.table_name = "Main Event Day 3, Outer Feature Table Seventeen".into();
    fs::write(&path, serde_json::to_string(&hand).unwrap()).unwrap();

    let (code, out, err) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 0, "stderr: {err}");
    assert!(!err.contains("WARNING"), "{err}");

    let (code, out, _) = run_cli(&["handreel", "decode", "--token", out.trim()]);
    assert_eq!(code, 0);
    let back: Hand = serde_json::from_str(&out).unwrap();
    assert_eq!(back, hand);
}

#[test]
fn bet_without_amount_is_rejected_before_encoding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad_bet.json");
    let mut hand = raise_call();
    hand.streets.preflop.actions[0] = Action::new(1, ActionKind::Bet, None);
    fs::write(&path, serde_json::to_string(&hand).unwrap()).unwrap();

    let (code, out, err) = run_cli(&["handreel", "encode", "--input", path.to_str().unwrap()]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Unknown action"), "{err}");
}

#[test]
fn decode_reports_the_reason() {
    let (code, out, err) = run_cli(&["handreel", "decode", "--token", "djJ8SA"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.starts_with("Error: Invalid token"), "{err}");
}

#[test]
fn steps_lists_the_timeline() {
    let token = encode(&raise_call()).into_string();
    let (code, out, _) = run_cli(&["handreel", "steps", "--token", &token]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Hand 20250102-000001 (5 steps, 4100 ms)");
    assert_eq!(lines.len(), 6);
    assert!(lines[3].ends_with("Preflop: alice raises 6"), "{}", lines[3]);
    assert!(lines[5].ends_with("alice wins 12"), "{}", lines[5]);
}

#[test]
fn steps_json_is_machine_readable() {
    let token = encode(&raise_call()).into_string();
    let (code, out, _) = run_cli(&["handreel", "steps", "--token", &token, "--json"]);
    assert_eq!(code, 0);
    let steps: serde_json::Value = serde_json::from_str(&out).unwrap();
    let steps = steps.as_array().unwrap();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[4]["delay_ms"].as_u64(), Some(1500));
}

#[test]
fn sample_is_deterministic_per_seed() {
    let (code, a, _) = run_cli(&["handreel", "sample", "--seed", "7", "--count", "3"]);
    assert_eq!(code, 0);
    let (_, b, _) = run_cli(&["handreel", "sample", "--seed", "7", "--count", "3"]);
    assert_eq!(a, b);
    assert_eq!(a.lines().count(), 3);

    for token in a.lines() {
        let (code, _, err) = run_cli(&["handreel", "decode", "--token", token]);
        assert_eq!(code, 0, "{err}");
    }
}

#[test]
fn sample_without_seed_reports_it() {
    let (code, out, err) = run_cli(&["handreel", "sample"]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 1);
    assert!(err.starts_with("seed: "), "{err}");
}
