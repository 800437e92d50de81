use handreel_engine::action::Action;
use handreel_engine::cards::Card;
use handreel_engine::hand::{Hand, Player, Street, StreetRecord, Streets, Variant, Winner};
use handreel_engine::sample::random_hand;
use handreel_engine::steps::{generate_steps, ReplayStep, StepKind, ACTION_DELAY_MS};

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

fn raise_call(shown: bool, winner_flag: bool) -> Hand {
    let mut alice = Player::new(1, "alice", 200);
    let mut bob = Player::new(2, "bob", 200);
    if shown {
        alice = alice.with_hole_cards(vec![c("As"), c("Ks")]);
        bob = bob.with_hole_cards(vec![c("2c"), c("7d")]);
    }
    if winner_flag {
        alice = alice.winner();
    }
    Hand {
        id: "h".into(),
        table_name: "t".into(),
        variant: Variant::Holdem,
        stakes: "1/2".into(),
        timestamp: 0,
        button_seat: 1,
        players: vec![alice, bob],
        streets: Streets {
            preflop: StreetRecord::new(vec![], vec![Action::raise(1, 6), Action::call(2, 6)]),
            ..Streets::default()
        },
        pot_total: 12,
        winners: vec![Winner { seat: 1, amount: 12 }],
    }
}

fn kinds(steps: &[ReplayStep]) -> Vec<&'static str> {
    steps
        .iter()
        .map(|s| match s.kind {
            StepKind::RevealHoleCards { .. } => "hole",
            StepKind::PostBlind { .. } => "blind",
            StepKind::PlayerAction { .. } => "action",
            StepKind::RevealBoard { .. } => "board",
            StepKind::EnterShowdown => "showdown",
            StepKind::AwardPot { .. } => "award",
        })
        .collect()
}

#[test]
fn raise_call_example_yields_five_steps() {
    let steps = generate_steps(&raise_call(true, false));
    assert_eq!(
        kinds(&steps),
        vec!["hole", "hole", "action", "action", "award"]
    );
}

#[test]
fn winner_with_visible_cards_adds_one_showdown() {
    let steps = generate_steps(&raise_call(true, true));
    assert_eq!(
        kinds(&steps),
        vec!["hole", "hole", "action", "action", "showdown", "award"]
    );
}

#[test]
fn hidden_cards_mean_no_reveal_and_no_showdown() {
    let steps = generate_steps(&raise_call(false, true));
    assert_eq!(kinds(&steps), vec!["action", "action", "award"]);
}

#[test]
fn board_reveal_precedes_street_actions() {
    let mut hand = raise_call(false, false);
    hand.streets.flop = Some(StreetRecord::new(
        vec![c("2h"), c("3h"), c("4h")],
        vec![Action::check(2), Action::check(1)],
    ));
    hand.streets.turn = Some(StreetRecord::new(vec![c("5h")], vec![]));
    let steps = generate_steps(&hand);
    assert_eq!(
        kinds(&steps),
        vec!["action", "action", "board", "action", "action", "board", "award"]
    );
    match &steps[2].kind {
        StepKind::RevealBoard { street, cards } => {
            assert_eq!(*street, Street::Flop);
            assert_eq!(cards.len(), 3);
        }
        other => panic!("expected flop reveal, got {other:?}"),
    }
}

#[test]
fn player_actions_preserve_recorded_order() {
    for seed in 0..200 {
        let hand = random_hand(seed);
        let expected: Vec<(Street, Action)> = hand
            .streets
            .iter()
            .flat_map(|(s, r)| r.actions.iter().map(move |a| (s, a.clone())))
            .collect();
        let actual: Vec<(Street, Action)> = generate_steps(&hand)
            .into_iter()
            .filter_map(|step| match step.kind {
                StepKind::PlayerAction { street, action } => Some((street, action)),
                _ => None,
            })
            .collect();
        assert_eq!(actual, expected, "seed {seed}");
    }
}

#[test]
fn awards_follow_winner_order() {
    let mut hand = raise_call(false, false);
    hand.winners = vec![Winner { seat: 2, amount: 5 }, Winner { seat: 1, amount: 7 }];
    let awards: Vec<(u32, u64)> = generate_steps(&hand)
        .into_iter()
        .filter_map(|s| match s.kind {
            StepKind::AwardPot { seat, amount } => Some((seat, amount)),
            _ => None,
        })
        .collect();
    assert_eq!(awards, vec![(2, 5), (1, 7)]);
}

#[test]
fn generation_is_deterministic_and_paced() {
    let hand = random_hand(99);
    let a = generate_steps(&hand);
    assert_eq!(a, generate_steps(&hand));
    assert!(a.iter().all(|s| s.delay_ms > 0));
    let action = a
        .iter()
        .find(|s| matches!(s.kind, StepKind::PlayerAction { .. }))
        .unwrap();
    assert_eq!(action.delay_ms, ACTION_DELAY_MS);
}

#[test]
fn hand_without_anything_has_no_steps() {
    let mut hand = raise_call(false, false);
    hand.streets.preflop.actions.clear();
    hand.winners.clear();
    hand.pot_total = 0;
    assert!(generate_steps(&hand).is_empty());
}
