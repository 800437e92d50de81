//! Seeded random hands.
//!
//! Every hand produced here satisfies the hand-model invariants (unique
//! seats, known seats in actions and winners, pot conservation, names within
//! the codec cap), so it is a valid input for round-trip and replay tests.
//! The same seed always yields the same hand.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::action::{Action, ActionKind, Chips, Seat};
use crate::cards::{full_deck, Card};
use crate::hand::{Hand, Player, Street, StreetRecord, Streets, Variant, Winner};

const MAX_SEATS: Seat = 9;
const NAMES: [&str; 10] = [
    "alice", "bob", "Zoë", "nit_king", "river rat", "ДонКихот", "a|b;c:d", "", "🂡 shark",
    "sixteen chars ok",
];
const STAKES: [&str; 4] = ["1/2", "5/10", "0.5/1", "25/50 ante 5"];

/// Deals a structurally valid hand from `seed`.
pub fn random_hand(seed: u64) -> Hand {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut deck = full_deck();
    deck.shuffle(&mut rng);
    let mut deck = deck.into_iter();

    let variant = if rng.random_bool(0.25) {
        Variant::Omaha
    } else {
        Variant::Holdem
    };

    let mut seats: Vec<Seat> = (1..=MAX_SEATS).collect();
    seats.shuffle(&mut rng);
    let mut seats: Vec<Seat> = seats[..rng.random_range(2..=6)].to_vec();
    seats.sort_unstable();

    let mut players: Vec<Player> = seats
        .iter()
        .map(|&seat| {
            let name = NAMES[rng.random_range(0..NAMES.len())];
            let mut p = Player::new(seat, name, rng.random_range(0..=50_000));
            let dealt: Vec<Card> = deck.by_ref().take(variant.hole_cards()).collect();
            if rng.random_bool(0.6) {
                p.hole_cards = Some(dealt);
            }
            p
        })
        .collect();

    let reached = rng.random_range(0..Street::ALL.len());
    let mut records: Vec<StreetRecord> = Vec::with_capacity(reached + 1);
    let mut active = seats.clone();
    for street in &Street::ALL[..=reached] {
        let board: Vec<Card> = deck.by_ref().take(street.new_board_cards()).collect();
        let mut actions = Vec::new();
        for &seat in &active.clone() {
            let action = random_action(&mut rng, seat);
            if action.kind == ActionKind::Fold && active.len() > 1 {
                active.retain(|s| *s != seat);
            }
            actions.push(action);
        }
        records.push(StreetRecord::new(board, actions));
    }
    let mut records = records.into_iter();
    let streets = Streets {
        preflop: records.next().unwrap_or_default(),
        flop: records.next(),
        turn: records.next(),
        river: records.next(),
    };

    let pot_total: Chips = streets
        .iter()
        .flat_map(|(_, r)| r.actions.iter())
        .map(Action::chips)
        .sum();

    active.shuffle(&mut rng);
    let split = rng.random_range(1..=active.len().min(2));
    let winners: Vec<Winner> = active[..split]
        .iter()
        .enumerate()
        .map(|(i, &seat)| {
            let share = pot_total / split as Chips;
            let remainder = if i == 0 { pot_total % split as Chips } else { 0 };
            Winner {
                seat,
                amount: share + remainder,
            }
        })
        .collect();
    for p in &mut players {
        p.is_winner = winners.iter().any(|w| w.seat == p.seat);
    }

    Hand {
        id: format!("hand-{seed:016x}"),
        table_name: format!("Table {}", rng.random_range(1..=40)),
        variant,
        stakes: STAKES[rng.random_range(0..STAKES.len())].to_string(),
        timestamp: 1_600_000_000_000 + rng.random_range(0..200_000_000_000u64),
        button_seat: seats[rng.random_range(0..seats.len())],
        players,
        streets,
        pot_total,
        winners,
    }
}

fn random_action(rng: &mut ChaCha20Rng, seat: Seat) -> Action {
    let amount = rng.random_range(1..=2_000);
    match rng.random_range(0..6) {
        0 => Action::fold(seat),
        1 => Action::check(seat),
        2 => Action::call(seat, amount),
        3 => Action::bet(seat, amount),
        4 => Action::raise(seat, amount),
        _ => Action::new(seat, ActionKind::AllIn, Some(amount * 10)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{check_hand, MAX_NAME_CHARS};

    #[test]
    fn same_seed_same_hand() {
        assert_eq!(random_hand(42), random_hand(42));
        assert_ne!(random_hand(1), random_hand(2));
    }

    #[test]
    fn sampled_hands_are_valid() {
        for seed in 0..200 {
            let hand = random_hand(seed);
            assert_eq!(check_hand(&hand), Ok(()), "seed {seed}");
            assert!(hand
                .players
                .iter()
                .all(|p| p.name.chars().count() <= MAX_NAME_CHARS));
        }
    }
}
