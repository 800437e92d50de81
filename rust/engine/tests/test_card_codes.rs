use std::collections::HashSet;

use handreel_engine::cards::{all_ranks, all_suits, full_deck, Card};
use handreel_engine::codec::{decode_card, encode_card};

#[test]
fn every_card_survives_its_code_unit() {
    for &rank in &all_ranks() {
        for &suit in &all_suits() {
            let card = Card { rank, suit };
            assert_eq!(decode_card(encode_card(card)), Some(card), "{card}");
        }
    }
}

#[test]
fn code_units_are_distinct() {
    let units: HashSet<char> = full_deck().into_iter().map(encode_card).collect();
    assert_eq!(units.len(), 52);
}

#[test]
fn code_units_are_url_safe_letters() {
    for card in full_deck() {
        assert!(encode_card(card).is_ascii_alphabetic());
    }
}

#[test]
fn code_index_is_rank_times_four_plus_suit() {
    let ace_spades: Card = "As".parse().unwrap();
    assert_eq!(ace_spades.code(), 12 * 4 + 3);
    assert_eq!(Card::from_code(ace_spades.code()), Some(ace_spades));
}

#[test]
fn non_letters_are_not_cards() {
    for unit in ['0', '9', '-', '_', '.', ' ', '|', 'ß'] {
        assert_eq!(decode_card(unit), None, "{unit:?}");
    }
}
