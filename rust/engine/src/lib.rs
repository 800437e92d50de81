//! # handreel-engine: hand model, token codec and replay timeline
//!
//! Turns a completed poker hand into a compact URL-safe token and back, and
//! flattens a hand into the ordered steps a replay plays through.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Rank, Suit, Card) and the 52-card code index
//! - [`action`] - Recorded player actions and seat/chip aliases
//! - [`hand`] - The `Hand` aggregate: players, streets, pot and winners
//! - [`codec`] - `encode` / `decode` between `Hand` and `Token`
//! - [`errors`] - `DecodeError`, the typed reasons a token is rejected
//! - [`steps`] - `generate_steps`, the replay timeline of a hand
//! - [`snapshot`] - `TableSnapshot` and the fold that materializes it
//! - [`sample`] - Seeded random hands for tests and demos
//!
//! ## Quick Start
//!
//! ```rust
//! use handreel_engine::action::Action;
//! use handreel_engine::cards::{Card, Rank, Suit};
//! use handreel_engine::codec::{decode, encode};
//! use handreel_engine::hand::{Hand, Player, StreetRecord, Streets, Variant, Winner};
//! use handreel_engine::snapshot::materialize;
//! use handreel_engine::steps::generate_steps;
//!
//! let hand = Hand {
//!     id: "demo-1".into(),
//!     table_name: "Main".into(),
//!     variant: Variant::Holdem,
//!     stakes: "1/2".into(),
//!     timestamp: 1_735_689_600_000,
//!     button_seat: 1,
//!     players: vec![
//!         Player::new(1, "alice", 200).with_hole_cards(vec![
//!             Card::new(Rank::Ace, Suit::Spades),
//!             Card::new(Rank::Ace, Suit::Hearts),
//!         ]),
//!         Player::new(2, "bob", 200),
//!     ],
//!     streets: Streets {
//!         preflop: StreetRecord::new(vec![], vec![Action::raise(1, 6), Action::call(2, 6)]),
//!         ..Streets::default()
//!     },
//!     pot_total: 12,
//!     winners: vec![Winner { seat: 1, amount: 12 }],
//! };
//!
//! let token = encode(&hand);
//! let back = decode(token.as_str()).expect("valid token");
//! assert_eq!(back, hand);
//!
//! let steps = generate_steps(&back);
//! let end = materialize(&steps, steps.len());
//! assert_eq!(end.pot, 12);
//! assert!(end.winners.contains(&1));
//! ```

pub mod action;
pub mod cards;
pub mod codec;
pub mod errors;
pub mod hand;
pub mod sample;
pub mod snapshot;
pub mod steps;
