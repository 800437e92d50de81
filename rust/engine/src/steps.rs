use serde::{Deserialize, Serialize};

use crate::action::{Action, Chips, Seat};
use crate::cards::Card;
use crate::hand::{Hand, Street};

/// Pacing for each kind of step, in milliseconds at normal speed.
pub const HOLE_CARDS_DELAY_MS: u64 = 400;
pub const BLIND_DELAY_MS: u64 = 300;
pub const ACTION_DELAY_MS: u64 = 900;
pub const BOARD_DELAY_MS: u64 = 1200;
pub const SHOWDOWN_DELAY_MS: u64 = 1500;
pub const AWARD_DELAY_MS: u64 = 1500;

/// What a replay step does to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    RevealHoleCards { seat: Seat, cards: Vec<Card> },
    PostBlind { seat: Seat, amount: Chips },
    PlayerAction { street: Street, action: Action },
    RevealBoard { street: Street, cards: Vec<Card> },
    EnterShowdown,
    AwardPot { seat: Seat, amount: Chips },
}

impl StepKind {
    pub fn default_delay_ms(&self) -> u64 {
        match self {
            StepKind::RevealHoleCards { .. } => HOLE_CARDS_DELAY_MS,
            StepKind::PostBlind { .. } => BLIND_DELAY_MS,
            StepKind::PlayerAction { .. } => ACTION_DELAY_MS,
            StepKind::RevealBoard { .. } => BOARD_DELAY_MS,
            StepKind::EnterShowdown => SHOWDOWN_DELAY_MS,
            StepKind::AwardPot { .. } => AWARD_DELAY_MS,
        }
    }
}

/// One discrete unit of playback. `delay_ms` paces real-time playback and
/// never affects the table state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub kind: StepKind,
    pub delay_ms: u64,
}

impl ReplayStep {
    /// Wraps `kind` with its standard pacing.
    pub fn new(kind: StepKind) -> Self {
        let delay_ms = kind.default_delay_ms();
        Self { kind, delay_ms }
    }
}

/// Flattens a hand into its playback timeline.
///
/// Order: hole card reveals (player order), then per reached street a board
/// reveal when cards were dealt followed by its actions in table order, then a
/// showdown if a winner showed cards, then one award per winner.
pub fn generate_steps(hand: &Hand) -> Vec<ReplayStep> {
    let mut steps = Vec::with_capacity(
        hand.players.len() + hand.action_count() + hand.winners.len() + Street::ALL.len() + 1,
    );

    for p in &hand.players {
        if let Some(cards) = p.hole_cards.as_ref().filter(|c| !c.is_empty()) {
            steps.push(ReplayStep::new(StepKind::RevealHoleCards {
                seat: p.seat,
                cards: cards.clone(),
            }));
        }
    }

    for (street, record) in hand.streets.iter() {
        if !record.board.is_empty() {
            steps.push(ReplayStep::new(StepKind::RevealBoard {
                street,
                cards: record.board.clone(),
            }));
        }
        steps.extend(record.actions.iter().map(|a| {
            ReplayStep::new(StepKind::PlayerAction {
                street,
                action: a.clone(),
            })
        }));
    }

    if hand.players.iter().any(|p| p.shows_down()) {
        steps.push(ReplayStep::new(StepKind::EnterShowdown));
    }

    steps.extend(hand.winners.iter().map(|w| {
        ReplayStep::new(StepKind::AwardPot {
            seat: w.seat,
            amount: w.amount,
        })
    }));

    steps
}
