use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::{Action, Chips, Seat};
use crate::cards::Card;

/// Game variant. Only the hole-card count matters to the codec and replay.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Two hole cards
    Holdem,
    /// Four hole cards
    Omaha,
}

impl Variant {
    pub fn hole_cards(self) -> usize {
        match self {
            Variant::Holdem => 2,
            Variant::Omaha => 4,
        }
    }
}

/// Represents a betting street in a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    /// Before flop (hole cards dealt)
    Preflop,
    /// After flop (3 community cards)
    Flop,
    /// After turn (4th community card)
    Turn,
    /// After river (5th community card)
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// How many community cards this street deals.
    pub fn new_board_cards(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

/// Board cards dealt on a street and the actions taken there, in table order.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StreetRecord {
    #[serde(default)]
    pub board: Vec<Card>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl StreetRecord {
    pub fn new(board: Vec<Card>, actions: Vec<Action>) -> Self {
        Self { board, actions }
    }
}

/// Streets of a hand. Preflop always exists; later streets only if reached.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Streets {
    pub preflop: StreetRecord,
    #[serde(default)]
    pub flop: Option<StreetRecord>,
    #[serde(default)]
    pub turn: Option<StreetRecord>,
    #[serde(default)]
    pub river: Option<StreetRecord>,
}

impl Streets {
    pub fn get(&self, street: Street) -> Option<&StreetRecord> {
        match street {
            Street::Preflop => Some(&self.preflop),
            Street::Flop => self.flop.as_ref(),
            Street::Turn => self.turn.as_ref(),
            Street::River => self.river.as_ref(),
        }
    }

    /// Reached streets in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Street, &StreetRecord)> + '_ {
        Street::ALL
            .into_iter()
            .filter_map(move |s| self.get(s).map(|r| (s, r)))
    }
}

/// A seated player as recorded at the start of the hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub name: String,
    pub starting_stack: Chips,
    /// Shown hole cards: 2 for hold'em, 4 for omaha, `None` when mucked or unknown.
    #[serde(default)]
    pub hole_cards: Option<Vec<Card>>,
    #[serde(default)]
    pub is_winner: bool,
}

impl Player {
    pub fn new(seat: Seat, name: impl Into<String>, starting_stack: Chips) -> Self {
        Self {
            seat,
            name: name.into(),
            starting_stack,
            hole_cards: None,
            is_winner: false,
        }
    }

    pub fn with_hole_cards(mut self, cards: Vec<Card>) -> Self {
        self.hole_cards = Some(cards);
        self
    }

    pub fn winner(mut self) -> Self {
        self.is_winner = true;
        self
    }

    /// Winner whose cards are visible; such a player forces a showdown step.
    pub fn shows_down(&self) -> bool {
        self.is_winner && self.hole_cards.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Chips awarded to one seat at the end of the hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub seat: Seat,
    pub amount: Chips,
}

/// Complete record of a played hand: the unit that is shared and replayed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub id: String,
    pub table_name: String,
    pub variant: Variant,
    /// Stakes as displayed, e.g. `"1/2"`
    pub stakes: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub button_seat: Seat,
    pub players: Vec<Player>,
    pub streets: Streets,
    pub pot_total: Chips,
    pub winners: Vec<Winner>,
}

impl Hand {
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    /// Community cards in the order they were dealt.
    pub fn board(&self) -> Vec<Card> {
        self.streets
            .iter()
            .flat_map(|(_, r)| r.board.iter().copied())
            .collect()
    }

    pub fn awarded_total(&self) -> Chips {
        self.winners.iter().map(|w| w.amount).sum()
    }

    pub fn action_count(&self) -> usize {
        self.streets.iter().map(|(_, r)| r.actions.len()).sum()
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.timestamp).ok()?;
        DateTime::from_timestamp_millis(millis)
    }
}
