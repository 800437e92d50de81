use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣)
    Clubs,
    /// Diamonds suit (♦)
    Diamonds,
    /// Hearts suit (♥)
    Hearts,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    /// Position of the suit in `c d h s` order (0..4).
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(i: u8) -> Option<Suit> {
        all_suits().get(i as usize).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_symbol(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Represents the rank (face value) of a playing card from Two through Ace.
/// Numeric values are assigned for comparison purposes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    /// Zero-based position of the rank, Two = 0 through Ace = 12.
    pub fn index(self) -> u8 {
        self as u8 - 2
    }

    pub fn from_index(i: u8) -> Option<Rank> {
        all_ranks().get(i as usize).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_symbol(c: char) -> Option<Rank> {
        all_ranks()
            .into_iter()
            .find(|r| r.symbol() == c.to_ascii_uppercase())
    }
}

/// Number of distinct cards, and therefore of card code units.
pub const DECK_SIZE: u8 = 52;

/// Represents a single playing card with a rank and suit.
/// Cards are never mutated once built; hole cards and board cards are copies.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card (Clubs, Diamonds, Hearts, or Spades)
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Dense index of the card: `rank_index * 4 + suit_index`, in `0..52`.
    ///
    /// ```rust
    /// use handreel_engine::cards::{Card, Rank, Suit};
    ///
    /// assert_eq!(Card::new(Rank::Two, Suit::Clubs).code(), 0);
    /// assert_eq!(Card::new(Rank::Ace, Suit::Spades).code(), 51);
    /// ```
    pub fn code(self) -> u8 {
        self.rank.index() * 4 + self.suit.index()
    }

    /// Inverse of [`Card::code`]; `None` outside `0..52`.
    pub fn from_code(code: u8) -> Option<Card> {
        if code >= DECK_SIZE {
            return None;
        }
        let rank = Rank::from_index(code / 4)?;
        let suit = Suit::from_index(code % 4)?;
        Some(Card { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

/// Error returned when parsing a card from text such as `"As"` fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card text: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };
        match (Rank::from_symbol(r), Suit::from_symbol(su)) {
            (Some(rank), Some(suit)) => Ok(Card { rank, suit }),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ]
}

/// All 52 cards ordered by [`Card::code`].
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE as usize);
    for &r in &all_ranks() {
        for &s in &all_suits() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}
