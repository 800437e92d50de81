//! Card, action and replay-step formatters for terminal display.
//!
//! Suits render as ♥ ♦ ♣ ♠ where the terminal is expected to support them and
//! fall back to h d c s otherwise.
//!
//! ## Example
//!
//! ```rust
//! use handreel_engine::cards::{Card, Rank, Suit};
//! use handreel_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_board(&[ace_spades]).starts_with("[A"));
//! ```

use handreel_engine::action::{Action, ActionKind, Seat};
use handreel_engine::cards::{Card, Suit};
use handreel_engine::hand::Hand;
use handreel_engine::snapshot::TableSnapshot;
use handreel_engine::steps::{ReplayStep, StepKind};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals
/// (TERM_PROGRAM) or VS Code (VSCODE_INJECTION). Other systems are assumed
/// to support Unicode.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.symbol().to_string()
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII).
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit))
}

/// Bracketed board like "[A♠ K♥ Q♦]", or "[]" if empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Player label: the recorded name, or `seat N` when the name is empty.
pub fn seat_label(hand: &Hand, seat: Seat) -> String {
    match hand.player(seat) {
        Some(p) if !p.name.is_empty() => p.name.clone(),
        _ => format!("seat {}", seat),
    }
}

/// Verb phrase for an action, e.g. "raises 6" or "folds".
///
/// ```rust
/// use handreel_engine::action::Action;
/// # use handreel_cli::formatters::format_action;
///
/// assert_eq!(format_action(&Action::raise(1, 6)), "raises 6");
/// assert_eq!(format_action(&Action::fold(2)), "folds");
/// ```
pub fn format_action(action: &Action) -> String {
    match (action.kind, action.amount) {
        (ActionKind::Fold | ActionKind::Check, _) | (_, None) => action.kind.label().to_string(),
        (kind, Some(amount)) => format!("{} {}", kind.label(), amount),
    }
}

/// One line describing what a replay step shows.
pub fn format_step(step: &ReplayStep, hand: &Hand) -> String {
    match &step.kind {
        StepKind::RevealHoleCards { seat, cards } => {
            format!("{} shows {}", seat_label(hand, *seat), format_board(cards))
        }
        StepKind::PostBlind { seat, amount } => {
            format!("{} posts {}", seat_label(hand, *seat), amount)
        }
        StepKind::PlayerAction { street, action } => format!(
            "{}: {} {}",
            street.name(),
            seat_label(hand, action.seat),
            format_action(action)
        ),
        StepKind::RevealBoard { street, cards } => {
            format!("{} {}", street.name(), format_board(cards))
        }
        StepKind::EnterShowdown => "Showdown".to_string(),
        StepKind::AwardPot { seat, amount } => {
            format!("{} wins {}", seat_label(hand, *seat), amount)
        }
    }
}

/// Compact table state: pot, board and who has folded.
pub fn format_snapshot(snapshot: &TableSnapshot) -> String {
    let mut line = format!("pot={} board={}", snapshot.pot, format_board(&snapshot.board));
    if !snapshot.folded.is_empty() {
        let folded: Vec<String> = snapshot.folded.iter().map(|s| s.to_string()).collect();
        line.push_str(&format!(" folded=[{}]", folded.join(",")));
    }
    line
}
