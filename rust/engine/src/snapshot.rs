use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::action::{ActionKind, Chips, Seat};
use crate::cards::Card;
use crate::hand::Street;
use crate::steps::{ReplayStep, StepKind};

/// Table state after applying a prefix of the replay steps.
///
/// Never a source of truth: it is always `materialize(steps, n)` for some `n`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub hole_cards: BTreeMap<Seat, Vec<Card>>,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub acting_seat: Option<Seat>,
    pub winners: BTreeSet<Seat>,
    pub awarded: BTreeMap<Seat, Chips>,
    pub folded: BTreeSet<Seat>,
    pub street: Option<Street>,
    pub showdown: bool,
    /// Steps folded into this snapshot.
    pub applied: usize,
}

impl TableSnapshot {
    /// Folds a single step into the snapshot.
    pub fn apply(&mut self, step: &ReplayStep) {
        match &step.kind {
            StepKind::RevealHoleCards { seat, cards } => {
                self.hole_cards.insert(*seat, cards.clone());
            }
            StepKind::PostBlind { seat, amount } => {
                self.street.get_or_insert(Street::Preflop);
                self.pot = self.pot.saturating_add(*amount);
                self.acting_seat = Some(*seat);
            }
            StepKind::PlayerAction { street, action } => {
                self.street = Some(*street);
                self.pot = self.pot.saturating_add(action.chips());
                self.acting_seat = Some(action.seat);
                if action.kind == ActionKind::Fold {
                    self.folded.insert(action.seat);
                }
            }
            StepKind::RevealBoard { street, cards } => {
                self.street = Some(*street);
                self.board.extend_from_slice(cards);
                self.acting_seat = None;
            }
            StepKind::EnterShowdown => {
                self.showdown = true;
                self.acting_seat = None;
            }
            StepKind::AwardPot { seat, amount } => {
                self.winners.insert(*seat);
                let won = self.awarded.entry(*seat).or_insert(0);
                *won = won.saturating_add(*amount);
                self.acting_seat = Some(*seat);
            }
        }
        self.applied += 1;
    }

    pub fn awarded_total(&self) -> Chips {
        self.awarded.values().sum()
    }
}

/// Folds `steps[..upto]` over an empty table. `upto` is clamped to the length.
pub fn materialize(steps: &[ReplayStep], upto: usize) -> TableSnapshot {
    steps[..upto.min(steps.len())]
        .iter()
        .fold(TableSnapshot::default(), |mut snap, step| {
            snap.apply(step);
            snap
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    #[test]
    fn blinds_and_actions_accumulate_pot() {
        let steps = vec![
            ReplayStep::new(StepKind::PostBlind { seat: 1, amount: 1 }),
            ReplayStep::new(StepKind::PostBlind { seat: 2, amount: 2 }),
            ReplayStep::new(StepKind::PlayerAction {
                street: Street::Preflop,
                action: Action::call(1, 1),
            }),
            ReplayStep::new(StepKind::PlayerAction {
                street: Street::Preflop,
                action: Action::check(2),
            }),
        ];
        let snap = materialize(&steps, steps.len());
        assert_eq!(snap.pot, 4);
        assert_eq!(snap.acting_seat, Some(2));
        assert_eq!(snap.street, Some(Street::Preflop));
        assert_eq!(snap.applied, 4);
    }

    #[test]
    fn materialize_clamps_past_end() {
        let steps = vec![ReplayStep::new(StepKind::EnterShowdown)];
        assert_eq!(materialize(&steps, 10), materialize(&steps, 1));
        assert_eq!(materialize(&steps, 0), TableSnapshot::default());
    }

    #[test]
    fn fold_marks_seat() {
        let mut snap = TableSnapshot::default();
        snap.apply(&ReplayStep::new(StepKind::PlayerAction {
            street: Street::Flop,
            action: Action::fold(7),
        }));
        assert!(snap.folded.contains(&7));
        assert_eq!(snap.pot, 0);
    }
}
