use serde::{Deserialize, Serialize};

/// Seat identifier. Seats are stable within a hand but not necessarily contiguous.
pub type Seat = u32;

/// Chip amount.
pub type Chips = u64;

/// Kind of a recorded player action during a betting round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet
    Call,
    /// Open the betting on a street
    Bet,
    /// Raise the current bet
    Raise,
    /// Commit all remaining chips
    AllIn,
}

impl ActionKind {
    /// Fold and check never move chips.
    pub fn carries_amount(self) -> bool {
        !matches!(self, ActionKind::Fold | ActionKind::Check)
    }

    /// Bet, raise and all-in must name a positive amount.
    pub fn requires_amount(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Fold => "folds",
            ActionKind::Check => "checks",
            ActionKind::Call => "calls",
            ActionKind::Bet => "bets",
            ActionKind::Raise => "raises",
            ActionKind::AllIn => "goes all-in",
        }
    }
}

/// One action taken by the player in `seat`.
///
/// `amount` is the number of chips the action moved into the pot. It is
/// always `None` for [`ActionKind::Fold`] and [`ActionKind::Check`] and
/// always positive for bets, raises and all-ins. A call may leave it empty,
/// but a present call amount is positive too.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub seat: Seat,
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Chips>,
}

impl Action {
    /// Builds an action, dropping any amount on kinds that cannot carry one.
    pub fn new(seat: Seat, kind: ActionKind, amount: Option<Chips>) -> Self {
        let amount = if kind.carries_amount() { amount } else { None };
        Self { seat, kind, amount }
    }

    pub fn fold(seat: Seat) -> Self {
        Self::new(seat, ActionKind::Fold, None)
    }

    pub fn check(seat: Seat) -> Self {
        Self::new(seat, ActionKind::Check, None)
    }

    pub fn call(seat: Seat, amount: Chips) -> Self {
        Self::new(seat, ActionKind::Call, Some(amount))
    }

    pub fn bet(seat: Seat, amount: Chips) -> Self {
        Self::new(seat, ActionKind::Bet, Some(amount))
    }

    pub fn raise(seat: Seat, amount: Chips) -> Self {
        Self::new(seat, ActionKind::Raise, Some(amount))
    }

    pub fn all_in(seat: Seat, amount: Chips) -> Self {
        Self::new(seat, ActionKind::AllIn, Some(amount))
    }

    /// Whether `amount` is allowed for this kind of action.
    pub fn has_valid_amount(&self) -> bool {
        match self.amount {
            None => !self.kind.requires_amount(),
            Some(0) => false,
            Some(_) => self.kind.carries_amount(),
        }
    }

    /// Chips this action put into the pot.
    pub fn chips(&self) -> Chips {
        self.amount.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_and_check_never_carry_amount() {
        assert_eq!(Action::new(3, ActionKind::Fold, Some(10)).amount, None);
        assert_eq!(Action::new(3, ActionKind::Check, Some(10)).amount, None);
        assert_eq!(Action::raise(3, 10).amount, Some(10));
    }

    #[test]
    fn amounts_must_fit_the_kind() {
        assert!(Action::fold(1).has_valid_amount());
        assert!(Action::new(1, ActionKind::Call, None).has_valid_amount());
        assert!(Action::call(1, 4).has_valid_amount());
        assert!(!Action::call(1, 0).has_valid_amount());
        assert!(!Action::new(1, ActionKind::Bet, None).has_valid_amount());
        assert!(!Action::raise(1, 0).has_valid_amount());
        assert!(Action::all_in(1, 900).has_valid_amount());
    }

    #[test]
    fn chips_defaults_to_zero() {
        assert_eq!(Action::check(1).chips(), 0);
        assert_eq!(Action::call(1, 40).chips(), 40);
    }
}
