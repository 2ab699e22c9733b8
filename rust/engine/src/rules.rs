use crate::errors::IllegalAction;
use crate::player::Action;

/// An action checked against the seat's stack and the street's bets, with
/// the chip amounts it moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    /// Chips added to match the largest bet.
    Call(u32),
    /// The whole remaining stack, which does not exceed the amount to call.
    AllInCall(u32),
    /// New street total, chips added to reach it, and whether that empties
    /// the stack.
    RaiseTo { total: u32, chips: u32, all_in: bool },
}

/// Validates an action for a seat holding `stack` chips that has already
/// put `current_bet` into the street and faces `to_call` more.
///
/// `min_raise` is the smallest legal street total for a raise; the largest
/// is `stack + current_bet`. A call that cannot cover `to_call` becomes an
/// all-in call for the whole stack.
///
/// # Examples
///
/// ```
/// use tablesim_engine::player::Action;
/// use tablesim_engine::rules::{validate_action, ValidatedAction};
///
/// // Stack 1000, 20 already in, 30 more to call, raises must reach 100.
/// let call = validate_action(1000, 20, 30, 100, Action::Call);
/// assert_eq!(call, Ok(ValidatedAction::Call(30)));
///
/// let short = validate_action(25, 20, 30, 100, Action::Call);
/// assert_eq!(short, Ok(ValidatedAction::AllInCall(25)));
///
/// let raise = validate_action(1000, 20, 30, 100, Action::RaiseTo(150));
/// assert_eq!(
///     raise,
///     Ok(ValidatedAction::RaiseTo { total: 150, chips: 130, all_in: false })
/// );
/// ```
///
/// ```
/// use tablesim_engine::errors::IllegalAction;
/// use tablesim_engine::player::Action;
/// use tablesim_engine::rules::validate_action;
///
/// assert_eq!(
///     validate_action(1000, 0, 50, 100, Action::Check),
///     Err(IllegalAction::CheckFacingBet { to_call: 50 })
/// );
/// assert_eq!(
///     validate_action(1000, 0, 50, 100, Action::RaiseTo(80)),
///     Err(IllegalAction::RaiseBelowMinimum { total: 80, minimum: 100 })
/// );
/// ```
pub fn validate_action(
    stack: u32,
    current_bet: u32,
    to_call: u32,
    min_raise: u32,
    action: Action,
) -> Result<ValidatedAction, IllegalAction> {
    match action {
        Action::Fold => Ok(ValidatedAction::Fold),
        Action::Check => {
            if to_call == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(IllegalAction::CheckFacingBet { to_call })
            }
        }
        Action::Call => {
            if to_call == 0 {
                Err(IllegalAction::CallWithoutBet)
            } else if stack <= to_call {
                Ok(ValidatedAction::AllInCall(stack))
            } else {
                Ok(ValidatedAction::Call(to_call))
            }
        }
        Action::RaiseTo(total) => {
            let maximum = stack.saturating_add(current_bet);
            if total < min_raise {
                Err(IllegalAction::RaiseBelowMinimum {
                    total,
                    minimum: min_raise,
                })
            } else if total > maximum {
                Err(IllegalAction::RaiseAboveStack { total, maximum })
            } else {
                // total >= min_raise > current_bet for every reachable state
                let chips = total.saturating_sub(current_bet);
                Ok(ValidatedAction::RaiseTo {
                    total,
                    chips,
                    all_in: chips == stack,
                })
            }
        }
    }
}

/// The menu of actions a seat may offer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegalActions {
    pub check: bool,
    /// Chips a call would move; equals the stack for an all-in call.
    pub call: Option<u32>,
    pub fold: bool,
    /// Inclusive bounds on the street total of a raise.
    pub raise: Option<(u32, u32)>,
}

impl LegalActions {
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Fold => self.fold,
            Action::Check => self.check,
            Action::Call => self.call.is_some(),
            Action::RaiseTo(total) => self
                .raise
                .is_some_and(|(lo, hi)| (lo..=hi).contains(&total)),
        }
    }
}

/// Builds the action menu for a seat.
///
/// When `to_call >= stack` only an all-in call and a fold are offered.
/// Otherwise a raise is offered if `stack + current_bet` reaches
/// `min_raise`, and the seat may check when nothing is owed or call and
/// fold when facing a bet.
pub fn legal_actions(stack: u32, current_bet: u32, to_call: u32, min_raise: u32) -> LegalActions {
    if to_call > 0 && to_call >= stack {
        return LegalActions {
            call: Some(stack),
            fold: true,
            ..LegalActions::default()
        };
    }
    let max_total = stack.saturating_add(current_bet);
    let raise = (max_total >= min_raise).then_some((min_raise, max_total));
    if to_call == 0 {
        LegalActions {
            check: true,
            raise,
            ..LegalActions::default()
        }
    } else {
        LegalActions {
            call: Some(to_call),
            fold: true,
            raise,
            ..LegalActions::default()
        }
    }
}
