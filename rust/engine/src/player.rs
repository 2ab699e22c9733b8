use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::RoundView;

/// An action offered by the seat on turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    /// Match the largest bet of the street, or go all-in if the stack is short.
    Call,
    /// Bring this seat's total bet for the street up to the given amount.
    RaiseTo(u32),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::RaiseTo(v) => write!(f, "raise to {}", v),
        }
    }
}

/// Everything the table needs from a seated entity.
///
/// Chips move only through [`credit_chips`](Participant::credit_chips) and
/// [`debit_chips`](Participant::debit_chips) while a hand is running;
/// [`buy_in`](Participant::buy_in) and [`cash_out`](Participant::cash_out)
/// are for the driver between hands. Implementors that do not learn can
/// leave [`end_of_hand`](Participant::end_of_hand) empty.
///
/// # Example
///
/// ```
/// use tablesim_engine::cards::Card;
/// use tablesim_engine::errors::GameError;
/// use tablesim_engine::game::RoundView;
/// use tablesim_engine::player::{Action, Participant, Wallet};
///
/// struct AlwaysCall {
///     wallet: Wallet,
/// }
///
/// impl Participant for AlwaysCall {
///     fn name(&self) -> &str {
///         "caller"
///     }
///     fn receive_hole_cards(&mut self, _cards: [Card; 2]) {}
///     fn act(&mut self, view: &RoundView<'_>) -> Action {
///         if view.to_call() == 0 { Action::Check } else { Action::Call }
///     }
///     fn credit_chips(&mut self, amount: u32) {
///         self.wallet.credit(amount)
///     }
///     fn debit_chips(&mut self, amount: u32) -> Result<(), GameError> {
///         self.wallet.debit(amount)
///     }
///     fn end_of_hand(&mut self) {}
///     fn stack(&self) -> u32 {
///         self.wallet.stack()
///     }
///     fn bankroll(&self) -> u32 {
///         self.wallet.bankroll()
///     }
///     fn buy_in(&mut self, target_stack: u32) -> bool {
///         self.wallet.buy_in(target_stack)
///     }
///     fn cash_out(&mut self) {
///         self.wallet.cash_out()
///     }
/// }
///
/// let mut p = AlwaysCall { wallet: Wallet::new(500) };
/// assert!(p.buy_in(200));
/// assert_eq!((p.stack(), p.bankroll()), (200, 300));
/// ```
pub trait Participant {
    /// Label used in narration.
    fn name(&self) -> &str;

    fn receive_hole_cards(&mut self, cards: [Card; 2]);

    /// Chooses an action for the seat on turn. Must return promptly; the
    /// table blocks on this call.
    fn act(&mut self, view: &RoundView<'_>) -> Action;

    fn credit_chips(&mut self, amount: u32);

    /// Removes chips from the stack, failing if the stack is too small.
    fn debit_chips(&mut self, amount: u32) -> Result<(), GameError>;

    /// Called once per played hand after the pot is settled.
    fn end_of_hand(&mut self);

    fn stack(&self) -> u32;

    fn bankroll(&self) -> u32;

    /// Tops the stack up to `target_stack` from the bankroll. Returns false
    /// when bankroll and stack together cannot reach the target.
    fn buy_in(&mut self, target_stack: u32) -> bool;

    /// Moves the whole stack back to the bankroll.
    fn cash_out(&mut self);
}

/// Off-table wealth and on-table chips, kept disjoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    bankroll: u32,
    stack: u32,
}

impl Wallet {
    pub fn new(bankroll: u32) -> Self {
        Self { bankroll, stack: 0 }
    }

    pub fn with_stack(bankroll: u32, stack: u32) -> Self {
        Self { bankroll, stack }
    }

    pub fn stack(&self) -> u32 {
        self.stack
    }

    pub fn bankroll(&self) -> u32 {
        self.bankroll
    }

    pub fn set_bankroll(&mut self, bankroll: u32) {
        self.bankroll = bankroll;
    }

    pub fn credit(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub fn debit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips {
                requested: amount,
                available: self.stack,
            });
        }
        self.stack -= amount;
        Ok(())
    }

    /// A stack already at or above the target is left untouched.
    pub fn buy_in(&mut self, target_stack: u32) -> bool {
        if self.stack >= target_stack {
            return true;
        }
        let needed = target_stack - self.stack;
        if needed > self.bankroll {
            return false;
        }
        self.bankroll -= needed;
        self.stack = target_stack;
        true
    }

    pub fn cash_out(&mut self) {
        self.bankroll = self.bankroll.saturating_add(self.stack);
        self.stack = 0;
    }
}
