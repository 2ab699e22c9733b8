use thiserror::Error;

use crate::config::ConfigError;

/// Why an offered action was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IllegalAction {
    #[error("cannot check while facing a bet of {to_call}")]
    CheckFacingBet { to_call: u32 },
    #[error("cannot call when there is nothing to call")]
    CallWithoutBet,
    #[error("raise to {total} is below the minimum raise of {minimum}")]
    RaiseBelowMinimum { total: u32, minimum: u32 },
    #[error("raise to {total} exceeds the largest possible bet of {maximum}")]
    RaiseAboveStack { total: u32, maximum: u32 },
    #[error("seat has folded or is all-in")]
    SeatCannotAct,
}

/// Fatal conditions of a hand. Any of these aborts the enclosing
/// `Table::play_hand`; chip movements already applied are not rolled back.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{name} has a stack of {stack}, above the maximum buy-in of {max_buy_in}")]
    StackAboveMaxBuyIn {
        name: String,
        stack: u32,
        max_buy_in: u32,
    },
    #[error("illegal action from seat {seat}: {reason}")]
    IllegalAction { seat: usize, reason: IllegalAction },
    #[error("requested {requested} chips but only {available} remain in the stack")]
    InsufficientChips { requested: u32, available: u32 },
    #[error("seat {seat} reached showdown without hole cards")]
    MissingHoleCards { seat: usize },
    #[error("deck exhausted")]
    DeckExhausted,
}
