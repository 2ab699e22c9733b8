//! # tablesim-ai: Ready-made Table Participants
//!
//! Simple [`Participant`] implementations for driving
//! `tablesim_engine::engine::Table` in unattended simulations.
//!
//! ## Core Components
//!
//! - [`random::RandomPlayer`] - Uniformly random choice among legal actions
//! - [`station::CallingStation`] - Checks or calls every decision
//! - [`history::StackHistory`] - Bounded record of per-hand stack changes
//! - [`create_participant`] - Factory by kind name
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesim_ai::create_participant;
//! use tablesim_engine::player::Participant;
//!
//! let mut p = create_participant("random", "r1", 1_000, 42).unwrap();
//! assert!(p.buy_in(200));
//! assert_eq!((p.stack(), p.bankroll()), (200, 800));
//! ```
//!
//! ## Participant Kinds
//!
//! - `"random"` - [`random::RandomPlayer`] with the default raise ladder
//! - `"station"` - [`station::CallingStation`]

use tablesim_engine::player::Participant;
use thiserror::Error;

pub mod history;
pub mod random;
pub mod station;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParticipantError {
    #[error("unknown participant kind: {0}")]
    UnknownKind(String),
    #[error("raise factor must be between 0 and 1, got {0}")]
    InvalidRaiseFactor(f64),
    #[error("at least one raise choice is required")]
    NoRaiseChoices,
}

/// Builds a participant of the named kind holding `bankroll` off the
/// table. `seed` drives any randomness the kind uses.
///
/// ```rust
/// use tablesim_ai::{create_participant, ParticipantError};
/// use tablesim_engine::player::Participant;
///
/// assert_eq!(create_participant("station", "s", 100, 0).unwrap().name(), "s");
/// assert!(matches!(
///     create_participant("oracle", "x", 100, 0),
///     Err(ParticipantError::UnknownKind(_))
/// ));
/// ```
pub fn create_participant(
    kind: &str,
    name: &str,
    bankroll: u32,
    seed: u64,
) -> Result<Box<dyn Participant>, ParticipantError> {
    match kind {
        "random" => Ok(Box::new(random::RandomPlayer::new(name, bankroll, seed))),
        "station" => Ok(Box::new(station::CallingStation::new(name, bankroll))),
        _ => Err(ParticipantError::UnknownKind(kind.to_string())),
    }
}
