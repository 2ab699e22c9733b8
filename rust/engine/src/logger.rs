//! Hand narration.
//!
//! Every hand records a sequence of [`HandEvent`]s. Narrated hands also
//! emit each event at `INFO` on the `tablesim::hand` target; quiet hands
//! emit at `TRACE`. The text carries no semantic contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;

pub const HAND_TARGET: &str = "tablesim::hand";

/// Whether a pot award came from the main pot or a side pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotKind {
    /// Every contender was in the pot and all others folded
    Uncontested,
    Main,
    Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandEvent {
    Dealt { name: String, stack: u32, cards: [Card; 2] },
    SmallBlind { name: String, amount: u32 },
    BigBlind { name: String, amount: u32 },
    Board { street: Street, cards: Vec<Card> },
    Check { name: String },
    Fold { name: String },
    Call { name: String, amount: u32 },
    AllInCall { name: String, amount: u32 },
    Raise { name: String, by: u32, to: u32, all_in: bool },
    Uncalled { name: String, amount: u32 },
    Win { name: String, amount: u32, pot: PotKind },
    OddChips { name: String, amount: u32 },
}

impl fmt::Display for HandEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandEvent::Dealt { name, stack, cards } => {
                write!(f, "{}({}) dealt {} and {}", name, stack, cards[0], cards[1])
            }
            HandEvent::SmallBlind { name, amount } => {
                write!(f, "{} posts small blind of {}", name, amount)
            }
            HandEvent::BigBlind { name, amount } => {
                write!(f, "{} posts big blind of {}", name, amount)
            }
            HandEvent::Board { street, cards } => {
                write!(f, "{}: [", street)?;
                for (i, c) in cards.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "]")
            }
            HandEvent::Check { name } => write!(f, "{} checks", name),
            HandEvent::Fold { name } => write!(f, "{} folds", name),
            HandEvent::Call { name, amount } => write!(f, "{} calls {}", name, amount),
            HandEvent::AllInCall { name, amount } => {
                write!(f, "{} all-in calls with {}", name, amount)
            }
            HandEvent::Raise {
                name,
                by,
                to,
                all_in,
            } => {
                if *all_in {
                    write!(f, "{} raises all-in {} to {}", name, by, to)
                } else {
                    write!(f, "{} raises {} to {}", name, by, to)
                }
            }
            HandEvent::Uncalled { name, amount } => {
                write!(f, "{} uncalled chips return to {}", amount, name)
            }
            HandEvent::Win { name, amount, pot } => match pot {
                PotKind::Uncontested => write!(f, "{} wins {}", name, amount),
                PotKind::Main => write!(f, "{} wins {} from main pot", name, amount),
                PotKind::Side => write!(f, "{} wins {} from side pot", name, amount),
            },
            HandEvent::OddChips { name, amount } => {
                write!(f, "{} wins {} odd chips", name, amount)
            }
        }
    }
}

/// Event sink for the hand in progress.
#[derive(Debug, Clone, Default)]
pub struct HandLog {
    narrate: bool,
    events: Vec<HandEvent>,
}

impl HandLog {
    pub fn new(narrate: bool) -> Self {
        Self {
            narrate,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: HandEvent) {
        if self.narrate {
            tracing::info!(target: HAND_TARGET, "{}", event);
        } else {
            tracing::trace!(target: HAND_TARGET, "{}", event);
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[HandEvent] {
        &self.events
    }

    pub fn is_narrated(&self) -> bool {
        self.narrate
    }

    /// Narration lines in event order.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}
