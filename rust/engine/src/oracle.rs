//! Boundary to the hand-strength evaluator.
//!
//! The engine never evaluates hands itself. It asks a [`StrengthOracle`]
//! for a comparable [`Strength`] per live seat and lets the pot settlement
//! pick the lowest.

use crate::cards::Card;

/// Comparable hand strength. Lower wins; equal values split.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Strength(pub u32);

impl Strength {
    /// Assigned to the sole remaining seat when the hand ends before any
    /// community card is revealed. Oracles should not return it.
    pub const UNCONTESTED: Strength = Strength(0);
}

/// Ranks a two-card holding against a board of 0, 3, 4 or 5 cards.
///
/// Any encoding the underlying evaluator needs is the implementor's concern.
pub trait StrengthOracle {
    fn rank(&self, board: &[Card], hole: [Card; 2]) -> Strength;
}

impl<F> StrengthOracle for F
where
    F: Fn(&[Card], [Card; 2]) -> Strength,
{
    fn rank(&self, board: &[Card], hole: [Card; 2]) -> Strength {
        self(board, hole)
    }
}
