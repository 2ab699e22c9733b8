//! Showdown settlement with side pots.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::game::RoundState;
use crate::logger::{HandEvent, HandLog, PotKind};
use crate::oracle::{Strength, StrengthOracle};
use crate::player::Participant;

/// One contribution tier of the pot and the seats that may win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPot {
    pub amount: u32,
    pub eligible: Vec<usize>,
}

/// Chips paid to one seat out of one sub-pot, odd chips included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    /// Index into the sub-pots; 0 is the main pot.
    pub pot: usize,
    pub seat: usize,
    pub amount: u32,
}

/// Splits per-seat hand contributions into tiers.
///
/// Each pass takes the smallest remaining contribution among seats still
/// in the hand, moves up to that much from every seat (folded ones
/// included) into a sub-pot, and makes the non-folded seats that fed it
/// eligible. Passes repeat until every contribution is used up, so each
/// chip lands in exactly one sub-pot.
///
/// ```
/// use std::collections::BTreeSet;
/// use tablesim_engine::pot::{side_pots, SubPot};
///
/// let pots = side_pots(&[10, 30, 30], &BTreeSet::new());
/// assert_eq!(pots[0], SubPot { amount: 30, eligible: vec![0, 1, 2] });
/// assert_eq!(pots[1], SubPot { amount: 40, eligible: vec![1, 2] });
/// ```
pub fn side_pots(contributions: &[u32], folded: &BTreeSet<usize>) -> Vec<SubPot> {
    let n = contributions.len();
    let mut remaining = contributions.to_vec();
    let mut pots = Vec::new();

    while remaining.iter().any(|&c| c > 0) {
        let mut eligible: Vec<usize> = (0..n)
            .filter(|s| !folded.contains(s) && remaining[*s] > 0)
            .collect();
        let tier = match eligible.iter().map(|&s| remaining[s]).min() {
            Some(tier) => tier,
            None => {
                // only dead money is left; it goes to whoever is still in
                eligible = (0..n).filter(|s| !folded.contains(s)).collect();
                if eligible.is_empty() {
                    eligible = (0..n).filter(|&s| remaining[s] > 0).collect();
                }
                remaining.iter().copied().max().unwrap_or(0)
            }
        };

        let mut amount = 0;
        for c in remaining.iter_mut() {
            let take = tier.min(*c);
            *c -= take;
            amount += take;
        }
        pots.push(SubPot { amount, eligible });
    }
    pots
}

/// Pays out `pot_by_street` to the best hands of each tier.
///
/// Live seats are ranked once through `oracle`; with an empty board the
/// hand was folded out before the flop and the oracle is not consulted.
/// Tied winners split a sub-pot evenly and any remainder goes one chip at
/// a time to the winners in seat order starting left of the dealer.
/// Leaves every contribution at zero.
pub fn settle(
    state: &mut RoundState,
    seats: &mut [Box<dyn Participant>],
    oracle: &dyn StrengthOracle,
    log: &mut HandLog,
) -> Result<Vec<PotAward>, GameError> {
    if state.current_bets.iter().any(|&b| b > 0) {
        state.close_street();
    }
    let n = state.num_seats;
    let uncontested = state.board.is_empty();

    let mut ranks: Vec<Option<Strength>> = vec![None; n];
    for (seat, rank) in ranks.iter_mut().enumerate() {
        if state.is_folded(seat) {
            continue;
        }
        *rank = Some(if uncontested {
            Strength::UNCONTESTED
        } else {
            let hole = state
                .hole_cards(seat)
                .ok_or(GameError::MissingHoleCards { seat })?;
            oracle.rank(&state.board, hole)
        });
    }

    let total = state.pot_by_street.iter().sum::<u32>();
    let pots = side_pots(&state.pot_by_street, &state.folded);
    state.pot_by_street.iter_mut().for_each(|c| *c = 0);

    let mut awards = Vec::new();
    for (index, pot) in pots.iter().enumerate() {
        let kind = if uncontested {
            PotKind::Uncontested
        } else if index == 0 {
            PotKind::Main
        } else {
            PotKind::Side
        };
        let best = pot.eligible.iter().filter_map(|&s| ranks[s]).min();
        let winners: Vec<usize> = match best {
            Some(best) => pot
                .eligible
                .iter()
                .copied()
                .filter(|&s| ranks[s] == Some(best))
                .collect(),
            // nobody left in the hand fed this tier
            None => pot.eligible.clone(),
        };
        if winners.is_empty() {
            continue;
        }

        let share = pot.amount / winners.len() as u32;
        let mut paid = vec![0u32; n];
        for &w in &winners {
            paid[w] += share;
            if share > 0 {
                log.record(HandEvent::Win {
                    name: seats[w].name().to_string(),
                    amount: share,
                    pot: kind,
                });
            }
        }

        let mut odd = pot.amount - share * winners.len() as u32;
        let mut seat = (state.dealer + 1) % n;
        while odd > 0 {
            if winners.contains(&seat) {
                paid[seat] += 1;
                odd -= 1;
                log.record(HandEvent::OddChips {
                    name: seats[seat].name().to_string(),
                    amount: 1,
                });
            }
            seat = (seat + 1) % n;
        }

        for (seat, &amount) in paid.iter().enumerate() {
            if amount > 0 {
                seats[seat].credit_chips(amount);
                awards.push(PotAward {
                    pot: index,
                    seat,
                    amount,
                });
            }
        }
    }

    debug_assert_eq!(awards.iter().map(|a| a.amount).sum::<u32>(), total);
    tracing::debug!(pot = total, sub_pots = pots.len(), "pot settled");
    Ok(awards)
}
