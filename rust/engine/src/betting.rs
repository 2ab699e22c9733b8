//! Runs one street of betting to closure.

use crate::errors::{GameError, IllegalAction};
use crate::game::RoundState;
use crate::logger::{HandEvent, HandLog};
use crate::player::{Action, Participant};
use crate::rules::{validate_action, ValidatedAction};

/// Drives the street whose first actor and minimum raise were set on
/// `state`, asking each live seat in turn for an action.
///
/// The street closes when action returns to the last raiser (the first
/// actor if nobody raised), or when at most one seat can still act and it
/// already matches the largest bet. A lone top bet that nobody matched is
/// trimmed back to the next-highest bet and the excess returned to its
/// owner. The street's bets then move into `pot_by_street`.
///
/// `seats[i]` must be the participant in seat `i` of `state`.
pub fn open_betting(
    state: &mut RoundState,
    seats: &mut [Box<dyn Participant>],
    log: &mut HandLog,
) -> Result<(), GameError> {
    debug_assert_eq!(seats.len(), state.num_seats);
    let n = state.num_seats;
    let mut actor = state.actor.unwrap_or(0);
    let mut last_raiser = actor;
    let mut turn = 0usize;

    loop {
        turn += 1;
        if actor == last_raiser && turn > 1 {
            break;
        }
        let live = state.live_seats();
        if live.is_empty() {
            break;
        }
        // the last live seat already matches everything in front of it
        if live.len() == 1 && state.current_bets[live[0]] == state.max_bet() {
            break;
        }
        if !state.is_live(actor) {
            actor = (actor + 1) % n;
            continue;
        }

        state.actor = Some(actor);
        state.to_call = state.max_bet() - state.current_bets[actor];
        let action = seats[actor].act(&state.view());
        tracing::debug!(
            seat = actor,
            street = %state.street,
            to_call = state.to_call,
            min_raise = state.min_raise,
            action = %action,
            "seat acted"
        );
        if apply_action(state, actor, seats[actor].as_mut(), action, log)? {
            last_raiser = actor;
        }
        actor = (actor + 1) % n;
    }

    return_uncalled(state, seats, log);
    state.close_street();
    Ok(())
}

/// Applies one action for `seat`. Returns true for a raise.
pub(crate) fn apply_action(
    state: &mut RoundState,
    seat: usize,
    player: &mut dyn Participant,
    action: Action,
    log: &mut HandLog,
) -> Result<bool, GameError> {
    if !state.is_live(seat) {
        return Err(GameError::IllegalAction {
            seat,
            reason: IllegalAction::SeatCannotAct,
        });
    }
    let current = state.current_bets[seat];
    let max = state.max_bet();
    let validated = validate_action(player.stack(), current, state.to_call, state.min_raise, action)
        .map_err(|reason| GameError::IllegalAction { seat, reason })?;
    let name = player.name().to_string();

    match validated {
        ValidatedAction::Fold => {
            state.fold(seat);
            log.record(HandEvent::Fold { name });
            Ok(false)
        }
        ValidatedAction::Check => {
            log.record(HandEvent::Check { name });
            Ok(false)
        }
        ValidatedAction::Call(chips) => {
            player.debit_chips(chips)?;
            state.current_bets[seat] += chips;
            log.record(HandEvent::Call {
                name,
                amount: chips,
            });
            Ok(false)
        }
        ValidatedAction::AllInCall(chips) => {
            player.debit_chips(chips)?;
            state.current_bets[seat] += chips;
            state.mark_all_in(seat);
            log.record(HandEvent::AllInCall {
                name,
                amount: chips,
            });
            Ok(false)
        }
        ValidatedAction::RaiseTo {
            total,
            chips,
            all_in,
        } => {
            player.debit_chips(chips)?;
            let by = total - max;
            state.current_bets[seat] = total;
            // the next raise must be at least as large as this one
            state.min_raise = total + by;
            state.raise_count[seat] += 1;
            if all_in {
                state.mark_all_in(seat);
            }
            log.record(HandEvent::Raise {
                name,
                by,
                to: total,
                all_in,
            });
            Ok(true)
        }
    }
}

/// Returns the part of a lone top bet that no other seat matched.
fn return_uncalled(state: &mut RoundState, seats: &mut [Box<dyn Participant>], log: &mut HandLog) {
    let max = state.max_bet();
    if max == 0 {
        return;
    }
    let mut holders = (0..state.num_seats).filter(|&s| state.current_bets[s] == max);
    let (Some(seat), None) = (holders.next(), holders.next()) else {
        return;
    };
    let below = state
        .current_bets
        .iter()
        .copied()
        .filter(|&b| b < max)
        .max()
        .unwrap_or(0);
    let refund = max - below;
    state.current_bets[seat] = below;
    seats[seat].credit_chips(refund);
    // chips came back, so the seat is no longer committed for its whole stack
    state.all_in.remove(&seat);
    log.record(HandEvent::Uncalled {
        name: seats[seat].name().to_string(),
        amount: refund,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Street;
    use crate::test_support::{scripted, seats_from, stacks};
    use Action::*;

    fn preflop(n: usize, first: usize, blinds: &[(usize, u32)], seats: &mut [Box<dyn Participant>]) -> RoundState {
        let mut state = RoundState::new(n, 0);
        for &(seat, amount) in blinds {
            seats[seat].debit_chips(amount).unwrap();
            state.current_bets[seat] += amount;
        }
        state.begin_street(Street::Preflop, first, 20);
        state
    }

    #[test]
    fn everyone_calls_and_big_blind_checks_option() {
        let (mut seats, _) = seats_from(vec![
            scripted("dealer", 200, vec![Call]),
            scripted("sb", 200, vec![Call]),
            scripted("bb", 200, vec![Check]),
        ]);
        let mut state = preflop(3, 0, &[(1, 5), (2, 10)], &mut seats);
        let mut log = HandLog::new(false);
        open_betting(&mut state, &mut seats, &mut log).unwrap();

        assert_eq!(state.pot_by_street(), &[10, 10, 10]);
        assert_eq!(state.current_bets(), &[0, 0, 0]);
        assert_eq!(state.view().actor(), None);
        assert_eq!(stacks(&seats), vec![190, 190, 190]);
        assert_eq!(
            log.lines(),
            vec!["dealer calls 10", "sb calls 5", "bb checks"]
        );
    }

    #[test]
    fn raise_reopens_action_and_sets_min_raise() {
        let (mut seats, asked) = seats_from(vec![
            scripted("a", 500, vec![RaiseTo(30), Call]),
            scripted("b", 500, vec![RaiseTo(80), Fold]),
            scripted("c", 500, vec![Call]),
        ]);
        let mut state = RoundState::new(3, 2);
        state.begin_street(Street::Flop, 0, 10);
        let mut log = HandLog::new(false);

        // a raises to 30 (by 30), b re-raises to 80 (by 50) so min becomes 130,
        // c calls 80, a calls 50; action returns to b and closes.
        open_betting(&mut state, &mut seats, &mut log).unwrap();
        assert_eq!(state.pot_by_street(), &[80, 80, 80]);
        assert_eq!(stacks(&seats), vec![420, 420, 420]);
        assert_eq!(asked.get(), vec![2, 1, 1]);
    }

    #[test]
    fn min_raise_tracks_last_raise_size() {
        let (mut seats, _) = seats_from(vec![
            scripted("a", 500, vec![RaiseTo(30)]),
            scripted("b", 500, vec![RaiseTo(59)]),
        ]);
        let mut state = RoundState::new(2, 1);
        state.begin_street(Street::Turn, 0, 10);
        let mut log = HandLog::new(false);
        let err = open_betting(&mut state, &mut seats, &mut log).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalAction {
                seat: 1,
                reason: IllegalAction::RaiseBelowMinimum {
                    total: 59,
                    minimum: 60
                }
            }
        ));
    }

    #[test]
    fn uncalled_raise_is_returned() {
        let (mut seats, _) = seats_from(vec![
            scripted("a", 300, vec![RaiseTo(100)]),
            scripted("b", 300, vec![Fold]),
            scripted("c", 300, vec![Fold]),
        ]);
        let mut state = preflop(3, 0, &[(1, 5), (2, 10)], &mut seats);
        let mut log = HandLog::new(false);
        open_betting(&mut state, &mut seats, &mut log).unwrap();

        // a's bet is trimmed to the big blind it beat
        assert_eq!(state.pot_by_street(), &[10, 5, 10]);
        assert_eq!(stacks(&seats), vec![290, 295, 290]);
        assert_eq!(
            log.events().last(),
            Some(&HandEvent::Uncalled {
                name: "a".into(),
                amount: 90
            })
        );
    }

    #[test]
    fn short_all_in_call_leaves_excess_returned() {
        let (mut seats, _) = seats_from(vec![
            scripted("a", 400, vec![RaiseTo(300)]),
            scripted("b", 120, vec![Call]),
        ]);
        let mut state = RoundState::new(2, 1);
        state.begin_street(Street::River, 0, 10);
        let mut log = HandLog::new(false);
        open_betting(&mut state, &mut seats, &mut log).unwrap();

        assert!(state.is_all_in(1));
        assert!(!state.is_all_in(0));
        assert_eq!(state.pot_by_street(), &[120, 120]);
        assert_eq!(stacks(&seats), vec![280, 0]);
    }

    #[test]
    fn folded_and_all_in_seats_are_never_asked() {
        let (mut seats, asked) = seats_from(vec![
            scripted("a", 100, vec![RaiseTo(100)]),
            scripted("b", 500, vec![Fold]),
            scripted("c", 500, vec![Call]),
            scripted("d", 500, vec![Call]),
        ]);
        let mut state = RoundState::new(4, 3);
        state.begin_street(Street::Flop, 0, 10);
        let mut log = HandLog::new(false);
        open_betting(&mut state, &mut seats, &mut log).unwrap();

        assert_eq!(asked.get(), vec![1, 1, 1, 1]);
        assert_eq!(state.pot_by_street(), &[100, 0, 100, 100]);
        assert!(state.is_all_in(0));
        assert!(state.is_folded(1));
    }

    #[test]
    fn closes_immediately_when_everyone_is_all_in() {
        let (mut seats, asked) = seats_from(vec![scripted("a", 0, vec![]), scripted("b", 0, vec![])]);
        let mut state = RoundState::new(2, 0);
        state.mark_all_in(0);
        state.mark_all_in(1);
        state.begin_street(Street::Turn, 1, 10);
        let mut log = HandLog::new(false);
        open_betting(&mut state, &mut seats, &mut log).unwrap();
        assert_eq!(asked.get(), vec![0, 0]);
        assert!(log.events().is_empty());
    }

    #[test]
    fn check_facing_bet_is_fatal() {
        let (mut seats, _) = seats_from(vec![
            scripted("a", 100, vec![RaiseTo(10)]),
            scripted("b", 100, vec![Check]),
        ]);
        let mut state = RoundState::new(2, 1);
        state.begin_street(Street::Flop, 0, 10);
        let mut log = HandLog::new(false);
        let err = open_betting(&mut state, &mut seats, &mut log).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalAction {
                seat: 1,
                reason: IllegalAction::CheckFacingBet { to_call: 10 }
            }
        ));
    }

    #[test]
    fn acting_from_a_folded_seat_is_refused() {
        let (mut seats, _) = seats_from(vec![scripted("a", 100, vec![]), scripted("b", 100, vec![])]);
        let mut state = RoundState::new(2, 0);
        state.fold(0);
        let mut log = HandLog::new(false);
        let err = apply_action(&mut state, 0, seats[0].as_mut(), Check, &mut log).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalAction {
                seat: 0,
                reason: IllegalAction::SeatCannotAct
            }
        ));
    }

    #[test]
    fn raise_count_resets_after_street() {
        let (mut seats, _) = seats_from(vec![
            scripted("a", 500, vec![RaiseTo(10), RaiseTo(50)]),
            scripted("b", 500, vec![RaiseTo(20), Call]),
        ]);
        let mut state = RoundState::new(2, 1);
        state.begin_street(Street::Flop, 0, 10);
        let mut log = HandLog::new(false);
        open_betting(&mut state, &mut seats, &mut log).unwrap();
        assert_eq!(state.pot_by_street(), &[50, 50]);
        assert_eq!(state.view().raise_count(), &[0, 0]);
    }
}
