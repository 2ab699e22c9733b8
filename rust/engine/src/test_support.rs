//! Scripted participants for unit tests.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::cards::Card;
use crate::errors::GameError;
use crate::game::RoundView;
use crate::player::{Action, Participant, Wallet};

/// Plays queued actions in order, then checks or calls.
pub(crate) struct Scripted {
    name: String,
    wallet: Wallet,
    script: VecDeque<Action>,
    asked: Rc<Cell<usize>>,
}

impl Participant for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_hole_cards(&mut self, _cards: [Card; 2]) {}

    fn act(&mut self, view: &RoundView<'_>) -> Action {
        self.asked.set(self.asked.get() + 1);
        self.script.pop_front().unwrap_or(if view.to_call() == 0 {
            Action::Check
        } else {
            Action::Call
        })
    }

    fn credit_chips(&mut self, amount: u32) {
        self.wallet.credit(amount)
    }

    fn debit_chips(&mut self, amount: u32) -> Result<(), GameError> {
        self.wallet.debit(amount)
    }

    fn end_of_hand(&mut self) {}

    fn stack(&self) -> u32 {
        self.wallet.stack()
    }

    fn bankroll(&self) -> u32 {
        self.wallet.bankroll()
    }

    fn buy_in(&mut self, target_stack: u32) -> bool {
        self.wallet.buy_in(target_stack)
    }

    fn cash_out(&mut self) {
        self.wallet.cash_out()
    }
}

pub(crate) fn scripted(name: &str, stack: u32, script: Vec<Action>) -> Scripted {
    Scripted {
        name: name.to_string(),
        wallet: Wallet::with_stack(0, stack),
        script: script.into(),
        asked: Rc::new(Cell::new(0)),
    }
}

/// Per-seat count of `act` calls, kept after the seats are boxed.
pub(crate) struct AskCounts(Vec<Rc<Cell<usize>>>);

impl AskCounts {
    pub(crate) fn get(&self) -> Vec<usize> {
        self.0.iter().map(|c| c.get()).collect()
    }
}

pub(crate) fn seats_from(players: Vec<Scripted>) -> (Vec<Box<dyn Participant>>, AskCounts) {
    let counts = AskCounts(players.iter().map(|p| Rc::clone(&p.asked)).collect());
    let seats = players
        .into_iter()
        .map(|p| Box::new(p) as Box<dyn Participant>)
        .collect();
    (seats, counts)
}

pub(crate) fn stacks(seats: &[Box<dyn Participant>]) -> Vec<u32> {
    seats.iter().map(|p| p.stack()).collect()
}
