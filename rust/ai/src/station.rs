//! Passive participant that never folds or raises.

use tablesim_engine::cards::Card;
use tablesim_engine::errors::GameError;
use tablesim_engine::game::RoundView;
use tablesim_engine::player::{Action, Participant, Wallet};

use crate::history::StackHistory;
use crate::random::DEFAULT_MEMORY;

/// Checks when nothing is owed and calls everything else.
#[derive(Debug, Clone)]
pub struct CallingStation {
    name: String,
    wallet: Wallet,
    history: StackHistory,
}

impl CallingStation {
    pub fn new(name: &str, bankroll: u32) -> Self {
        Self {
            name: name.to_string(),
            wallet: Wallet::new(bankroll),
            history: StackHistory::new(DEFAULT_MEMORY),
        }
    }

    pub fn with_memory(mut self, memory: usize) -> Self {
        self.history = StackHistory::new(memory);
        self
    }

    pub fn history(&self) -> &StackHistory {
        &self.history
    }
}

impl Participant for CallingStation {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_hole_cards(&mut self, _cards: [Card; 2]) {
        self.history.start_hand(self.wallet.stack());
    }

    fn act(&mut self, view: &RoundView<'_>) -> Action {
        if view.to_call() == 0 {
            Action::Check
        } else {
            Action::Call
        }
    }

    fn credit_chips(&mut self, amount: u32) {
        self.wallet.credit(amount)
    }

    fn debit_chips(&mut self, amount: u32) -> Result<(), GameError> {
        self.wallet.debit(amount)
    }

    fn end_of_hand(&mut self) {
        self.history.finish_hand(self.wallet.stack());
    }

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
