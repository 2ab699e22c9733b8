//! Uniformly random participant.
//!
//! Picks among every legal action with equal weight. Raise sizes come from
//! a fixed ladder of stack fractions, each `raise_factor` times the next
//! larger one, ending at the whole stack.

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha20Rng;
use tablesim_engine::cards::Card;
use tablesim_engine::errors::GameError;
use tablesim_engine::game::RoundView;
use tablesim_engine::player::{Action, Participant, Wallet};

use crate::ParticipantError;
use crate::history::StackHistory;

pub const DEFAULT_RAISE_CHOICES: usize = 10;
pub const DEFAULT_RAISE_FACTOR: f64 = 0.7;
pub const DEFAULT_MEMORY: usize = 100_000;

#[derive(Debug)]
pub struct RandomPlayer {
    name: String,
    wallet: Wallet,
    hole: Option<[Card; 2]>,
    raise_fractions: Vec<f64>,
    history: StackHistory,
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    pub fn new(name: &str, bankroll: u32, seed: u64) -> Self {
        Self {
            name: name.to_string(),
            wallet: Wallet::new(bankroll),
            hole: None,
            raise_fractions: raise_ladder(DEFAULT_RAISE_CHOICES, DEFAULT_RAISE_FACTOR),
            history: StackHistory::new(DEFAULT_MEMORY),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Replaces the raise ladder with `choices` fractions of the stack,
    /// smallest first, each `factor` times the next.
    pub fn with_raises(mut self, choices: usize, factor: f64) -> Result<Self, ParticipantError> {
        if choices == 0 {
            return Err(ParticipantError::NoRaiseChoices);
        }
        if choices > 1 && !(factor > 0.0 && factor < 1.0) {
            return Err(ParticipantError::InvalidRaiseFactor(factor));
        }
        self.raise_fractions = raise_ladder(choices, factor);
        Ok(self)
    }

    pub fn with_memory(mut self, memory: usize) -> Self {
        self.history = StackHistory::new(memory);
        self
    }

    pub fn raise_fractions(&self) -> &[f64] {
        &self.raise_fractions
    }

    pub fn history(&self) -> &StackHistory {
        &self.history
    }

    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        self.hole
    }

    /// Every action this seat could legally offer, raises first.
    pub fn candidate_actions(&self, view: &RoundView<'_>) -> Vec<Action> {
        let stack = self.wallet.stack();
        let menu = view.legal_actions(stack);
        let mut actions: Vec<Action> = Vec::new();
        for fraction in &self.raise_fractions {
            let total = (f64::from(stack) * fraction) as u32;
            let raise = Action::RaiseTo(total);
            if menu.allows(raise) && !actions.contains(&raise) {
                actions.push(raise);
            }
        }
        for action in [Action::Check, Action::Call, Action::Fold] {
            if menu.allows(action) {
                actions.push(action);
            }
        }
        actions
    }
}

fn raise_ladder(choices: usize, factor: f64) -> Vec<f64> {
    let mut fractions = vec![1.0];
    for _ in 1..choices {
        fractions.insert(0, fractions[0] * factor);
    }
    fractions
}

impl Participant for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_hole_cards(&mut self, cards: [Card; 2]) {
        self.hole = Some(cards);
        self.history.start_hand(self.wallet.stack());
    }

    fn act(&mut self, view: &RoundView<'_>) -> Action {
        let actions = self.candidate_actions(view);
        let action = actions.choose(&mut self.rng).copied().unwrap_or(Action::Fold);
        tracing::trace!(name = %self.name, options = actions.len(), action = %action, "random choice");
        action
    }

    fn credit_chips(&mut self, amount: u32) {
        self.wallet.credit(amount)
    }

    fn debit_chips(&mut self, amount: u32) -> Result<(), GameError> {
        self.wallet.debit(amount)
    }

    fn end_of_hand(&mut self) {
        self.history.finish_hand(self.wallet.stack());
        self.hole = None;
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
