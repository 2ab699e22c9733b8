//! Shared fixtures for the table integration tests.
//!
//! - [`Seat`]: a participant that replays a queued script, then checks or
//!   calls, and registers its hole cards with a fixed strength.
//! - [`BookOracle`]: ranks hole cards from the shared [`StrengthBook`].
//! - [`capture`]: collects `tracing` events emitted while a closure runs.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tablesim_engine::cards::Card;
use tablesim_engine::config::TableConfig;
use tablesim_engine::engine::Table;
use tablesim_engine::errors::GameError;
use tablesim_engine::game::RoundView;
use tablesim_engine::oracle::{Strength, StrengthOracle};
use tablesim_engine::player::{Action, Participant, Wallet};
use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

/// Strength of every holding dealt so far, keyed by the exact hole cards.
pub type StrengthBook = Rc<RefCell<HashMap<[Card; 2], Strength>>>;

/// Strength given to holdings nobody registered.
pub const UNRANKED: Strength = Strength(1_000);

pub struct Seat {
    name: String,
    wallet: Wallet,
    script: VecDeque<Action>,
    strength: Option<Strength>,
    book: StrengthBook,
    hands_ended: Rc<Cell<usize>>,
}

impl Seat {
    pub fn new(name: &str, stack: u32, book: &StrengthBook) -> Self {
        Self {
            name: name.to_string(),
            wallet: Wallet::with_stack(0, stack),
            script: VecDeque::new(),
            strength: None,
            book: Rc::clone(book),
            hands_ended: Rc::new(Cell::new(0)),
        }
    }

    pub fn script(mut self, actions: Vec<Action>) -> Self {
        self.script = actions.into();
        self
    }

    /// Every holding dealt to this seat ranks as `strength`.
    pub fn strength(mut self, strength: u32) -> Self {
        self.strength = Some(Strength(strength));
        self
    }

    pub fn bankroll(mut self, bankroll: u32) -> Self {
        self.wallet.set_bankroll(bankroll);
        self
    }

    pub fn hands_ended(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.hands_ended)
    }

    pub fn boxed(self) -> Box<dyn Participant> {
        Box::new(self)
    }
}

impl Participant for Seat {
    fn name(&self) -> &str {
        &self.name
    }

    fn receive_hole_cards(&mut self, cards: [Card; 2]) {
        if let Some(strength) = self.strength {
            self.book.borrow_mut().insert(cards, strength);
        }
    }

    fn act(&mut self, view: &RoundView<'_>) -> Action {
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

    fn end_of_hand(&mut self) {
        self.hands_ended.set(self.hands_ended.get() + 1);
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

pub struct BookOracle {
    book: StrengthBook,
    calls: Rc<Cell<usize>>,
}

impl BookOracle {
    pub fn new(book: &StrengthBook) -> Self {
        Self {
            book: Rc::clone(book),
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl StrengthOracle for BookOracle {
    fn rank(&self, _board: &[Card], hole: [Card; 2]) -> Strength {
        self.calls.set(self.calls.get() + 1);
        self.book.borrow().get(&hole).copied().unwrap_or(UNRANKED)
    }
}

pub fn new_book() -> StrengthBook {
    Rc::new(RefCell::new(HashMap::new()))
}

/// A 1/2 table with a 200 max buy-in and a fixed seed, backed by a
/// [`BookOracle`]. Returns the oracle's call counter alongside.
pub fn table_with_book(book: &StrengthBook, seed: u64) -> (Table, Rc<Cell<usize>>) {
    let oracle = BookOracle::new(book);
    let calls = oracle.calls();
    let table = Table::new(TableConfig::new(1, 2, 200).with_seed(seed), Box::new(oracle))
        .expect("valid table config");
    (table, calls)
}

pub fn names(seats: &[Box<dyn Participant>]) -> Vec<String> {
    seats.iter().map(|p| p.name().to_string()).collect()
}

pub fn total_chips(table: &Table) -> u32 {
    table.participants().map(|p| p.stack()).sum()
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
}

struct CaptureLayer {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl<S: tracing::Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.entries.lock().unwrap().push(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
        });
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        }
    }
}

/// Runs `f` with a thread-local subscriber and returns what it logged.
pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<LogEntry>) {
    let entries = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Registry::default().with(CaptureLayer {
        entries: Arc::clone(&entries),
    });
    let out = tracing::subscriber::with_default(subscriber, f);
    let captured = entries.lock().unwrap().clone();
    (out, captured)
}
