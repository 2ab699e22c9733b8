use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::rules::{legal_actions, LegalActions};

/// One of the four betting phases of a hand.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(s)
    }
}

/// Per-hand betting ledger, indexed by seat position in the hand.
///
/// The table and betting engine mutate it; participants only ever see it
/// through a [`RoundView`].
#[derive(Debug, Clone)]
pub struct RoundState {
    pub(crate) num_seats: usize,
    pub(crate) dealer: usize,
    pub(crate) street: Street,
    /// Contributions from completed streets.
    pub(crate) pot_by_street: Vec<u32>,
    /// Contributions in the street being bet.
    pub(crate) current_bets: Vec<u32>,
    pub(crate) folded: BTreeSet<usize>,
    pub(crate) all_in: BTreeSet<usize>,
    pub(crate) board: Vec<Card>,
    pub(crate) actor: Option<usize>,
    pub(crate) to_call: u32,
    pub(crate) min_raise: u32,
    pub(crate) raise_count: Vec<u32>,
    hole_cards: Vec<Option<[Card; 2]>>,
}

impl RoundState {
    pub fn new(num_seats: usize, dealer: usize) -> Self {
        Self {
            num_seats,
            dealer,
            street: Street::Preflop,
            pot_by_street: vec![0; num_seats],
            current_bets: vec![0; num_seats],
            folded: BTreeSet::new(),
            all_in: BTreeSet::new(),
            board: Vec::with_capacity(5),
            actor: None,
            to_call: 0,
            min_raise: 0,
            raise_count: vec![0; num_seats],
            hole_cards: vec![None; num_seats],
        }
    }

    pub fn view(&self) -> RoundView<'_> {
        RoundView { state: self }
    }

    pub fn num_seats(&self) -> usize {
        self.num_seats
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn pot_by_street(&self) -> &[u32] {
        &self.pot_by_street
    }

    pub fn current_bets(&self) -> &[u32] {
        &self.current_bets
    }

    pub fn is_folded(&self, seat: usize) -> bool {
        self.folded.contains(&seat)
    }

    pub fn is_all_in(&self, seat: usize) -> bool {
        self.all_in.contains(&seat)
    }

    /// Seats that have neither folded nor gone all-in.
    pub fn is_live(&self, seat: usize) -> bool {
        !self.is_folded(seat) && !self.is_all_in(seat)
    }

    pub fn live_seats(&self) -> Vec<usize> {
        (0..self.num_seats).filter(|&s| self.is_live(s)).collect()
    }

    /// Seats still contending for the pot, all-in or not.
    pub fn contenders(&self) -> usize {
        self.num_seats - self.folded.len()
    }

    pub fn max_bet(&self) -> u32 {
        self.current_bets.iter().copied().max().unwrap_or(0)
    }

    /// Everything committed so far, completed streets plus the current one.
    pub fn total_pot(&self) -> u32 {
        self.pot_by_street.iter().sum::<u32>() + self.current_bets.iter().sum::<u32>()
    }

    pub(crate) fn hole_cards(&self, seat: usize) -> Option<[Card; 2]> {
        self.hole_cards.get(seat).copied().flatten()
    }

    pub(crate) fn set_hole_cards(&mut self, seat: usize, cards: [Card; 2]) {
        self.hole_cards[seat] = Some(cards);
    }

    pub(crate) fn begin_street(&mut self, street: Street, first_actor: usize, min_raise: u32) {
        self.street = street;
        self.actor = Some(first_actor % self.num_seats);
        self.min_raise = min_raise;
        self.to_call = 0;
    }

    pub(crate) fn fold(&mut self, seat: usize) {
        self.all_in.remove(&seat);
        self.folded.insert(seat);
    }

    pub(crate) fn mark_all_in(&mut self, seat: usize) {
        if !self.folded.contains(&seat) {
            self.all_in.insert(seat);
        }
    }

    /// Moves the street's bets into the completed-street ledger.
    pub(crate) fn close_street(&mut self) {
        for (pot, bet) in self.pot_by_street.iter_mut().zip(self.current_bets.iter_mut()) {
            *pot += *bet;
            *bet = 0;
        }
        self.raise_count.iter_mut().for_each(|r| *r = 0);
        self.actor = None;
        self.to_call = 0;
    }
}

/// Read-only snapshot of a [`RoundState`] handed to the seat on turn.
///
/// Other seats' hole cards are never reachable through it.
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    state: &'a RoundState,
}

impl<'a> RoundView<'a> {
    pub fn num_seats(&self) -> usize {
        self.state.num_seats
    }

    pub fn dealer(&self) -> usize {
        self.state.dealer
    }

    pub fn street(&self) -> Street {
        self.state.street
    }

    pub fn to_call(&self) -> u32 {
        self.state.to_call
    }

    pub fn min_raise(&self) -> u32 {
        self.state.min_raise
    }

    pub fn board(&self) -> &'a [Card] {
        &self.state.board
    }

    pub fn pot_by_street(&self) -> &'a [u32] {
        &self.state.pot_by_street
    }

    pub fn current_bets(&self) -> &'a [u32] {
        &self.state.current_bets
    }

    pub fn folded(&self) -> &'a BTreeSet<usize> {
        &self.state.folded
    }

    pub fn all_in(&self) -> &'a BTreeSet<usize> {
        &self.state.all_in
    }

    pub fn actor(&self) -> Option<usize> {
        self.state.actor
    }

    pub fn raise_count(&self) -> &'a [u32] {
        &self.state.raise_count
    }

    pub fn total_pot(&self) -> u32 {
        self.state.total_pot()
    }

    /// The acting seat's contribution to the current street.
    pub fn my_current_bet(&self) -> u32 {
        self.state
            .actor
            .map(|a| self.state.current_bets[a])
            .unwrap_or(0)
    }

    /// Actions the acting seat may offer given its stack.
    pub fn legal_actions(&self, stack: u32) -> LegalActions {
        legal_actions(stack, self.my_current_bet(), self.to_call(), self.min_raise())
    }
}
