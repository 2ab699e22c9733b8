//! # tablesim-engine: No-Limit Hold'em Table Simulation
//!
//! Plays multi-player no-limit Texas Hold'em hands end to end for
//! unattended simulation: seating, dealing, four betting streets with side
//! pots, settlement, dealer rotation and elimination. Decision making and
//! hand evaluation plug in through traits.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card)
//! - [`deck`] - Seeded ChaCha20 shuffling and dealing
//! - [`engine`] - The [`Table`](engine::Table) that runs whole hands
//! - [`game`] - Per-hand round state and the read-only participant view
//! - [`betting`] - One street of betting to closure
//! - [`pot`] - Side pot partition and settlement
//! - [`rules`] - Action validation and the legal action menu
//! - [`player`] - Actions, the [`Participant`](player::Participant) trait and [`Wallet`](player::Wallet)
//! - [`oracle`] - The hand-strength boundary
//! - [`config`] - Table stakes, loaded from TOML
//! - [`logger`] - Hand narration events
//! - [`errors`] - Error types for hand simulation
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesim_engine::rules::legal_actions;
//! use tablesim_engine::player::Action;
//!
//! // Stack of 150 facing a 20 chip bet with 40 as the minimum raise.
//! let menu = legal_actions(150, 0, 20, 40);
//! assert!(menu.allows(Action::Call));
//! assert!(menu.allows(Action::RaiseTo(150)));
//! assert!(!menu.allows(Action::Check));
//! ```
//!
//! ## Deterministic Shuffles
//!
//! ```rust
//! use tablesim_engine::deck::Deck;
//!
//! let mut d1 = Deck::new_with_seed(42);
//! let mut d2 = Deck::new_with_seed(42);
//! d1.shuffle();
//! d2.shuffle();
//! assert_eq!(d1.deal_card(), d2.deal_card());
//! ```

pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod logger;
pub mod oracle;
pub mod player;
pub mod pot;
pub mod rules;

#[cfg(test)]
mod test_support;
