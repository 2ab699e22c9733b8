use crate::betting::open_betting;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{RoundState, Street};
use crate::logger::{HandEvent, HandLog};
use crate::oracle::StrengthOracle;
use crate::player::Participant;
use crate::pot::settle;

/// A single table that plays no-limit hold'em hands between its seated
/// participants.
///
/// Participants join sitting out. At the start of every hand anyone
/// sitting out with at least a big blind is seated; after the hand anyone
/// below a big blind is benched again until the driver rebuys them.
///
/// # Examples
///
/// ```
/// use tablesim_engine::cards::Card;
/// use tablesim_engine::config::TableConfig;
/// use tablesim_engine::engine::Table;
/// use tablesim_engine::oracle::Strength;
///
/// // An oracle that ranks by the higher hole card only, for illustration.
/// let oracle = |_board: &[Card], hole: [Card; 2]| {
///     Strength(15 - hole[0].rank.max(hole[1].rank) as u32)
/// };
/// let mut table = Table::new(TableConfig::new(1, 2, 200).with_seed(9), Box::new(oracle)).unwrap();
///
/// // No participants yet, so no hand can be played.
/// assert!(!table.play_hand(false).unwrap());
/// assert_eq!(table.blinds_and_max_buy_in(), (1, 2, 200));
/// ```
pub struct Table {
    config: TableConfig,
    oracle: Box<dyn StrengthOracle>,
    deck: Deck,
    /// Seated participants in seat order.
    playing: Vec<Box<dyn Participant>>,
    sitting_out: Vec<Box<dyn Participant>>,
    /// Index into `playing`.
    dealer: usize,
    hands_played: u64,
    last_log: HandLog,
}

impl Table {
    pub fn new(config: TableConfig, oracle: Box<dyn StrengthOracle>) -> Result<Self, GameError> {
        config.validate()?;
        let deck = match config.seed {
            Some(seed) => Deck::new_with_seed(seed),
            None => Deck::from_entropy(),
        };
        Ok(Self {
            config,
            oracle,
            deck,
            playing: Vec::new(),
            sitting_out: Vec::new(),
            dealer: 0,
            hands_played: 0,
            last_log: HandLog::default(),
        })
    }

    /// Registers a participant as sitting out.
    pub fn add_participant(&mut self, participant: Box<dyn Participant>) {
        tracing::debug!(name = participant.name(), stack = participant.stack(), "participant added");
        self.sitting_out.push(participant);
    }

    pub fn list_active(&self) -> &[Box<dyn Participant>] {
        &self.playing
    }

    pub fn list_sitting_out(&self) -> &[Box<dyn Participant>] {
        &self.sitting_out
    }

    /// Seated participants first, then those sitting out. For driver
    /// bookkeeping between hands.
    pub fn participants(&self) -> impl Iterator<Item = &Box<dyn Participant>> + '_ {
        self.playing.iter().chain(self.sitting_out.iter())
    }

    pub fn participants_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Participant>> + '_ {
        self.playing.iter_mut().chain(self.sitting_out.iter_mut())
    }

    pub fn blinds_and_max_buy_in(&self) -> (u32, u32, u32) {
        (
            self.config.small_blind,
            self.config.big_blind,
            self.config.max_buy_in,
        )
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Seat index of the dealer button among the active participants.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Events of the most recently attempted hand.
    pub fn last_hand_log(&self) -> &HandLog {
        &self.last_log
    }

    /// Plays one hand. Returns `Ok(false)` without touching the button when
    /// fewer than two participants can be seated.
    ///
    /// Any error ends the hand where it happened; chips already moved stay
    /// moved.
    pub fn play_hand(&mut self, narrate: bool) -> Result<bool, GameError> {
        self.seat_eligible()?;
        if self.playing.len() < 2 {
            tracing::debug!(active = self.playing.len(), "not enough participants for a hand");
            return Ok(false);
        }
        if self.dealer >= self.playing.len() {
            self.dealer = 0;
        }

        let mut log = HandLog::new(narrate);
        let result = self.run_hand(&mut log);
        self.last_log = log;
        result?;

        for p in self.playing.iter_mut() {
            p.end_of_hand();
        }
        self.rotate_dealer_and_bench();
        self.hands_played += 1;
        Ok(true)
    }

    fn seat_eligible(&mut self) -> Result<(), GameError> {
        let (big_blind, max_buy_in) = (self.config.big_blind, self.config.max_buy_in);
        if let Some(p) = self
            .sitting_out
            .iter()
            .find(|p| p.stack() >= big_blind && p.stack() > max_buy_in)
        {
            return Err(GameError::StackAboveMaxBuyIn {
                name: p.name().to_string(),
                stack: p.stack(),
                max_buy_in,
            });
        }

        let mut i = 0;
        while i < self.sitting_out.len() {
            if self.sitting_out[i].stack() >= big_blind {
                let p = self.sitting_out.remove(i);
                tracing::debug!(name = p.name(), stack = p.stack(), "participant seated");
                self.playing.push(p);
            } else {
                i += 1;
            }
        }
        Ok(())
    }

    fn run_hand(&mut self, log: &mut HandLog) -> Result<(), GameError> {
        let n = self.playing.len();
        let dealer = self.dealer;
        let mut state = RoundState::new(n, dealer);
        self.deck.shuffle();

        for (seat, p) in self.playing.iter_mut().enumerate() {
            let drawn = self.deck.draw(2)?;
            let cards = [drawn[0], drawn[1]];
            state.set_hole_cards(seat, cards);
            p.receive_hole_cards(cards);
            log.record(HandEvent::Dealt {
                name: p.name().to_string(),
                stack: p.stack(),
                cards,
            });
        }

        // heads-up: the dealer posts the small blind and acts first
        let (sb, bb, first) = if n == 2 {
            (dealer, (dealer + 1) % n, dealer)
        } else {
            ((dealer + 1) % n, (dealer + 2) % n, (dealer + 3) % n)
        };
        let posted = self.post_blind(&mut state, sb, self.config.small_blind)?;
        log.record(HandEvent::SmallBlind {
            name: self.playing[sb].name().to_string(),
            amount: posted,
        });
        let posted = self.post_blind(&mut state, bb, self.config.big_blind)?;
        log.record(HandEvent::BigBlind {
            name: self.playing[bb].name().to_string(),
            amount: posted,
        });
        state.begin_street(Street::Preflop, first, 2 * self.config.big_blind);
        open_betting(&mut state, &mut self.playing, log)?;

        for (street, count) in [(Street::Flop, 3), (Street::Turn, 1), (Street::River, 1)] {
            if state.contenders() <= 1 {
                break;
            }
            let cards = self.deck.draw(count)?;
            state.board.extend_from_slice(&cards);
            log.record(HandEvent::Board {
                street,
                cards: state.board.clone(),
            });
            state.begin_street(street, dealer + 1, self.config.big_blind);
            open_betting(&mut state, &mut self.playing, log)?;
        }

        let awards = settle(&mut state, &mut self.playing, self.oracle.as_ref(), log)?;
        tracing::debug!(
            hand = self.hands_played + 1,
            seats = n,
            awards = awards.len(),
            "hand complete"
        );
        Ok(())
    }

    /// Posts up to `amount`, putting the seat all-in if that empties it.
    fn post_blind(&mut self, state: &mut RoundState, seat: usize, amount: u32) -> Result<u32, GameError> {
        let player = &mut self.playing[seat];
        let amount = amount.min(player.stack());
        player.debit_chips(amount)?;
        state.current_bets[seat] += amount;
        if player.stack() == 0 {
            state.mark_all_in(seat);
        }
        Ok(amount)
    }

    /// Moves the button to the next seat still holding a big blind, then
    /// benches everyone below it.
    fn rotate_dealer_and_bench(&mut self) {
        let n = self.playing.len();
        let big_blind = self.config.big_blind;
        let mut next = (self.dealer + 1) % n;
        for _ in 0..n {
            if self.playing[next].stack() >= big_blind {
                break;
            }
            next = (next + 1) % n;
        }

        let mut kept = Vec::with_capacity(n);
        let mut dealer = 0;
        for (i, p) in self.playing.drain(..).enumerate() {
            if p.stack() >= big_blind {
                if i == next {
                    dealer = kept.len();
                }
                kept.push(p);
            } else {
                tracing::debug!(name = p.name(), stack = p.stack(), "participant benched");
                self.sitting_out.push(p);
            }
        }
        self.playing = kept;
        self.dealer = dealer;
    }
}
