//! Per-hand stack results kept by the ready-made participants.

use std::collections::VecDeque;

/// Stack change of each finished hand, oldest first, capped at `memory`
/// entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackHistory {
    memory: usize,
    deltas: VecDeque<i64>,
    hand_start: Option<u32>,
}

impl StackHistory {
    pub fn new(memory: usize) -> Self {
        Self {
            memory,
            deltas: VecDeque::new(),
            hand_start: None,
        }
    }

    /// Marks the stack a hand started with.
    pub fn start_hand(&mut self, stack: u32) {
        self.hand_start = Some(stack);
    }

    /// Records the change since [`start_hand`](Self::start_hand). A hand
    /// that was never started records nothing.
    pub fn finish_hand(&mut self, stack: u32) {
        let Some(start) = self.hand_start.take() else {
            return;
        };
        self.deltas.push_back(i64::from(stack) - i64::from(start));
        while self.deltas.len() > self.memory {
            self.deltas.pop_front();
        }
    }

    pub fn deltas(&self) -> impl Iterator<Item = i64> + '_ {
        self.deltas.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn memory(&self) -> usize {
        self.memory
    }

    /// Sum of the remembered deltas.
    pub fn net(&self) -> i64 {
        self.deltas.iter().sum()
    }
}
