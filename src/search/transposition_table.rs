//! Transposition table keyed by Zobrist hash.
//!
//! Entries are always replaced on store. Instead of per-slot aging, the whole
//! table is dropped at the start of a search once it holds more than half its
//! configured capacity.

use std::collections::HashMap;

use crate::game_state::chess_types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: HashMap<u64, TTEntry>,
    capacity: usize,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(2),
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop everything when more than half full. Called once per top-level
    /// search.
    pub fn prepare_for_search(&mut self) {
        if self.entries.len() > self.capacity / 2 {
            log::trace!(
                "clearing transposition table ({} of {} entries)",
                self.entries.len(),
                self.capacity
            );
            self.entries.clear();
        }
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    /// An entry searched at least `min_depth` deep, if any.
    pub fn probe(&mut self, key: u64, min_depth: u8) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries.get(&key).filter(|e| e.depth >= min_depth).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, key: u64, entry: TTEntry) {
        self.stats.stores += 1;
        self.entries.insert(key, entry);
    }
}
