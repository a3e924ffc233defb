//! Difficulty levels and the fixed search settings each one maps to.

use std::fmt;
use std::str::FromStr;

use crate::errors::{ChessErrors, ChessResult};
use crate::search::iterative_deepening::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Master,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        }
    }

    /// Search settings for this level. Quiescence ships disabled at every
    /// level; its depth and capture cap only matter once it is switched on.
    pub fn config(self) -> SearchConfig {
        let (max_depth, randomness, max_time_ms, max_nodes) = match self {
            Difficulty::Easy => (1, 0.30, 500, 2_000),
            Difficulty::Medium => (2, 0.15, 1_000, 8_000),
            Difficulty::Hard => (2, 0.05, 2_000, 20_000),
            Difficulty::Master => (2, 0.0, 3_000, 50_000),
        };
        SearchConfig {
            max_depth,
            randomness,
            max_time_ms,
            max_nodes,
            use_quiescence: false,
            quiescence_depth: 4,
            quiescence_max_captures: 8,
            limit_interior_breadth: true,
            use_transposition_table: true,
            tt_capacity: 100_000,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ChessErrors;

    fn from_str(s: &str) -> ChessResult<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChessErrors::UnknownDifficulty(s.to_owned()))
    }
}
