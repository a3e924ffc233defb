use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, mv: &Move) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.move_type == MoveType::EnPassant {
            self.en_passant += 1;
        }
        if mv.move_type.castle_side().is_some() {
            self.castles += 1;
        }
        if mv.promotion.is_some() {
            self.promotions += 1;
        }
        if mv.is_check {
            self.checks += 1;
        }
        if mv.is_checkmate {
            self.checkmates += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state) {
        perft_recurse(generator, game_state, mv, depth, &mut total);
    }
    total
}

/// Leaf count below each root move, keyed by long algebraic notation.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    generator
        .generate_legal_moves(game_state)
        .into_iter()
        .map(|mv| {
            let mut counts = PerftCounts::default();
            perft_recurse(generator, game_state, mv, depth, &mut counts);
            (mv.to_long_algebraic(), counts.nodes)
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    parent: &GameState,
    mv: Move,
    remaining: u8,
    counts: &mut PerftCounts,
) {
    let mut child = parent.clone();
    let applied = child.apply_legal_move(mv);

    if remaining == 1 {
        counts.record_leaf(&applied);
        return;
    }

    let mut local = PerftCounts::default();
    for next in generator.generate_legal_moves(&child) {
        perft_recurse(generator, &child, next, remaining - 1, &mut local);
    }
    counts.merge(local);
}
