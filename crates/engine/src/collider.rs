//! Anchor Drift - tokens drift toward an anchor and collide
//!
//! Each move drops an anchor on a free cell. Every token then steps toward it
//! one cell at a time, all tokens moving simultaneously. Tokens that land on
//! the same cell collide: if they are all the same kind they annihilate,
//! otherwise they fuse into a permanent block. Drift stops once no token can
//! move, after which new tokens spawn on random empty cells.
//!
//! A token steps along the axis with the larger distance to the anchor, and
//! horizontally on ties. A token whose step would enter a block stays put for
//! that step. Every step that moves anything shortens the total distance to
//! the anchor, so drift always settles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::scoring::{calculate_score, ScoreResult};
use crate::core::{Grid, Rules, SeedRng, SessionStats};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Sun,
    Moon,
}

const KIND_WEIGHTS: [(TokenKind, u32); 2] = [(TokenKind::Sun, 1), (TokenKind::Moon, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Token(TokenKind),
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderState {
    pub board: Grid<Cell>,
    pub pending: [TokenKind; COLLIDER_SPAWNS],
    /// Anchor of the move being resolved.
    pub anchor: Option<(usize, usize)>,
    pub blocks: u32,
    /// Most tokens annihilated by a single anchor.
    pub best_combo: u32,
    /// Set when a spawn found no empty cell.
    pub spawn_failed: bool,
}

impl ColliderState {
    pub fn tokens(&self) -> usize {
        self.board.count(|c| matches!(c, Cell::Token(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderMove {
    Anchor { row: i32, col: i32 },
}

/// Outcome of one simultaneous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    pub moved: bool,
    pub collided: bool,
    pub annihilated: u32,
    pub fused: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Collider;

fn draw_pending(rng: &mut SeedRng) -> [TokenKind; COLLIDER_SPAWNS] {
    let mut pending = [TokenKind::Sun; COLLIDER_SPAWNS];
    for kind in &mut pending {
        *kind = rng.weighted(&KIND_WEIGHTS).unwrap_or(TokenKind::Sun);
    }
    pending
}

/// Place `kind` on a random empty cell. Returns false if the board is full.
fn spawn(board: &mut Grid<Cell>, kind: TokenKind, rng: &mut SeedRng) -> bool {
    let empties: Vec<(usize, usize)> = board
        .iter()
        .filter(|&(_, _, cell)| cell == Cell::Empty)
        .map(|(r, c, _)| (r, c))
        .collect();
    if empties.is_empty() {
        return false;
    }
    let (row, col) = empties[rng.pick_index(empties.len())];
    board.set(row as i32, col as i32, Cell::Token(kind))
}

/// Where a token at `(row, col)` wants to go next.
fn propose(row: usize, col: usize, anchor: (usize, usize)) -> (usize, usize) {
    let dr = anchor.0 as i32 - row as i32;
    let dc = anchor.1 as i32 - col as i32;
    if dc != 0 && dc.abs() >= dr.abs() {
        (row, (col as i32 + dc.signum()) as usize)
    } else if dr != 0 {
        ((row as i32 + dr.signum()) as usize, col)
    } else {
        (row, col)
    }
}

/// Advance every token one step toward `anchor` and settle collisions.
pub fn step(board: &mut Grid<Cell>, anchor: (usize, usize)) -> Step {
    let mut result = Step::default();
    let mut landing: BTreeMap<(usize, usize), Vec<TokenKind>> = BTreeMap::new();

    for (row, col, cell) in board.iter() {
        let Cell::Token(kind) = cell else {
            continue;
        };
        let mut dest = propose(row, col, anchor);
        if board.get(dest.0 as i32, dest.1 as i32) == Some(Cell::Block) {
            dest = (row, col);
        }
        if dest != (row, col) {
            result.moved = true;
        }
        landing.entry(dest).or_default().push(kind);
    }

    if !result.moved {
        return result;
    }

    for row in 0..board.height() as i32 {
        for col in 0..board.width() as i32 {
            if let Some(cell) = board.get_mut(row, col) {
                if matches!(cell, Cell::Token(_)) {
                    *cell = Cell::Empty;
                }
            }
        }
    }

    for ((row, col), kinds) in landing {
        let cell = match kinds.as_slice() {
            [kind] => Cell::Token(*kind),
            [first, rest @ ..] if rest.iter().all(|k| k == first) => {
                result.collided = true;
                result.annihilated += kinds.len() as u32;
                Cell::Empty
            }
            _ => {
                result.collided = true;
                result.fused += 1;
                Cell::Block
            }
        };
        board.set(row as i32, col as i32, cell);
    }

    result
}

/// Step until nothing moves. Waves are steps with a collision.
pub fn drift(board: &mut Grid<Cell>, anchor: (usize, usize)) -> (Cascade, u32) {
    let mut cascade = Cascade::QUIET;
    let mut fused = 0;
    loop {
        let outcome = step(board, anchor);
        if !outcome.moved {
            break;
        }
        if outcome.collided {
            cascade.waves += 1;
        }
        cascade.units += outcome.annihilated;
        fused += outcome.fused;
    }
    (cascade, fused)
}

impl Rules for Collider {
    type State = ColliderState;
    type Move = ColliderMove;

    fn game(&self) -> GameId {
        GameId::Collider
    }

    fn setup(&self, rng: &mut SeedRng) -> ColliderState {
        let mut board = Grid::new(COLLIDER_SIZE, COLLIDER_SIZE, Cell::Empty);
        for _ in 0..COLLIDER_START_TOKENS {
            let kind = rng.weighted(&KIND_WEIGHTS).unwrap_or(TokenKind::Sun);
            spawn(&mut board, kind, rng);
        }
        ColliderState {
            board,
            pending: draw_pending(rng),
            anchor: None,
            blocks: 0,
            best_combo: 0,
            spawn_failed: false,
        }
    }

    fn validate(&self, state: &ColliderState, mv: &ColliderMove) -> Result<(), Rejection> {
        let ColliderMove::Anchor { row, col } = *mv;
        match state.board.get(row, col) {
            None => Err(Rejection::OutOfBounds),
            Some(Cell::Block) => Err(Rejection::Blocked),
            Some(_) => Ok(()),
        }
    }

    fn apply(&self, state: &mut ColliderState, mv: &ColliderMove, _rng: &mut SeedRng) {
        let ColliderMove::Anchor { row, col } = *mv;
        state.anchor = Some((row as usize, col as usize));
    }

    fn resolve(&self, state: &mut ColliderState) -> Cascade {
        let Some(anchor) = state.anchor else {
            return Cascade::QUIET;
        };
        let (cascade, fused) = drift(&mut state.board, anchor);
        state.blocks += fused;
        state.best_combo = state.best_combo.max(cascade.units);
        cascade
    }

    fn score(&self, _state: &ColliderState, cascade: &Cascade, _turn: u32) -> ScoreResult {
        calculate_score(cascade, COLLIDER_TOKEN_POINTS, COLLIDER_COMBO_BONUS)
    }

    fn advance(
        &self,
        state: &mut ColliderState,
        _mv: &ColliderMove,
        _cascade: &Cascade,
        rng: &mut SeedRng,
    ) {
        state.anchor = None;
        for kind in state.pending {
            if !spawn(&mut state.board, kind, rng) {
                state.spawn_failed = true;
            }
        }
        state.pending = draw_pending(rng);
    }

    fn verdict(&self, state: &ColliderState) -> Option<Phase> {
        (state.blocks >= COLLIDER_BLOCK_LIMIT || state.spawn_failed).then_some(Phase::GameOver)
    }

    fn headline(&self, state: &ColliderState, _stats: &SessionStats) -> Vec<String> {
        vec![
            format!("Best combo: {}", state.best_combo),
            format!("Blocks: {}/{}", state.blocks, COLLIDER_BLOCK_LIMIT),
        ]
    }
}
