//! Letter Line - place letters so equal neighbors cancel
//!
//! The line holds letters `A` to `D`. Each move places the next letter at any
//! gap; adjacent equal letters then cancel in pairs, and cancellations can
//! expose new equal neighbors. Resolution is a single pass with a stack,
//! which reaches the same fixpoint as repeatedly removing the leftmost pair.

use serde::{Deserialize, Serialize};

use crate::core::scoring::{calculate_score, ScoreResult};
use crate::core::{Rules, SeedRng, SessionStats};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilesState {
    pub letters: Vec<char>,
    /// `[next, after]`.
    pub pending: [char; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TilesMove {
    /// Insert the next letter before position `index` (`index == len` appends).
    Place { index: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tiles;

fn letter(code: usize) -> char {
    char::from(b'A' + code as u8)
}

fn draw_letter(rng: &mut SeedRng) -> char {
    letter(rng.pick_index(TILES_LETTERS as usize))
}

/// Opening line with no adjacent equal pair.
fn draw_line(rng: &mut SeedRng) -> Vec<char> {
    let mut line: Vec<char> = Vec::with_capacity(TILES_MAX_LEN);
    for _ in 0..TILES_START_LEN {
        let next = match line.last() {
            None => draw_letter(rng),
            Some(&prev) => {
                // Pick among the other letters, skipping the previous one.
                let mut code = rng.pick_index(TILES_LETTERS as usize - 1);
                if letter(code) >= prev {
                    code += 1;
                }
                letter(code)
            }
        };
        line.push(next);
    }
    line
}

/// Cancel adjacent equal letters until none remain.
///
/// Returns the cascade: units are letters removed, waves the longest run of
/// back-to-back cancellations.
pub fn reduce(letters: &mut Vec<char>) -> Cascade {
    let mut stack: Vec<char> = Vec::with_capacity(letters.len());
    let mut cascade = Cascade::QUIET;
    let mut run = 0;

    for &c in letters.iter() {
        if stack.last() == Some(&c) {
            stack.pop();
            run += 1;
            cascade.units += 2;
            cascade.waves = cascade.waves.max(run);
        } else {
            stack.push(c);
            run = 0;
        }
    }

    *letters = stack;
    cascade
}

impl Rules for Tiles {
    type State = TilesState;
    type Move = TilesMove;

    fn game(&self) -> GameId {
        GameId::Tiles
    }

    fn setup(&self, rng: &mut SeedRng) -> TilesState {
        let letters = draw_line(rng);
        let pending = [draw_letter(rng), draw_letter(rng)];
        TilesState { letters, pending }
    }

    fn validate(&self, state: &TilesState, mv: &TilesMove) -> Result<(), Rejection> {
        let TilesMove::Place { index } = *mv;
        if index > state.letters.len() {
            return Err(Rejection::OutOfBounds);
        }
        Ok(())
    }

    fn apply(&self, state: &mut TilesState, mv: &TilesMove, _rng: &mut SeedRng) {
        let TilesMove::Place { index } = *mv;
        let index = index.min(state.letters.len());
        state.letters.insert(index, state.pending[0]);
    }

    fn resolve(&self, state: &mut TilesState) -> Cascade {
        reduce(&mut state.letters)
    }

    fn score(&self, _state: &TilesState, cascade: &Cascade, _turn: u32) -> ScoreResult {
        calculate_score(cascade, TILES_TILE_POINTS, TILES_CHAIN_BONUS)
    }

    fn advance(
        &self,
        state: &mut TilesState,
        _mv: &TilesMove,
        _cascade: &Cascade,
        rng: &mut SeedRng,
    ) {
        state.pending = [state.pending[1], draw_letter(rng)];
    }

    fn verdict(&self, state: &TilesState) -> Option<Phase> {
        (state.letters.len() >= TILES_MAX_LEN).then_some(Phase::GameOver)
    }

    fn headline(&self, _state: &TilesState, stats: &SessionStats) -> Vec<String> {
        vec![format!("Best chain: {}", stats.best_chain)]
    }
}
