//! Ink Burst - stencil stamping on a chip-firing grid
//!
//! Each move stamps one of three offered stencils onto the 7x7 grid, adding a
//! drop of ink to every covered cell. A cell holding 4 or more ink bursts: it
//! loses 4 and each orthogonal neighbor gains 1, or the spill counter does
//! when the neighbor is off the board. Too much spill ends the session.
//!
//! Resolution is a FIFO worklist, not repeated full scans. The queue is seeded
//! with every over-threshold cell in row-major order; a neighbor is enqueued
//! the moment it reaches the threshold, and every update lands immediately.
//! A cell is queued at most once at a time, so the queue never holds more than
//! the board. The run terminates because every burst moves ink strictly toward
//! the edge on average and the edge drains into spill.
//!
//! A wave is one burst generation: cells over threshold after the stamp are
//! generation 1, cells pushed over by a generation-`g` burst are `g + 1`.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::scoring::{calculate_score, ScoreResult};
use crate::core::{Grid, Rules, SeedRng, SessionStats, ORTHOGONAL};
use crate::types::*;

/// Stencil shapes, as cell offsets from the anchor (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stencil {
    Dot,
    DominoH,
    DominoV,
    Diagonal,
    Square,
    Plus,
}

/// Offer table for weighted selection, in declared order.
pub const STENCIL_WEIGHTS: [(Stencil, u32); 6] = [
    (Stencil::Dot, 3),
    (Stencil::DominoH, 3),
    (Stencil::DominoV, 3),
    (Stencil::Diagonal, 2),
    (Stencil::Square, 2),
    (Stencil::Plus, 1),
];

impl Stencil {
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Stencil::Dot => &[(0, 0)],
            Stencil::DominoH => &[(0, 0), (0, 1)],
            Stencil::DominoV => &[(0, 0), (1, 0)],
            Stencil::Diagonal => &[(0, 0), (1, 1)],
            Stencil::Square => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Stencil::Plus => &[(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)],
        }
    }

    /// Whether every covered cell of a stamp at `(row, col)` is on the grid.
    pub fn fits(&self, grid: &Grid<u8>, row: i32, col: i32) -> bool {
        self.offsets()
            .iter()
            .all(|&(dr, dc)| grid.contains(row + dr, col + dc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SandpileState {
    pub board: Grid<u8>,
    pub offers: ArrayVec<Stencil, SANDPILE_OFFERS>,
    pub spill: u32,
    /// Most bursts set off by a single stamp.
    pub best_burst: u32,
}

impl SandpileState {
    /// Ink on the board.
    pub fn ink(&self) -> u32 {
        self.board.cells().iter().map(|&v| v as u32).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SandpileMove {
    Stamp { offer: usize, row: i32, col: i32 },
}

/// What one chip-firing run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Topple {
    pub bursts: u32,
    pub generations: u32,
    pub spilled: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sandpile;

fn draw_offers(rng: &mut SeedRng) -> ArrayVec<Stencil, SANDPILE_OFFERS> {
    let mut offers = ArrayVec::new();
    while !offers.is_full() {
        if let Some(stencil) = rng.weighted(&STENCIL_WEIGHTS) {
            offers.push(stencil);
        }
    }
    offers
}

/// Fire every over-threshold cell until the grid is stable.
pub fn topple(board: &mut Grid<u8>, threshold: u8) -> Topple {
    let mut result = Topple::default();
    let mut queue: VecDeque<(usize, usize, u32)> = board
        .iter()
        .filter(|&(_, _, v)| v >= threshold)
        .map(|(r, c, _)| (r, c, 1))
        .collect();

    while let Some((row, col, generation)) = queue.pop_front() {
        let (r, c) = (row as i32, col as i32);
        let Some(cell) = board.get_mut(r, c) else {
            continue;
        };
        if *cell < threshold {
            continue;
        }
        *cell -= threshold;
        let still_over = *cell >= threshold;

        result.bursts += 1;
        result.generations = result.generations.max(generation);

        for (dr, dc) in ORTHOGONAL {
            match board.get_mut(r + dr, c + dc) {
                Some(neighbor) => {
                    *neighbor += 1;
                    if *neighbor == threshold {
                        queue.push_back(((r + dr) as usize, (c + dc) as usize, generation + 1));
                    }
                }
                None => result.spilled += 1,
            }
        }

        if still_over {
            queue.push_back((row, col, generation + 1));
        }
    }

    result
}

impl Rules for Sandpile {
    type State = SandpileState;
    type Move = SandpileMove;

    fn game(&self) -> GameId {
        GameId::Sandpile
    }

    fn setup(&self, rng: &mut SeedRng) -> SandpileState {
        SandpileState {
            board: Grid::new(SANDPILE_SIZE, SANDPILE_SIZE, 0),
            offers: draw_offers(rng),
            spill: 0,
            best_burst: 0,
        }
    }

    fn validate(&self, state: &SandpileState, mv: &SandpileMove) -> Result<(), Rejection> {
        let SandpileMove::Stamp { offer, row, col } = *mv;
        let stencil = state.offers.get(offer).ok_or(Rejection::NoSuchOffer)?;
        if !stencil.fits(&state.board, row, col) {
            return Err(Rejection::OutOfBounds);
        }
        Ok(())
    }

    fn apply(&self, state: &mut SandpileState, mv: &SandpileMove, _rng: &mut SeedRng) {
        let SandpileMove::Stamp { offer, row, col } = *mv;
        let Some(&stencil) = state.offers.get(offer) else {
            return;
        };
        for &(dr, dc) in stencil.offsets() {
            if let Some(cell) = state.board.get_mut(row + dr, col + dc) {
                *cell += 1;
            }
        }
    }

    fn resolve(&self, state: &mut SandpileState) -> Cascade {
        let result = topple(&mut state.board, SANDPILE_THRESHOLD);
        state.spill += result.spilled;
        state.best_burst = state.best_burst.max(result.bursts);
        Cascade {
            waves: result.generations,
            units: result.bursts,
        }
    }

    fn score(&self, _state: &SandpileState, cascade: &Cascade, _turn: u32) -> ScoreResult {
        calculate_score(cascade, SANDPILE_BURST_POINTS, SANDPILE_WAVE_BONUS)
    }

    fn advance(
        &self,
        state: &mut SandpileState,
        _mv: &SandpileMove,
        _cascade: &Cascade,
        rng: &mut SeedRng,
    ) {
        state.offers = draw_offers(rng);
    }

    fn verdict(&self, state: &SandpileState) -> Option<Phase> {
        (state.spill >= SANDPILE_SPILL_LIMIT).then_some(Phase::GameOver)
    }

    fn headline(&self, state: &SandpileState, _stats: &SessionStats) -> Vec<String> {
        vec![
            format!("Best burst: {}", state.best_burst),
            format!("Spill: {}/{}", state.spill, SANDPILE_SPILL_LIMIT),
        ]
    }
}
