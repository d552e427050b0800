//! Paper Fold - fold a lit grid until every light cancels out
//!
//! A fold along a line lays the smaller side over the larger one (ties lay
//! the left/top side over). Overlapping cells combine by XOR: two lit cells
//! annihilate as a pair, a lit cell over an unlit one stays lit. The grid
//! shrinks to the size of the larger side.
//!
//! Puzzles are generated backwards. A hidden solution of three folds is drawn
//! on the dimensions alone, then an all-unlit grid of the final size is
//! unfolded step by step with random flaps. Folding the result along the
//! solution reproduces each intermediate grid exactly, so every puzzle can be
//! cleared inside the budget.

use serde::{Deserialize, Serialize};

use crate::core::scoring::{calculate_score, ScoreResult};
use crate::core::{Grid, Rules, SeedRng, SessionStats};
use crate::types::*;

const UNLIT: u8 = 0;
const LIT: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// A vertical crease: columns fold over columns, the width shrinks.
    Vertical,
    /// A horizontal crease: rows fold over rows, the height shrinks.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FoldMove {
    /// Crease after `line` columns (vertical) or rows (horizontal).
    Fold { axis: Axis, line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoldState {
    /// 1 for a lit cell, 0 for unlit.
    pub board: Grid<u8>,
    pub folds_left: u8,
    /// The generator's own answer. Not exposed to observers.
    #[serde(skip)]
    pub solution: Vec<FoldMove>,
}

impl FoldState {
    pub fn lit(&self) -> usize {
        self.board.count(|v| v % 2 == LIT)
    }

    pub fn folds_used(&self) -> u8 {
        FOLD_BUDGET - self.folds_left
    }

    /// Whether any crease is still possible.
    pub fn foldable(&self) -> bool {
        self.board.height() > 1 || self.board.width() > 1
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fold;

/// Length along the folded axis.
fn span(grid: &Grid<u8>, axis: Axis) -> usize {
    match axis {
        Axis::Vertical => grid.width(),
        Axis::Horizontal => grid.height(),
    }
}

/// For position `k` of the folded result, the index it keeps from the larger
/// side and the index laid over it from the smaller side, if any.
fn source(len: usize, line: usize, k: usize) -> (usize, Option<usize>) {
    if line <= len - line {
        (line + k, line.checked_sub(k + 1))
    } else {
        (k, (2 * line - 1).checked_sub(k).filter(|&m| m < len))
    }
}

/// Length of the folded axis.
fn folded_len(len: usize, line: usize) -> usize {
    line.max(len - line)
}

/// Cell at position `k` along the axis and `other` across it.
fn axis_cell(axis: Axis, k: usize, other: usize) -> (i32, i32) {
    match axis {
        Axis::Vertical => (other as i32, k as i32),
        Axis::Horizontal => (k as i32, other as i32),
    }
}

/// Lay one side of `grid` over the other along `line`.
///
/// Cells of the result hold the number of lit layers stacked on them, so a
/// lit cell over a lit cell reads 2 until [`annihilate`] cancels it.
pub fn stack_fold(grid: &Grid<u8>, axis: Axis, line: usize) -> Grid<u8> {
    let len = span(grid, axis);
    let new_len = folded_len(len, line);
    let (height, width, across) = match axis {
        Axis::Vertical => (grid.height(), new_len, grid.height()),
        Axis::Horizontal => (new_len, grid.width(), grid.width()),
    };

    let mut folded = Grid::new(height, width, UNLIT);
    for k in 0..new_len {
        let (base, mirror) = source(len, line, k);
        for other in 0..across {
            let (br, bc) = axis_cell(axis, base, other);
            let kept = grid.get(br, bc).unwrap_or(UNLIT);
            let laid = mirror
                .and_then(|m| {
                    let (mr, mc) = axis_cell(axis, m, other);
                    grid.get(mr, mc)
                })
                .unwrap_or(UNLIT);
            let (r, c) = axis_cell(axis, k, other);
            folded.set(r, c, kept + laid);
        }
    }
    folded
}

/// Cancel lit pairs in a stacked grid; returns the pairs removed.
pub fn annihilate(grid: &mut Grid<u8>) -> u32 {
    let mut pairs = 0;
    for row in 0..grid.height() as i32 {
        for col in 0..grid.width() as i32 {
            if let Some(cell) = grid.get_mut(row, col) {
                pairs += (*cell / 2) as u32;
                *cell %= 2;
            }
        }
    }
    pairs
}

/// Build a grid that folds back into `grid` along `line`, with random flaps.
fn unfold_grid(
    grid: &Grid<u8>,
    axis: Axis,
    line: usize,
    len: usize,
    rng: &mut SeedRng,
) -> Grid<u8> {
    let new_len = span(grid, axis);
    let (height, width, across) = match axis {
        Axis::Vertical => (grid.height(), len, grid.height()),
        Axis::Horizontal => (len, grid.width(), grid.width()),
    };

    let mut unfolded = Grid::new(height, width, UNLIT);
    for k in 0..new_len {
        let (base, mirror) = source(len, line, k);
        for other in 0..across {
            let (r, c) = axis_cell(axis, k, other);
            let target = grid.get(r, c).unwrap_or(UNLIT);
            let flap = match mirror {
                Some(m) => {
                    let flap = if rng.next_f64() < 0.5 { LIT } else { UNLIT };
                    let (mr, mc) = axis_cell(axis, m, other);
                    unfolded.set(mr, mc, flap);
                    flap
                }
                None => UNLIT,
            };
            let (br, bc) = axis_cell(axis, base, other);
            unfolded.set(br, bc, target ^ flap);
        }
    }
    unfolded
}

/// Draw the hidden solution on dimensions alone.
fn draw_solution(rng: &mut SeedRng) -> Vec<(FoldMove, usize)> {
    let (mut height, mut width) = (FOLD_SIZE, FOLD_SIZE);
    let mut steps = Vec::with_capacity(FOLD_SOLUTION_STEPS);
    for _ in 0..FOLD_SOLUTION_STEPS {
        let mut axis = if rng.pick_index(2) == 0 {
            Axis::Vertical
        } else {
            Axis::Horizontal
        };
        let mut len = if axis == Axis::Vertical { width } else { height };
        if len < 2 {
            axis = match axis {
                Axis::Vertical => Axis::Horizontal,
                Axis::Horizontal => Axis::Vertical,
            };
            len = if axis == Axis::Vertical { width } else { height };
        }
        if len < 2 {
            break;
        }
        let line = 1 + rng.pick_index(len - 1);
        match axis {
            Axis::Vertical => width = folded_len(len, line),
            Axis::Horizontal => height = folded_len(len, line),
        }
        steps.push((FoldMove::Fold { axis, line }, len));
    }
    steps
}

/// Generate a solvable puzzle and the folds that clear it.
pub fn generate(rng: &mut SeedRng) -> (Grid<u8>, Vec<FoldMove>) {
    let steps = draw_solution(rng);
    let (mut height, mut width) = (FOLD_SIZE, FOLD_SIZE);
    for (FoldMove::Fold { axis, line }, len) in &steps {
        match axis {
            Axis::Vertical => width = folded_len(*len, *line),
            Axis::Horizontal => height = folded_len(*len, *line),
        }
    }

    let mut grid = Grid::new(height, width, UNLIT);
    for (i, &(FoldMove::Fold { axis, line }, len)) in steps.iter().enumerate().rev() {
        grid = unfold_grid(&grid, axis, line, len, rng);
        if i == 0 && grid.count(|v| v == LIT) == 0 {
            // Light one overlapping pair so the opening fold has work to do.
            let overlap = (0..folded_len(len, line))
                .map(|k| source(len, line, k))
                .find_map(|(base, mirror)| mirror.map(|m| (base, m)));
            if let Some((base, m)) = overlap {
                let (br, bc) = axis_cell(axis, base, 0);
                let (mr, mc) = axis_cell(axis, m, 0);
                grid.set(br, bc, LIT);
                grid.set(mr, mc, LIT);
            }
        }
    }

    let solution = steps.into_iter().map(|(mv, _)| mv).collect();
    (grid, solution)
}

impl Rules for Fold {
    type State = FoldState;
    type Move = FoldMove;

    fn game(&self) -> GameId {
        GameId::Fold
    }

    fn setup(&self, rng: &mut SeedRng) -> FoldState {
        let (board, solution) = generate(rng);
        FoldState {
            board,
            folds_left: FOLD_BUDGET,
            solution,
        }
    }

    fn validate(&self, state: &FoldState, mv: &FoldMove) -> Result<(), Rejection> {
        let FoldMove::Fold { axis, line } = *mv;
        let len = span(&state.board, axis);
        if line == 0 || line >= len || state.folds_left == 0 {
            return Err(Rejection::InvalidLine);
        }
        Ok(())
    }

    fn apply(&self, state: &mut FoldState, mv: &FoldMove, _rng: &mut SeedRng) {
        let FoldMove::Fold { axis, line } = *mv;
        state.board = stack_fold(&state.board, axis, line);
        state.folds_left = state.folds_left.saturating_sub(1);
    }

    /// One overlay, so at most one wave.
    fn resolve(&self, state: &mut FoldState) -> Cascade {
        let pairs = annihilate(&mut state.board);
        Cascade {
            waves: u32::from(pairs > 0),
            units: pairs,
        }
    }

    fn score(&self, state: &FoldState, cascade: &Cascade, _turn: u32) -> ScoreResult {
        let score = calculate_score(cascade, FOLD_PAIR_POINTS, 0);
        if state.lit() == 0 {
            score.with_bonus(FOLD_CLEAR_BONUS + FOLD_SPARE_BONUS * state.folds_left as u32)
        } else {
            score
        }
    }

    fn advance(
        &self,
        _state: &mut FoldState,
        _mv: &FoldMove,
        _cascade: &Cascade,
        _rng: &mut SeedRng,
    ) {
    }

    fn verdict(&self, state: &FoldState) -> Option<Phase> {
        if state.lit() == 0 {
            Some(Phase::Win)
        } else if state.folds_left == 0 || !state.foldable() {
            Some(Phase::Lose)
        } else {
            None
        }
    }

    fn headline(&self, state: &FoldState, _stats: &SessionStats) -> Vec<String> {
        vec![
            format!("Lit: {}", state.lit()),
            format!("Folds: {}/{}", state.folds_used(), FOLD_BUDGET),
        ]
    }
}
