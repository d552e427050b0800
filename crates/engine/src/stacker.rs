//! Bead Stack - shift-in stacker with exact 1-2-3 runs
//!
//! The stack is 12 visible rows by 3 columns, with one hidden overflow row
//! above the top. Each drop pushes the whole stack up one row and inserts the
//! incoming row of three beads at the bottom. A run is a row reading `1,2,3`
//! left-to-right or three cells of a column reading `1,2,3` top-to-bottom.
//! All runs found in a pass clear together, the remaining beads fall, and the
//! board is scanned again.
//!
//! Before a drop the player may swap two incoming beads, spending one of a
//! small swap budget. A drop that clears anything refunds a swap.

use serde::{Deserialize, Serialize};

use crate::core::scoring::{calculate_score, ScoreResult};
use crate::core::{resolve_to_fixpoint, Grid, Rules, SeedRng, SessionStats};
use crate::types::*;

/// Grid height including the hidden overflow row.
const STACK_HEIGHT: usize = STACKER_ROWS + 1;

/// Row index of the hidden overflow row.
pub const OVERFLOW_ROW: usize = 0;

const EMPTY: u8 = 0;
const RUN: [u8; 3] = [1, 2, 3];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackerState {
    /// Bead ranks, 0 for empty. Row 0 is the overflow row, the last row is the bottom.
    pub board: Grid<u8>,
    pub incoming: [u8; STACKER_COLS],
    pub swaps_left: u8,
}

impl StackerState {
    /// Number of beads currently on the board.
    pub fn beads(&self) -> usize {
        self.board.count(|v| v != EMPTY)
    }

    /// Whether any bead sits in the hidden overflow row.
    pub fn overflowing(&self) -> bool {
        self.board.row(OVERFLOW_ROW).iter().any(|&v| v != EMPTY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StackerMove {
    /// Exchange two incoming beads.
    Swap { a: usize, b: usize },
    /// Shift the incoming row in at the bottom. Also what an auto-drop timer submits.
    Drop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stacker;

fn draw_incoming(rng: &mut SeedRng) -> [u8; STACKER_COLS] {
    let mut row = [EMPTY; STACKER_COLS];
    for bead in &mut row {
        *bead = rng.pick_index(STACKER_RANKS as usize) as u8 + 1;
    }
    row
}

/// Push every row up by one and place `incoming` on the bottom row.
pub fn shift_in(board: &mut Grid<u8>, incoming: &[u8; STACKER_COLS]) {
    let height = board.height() as i32;
    for row in 0..height - 1 {
        for col in 0..STACKER_COLS as i32 {
            let below = board.get(row + 1, col).unwrap_or(EMPTY);
            board.set(row, col, below);
        }
    }
    for (col, &bead) in incoming.iter().enumerate() {
        board.set(height - 1, col as i32, bead);
    }
}

/// Mark every cell covered by a run; returns the mask and the run count.
pub fn find_runs(board: &Grid<u8>) -> (Grid<bool>, u32) {
    let mut mask = Grid::new(board.height(), board.width(), false);
    let mut runs = 0;

    for row in 0..board.height() {
        if board.row(row) == RUN {
            runs += 1;
            for col in 0..board.width() {
                mask.set(row as i32, col as i32, true);
            }
        }
    }

    for col in 0..board.width() {
        for top in 0..board.height().saturating_sub(RUN.len() - 1) {
            let matched = RUN
                .iter()
                .enumerate()
                .all(|(k, &rank)| board.get((top + k) as i32, col as i32) == Some(rank));
            if matched {
                runs += 1;
                for k in 0..RUN.len() {
                    mask.set((top + k) as i32, col as i32, true);
                }
            }
        }
    }

    (mask, runs)
}

/// Clear all runs, let beads fall, repeat until no run remains.
pub fn settle(board: &mut Grid<u8>) -> Cascade {
    resolve_to_fixpoint(board, |board| {
        let (mask, runs) = find_runs(board);
        if runs == 0 {
            return 0;
        }
        for (row, col, hit) in mask.iter() {
            if hit {
                board.set(row as i32, col as i32, EMPTY);
            }
        }
        board.settle_columns(EMPTY);
        runs
    })
}

impl Rules for Stacker {
    type State = StackerState;
    type Move = StackerMove;

    fn game(&self) -> GameId {
        GameId::Stacker
    }

    fn setup(&self, rng: &mut SeedRng) -> StackerState {
        StackerState {
            board: Grid::new(STACK_HEIGHT, STACKER_COLS, EMPTY),
            incoming: draw_incoming(rng),
            swaps_left: STACKER_SWAPS,
        }
    }

    fn validate(&self, state: &StackerState, mv: &StackerMove) -> Result<(), Rejection> {
        match *mv {
            StackerMove::Swap { a, b } => {
                if a >= STACKER_COLS || b >= STACKER_COLS {
                    Err(Rejection::OutOfBounds)
                } else if a == b {
                    Err(Rejection::SameIndex)
                } else if state.swaps_left == 0 {
                    Err(Rejection::NoSwapsLeft)
                } else {
                    Ok(())
                }
            }
            StackerMove::Drop => Ok(()),
        }
    }

    fn apply(&self, state: &mut StackerState, mv: &StackerMove, _rng: &mut SeedRng) {
        match *mv {
            StackerMove::Swap { a, b } => {
                let mut incoming = state.incoming;
                incoming.swap(a, b);
                state.incoming = incoming;
                state.swaps_left -= 1;
            }
            StackerMove::Drop => shift_in(&mut state.board, &state.incoming),
        }
    }

    fn resolve(&self, state: &mut StackerState) -> Cascade {
        settle(&mut state.board)
    }

    fn score(&self, _state: &StackerState, cascade: &Cascade, _turn: u32) -> ScoreResult {
        calculate_score(cascade, STACKER_RUN_POINTS, STACKER_CHAIN_BONUS)
    }

    fn advance(
        &self,
        state: &mut StackerState,
        mv: &StackerMove,
        cascade: &Cascade,
        rng: &mut SeedRng,
    ) {
        if let StackerMove::Drop = mv {
            state.incoming = draw_incoming(rng);
            if !cascade.is_quiet() {
                state.swaps_left = (state.swaps_left + 1).min(STACKER_SWAPS);
            }
        }
    }

    fn verdict(&self, state: &StackerState) -> Option<Phase> {
        state.overflowing().then_some(Phase::GameOver)
    }

    fn headline(&self, _state: &StackerState, stats: &SessionStats) -> Vec<String> {
        vec![format!("Best chain: {}", stats.best_chain)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Seed, Session, Turn};

    fn state_with(rows: &[[u8; 3]], incoming: [u8; 3]) -> StackerState {
        let mut board = Grid::new(STACK_HEIGHT, STACKER_COLS, EMPTY);
        let top = STACK_HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            for (col, &bead) in row.iter().enumerate() {
                board.set((top + i) as i32, col as i32, bead);
            }
        }
        StackerState {
            board,
            incoming,
            swaps_left: STACKER_SWAPS,
        }
    }

    fn commit(state: &mut StackerState, mv: StackerMove) -> (Cascade, ScoreResult) {
        let rules = Stacker;
        let mut rng = SeedRng::new("test");
        assert!(rules.validate(state, &mv).is_ok());
        rules.apply(state, &mv, &mut rng);
        let cascade = rules.resolve(state);
        let score = rules.score(state, &cascade, 0);
        rules.advance(state, &mv, &cascade, &mut rng);
        (cascade, score)
    }

    #[test]
    fn test_drop_on_empty_board_clears_run() {
        let mut state = state_with(&[], [1, 2, 3]);
        let (cascade, score) = commit(&mut state, StackerMove::Drop);
        assert_eq!(cascade, Cascade { waves: 1, units: 1 });
        assert_eq!(score.total, 10);
        assert_eq!(state.beads(), 0);
    }

    #[test]
    fn test_drop_without_run_stacks() {
        let mut state = state_with(&[], [3, 2, 1]);
        let (cascade, score) = commit(&mut state, StackerMove::Drop);
        assert!(cascade.is_quiet());
        assert_eq!(score.total, 0);
        assert_eq!(state.board.row(STACK_HEIGHT - 1), [3, 2, 1]);
    }

    #[test]
    fn test_vertical_run_clears() {
        // Column 0 reads 1,2 from the top; dropping a 3 under it completes 1,2,3.
        let mut state = state_with(&[[1, 2, 2], [2, 3, 3]], [3, 1, 1]);
        let (cascade, _) = commit(&mut state, StackerMove::Drop);
        assert_eq!(cascade.waves, 1);
        assert_eq!(cascade.units, 1);
        assert_eq!(state.board.get(STACK_HEIGHT as i32 - 1, 0), Some(EMPTY));
        assert_eq!(state.beads(), 6);
    }

    #[test]
    fn test_fall_after_clear_chains() {
        // The drop completes a vertical run in column 0; the lone 1 above it
        // falls beside 2,3 and completes a row run on the second wave.
        let mut state = state_with(&[[1, 0, 0], [1, 0, 0], [2, 1, 0]], [3, 2, 3]);
        let (cascade, score) = commit(&mut state, StackerMove::Drop);
        assert_eq!(cascade.waves, 2);
        assert_eq!(cascade.units, 2);
        assert_eq!(score.total, 2 * STACKER_RUN_POINTS + STACKER_CHAIN_BONUS);
        assert_eq!(state.board.row(STACK_HEIGHT - 1), [0, 1, 0]);
        assert_eq!(state.beads(), 1);
    }

    #[test]
    fn test_settled_board_has_no_runs() {
        for seed in ["2024-03-09", "a", "b", "c", "runs", "practice-3"] {
            let mut rng = SeedRng::new(seed);
            let mut board = Grid::new(STACK_HEIGHT, STACKER_COLS, EMPTY);
            for row in 4..STACK_HEIGHT {
                for col in 0..STACKER_COLS {
                    board.set(row as i32, col as i32, rng.pick_index(4) as u8);
                }
            }
            board.settle_columns(EMPTY);
            settle(&mut board);
            assert_eq!(find_runs(&board).1, 0, "{seed}");
        }
    }

    #[test]
    fn test_swap_validation() {
        let rules = Stacker;
        let mut state = state_with(&[], [1, 2, 3]);
        assert_eq!(
            rules.validate(&state, &StackerMove::Swap { a: 0, b: 3 }),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            rules.validate(&state, &StackerMove::Swap { a: 1, b: 1 }),
            Err(Rejection::SameIndex)
        );
        state.swaps_left = 0;
        assert_eq!(
            rules.validate(&state, &StackerMove::Swap { a: 0, b: 1 }),
            Err(Rejection::NoSwapsLeft)
        );
    }

    #[test]
    fn test_swap_spends_budget_and_keeps_incoming() {
        let mut state = state_with(&[], [3, 2, 1]);
        let (cascade, _) = commit(&mut state, StackerMove::Swap { a: 0, b: 2 });
        assert!(cascade.is_quiet());
        assert_eq!(state.incoming, [1, 2, 3]);
        assert_eq!(state.swaps_left, STACKER_SWAPS - 1);
    }

    #[test]
    fn test_clearing_drop_refunds_swap() {
        let mut state = state_with(&[], [1, 2, 3]);
        state.swaps_left = 1;
        commit(&mut state, StackerMove::Drop);
        assert_eq!(state.swaps_left, 2);
    }

    #[test]
    fn test_overflow_ends_session() {
        let rules = Stacker;
        let rows = vec![[2, 2, 2]; STACKER_ROWS];
        let mut state = state_with(&rows, [1, 1, 1]);
        assert_eq!(rules.verdict(&state), None);
        commit(&mut state, StackerMove::Drop);
        assert!(state.overflowing());
        assert_eq!(rules.verdict(&state), Some(Phase::GameOver));
    }

    #[test]
    fn test_session_eventually_overflows_on_repeated_drops() {
        let mut session = Session::started(Stacker, Seed::custom("stack", Mode::Practice));
        let mut ended = false;
        for _ in 0..500 {
            if let Turn::Ended { result, .. } = session.play(StackerMove::Drop) {
                assert_eq!(result.phase, Phase::GameOver);
                ended = true;
                break;
            }
        }
        assert!(ended);
    }
}
