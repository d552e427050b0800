//! Ribbon Flip - reverse segments to line up three different colors
//!
//! Each move appends the pending color to the ribbon and then reverses one
//! segment of it. Any window of three mutually different colors is cut out;
//! the ribbon closes up and is scanned again.

use serde::{Deserialize, Serialize};

use crate::core::scoring::{calculate_score, ScoreResult};
use crate::core::{resolve_to_fixpoint, Rules, SeedRng, SessionStats};
use crate::types::*;

const TRIPLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RibbonState {
    /// Color indices `0..RIBBON_COLORS`.
    pub colors: Vec<u8>,
    pub pending: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RibbonMove {
    /// Reverse the inclusive segment between two positions. Positions count
    /// the pending color, which is appended first.
    Reverse { from: usize, to: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ribbon;

fn draw_color(rng: &mut SeedRng) -> u8 {
    rng.pick_index(RIBBON_COLORS as usize) as u8
}

fn all_different(window: &[u8]) -> bool {
    window[0] != window[1] && window[1] != window[2] && window[0] != window[2]
}

/// Opening ribbon with no all-different window.
fn draw_ribbon(rng: &mut SeedRng) -> Vec<u8> {
    let mut colors: Vec<u8> = Vec::with_capacity(RIBBON_MAX_LEN);
    for i in 0..RIBBON_START_LEN {
        let next = if i >= 2 && colors[i - 2] != colors[i - 1] {
            // Repeat one of the two previous colors.
            colors[i - 2 + rng.pick_index(2)]
        } else {
            draw_color(rng)
        };
        colors.push(next);
    }
    colors
}

/// One pass: cut every non-overlapping all-different window, scanning left
/// to right. Returns the triples cut.
pub fn cut_triples(colors: &mut Vec<u8>) -> u32 {
    let mut keep = vec![true; colors.len()];
    let mut triples = 0;
    let mut i = 0;
    while i + TRIPLE <= colors.len() {
        if all_different(&colors[i..i + TRIPLE]) {
            keep[i..i + TRIPLE].fill(false);
            triples += 1;
            i += TRIPLE;
        } else {
            i += 1;
        }
    }

    if triples > 0 {
        let mut flags = keep.iter();
        colors.retain(|_| flags.next().copied().unwrap_or(true));
    }
    triples
}

impl Rules for Ribbon {
    type State = RibbonState;
    type Move = RibbonMove;

    fn game(&self) -> GameId {
        GameId::Ribbon
    }

    fn setup(&self, rng: &mut SeedRng) -> RibbonState {
        let colors = draw_ribbon(rng);
        RibbonState {
            colors,
            pending: draw_color(rng),
        }
    }

    fn validate(&self, state: &RibbonState, mv: &RibbonMove) -> Result<(), Rejection> {
        let RibbonMove::Reverse { from, to } = *mv;
        let len = state.colors.len() + 1;
        if from >= len || to >= len {
            Err(Rejection::OutOfBounds)
        } else if from == to {
            Err(Rejection::SameIndex)
        } else {
            Ok(())
        }
    }

    fn apply(&self, state: &mut RibbonState, mv: &RibbonMove, _rng: &mut SeedRng) {
        let RibbonMove::Reverse { from, to } = *mv;
        state.colors.push(state.pending);
        let (lo, hi) = (from.min(to), from.max(to));
        if let Some(segment) = state.colors.get_mut(lo..=hi) {
            segment.reverse();
        }
    }

    fn resolve(&self, state: &mut RibbonState) -> Cascade {
        resolve_to_fixpoint(&mut state.colors, cut_triples)
    }

    fn score(&self, _state: &RibbonState, cascade: &Cascade, _turn: u32) -> ScoreResult {
        calculate_score(cascade, RIBBON_TRIPLE_POINTS, RIBBON_CASCADE_BONUS)
    }

    fn advance(
        &self,
        state: &mut RibbonState,
        _mv: &RibbonMove,
        _cascade: &Cascade,
        rng: &mut SeedRng,
    ) {
        state.pending = draw_color(rng);
    }

    fn verdict(&self, state: &RibbonState) -> Option<Phase> {
        (state.colors.len() >= RIBBON_MAX_LEN).then_some(Phase::GameOver)
    }

    fn headline(&self, _state: &RibbonState, stats: &SessionStats) -> Vec<String> {
        vec![format!("Best cascade: {}", stats.best_chain)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(state: &mut RibbonState, from: usize, to: usize) -> (Cascade, ScoreResult) {
        let rules = Ribbon;
        let mv = RibbonMove::Reverse { from, to };
        let mut rng = SeedRng::new("test");
        assert!(rules.validate(state, &mv).is_ok());
        rules.apply(state, &mv, &mut rng);
        let cascade = rules.resolve(state);
        let score = rules.score(state, &cascade, 0);
        rules.advance(state, &mv, &cascade, &mut rng);
        (cascade, score)
    }

    #[test]
    fn test_cut_is_greedy_and_non_overlapping() {
        let mut colors = vec![0, 1, 2, 3, 1, 2];
        assert_eq!(cut_triples(&mut colors), 2);
        assert!(colors.is_empty());

        let mut colors = vec![0, 1, 2, 0];
        assert_eq!(cut_triples(&mut colors), 1);
        assert_eq!(colors, vec![0]);
    }

    #[test]
    fn test_closing_gap_cascades() {
        // Cutting 1,2,3 out of the middle leaves 1,2,0, which cuts next wave.
        let mut colors = vec![1, 2, 1, 2, 3, 0];
        let cascade = resolve_to_fixpoint(&mut colors, cut_triples);
        assert_eq!(cascade, Cascade { waves: 2, units: 2 });
        assert!(colors.is_empty());
    }

    #[test]
    fn test_reverse_includes_pending_color() {
        let mut state = RibbonState {
            colors: vec![1, 2, 1, 2, 0],
            pending: 3,
        };
        let (cascade, score) = commit(&mut state, 5, 4);
        assert_eq!(cascade.waves, 2);
        assert_eq!(score.total, 2 * RIBBON_TRIPLE_POINTS + RIBBON_CASCADE_BONUS);
        assert!(state.colors.is_empty());
    }

    #[test]
    fn test_quiet_reverse_keeps_length() {
        let mut state = RibbonState {
            colors: vec![0, 0, 1, 1, 0],
            pending: 0,
        };
        let (cascade, _) = commit(&mut state, 0, 2);
        assert!(cascade.is_quiet());
        assert_eq!(state.colors, vec![1, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn test_resolved_ribbon_has_no_triple() {
        for seed in ["2024-03-09", "a", "b", "c", "triples", "practice-4"] {
            let mut rng = SeedRng::new(seed);
            let mut colors: Vec<u8> = (0..RIBBON_MAX_LEN).map(|_| draw_color(&mut rng)).collect();
            resolve_to_fixpoint(&mut colors, cut_triples);
            assert!(!colors.windows(3).any(all_different), "{seed}");
        }
    }

    #[test]
    fn test_reverse_validation() {
        let rules = Ribbon;
        let state = RibbonState {
            colors: vec![0, 0, 1, 1, 0],
            pending: 0,
        };
        let reverse = |from, to| RibbonMove::Reverse { from, to };
        assert_eq!(rules.validate(&state, &reverse(0, 6)), Err(Rejection::OutOfBounds));
        assert_eq!(rules.validate(&state, &reverse(3, 3)), Err(Rejection::SameIndex));
        assert_eq!(rules.validate(&state, &reverse(5, 0)), Ok(()));
    }

    #[test]
    fn test_opening_ribbon_has_no_triple() {
        for seed in ["2024-03-09", "a", "b", "ribbon", "practice-9"] {
            let state = Ribbon.setup(&mut SeedRng::new(seed));
            assert_eq!(state.colors.len(), RIBBON_START_LEN);
            assert!(!state.colors.windows(3).any(all_different));
            assert!(state.pending < RIBBON_COLORS);
        }
    }

    #[test]
    fn test_long_ribbon_ends_session() {
        let mut state = RibbonState {
            colors: vec![0; RIBBON_MAX_LEN - 1],
            pending: 0,
        };
        assert_eq!(Ribbon.verdict(&state), None);
        commit(&mut state, 0, 1);
        assert_eq!(Ribbon.verdict(&state), Some(Phase::GameOver));
    }
}
