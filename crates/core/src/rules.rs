//! The per-game rule set plugged into [`Session`](crate::session::Session).
//!
//! A game supplies its board shape, move validation, the candidate-board
//! transform, its local cascade rule, a score formula, content regeneration,
//! and a terminal predicate. The session owns the turn loop, history, and
//! bookkeeping so none of that is repeated per game.

use std::fmt::Debug;

use crate::rng::SeedRng;
use crate::scoring::ScoreResult;
use crate::types::{Cascade, GameId, Phase, Rejection};

/// Session-wide counters a game may quote in its share headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub turn: u32,
    pub score: u32,
    /// Most waves resolved by a single move.
    pub best_chain: u32,
}

pub trait Rules {
    /// Board plus pending content and any game-specific counters.
    type State: Clone + Debug + PartialEq;
    /// One player action.
    type Move: Clone + Debug;

    fn game(&self) -> GameId;

    /// Generate the opening board and pending content.
    fn setup(&self, rng: &mut SeedRng) -> Self::State;

    /// Check a move against the current state without touching it.
    ///
    /// Must not draw from the RNG: a rejected move leaves the stream untouched.
    fn validate(&self, state: &Self::State, mv: &Self::Move) -> Result<(), Rejection>;

    /// Apply a validated move, producing the candidate board.
    fn apply(&self, state: &mut Self::State, mv: &Self::Move, rng: &mut SeedRng);

    /// Resolve the candidate board to its fixpoint.
    fn resolve(&self, state: &mut Self::State) -> Cascade;

    /// Points earned by this move. `turn` is the zero-based move index.
    fn score(&self, state: &Self::State, cascade: &Cascade, turn: u32) -> ScoreResult;

    /// Regenerate pending content and run post-resolution effects.
    fn advance(
        &self,
        state: &mut Self::State,
        mv: &Self::Move,
        cascade: &Cascade,
        rng: &mut SeedRng,
    );

    /// Terminal predicate, evaluated after every committed move.
    fn verdict(&self, state: &Self::State) -> Option<Phase>;

    /// Signature statistic lines for the share string.
    fn headline(&self, state: &Self::State, stats: &SessionStats) -> Vec<String>;
}
