//! Session module - the generic turn loop
//!
//! A [`Session`] owns one game's state, its RNG, counters, and undo history,
//! and drives every move through the same pipeline:
//!
//! 1. reject unless `Playing` and the rules accept the move
//! 2. snapshot the pre-move state onto the history stack
//! 3. apply the move to get a candidate board
//! 4. resolve the cascade to its fixpoint
//! 5. score, bump the turn, and track the best chain
//! 6. regenerate pending content
//! 7. check the terminal predicate
//!
//! Snapshots never include the RNG: undoing a move does not give back the
//! draws made for content generated after it.

use serde::Serialize;
use tracing::{debug, info};

use crate::history::History;
use crate::rng::SeedRng;
use crate::rules::{Rules, SessionStats};
use crate::seed::Seed;
use crate::share::{self, ShareCard};
use crate::types::{Cascade, GameId, Mode, Phase, Rejection};

/// What one committed move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Zero-based index of the move that was just committed.
    pub turn: u32,
    pub cascade: Cascade,
    /// Total points added, chain bonus included.
    pub points: u32,
    pub chain_bonus: u32,
}

/// Outcome of [`Session::play`].
#[derive(Debug, Clone, PartialEq)]
pub enum Turn {
    /// The move was refused; nothing changed.
    Rejected(Rejection),
    /// The move was committed and the session continues.
    Committed(TurnReport),
    /// The move was committed and ended the session.
    Ended {
        report: TurnReport,
        result: GameResult,
    },
}

impl Turn {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Turn::Rejected(_))
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            Turn::Rejected(_) => None,
            Turn::Committed(report) | Turn::Ended { report, .. } => Some(report),
        }
    }
}

/// Final statistics of a terminated session, handed to the score store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub game: GameId,
    pub seed: String,
    pub mode: Mode,
    pub phase: Phase,
    pub score: u32,
    pub turn: u32,
    pub best_chain: u32,
    pub share: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot<S> {
    state: S,
    phase: Phase,
    turn: u32,
    score: u32,
    best_chain: u32,
}

/// One live game session.
#[derive(Debug, Clone)]
pub struct Session<R: Rules> {
    rules: R,
    seed: Option<Seed>,
    rng: SeedRng,
    state: Option<R::State>,
    phase: Phase,
    turn: u32,
    score: u32,
    best_chain: u32,
    history: History<Snapshot<R::State>>,
}

impl<R: Rules> Session<R> {
    /// Create a session on the home screen.
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            seed: None,
            rng: SeedRng::new(""),
            state: None,
            phase: Phase::Home,
            turn: 0,
            score: 0,
            best_chain: 0,
            history: History::new(),
        }
    }

    /// Create a session and start it immediately.
    pub fn started(rules: R, seed: Seed) -> Self {
        let mut session = Self::new(rules);
        session.start(seed);
        session
    }

    /// Start (or restart) with a fresh seed: reseed the RNG, generate the
    /// board, reset counters, and clear history. Valid from any phase.
    pub fn start(&mut self, seed: Seed) {
        self.rng = SeedRng::new(seed.as_str());
        self.state = Some(self.rules.setup(&mut self.rng));
        self.phase = Phase::Playing;
        self.turn = 0;
        self.score = 0;
        self.best_chain = 0;
        self.history.clear();

        debug!(
            game = self.rules.game().as_str(),
            seed = seed.as_str(),
            mode = seed.mode().as_str(),
            "session started"
        );
        self.seed = Some(seed);
    }

    /// Run one move through the pipeline.
    pub fn play(&mut self, mv: R::Move) -> Turn {
        let game = self.rules.game();
        let Some(state) = self.state.as_mut().filter(|_| self.phase.is_playing()) else {
            debug!(game = game.as_str(), phase = self.phase.as_str(), "move outside play");
            return Turn::Rejected(Rejection::NotPlaying);
        };

        if let Err(reason) = self.rules.validate(state, &mv) {
            debug!(game = game.as_str(), ?mv, reason = reason.as_str(), "move rejected");
            return Turn::Rejected(reason);
        }

        self.history.push(Snapshot {
            state: state.clone(),
            phase: self.phase,
            turn: self.turn,
            score: self.score,
            best_chain: self.best_chain,
        });

        self.rules.apply(state, &mv, &mut self.rng);
        let cascade = self.rules.resolve(state);
        let points = self.rules.score(state, &cascade, self.turn);

        let report = TurnReport {
            turn: self.turn,
            cascade,
            points: points.total,
            chain_bonus: points.chain_bonus,
        };
        self.score = self.score.saturating_add(points.total);
        self.turn += 1;
        self.best_chain = self.best_chain.max(cascade.waves);

        self.rules.advance(state, &mv, &cascade, &mut self.rng);
        let verdict = self.rules.verdict(state);

        debug!(
            game = game.as_str(),
            turn = report.turn,
            waves = cascade.waves,
            units = cascade.units,
            points = report.points,
            "move committed"
        );

        match verdict {
            Some(end) => {
                self.phase = end;
                info!(
                    game = game.as_str(),
                    phase = end.as_str(),
                    score = self.score,
                    turns = self.turn,
                    "session ended"
                );
                match self.result() {
                    Some(result) => Turn::Ended { report, result },
                    None => Turn::Committed(report),
                }
            }
            None => Turn::Committed(report),
        }
    }

    /// Restore the state from before the last committed move.
    ///
    /// Only valid while playing; returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.state = Some(snapshot.state);
        self.phase = snapshot.phase;
        self.turn = snapshot.turn;
        self.score = snapshot.score;
        self.best_chain = snapshot.best_chain;
        debug!(game = self.rules.game().as_str(), turn = self.turn, "move undone");
        true
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Current board and pending content; `None` before the first start.
    pub fn state(&self) -> Option<&R::State> {
        self.state.as_ref()
    }

    pub fn seed(&self) -> Option<&Seed> {
        self.seed.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_chain(&self) -> u32 {
        self.best_chain
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// RNG values consumed so far (undo never lowers this).
    pub fn draws(&self) -> u64 {
        self.rng.draws()
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            turn: self.turn,
            score: self.score,
            best_chain: self.best_chain,
        }
    }

    /// Signature statistic lines for the current state.
    pub fn headline(&self) -> Vec<String> {
        match &self.state {
            Some(state) => self.rules.headline(state, &self.stats()),
            None => Vec::new(),
        }
    }

    /// Share text for the session so far; `None` before the first start.
    pub fn share(&self) -> Option<String> {
        let seed = self.seed.as_ref()?;
        let headline = self.headline();
        Some(share::render(&ShareCard {
            game: self.rules.game(),
            mode: seed.mode(),
            seed: seed.as_str(),
            score: self.score,
            turn: self.turn,
            phase: self.phase,
            headline: &headline,
        }))
    }

    /// Final statistics; only available once the session is terminal.
    pub fn result(&self) -> Option<GameResult> {
        if !self.phase.is_terminal() {
            return None;
        }
        let seed = self.seed.as_ref()?;
        Some(GameResult {
            game: self.rules.game(),
            seed: seed.as_str().to_string(),
            mode: seed.mode(),
            phase: self.phase,
            score: self.score,
            turn: self.turn,
            best_chain: self.best_chain,
            share: self.share()?,
        })
    }
}
