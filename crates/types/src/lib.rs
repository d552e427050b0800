//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the arcade.
//! All types are plain data with no behavior beyond parsing and formatting,
//! so they can be shared by the rule engines, the score store, and the JSON
//! adapter alike.
//!
//! # Games
//!
//! | Id | Title | Board | Signature statistic |
//! |----|-------|-------|---------------------|
//! | `stacker` | Bead Stack | 12x3 grid + overflow row | best chain |
//! | `sandpile` | Ink Burst | 7x7 grid | best burst, spill |
//! | `fold` | Paper Fold | 6x6 lit grid | lit cells, folds used |
//! | `tiles` | Letter Line | letter sequence (max 12) | best chain |
//! | `ribbon` | Ribbon Flip | color sequence (max 14) | best cascade |
//! | `collider` | Anchor Drift | 6x6 grid | best combo, blocks |
//!
//! # Scoring Constants
//!
//! Every game scores `units * PER_UNIT`, plus `(waves - 1) * PER_EXTRA_WAVE`
//! once when a move resolves in more than one wave:
//!
//! | Game | Per unit | Per extra wave |
//! |------|----------|----------------|
//! | stacker | 10 per run | 15 |
//! | sandpile | 5 per burst | 20 |
//! | fold | 10 per pair | - |
//! | tiles | 5 per tile | 30 |
//! | ribbon | 15 per triple | 40 |
//! | collider | 10 per token | 25 |
//!
//! # Examples
//!
//! ```
//! use cascade_arcade_types::{GameId, Mode, Phase};
//!
//! let game = GameId::from_str("Sandpile").unwrap();
//! assert_eq!(game, GameId::Sandpile);
//! assert_eq!(game.title(), "Ink Burst");
//!
//! assert_eq!(Mode::from_str("daily"), Some(Mode::Daily));
//! assert!(Phase::Win.is_terminal());
//! assert!(!Phase::Playing.is_terminal());
//! ```

use serde::{Deserialize, Serialize};

// ============== Stacker ==============

/// Visible rows of the bead stack.
pub const STACKER_ROWS: usize = 12;

/// Columns of the bead stack (and beads per incoming row).
pub const STACKER_COLS: usize = 3;

/// Highest bead rank; ranks run 1..=3.
pub const STACKER_RANKS: u8 = 3;

/// Swaps available at the start of a stacker session (also the refund cap).
pub const STACKER_SWAPS: u8 = 3;

/// Points per matched run.
pub const STACKER_RUN_POINTS: u32 = 10;

/// Chain bonus per wave after the first.
pub const STACKER_CHAIN_BONUS: u32 = 15;

// ============== Sandpile ==============

/// Side length of the ink grid.
pub const SANDPILE_SIZE: usize = 7;

/// Ink level at which a cell bursts.
pub const SANDPILE_THRESHOLD: u8 = 4;

/// Spill level that ends the session.
pub const SANDPILE_SPILL_LIMIT: u32 = 24;

/// Number of stencil offers shown at once.
pub const SANDPILE_OFFERS: usize = 3;

/// Points per burst.
pub const SANDPILE_BURST_POINTS: u32 = 5;

/// Cascade bonus per burst generation after the first.
pub const SANDPILE_WAVE_BONUS: u32 = 20;

// ============== Fold ==============

/// Side length of the unfolded paper.
pub const FOLD_SIZE: usize = 6;

/// Folds in the hidden solution used to generate a puzzle.
pub const FOLD_SOLUTION_STEPS: usize = 3;

/// Folds available to the player.
pub const FOLD_BUDGET: u8 = 4;

/// Points per annihilated pair of lit cells.
pub const FOLD_PAIR_POINTS: u32 = 10;

/// Flat bonus for clearing the paper.
pub const FOLD_CLEAR_BONUS: u32 = 100;

/// Bonus per fold left unused on a clear.
pub const FOLD_SPARE_BONUS: u32 = 50;

// ============== Tiles ==============

/// Distinct letters (`A..=D`).
pub const TILES_LETTERS: u8 = 4;

/// Letters on the line at session start.
pub const TILES_START_LEN: usize = 4;

/// Line length that ends the session.
pub const TILES_MAX_LEN: usize = 12;

/// Points per removed tile.
pub const TILES_TILE_POINTS: u32 = 5;

/// Chain bonus per consecutive cancellation after the first.
pub const TILES_CHAIN_BONUS: u32 = 30;

// ============== Ribbon ==============

/// Distinct ribbon colors.
pub const RIBBON_COLORS: u8 = 4;

/// Colors on the ribbon at session start.
pub const RIBBON_START_LEN: usize = 5;

/// Ribbon length that ends the session.
pub const RIBBON_MAX_LEN: usize = 14;

/// Points per removed triple.
pub const RIBBON_TRIPLE_POINTS: u32 = 15;

/// Cascade bonus per wave after the first.
pub const RIBBON_CASCADE_BONUS: u32 = 40;

// ============== Collider ==============

/// Side length of the collider grid.
pub const COLLIDER_SIZE: usize = 6;

/// Tokens placed at session start.
pub const COLLIDER_START_TOKENS: usize = 6;

/// Tokens spawned after every move.
pub const COLLIDER_SPAWNS: usize = 2;

/// Block count that ends the session.
pub const COLLIDER_BLOCK_LIMIT: u32 = 6;

/// Points per annihilated token.
pub const COLLIDER_TOKEN_POINTS: u32 = 10;

/// Combo bonus per colliding step after the first.
pub const COLLIDER_COMBO_BONUS: u32 = 25;

/// The six turn-based games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameId {
    Stacker,
    Sandpile,
    Fold,
    Tiles,
    Ribbon,
    Collider,
}

impl GameId {
    /// All games in menu order.
    pub const ALL: [GameId; 6] = [
        GameId::Stacker,
        GameId::Sandpile,
        GameId::Fold,
        GameId::Tiles,
        GameId::Ribbon,
        GameId::Collider,
    ];

    /// Parse a game id (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cascade_arcade_types::GameId;
    ///
    /// assert_eq!(GameId::from_str("fold"), Some(GameId::Fold));
    /// assert_eq!(GameId::from_str("RIBBON"), Some(GameId::Ribbon));
    /// assert_eq!(GameId::from_str("runner"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stacker" => Some(GameId::Stacker),
            "sandpile" => Some(GameId::Sandpile),
            "fold" => Some(GameId::Fold),
            "tiles" => Some(GameId::Tiles),
            "ribbon" => Some(GameId::Ribbon),
            "collider" => Some(GameId::Collider),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Stacker => "stacker",
            GameId::Sandpile => "sandpile",
            GameId::Fold => "fold",
            GameId::Tiles => "tiles",
            GameId::Ribbon => "ribbon",
            GameId::Collider => "collider",
        }
    }

    /// Display title, used as the first line of the share string.
    pub fn title(&self) -> &'static str {
        match self {
            GameId::Stacker => "Bead Stack",
            GameId::Sandpile => "Ink Burst",
            GameId::Fold => "Paper Fold",
            GameId::Tiles => "Letter Line",
            GameId::Ribbon => "Ribbon Flip",
            GameId::Collider => "Anchor Drift",
        }
    }

    /// Key under which the best-score record is persisted.
    pub fn storage_key(&self) -> String {
        format!("cascade-arcade.{}.best", self.as_str())
    }
}

/// Where a seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Seeded from the calendar date; identical for every player that day.
    Daily,
    /// Seeded uniquely per session.
    Practice,
}

impl Mode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(Mode::Daily),
            "practice" => Some(Mode::Practice),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Daily => "daily",
            Mode::Practice => "practice",
        }
    }
}

/// Session screen state.
///
/// `Home -> Playing -> {GameOver | Win | Lose}`. Terminal phases are absorbing
/// until a new session is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Home,
    Playing,
    /// Survival game ended (overflow, spill, blocks, length).
    GameOver,
    /// Bounded-moves game cleared.
    Win,
    /// Bounded-moves game ran out of moves.
    Lose,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Win | Phase::Lose)
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Home => "home",
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
            Phase::Win => "win",
            Phase::Lose => "lose",
        }
    }

    /// Win/lose outcome of a bounded-moves game, if this phase is one.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Win => Some(Outcome::Win),
            Phase::Lose => Some(Outcome::Lose),
            _ => None,
        }
    }
}

/// Result of a bounded-moves session, persisted for the fold game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

/// Result of running a cascade resolver to its fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cascade {
    /// Passes that found and resolved at least one locus.
    pub waves: u32,
    /// Units resolved over all waves (runs, bursts, pairs, tiles, triples, tokens).
    pub units: u32,
}

impl Cascade {
    /// A resolution that found nothing on its first pass.
    pub const QUIET: Cascade = Cascade { waves: 0, units: 0 };

    pub fn is_quiet(&self) -> bool {
        self.waves == 0
    }

    /// Whether the multi-wave bonus applies.
    pub fn is_chain(&self) -> bool {
        self.waves > 1
    }
}

/// Why a move was refused.
///
/// A rejected move is a no-op: no turn is consumed and no history is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The session is not in the `Playing` phase.
    NotPlaying,
    /// A target cell, slot, or index lies outside the board.
    OutOfBounds,
    /// Two selections that must differ were the same.
    SameIndex,
    /// The swap budget is spent.
    NoSwapsLeft,
    /// The requested offer slot is empty or does not exist.
    NoSuchOffer,
    /// A fold line not strictly inside the paper.
    InvalidLine,
    /// The target cell is a permanent block.
    Blocked,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::NotPlaying => "not_playing",
            Rejection::OutOfBounds => "out_of_bounds",
            Rejection::SameIndex => "same_index",
            Rejection::NoSwapsLeft => "no_swaps_left",
            Rejection::NoSuchOffer => "no_such_offer",
            Rejection::InvalidLine => "invalid_line",
            Rejection::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
