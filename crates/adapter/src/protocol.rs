//! Protocol module - JSON message types for the line driver
//!
//! One JSON object per line in each direction. Every message carries a
//! `type` tag; responses also carry `seq`, a counter the driver bumps for
//! each line it writes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{GameResult, TurnReport};
use crate::types::{GameId, Mode, Phase, Rejection};

// ============== Client -> Driver ==============

/// Inbound request, generic over the game's move type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request<M> {
    /// Start or restart. Without a seed, the mode picks today's date or a
    /// fresh practice token.
    Start {
        #[serde(default)]
        seed: Option<String>,
        #[serde(default)]
        mode: Option<Mode>,
    },
    Move {
        #[serde(rename = "move")]
        mv: M,
    },
    Undo,
    Share,
    Observe,
}

/// Parse one request line.
pub fn parse_request<M: DeserializeOwned>(line: &str) -> Result<Request<M>, serde_json::Error> {
    serde_json::from_str(line)
}

// ============== Driver -> Client ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The line is not a valid request for this game.
    MalformedRequest,
    /// `undo` with an empty history or outside play.
    NothingToUndo,
    /// `share` before any session started.
    NotStarted,
    /// The best-score store could not be written.
    StoreFailed,
}

/// Full session snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Observation<'a, S> {
    pub game: GameId,
    pub seed: Option<&'a str>,
    pub mode: Option<Mode>,
    pub phase: Phase,
    pub turn: u32,
    pub score: u32,
    pub best_chain: u32,
    pub undo_depth: usize,
    pub headline: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<TurnReport>,
    pub state: Option<&'a S>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response<'a, S> {
    Observation {
        seq: u64,
        #[serde(flatten)]
        observation: Observation<'a, S>,
    },
    Rejected {
        seq: u64,
        reason: Rejection,
    },
    Share {
        seq: u64,
        text: String,
    },
    /// Emitted once, on the move that ends the session.
    Result {
        seq: u64,
        result: &'a GameResult,
        new_best: bool,
    },
    Error {
        seq: u64,
        code: ErrorCode,
        message: String,
    },
}
