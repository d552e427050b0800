//! Adapter module - headless JSON-lines control
//!
//! Lets an external agent or test harness play any of the six games over
//! standard streams. Requests and responses are line-delimited JSON; the
//! driver is synchronous and owns exactly one session at a time.
//!
//! # Message Types
//!
//! ## Client → Driver
//!
//! - **start**: start or restart, optionally with `seed` and `mode`
//! - **move**: one game-specific move, tagged by `kind`
//! - **undo**: take back the last committed move
//! - **share**: request the share text
//! - **observe**: request a fresh observation
//!
//! ## Driver → Client
//!
//! - **observation**: phase, counters, headline, and the full game state
//! - **rejected**: the move was illegal; nothing changed
//! - **share**: share text
//! - **result**: final record, once per session, after the score book is updated
//! - **error**: malformed request or store failure
//!
//! # Environment Variables
//!
//! - `CASCADE_ARCADE_DATA_DIR`: best-score directory (default: `.cascade-arcade`)
//! - `CASCADE_ARCADE_MODE`: `daily` or `practice` (default: `daily`)
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Driver: {"type":"start","seed":"2024-03-09","mode":"daily"}
//! Driver -> Client: {"type":"observation","seq":1,"game":"tiles","phase":"playing",...}
//! Client -> Driver: {"type":"move","move":{"kind":"place","index":2}}
//! Driver -> Client: {"type":"observation","seq":2,...,"last":{"turn":0,"cascade":{...},...}}
//! Client -> Driver: {"type":"move","move":{"kind":"place","index":99}}
//! Driver -> Client: {"type":"rejected","seq":3,"reason":"out_of_bounds"}
//! ```

pub mod config;
pub mod driver;
pub mod protocol;

pub use cascade_arcade_core as core;
pub use cascade_arcade_engine as engine;
pub use cascade_arcade_store as store;
pub use cascade_arcade_types as types;

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use crate::core::Seed;
use crate::engine::{Collider, Fold, Ribbon, Sandpile, Stacker, Tiles};
use crate::store::{KeyValue, ScoreBook};
use crate::types::GameId;

pub use config::RunnerConfig;
pub use driver::{write_lines, Driver};
pub use protocol::{parse_request, ErrorCode, Observation, Request, Response};

/// Run `game` over the given streams until input ends.
///
/// The opening session starts immediately from `config.seed` (or the mode's
/// default seed) and its observation is the first line written.
pub fn run_game<K, I, O>(
    game: GameId,
    config: &RunnerConfig,
    book: ScoreBook<K>,
    input: I,
    output: O,
) -> Result<()>
where
    K: KeyValue,
    I: BufRead,
    O: Write,
{
    let seed = match &config.seed {
        Some(value) => Seed::custom(value.clone(), config.mode),
        None => Seed::for_mode(config.mode),
    };
    info!(game = game.as_str(), seed = seed.as_str(), "driver starting");

    match game {
        GameId::Stacker => drive(Driver::new(Stacker, book, config.mode), seed, input, output),
        GameId::Sandpile => drive(Driver::new(Sandpile, book, config.mode), seed, input, output),
        GameId::Fold => drive(Driver::new(Fold, book, config.mode), seed, input, output),
        GameId::Tiles => drive(Driver::new(Tiles, book, config.mode), seed, input, output),
        GameId::Ribbon => drive(Driver::new(Ribbon, book, config.mode), seed, input, output),
        GameId::Collider => drive(Driver::new(Collider, book, config.mode), seed, input, output),
    }
}

fn drive<R, K, I, O>(mut driver: Driver<R, K>, seed: Seed, input: I, mut output: O) -> Result<()>
where
    R: crate::core::Rules,
    R::State: serde::Serialize,
    R::Move: serde::de::DeserializeOwned,
    K: KeyValue,
    I: BufRead,
    O: Write,
{
    let opening = driver.start(seed)?;
    write_lines(&opening, &mut output)?;
    driver.run(input, output)
}
