//! Store module - persisted best scores
//!
//! Each game keeps one [`BestRecord`] under its storage key
//! (`cascade-arcade.<game>.best`), serialized as JSON through an opaque
//! [`KeyValue`] backend. [`ScoreBook::commit`] applies the write contract:
//!
//! - `bestScore` is replaced only by a strictly greater score
//! - the last-daily fields are overwritten by every daily result
//!
//! Reads are total: a missing, unreadable, or malformed record comes back as
//! the zero-valued default and is logged at `warn`.
//!
//! # Example
//!
//! ```
//! use cascade_arcade_store::{MemoryKv, ScoreBook};
//! use cascade_arcade_store::types::GameId;
//!
//! let book = ScoreBook::new(MemoryKv::new());
//! assert_eq!(book.load(GameId::Fold).best_score, 0);
//! ```

pub mod error;
pub mod kv;
pub mod record;

pub use cascade_arcade_core as core;
pub use cascade_arcade_types as types;

pub use error::{StoreError, StoreResult};
pub use kv::{FileKv, KeyValue, MemoryKv};
pub use record::{BestRecord, ScoreBook};
