//! Cascade Arcade (workspace facade crate).
//!
//! Six deterministic turn-based puzzle games sharing one engine. This package
//! re-exports the member crates under short names so callers can depend on a
//! single crate: `cascade_arcade::{core,engine,store,adapter,types}`.

pub use cascade_arcade_adapter as adapter;
pub use cascade_arcade_core as core;
pub use cascade_arcade_engine as engine;
pub use cascade_arcade_store as store;
pub use cascade_arcade_types as types;
