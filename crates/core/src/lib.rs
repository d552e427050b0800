//! Core engine module - pure, deterministic, and testable
//!
//! This crate holds everything the six puzzle games share. It has **no I/O**:
//! persistence and rendering are side effects applied by callers.
//!
//! - **Deterministic**: the same seed and move sequence always produce the
//!   same boards, scores, and pending content
//! - **Total**: every move returns a value; illegal input is a no-op, never a panic
//! - **Generic**: one [`Session`] drives any [`Rules`] implementation
//!
//! # Module Structure
//!
//! - [`rng`]: string-seeded random stream and weighted selection
//! - [`seed`]: daily and practice seeds
//! - [`grid`]: flat row-major 2D board storage
//! - [`cascade`]: the shared fixpoint loop
//! - [`scoring`]: per-unit points plus the one-time chain bonus
//! - [`history`]: undo snapshots
//! - [`rules`]: the per-game plugin trait
//! - [`session`]: the turn loop and state machine
//! - [`share`]: share-string formatting
//!
//! # Example
//!
//! ```
//! use cascade_arcade_core::{resolve_to_fixpoint, SeedRng};
//!
//! let mut rng = SeedRng::new("2024-03-09");
//! let roll = rng.pick_index(3);
//! assert!(roll < 3);
//!
//! // Cancel adjacent equal pairs until stable.
//! let mut line = vec![1, 2, 2, 1, 3];
//! let cascade = resolve_to_fixpoint(&mut line, |line: &mut Vec<i32>| {
//!     match line.windows(2).position(|w| w[0] == w[1]) {
//!         Some(i) => {
//!             line.drain(i..i + 2);
//!             2
//!         }
//!         None => 0,
//!     }
//! });
//! assert_eq!(line, vec![3]);
//! assert_eq!(cascade.waves, 2);
//! ```

pub mod cascade;
pub mod grid;
pub mod history;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod seed;
pub mod session;
pub mod share;

pub use cascade_arcade_types as types;

// Re-export commonly used types for convenience
pub use cascade::resolve_to_fixpoint;
pub use grid::{Grid, ORTHOGONAL};
pub use history::History;
pub use rng::SeedRng;
pub use rules::{Rules, SessionStats};
pub use scoring::{calculate_score, ScoreResult};
pub use seed::Seed;
pub use session::{GameResult, Session, Turn, TurnReport};
