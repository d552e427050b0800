//! Engine module - the six rule sets
//!
//! Each game is a unit struct implementing [`core::Rules`]. The struct holds
//! no data; everything that changes lives in the game's `State`, so any rule
//! set can be driven by the generic [`core::Session`].
//!
//! | Module | Game | Move | Local rule |
//! |--------|------|------|------------|
//! | [`stacker`] | Bead Stack | swap / drop | `1,2,3` runs clear, beads fall |
//! | [`sandpile`] | Ink Burst | stamp a stencil | cells at 4 burst into neighbors |
//! | [`fold`] | Paper Fold | fold along a line | lit pairs cancel |
//! | [`tiles`] | Letter Line | place a letter | equal neighbors cancel |
//! | [`ribbon`] | Ribbon Flip | reverse a segment | three different colors cut |
//! | [`collider`] | Anchor Drift | drop an anchor | tokens drift and collide |
//!
//! # Example
//!
//! ```
//! use cascade_arcade_engine::core::{Seed, Session};
//! use cascade_arcade_engine::tiles::{Tiles, TilesMove};
//! use cascade_arcade_engine::types::{Mode, Phase};
//!
//! let mut session = Session::started(Tiles, Seed::custom("2024-03-09", Mode::Daily));
//! session.play(TilesMove::Place { index: 0 });
//! assert_eq!(session.turn(), 1);
//! assert_eq!(session.phase(), Phase::Playing);
//! ```

pub mod collider;
pub mod fold;
pub mod ribbon;
pub mod sandpile;
pub mod stacker;
pub mod tiles;

pub use cascade_arcade_core as core;
pub use cascade_arcade_types as types;

pub use collider::{Collider, ColliderMove, ColliderState};
pub use fold::{Fold, FoldMove, FoldState};
pub use ribbon::{Ribbon, RibbonMove, RibbonState};
pub use sandpile::{Sandpile, SandpileMove, SandpileState};
pub use stacker::{Stacker, StackerMove, StackerState};
pub use tiles::{Tiles, TilesMove, TilesState};
