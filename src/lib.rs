#![doc = include_str!("../README.md")]

pub mod community;
pub mod eigen;
pub mod engine;
pub mod errors;
pub mod export;
pub mod graph;
pub mod matrix;

/// Re-exports of the types most callers need, gathered in one place.
pub mod prelude {
    pub use crate::community::{Bisector, Community, CommunityId, CommunityTree, RecursiveDivider};
    pub use crate::eigen::EigenMethod;
    pub use crate::engine::{Engine, EngineSettings, RunOutcome};
    pub use crate::errors::{EigenError, EngineError, InputError};
    pub use crate::graph::{Graph, GraphBuilder};
    pub use crate::matrix::{ModularityMatrix, PackedSymmetricMatrix};
}
