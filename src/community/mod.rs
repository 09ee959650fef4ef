//! The community tree data model and the algorithms that build it (C4,
//! C5, C6, §3, §4.4, §4.5, §4.6).

pub mod bisector;
pub mod divider;
pub mod tree;

pub use bisector::Bisector;
pub use divider::RecursiveDivider;
pub use tree::{Community, CommunityId, CommunityTree};
