//! Skeleton module
//!
//! Semantic bone identifiers and the live binding that maps them onto the
//! currently loaded avatar's transformable nodes.

pub mod binding;
pub mod bones;

pub use binding::{BoneNode, ExpressionChannel, SkeletonBinding};
pub use bones::{BoneId, Side};
