//! Pure resolution core.
//!
//! This module contains the functional core: condition evaluation, edge
//! extraction, fixed-point dependency resolution, and topological ordering.
//! All config-object handling is composed on top in `engine`.

pub mod condition;
pub mod edges;
pub mod order;
pub mod resolve;


// Re-export commonly used types and functions
pub use condition::{condition_holds, path_holds};
pub use edges::{extract_edges, Edge, EdgeGranularity};
pub use order::{order_features, OrderError};
pub use resolve::{resolve, Resolution, ResolveError};
