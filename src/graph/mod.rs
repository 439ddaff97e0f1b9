//! Mentor/mentee graph: resolution, projections and interaction state.

pub mod details;
pub mod interaction;
pub mod resolver;
pub mod table;

pub use resolver::{GraphEdge, GraphNode, NodeKey, NodeKind, ResolvedGraph, resolve};
pub use interaction::{InteractionState, ViewMode};
