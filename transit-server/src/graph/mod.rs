//! Transit graph construction.
//!
//! Converts a network snapshot (lines with ordered stop sequences, walking
//! correspondences) into a weighted directed graph whose nodes are "a stop
//! as served by a specific line".

mod builder;
mod geo;
mod model;
mod transfers;

pub use builder::{GraphBuilder, GraphStats};
pub use geo::great_circle_km;
pub use model::{EdgeKind, Graph, NodeIndex, TransitEdge, TransitNode};
