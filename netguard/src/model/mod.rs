//! In-memory graph model the rules evaluate against.
//!
//! [`NetlistGraph`] provides the id lookups every rule uses;
//! [`Connectivity`] is a petgraph view for component/net traversal.

pub mod connectivity;
pub mod graph;

pub use connectivity::{Connectivity, ConnectivityNode, ConnectivitySummary};
pub use graph::NetlistGraph;
