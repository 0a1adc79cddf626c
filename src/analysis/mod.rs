use crate::graph::node::NodeId;
use thiserror::Error;

pub mod arrivals;
pub mod flow;
pub mod impact;
pub mod pairs;
pub mod routing;

/// A query named endpoints the graph cannot resolve. These are caller
/// construction errors, fatal to the call and never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("source and target must be distinct nodes")]
    SameEndpoints,
}
