use thiserror::Error;

use crate::NodeId;

/// Errors returned when a caller breaks the precondition of a node-level
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The operation needs a real node but got the sentinel, i.e. an empty
    /// subtree.
    #[error("operation requires a non-empty subtree, got the sentinel")]
    Sentinel,
    #[error("node {0} is not in the tree")]
    UnknownNode(NodeId),
}

/// A broken red-black or search tree property found by
/// [`RedBlackTree::validate`](crate::RedBlackTree::validate).
///
/// Any of these means the tree code itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("sentinel must be black and keyless")]
    Sentinel,
    #[error("root {0} is red")]
    RedRoot(NodeId),
    #[error("root {0} has a parent")]
    RootHasParent(NodeId),
    #[error("node {child} does not point back to its parent {parent}")]
    BrokenParentLink { parent: NodeId, child: NodeId },
    #[error("link from {parent} leads to vacant slot {child}")]
    VacantLink { parent: NodeId, child: NodeId },
    #[error("red node {parent} has red child {child}")]
    RedRed { parent: NodeId, child: NodeId },
    #[error("node {node} has black height {left} on the left and {right} on the right")]
    BlackHeight {
        node: NodeId,
        left: usize,
        right: usize,
    },
    #[error("node {node} is out of order with its in-order predecessor {prev}")]
    Order { prev: NodeId, node: NodeId },
    #[error("tree reports {expected} nodes but {actual} are reachable")]
    Len { expected: usize, actual: usize },
}
