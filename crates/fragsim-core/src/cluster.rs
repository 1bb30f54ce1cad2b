//! The cluster: an ordered collection of nodes.
//!
//! Node order is load order and is significant: both schedulers evaluate
//! nodes in this order, which fixes first-fit placement and FGD tie-breaks.

use crate::node::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Nodes in trace order; defines evaluation and tie-break order.
    pub nodes: Vec<Node>,
    /// Aggregate derived GPU capacity at construction time.
    pub total_gpu_capacity: f64,
    /// Aggregate derived GPU capacity as of the last update.
    pub free_gpu_capacity: f64,
}

impl Cluster {
    pub fn new(nodes: Vec<Node>) -> Self {
        let capacity = nodes.iter().map(Node::gpu_capacity).sum();
        Self {
            nodes,
            total_gpu_capacity: capacity,
            free_gpu_capacity: capacity,
        }
    }

    /// Recompute the aggregate free GPU capacity from current node state.
    pub fn update_gpu_capacity(&mut self) {
        self.free_gpu_capacity = self.nodes.iter().map(Node::gpu_capacity).sum();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
