//! First-fit placement.
//!
//! The simplest policy: each pod lands on the first node in cluster order
//! that can serve it. Fast — O(pods × nodes) worst case — but blind to
//! fragmentation.

use crate::traits::Scheduler;
use fragsim_core::{Cluster, PodQueue, ResourceError};

/// First-fit placer.
pub struct FirstFit;

impl FirstFit {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FirstFit {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for FirstFit {
    fn schedule(
        &mut self,
        pods: &mut PodQueue,
        cluster: &mut Cluster,
    ) -> Result<u64, ResourceError> {
        let mut scheduled = 0;
        while let Some(mut pod) = pods.pop() {
            // First node in fixed cluster order that can host the pod;
            // unservable pods are dropped.
            if let Some(idx) = cluster.nodes.iter().position(|node| node.can_serve(&pod)) {
                cluster.nodes[idx].serve(&mut pod)?;
                scheduled += 1;
            }
        }
        Ok(scheduled)
    }

    fn name(&self) -> &str {
        "first_fit"
    }
}
