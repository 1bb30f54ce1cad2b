//! Local fragmentation-gradient-descent placement.
//!
//! A local variant of the FGD heuristic from Weng et al. (ATC 2023): for
//! each pod, every node is scored by how much its expected fragmentation
//! would *increase* if it hosted the pod, and the pod lands on the node
//! with the smallest increase. Tie-breaks are stable: strict less-than
//! comparison keeps the first node in cluster order that achieves the
//! minimum, which makes runs reproducible.

use crate::traits::Scheduler;
use fragsim_core::{Cluster, Pod, PodDistribution, PodQueue, ResourceError};

/// Local FGD placer.
pub struct LocalFgd;

impl LocalFgd {
    pub fn new() -> Self {
        Self
    }

    /// Index of the node with the minimum expected-fragmentation increase
    /// for `pod`, or `None` when no node can serve it.
    fn min_frag_node(
        &self,
        pod: &Pod,
        distribution: &PodDistribution,
        cluster: &Cluster,
    ) -> Result<Option<usize>, ResourceError> {
        let mut best_node = None;
        let mut best_delta = f64::INFINITY;

        for (idx, node) in cluster.nodes.iter().enumerate() {
            if !node.can_serve(pod) {
                continue;
            }
            let frag_current = node.expected_frag(distribution);
            let frag_after = node.hypothetical_expected_frag(pod, distribution)?;
            let delta = frag_after - frag_current;

            if delta < best_delta {
                best_node = Some(idx);
                best_delta = delta;
            }
        }
        Ok(best_node)
    }
}

impl Default for LocalFgd {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for LocalFgd {
    fn schedule(
        &mut self,
        pods: &mut PodQueue,
        cluster: &mut Cluster,
    ) -> Result<u64, ResourceError> {
        let mut scheduled = 0;
        while let Some(mut pod) = pods.pop() {
            if let Some(idx) = self.min_frag_node(&pod, &pods.distribution, cluster)? {
                cluster.nodes[idx].serve(&mut pod)?;
                scheduled += 1;
            }
        }
        Ok(scheduled)
    }

    fn name(&self) -> &str {
        "local_fgd"
    }
}
