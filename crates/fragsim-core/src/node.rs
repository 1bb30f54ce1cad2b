//! A compute node: one CPU pool plus a fixed, ordered list of GPUs.
//!
//! Nodes are created once at cluster construction and mutated in place for
//! the whole run. All fragmentation math delegates to [`crate::frag`], so
//! live scoring and hypothetical (what-if) scoring share one formula.

use crate::frag;
use crate::frag::ResourceRequest;
use crate::gpu::Gpu;
use crate::pod::{Pod, ResourceError};
use crate::queue::PodDistribution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Identifier from the node trace.
    pub id: String,
    /// Fixed CPU capacity.
    pub total_cpus: u32,
    /// Remaining CPU capacity, drawn down on every real serve.
    pub free_cpus: u32,
    /// Ordered, fixed-size GPU list. Allocation scans left to right.
    pub gpus: Vec<Gpu>,
    /// Derived free-GPU figure, kept in sync by `serve`.
    free_gpus: f64,
}

impl Node {
    pub fn new(id: impl Into<String>, total_cpus: u32, num_gpus: u32) -> Self {
        Self {
            id: id.into(),
            total_cpus,
            free_cpus: total_cpus,
            gpus: (0..num_gpus).map(Gpu::new).collect(),
            free_gpus: num_gpus as f64,
        }
    }

    /// Current per-GPU free capacities, in GPU order.
    pub fn gpu_states(&self) -> Vec<f64> {
        self.gpus.iter().map(Gpu::capacity).collect()
    }

    /// Whether this node can host the pod in its current state.
    pub fn can_serve<R: ResourceRequest + ?Sized>(&self, req: &R) -> bool {
        frag::can_serve_with_state(req, self.free_cpus, &self.gpu_states())
    }

    /// Place the pod onto this node, mutating GPU and CPU state.
    ///
    /// Serving a pod the node cannot host is a fatal [`ResourceError`], as
    /// is a multi-GPU request that does not come out to exactly zero after
    /// allocating whole units.
    pub fn serve(&mut self, pod: &mut Pod) -> Result<(), ResourceError> {
        if !self.can_serve(pod) {
            return Err(ResourceError::Unservable {
                node: self.id.clone(),
                pod: pod.id.clone(),
            });
        }

        let free_cpus = self.free_cpus;
        if pod.gpu_request > 1.0 {
            // Allocate one full GPU per eligible unit until the request is
            // exhausted.
            let mut running_request = pod.gpu_request;
            for gpu in &mut self.gpus {
                if running_request <= 0.0 {
                    break;
                }
                if gpu.can_serve(free_cpus, pod) {
                    gpu.serve(pod)?;
                    running_request -= 1.0;
                }
            }
            if running_request != 0.0 {
                return Err(ResourceError::PartialAllocation {
                    node: self.id.clone(),
                    pod: pod.id.clone(),
                    remaining: running_request,
                });
            }
        } else {
            for gpu in &mut self.gpus {
                if gpu.can_serve(free_cpus, pod) {
                    gpu.serve(pod)?;
                    break;
                }
            }
        }

        self.free_gpus = frag::free_gpus_from_states(&self.gpu_states());
        // Draw down the same CPU pool every admission check reads.
        self.free_cpus = pod.consume_cpu(self.free_cpus)?;
        Ok(())
    }

    /// Run the serve algorithm without mutating anything, returning the
    /// simulated CPU remainder and the full ordered list of simulated
    /// per-GPU capacities (untouched GPUs pass through unchanged).
    pub fn hypothetical_serve(&self, pod: &Pod) -> Result<(u32, Vec<f64>), ResourceError> {
        if !self.can_serve(pod) {
            return Err(ResourceError::Unservable {
                node: self.id.clone(),
                pod: pod.id.clone(),
            });
        }

        let hypothetical_free_cpus = pod.peek_cpu(self.free_cpus)?;
        let mut states = Vec::with_capacity(self.gpus.len());

        if pod.gpu_request > 1.0 {
            let mut running_request = pod.gpu_request;
            for gpu in &self.gpus {
                if running_request <= 0.0 {
                    states.push(gpu.capacity());
                } else if gpu.can_serve(self.free_cpus, pod) {
                    states.push(gpu.hypothetical_serve(pod)?);
                    running_request -= 1.0;
                } else {
                    states.push(gpu.capacity());
                }
            }
        } else {
            let mut served = false;
            for gpu in &self.gpus {
                if !served && gpu.can_serve(self.free_cpus, pod) {
                    states.push(gpu.hypothetical_serve(pod)?);
                    served = true;
                } else {
                    states.push(gpu.capacity());
                }
            }
        }

        Ok((hypothetical_free_cpus, states))
    }

    /// Fragmentation of this node with respect to one request shape.
    pub fn frag_score<R: ResourceRequest + ?Sized>(&self, req: &R) -> f64 {
        frag::frag_score_with_state(req, self.free_cpus, &self.gpu_states())
    }

    /// Expected fragmentation against the workload distribution.
    pub fn expected_frag(&self, distribution: &PodDistribution) -> f64 {
        frag::expected_frag_with_state(distribution, self.free_cpus, &self.gpu_states())
    }

    /// Expected fragmentation after hypothetically serving `pod`.
    pub fn hypothetical_expected_frag(
        &self,
        pod: &Pod,
        distribution: &PodDistribution,
    ) -> Result<f64, ResourceError> {
        let (free_cpus, gpu_states) = self.hypothetical_serve(pod)?;
        Ok(frag::expected_frag_with_state(
            distribution,
            free_cpus,
            &gpu_states,
        ))
    }

    /// Derived free-GPU figure: fully free units plus the best partial.
    pub fn gpu_capacity(&self) -> f64 {
        self.free_gpus
    }
}
