//! Canonical fragmentation evaluator.
//!
//! All fragmentation arithmetic lives here, parameterized over plain state
//! `(free_cpus, gpu_states)` rather than live objects. Node methods and the
//! hypothetical (what-if) path both delegate to these functions, so the two
//! call sites can never drift apart numerically.
//!
//! The scoring follows the fragmentation measure of Weng et al.,
//! "Beware of Fragmentation" (ATC 2023): capacity a given pod shape cannot
//! use counts as fragmented, and a node's quality against a workload is the
//! probability-weighted expectation of that score over all observed shapes.

use crate::pod::{Pod, PodShape};
use crate::queue::PodDistribution;

/// A resource demand that fragmentation can be computed against.
///
/// Implemented by both the mutable [`Pod`] and the immutable [`PodShape`],
/// so live pods and distribution keys score through the same code path.
pub trait ResourceRequest {
    fn cpu_request(&self) -> u32;
    fn gpu_request(&self) -> f64;

    fn is_cpu_only(&self) -> bool {
        self.gpu_request() == 0.0
    }
}

impl ResourceRequest for Pod {
    fn cpu_request(&self) -> u32 {
        self.cpu_request
    }

    fn gpu_request(&self) -> f64 {
        self.gpu_request
    }
}

impl ResourceRequest for PodShape {
    fn cpu_request(&self) -> u32 {
        PodShape::cpu_request(self)
    }

    fn gpu_request(&self) -> f64 {
        PodShape::gpu_request(self)
    }
}

/// Whether a single GPU with `gpu_state` free capacity can serve `req`,
/// given `free_cpu` on the owning node.
///
/// Requests of a full GPU or more only ever land on entirely free units;
/// partially-free GPUs are never packed with whole-GPU slices.
pub fn gpu_can_serve<R: ResourceRequest + ?Sized>(req: &R, free_cpu: u32, gpu_state: f64) -> bool {
    if req.gpu_request() >= 1.0 {
        req.cpu_request() <= free_cpu && gpu_state == 1.0
    } else {
        req.cpu_request() <= free_cpu && req.gpu_request() <= gpu_state
    }
}

/// Fragmentation contribution of a single GPU: zero if it could serve the
/// request, otherwise its entire free capacity is unusable by this shape.
pub fn gpu_fragmentation<R: ResourceRequest + ?Sized>(
    req: &R,
    free_cpu: u32,
    gpu_state: f64,
) -> f64 {
    if gpu_can_serve(req, free_cpu, gpu_state) {
        0.0
    } else {
        gpu_state
    }
}

/// Derived free-GPU figure for a set of GPU states: the number of fully
/// free units plus the single best partial remainder. This is the best
/// contiguous capacity available, not the sum of all fractional slack.
pub fn free_gpus_from_states(gpu_states: &[f64]) -> f64 {
    let mut num_full = 0.0;
    let mut max_partial = 0.0_f64;
    for &capacity in gpu_states {
        if capacity == 1.0 {
            num_full += 1.0;
        } else if capacity > max_partial {
            max_partial = capacity;
        }
    }
    num_full + max_partial
}

/// Whether a node in state `(free_cpus, gpu_states)` can serve `req`.
///
/// Multi-GPU requests need `ceil(gpu_request)` individually eligible GPUs,
/// each checked against the same unmodified CPU pool: CPU is verified, not
/// serialized, across the GPUs of one multi-GPU pod.
pub fn can_serve_with_state<R: ResourceRequest + ?Sized>(
    req: &R,
    free_cpus: u32,
    gpu_states: &[f64],
) -> bool {
    if req.gpu_request() > 1.0 {
        let mut running_request = req.gpu_request();
        for &state in gpu_states {
            if gpu_can_serve(req, free_cpus, state) {
                running_request -= 1.0;
            }
        }
        running_request <= 0.0
    } else {
        gpu_states
            .iter()
            .any(|&state| gpu_can_serve(req, free_cpus, state))
    }
}

/// Fragmentation score of a node state with respect to one request shape.
///
/// A CPU-only request, or one the node cannot serve at all, wastes the
/// node's entire free GPU capacity; otherwise each GPU contributes its own
/// unusable remainder.
pub fn frag_score_with_state<R: ResourceRequest + ?Sized>(
    req: &R,
    free_cpus: u32,
    gpu_states: &[f64],
) -> f64 {
    if req.is_cpu_only() || !can_serve_with_state(req, free_cpus, gpu_states) {
        free_gpus_from_states(gpu_states)
    } else {
        gpu_states
            .iter()
            .map(|&state| gpu_fragmentation(req, free_cpus, state))
            .sum()
    }
}

/// Probability-weighted fragmentation expectation over a workload
/// distribution.
pub fn expected_frag_with_state(
    distribution: &PodDistribution,
    free_cpus: u32,
    gpu_states: &[f64],
) -> f64 {
    distribution
        .iter()
        .map(|(shape, prob)| prob * frag_score_with_state(shape, free_cpus, gpu_states))
        .sum()
}
