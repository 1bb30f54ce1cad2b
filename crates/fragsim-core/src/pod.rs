//! Pods and pod shapes.
//!
//! A [`Pod`] is a mutable resource-request unit: its remaining demand is
//! drawn down as nodes serve it. A [`PodShape`] is the immutable
//! `(cpu_request, gpu_request)` pair used to bucket pods in the workload
//! distribution — it is the only type used as a map key, so serving a pod
//! never invalidates a lookup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal resource accounting failures.
///
/// These indicate a logic bug in the calling scheduler (serving a pod that
/// was never admissible, or double-spending capacity), not a full cluster.
/// An infeasible placement is not an error: the pod is simply dropped.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("CPU pool would go negative: {free} free, pod {pod} requests {requested}")]
    CpuExhausted { pod: String, free: u32, requested: u32 },
    #[error("GPU capacity would go negative: {free} free, pod {pod} requests {requested}")]
    GpuExhausted { pod: String, free: f64, requested: f64 },
    #[error("Serve issued against node {node} which cannot host pod {pod}")]
    Unservable { node: String, pod: String },
    #[error("Multi-GPU request of pod {pod} left {remaining} unallocated on node {node}")]
    PartialAllocation {
        node: String,
        pod: String,
        remaining: f64,
    },
}

/// A resource-request unit to be placed onto a node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pod {
    /// Opaque identifier from the trace.
    pub id: String,
    /// Remaining CPU demand. Zeroed when a node consumes it.
    pub cpu_request: u32,
    /// Remaining GPU demand. Each serving GPU subtracts up to one full unit.
    pub gpu_request: f64,
}

impl Pod {
    pub fn new(id: impl Into<String>, cpu_request: u32, gpu_request: f64) -> Self {
        Self {
            id: id.into(),
            cpu_request,
            gpu_request,
        }
    }

    /// Whether this pod requests no GPU at all.
    pub fn is_cpu_only(&self) -> bool {
        self.gpu_request == 0.0
    }

    /// The immutable shape key for this pod's current demand.
    pub fn shape(&self) -> PodShape {
        PodShape::new(self.cpu_request, self.gpu_request)
    }

    /// Draw this pod's CPU demand from a CPU pool, returning the remainder.
    ///
    /// The demand is zeroed: a pod's CPU is consumed exactly once, by the
    /// node that hosts it.
    pub fn consume_cpu(&mut self, free_cpu: u32) -> Result<u32, ResourceError> {
        let remaining = self.peek_cpu(free_cpu)?;
        self.cpu_request = 0;
        Ok(remaining)
    }

    /// CPU remainder after serving this pod, without mutating anything.
    pub fn peek_cpu(&self, free_cpu: u32) -> Result<u32, ResourceError> {
        free_cpu
            .checked_sub(self.cpu_request)
            .ok_or(ResourceError::CpuExhausted {
                pod: self.id.clone(),
                free: free_cpu,
                requested: self.cpu_request,
            })
    }

    /// Draw up to one full GPU of this pod's demand from a single GPU's
    /// free capacity, returning that GPU's remainder.
    pub fn consume_gpus(&mut self, free_gpu: f64) -> Result<f64, ResourceError> {
        let allocation = self.gpu_request.min(1.0);
        let remaining = self.peek_gpus(free_gpu)?;
        self.gpu_request -= allocation;
        Ok(remaining)
    }

    /// GPU remainder after one allocation step, without mutating anything.
    pub fn peek_gpus(&self, free_gpu: f64) -> Result<f64, ResourceError> {
        let allocation = self.gpu_request.min(1.0);
        let remaining = free_gpu - allocation;
        if remaining < 0.0 {
            return Err(ResourceError::GpuExhausted {
                pod: self.id.clone(),
                free: free_gpu,
                requested: allocation,
            });
        }
        Ok(remaining)
    }
}

/// Immutable `(cpu_request, gpu_request)` pair identifying a pod's resource
/// shape, with the GPU side held at milli-GPU precision so that shapes are
/// hashable and comparable exactly.
///
/// Two distinct pods with the same demand share a shape by design: the
/// workload distribution counts shapes, not identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PodShape {
    cpu_request: u32,
    gpu_milli: u32,
}

impl PodShape {
    pub fn new(cpu_request: u32, gpu_request: f64) -> Self {
        Self {
            cpu_request,
            gpu_milli: (gpu_request * 1000.0).round() as u32,
        }
    }

    pub fn cpu_request(&self) -> u32 {
        self.cpu_request
    }

    pub fn gpu_request(&self) -> f64 {
        self.gpu_milli as f64 / 1000.0
    }
}

impl From<&Pod> for PodShape {
    fn from(pod: &Pod) -> Self {
        pod.shape()
    }
}
