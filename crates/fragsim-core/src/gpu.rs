//! A single GPU unit inside a node.

use crate::frag;
use crate::frag::ResourceRequest;
use crate::pod::{Pod, ResourceError};
use serde::{Deserialize, Serialize};

/// The smallest allocation unit: fully free, fully allocated, or holding
/// exactly one partial allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gpu {
    /// Position of this GPU within its node.
    pub id: u32,
    /// Free capacity in `[0.0, 1.0]`.
    pub free_gpu: f64,
}

impl Gpu {
    /// A fully free GPU.
    pub fn new(id: u32) -> Self {
        Self { id, free_gpu: 1.0 }
    }

    /// Whether this GPU can serve `req`, given the owning node's free CPU.
    pub fn can_serve<R: ResourceRequest + ?Sized>(&self, free_cpu: u32, req: &R) -> bool {
        frag::gpu_can_serve(req, free_cpu, self.free_gpu)
    }

    /// This GPU's fragmentation contribution with respect to `req`.
    pub fn fragmentation<R: ResourceRequest + ?Sized>(&self, free_cpu: u32, req: &R) -> f64 {
        frag::gpu_fragmentation(req, free_cpu, self.free_gpu)
    }

    /// Allocate up to one full unit of the pod's GPU demand.
    pub fn serve(&mut self, pod: &mut Pod) -> Result<(), ResourceError> {
        self.free_gpu = pod.consume_gpus(self.free_gpu)?;
        Ok(())
    }

    /// The free capacity this GPU would be left with after serving the pod,
    /// without mutating either side.
    pub fn hypothetical_serve(&self, pod: &Pod) -> Result<f64, ResourceError> {
        pod.peek_gpus(self.free_gpu)
    }

    pub fn capacity(&self) -> f64 {
        self.free_gpu
    }
}
