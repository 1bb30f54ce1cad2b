//! Scheduler trait definition.
//!
//! All placement policies implement the [`Scheduler`] trait: they drain a
//! FIFO pod queue against a mutable cluster and report how many pods they
//! placed. Callers depend only on this trait, so new policies plug in
//! without touching the driver.

use fragsim_core::{Cluster, PodQueue, ResourceError};

/// A placement policy over a pod queue and a cluster.
///
/// The contract: pods are taken strictly in FIFO order; for each pod at
/// most one node is selected and served; if no node can serve, the pod is
/// dropped — no requeue, no retry — and the loop continues. A
/// [`ResourceError`] means the policy itself violated a resource
/// invariant and aborts the run.
pub trait Scheduler: Send {
    /// Drain the queue, placing pods onto cluster nodes. Returns the
    /// number of pods scheduled.
    fn schedule(&mut self, pods: &mut PodQueue, cluster: &mut Cluster)
        -> Result<u64, ResourceError>;

    /// Human-readable name for reports.
    fn name(&self) -> &str;
}
