//! FragSim — GPU cluster scheduling simulator core.
//!
//! This crate provides the resource model for evaluating GPU-cluster
//! placement heuristics: pods with fractional GPU demand are assigned onto
//! a fixed set of nodes, and node quality is measured by a
//! probability-weighted fragmentation expectation. Placement policies from
//! `fragsim-heuristics` consume this model to make per-pod decisions.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌──────────────┐
//! │  Trace   │────▶│ PodQueue  │────▶│  Scheduler   │
//! │  (CSV)   │     │ + shapes  │     │  (policy)    │
//! └──────────┘     └───────────┘     └──────┬───────┘
//!                                           │ serve / what-if
//!                        ┌──────────────────┼──────────────────┐
//!                        ▼                  ▼                  ▼
//!                  ┌──────────┐       ┌──────────┐       ┌──────────┐
//!                  │  Node 0  │       │  Node 1  │       │  Node N  │
//!                  │ CPU pool │       │ CPU pool │       │ CPU pool │
//!                  │ GPU list │       │ GPU list │       │ GPU list │
//!                  └──────────┘       └──────────┘       └──────────┘
//! ```
//!
//! The fragmentation formulas live in [`frag`], parameterized over plain
//! `(free_cpus, gpu_states)` state so that live nodes and hypothetical
//! post-serve states score through the exact same code.

pub mod cluster;
pub mod config;
pub mod frag;
pub mod gpu;
pub mod node;
pub mod pod;
pub mod queue;
pub mod report;
pub mod trace;

// Re-export key types for convenience.
pub use cluster::Cluster;
pub use config::SimConfig;
pub use frag::ResourceRequest;
pub use gpu::Gpu;
pub use node::Node;
pub use pod::{Pod, PodShape, ResourceError};
pub use queue::{PodDistribution, PodQueue};
pub use report::ScheduleReport;
pub use trace::{load_nodes, load_pod_distribution, load_pods};
