//! Built-in placement heuristics for FragSim.
//!
//! | Scheduler | Strategy | Cost |
//! |-----------|----------|------|
//! | [`FirstFit`] | First node in cluster order that fits | O(pods × nodes) |
//! | [`LocalFgd`] | Node with the smallest expected-fragmentation increase | O(pods × nodes × shapes) |
//!
//! Both drain the queue in FIFO order and drop pods no node can serve.

pub mod first_fit;
pub mod local_fgd;
pub mod traits;

pub use first_fit::FirstFit;
pub use local_fgd::LocalFgd;
pub use traits::Scheduler;

use fragsim_core::{Cluster, Node, Pod, PodQueue, ResourceError, ScheduleReport};
use std::time::Instant;

/// Create a scheduler by name.
pub fn scheduler_by_name(name: &str) -> Option<Box<dyn Scheduler>> {
    match name {
        "first_fit" => Some(Box::new(FirstFit::new())),
        "local_fgd" => Some(Box::new(LocalFgd::new())),
        _ => None,
    }
}

/// List all built-in scheduler names.
pub fn available_schedulers() -> Vec<&'static str> {
    vec!["first_fit", "local_fgd"]
}

/// Time a full schedule run and assemble its report.
///
/// The cluster's free capacity is refreshed after the run so the report
/// reflects the post-placement state.
pub fn run_scheduler(
    scheduler: &mut dyn Scheduler,
    pods: &mut PodQueue,
    cluster: &mut Cluster,
) -> Result<ScheduleReport, ResourceError> {
    let total_pods = pods.len() as u64;
    let start = Instant::now();
    let scheduled = scheduler.schedule(pods, cluster)?;
    let elapsed = start.elapsed();
    cluster.update_gpu_capacity();

    Ok(ScheduleReport {
        scheduler: scheduler.name().to_string(),
        total_pods,
        scheduled,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        total_gpu_capacity: cluster.total_gpu_capacity,
        free_gpu_capacity: cluster.free_gpu_capacity,
    })
}

/// Run several schedulers against fresh copies of the same workload and
/// cluster. Unknown names are skipped.
pub fn compare_schedulers(
    names: &[&str],
    pods: &[Pod],
    nodes: &[Node],
) -> Result<Vec<ScheduleReport>, ResourceError> {
    let mut reports = Vec::new();
    for name in names {
        let Some(mut scheduler) = scheduler_by_name(name) else {
            continue;
        };
        let mut queue = PodQueue::new(pods.to_vec());
        let mut cluster = Cluster::new(nodes.to_vec());
        reports.push(run_scheduler(scheduler.as_mut(), &mut queue, &mut cluster)?);
    }
    Ok(reports)
}
