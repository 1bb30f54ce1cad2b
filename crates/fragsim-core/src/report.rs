//! Run reporting: per-scheduler results and table rendering.

use serde::{Deserialize, Serialize};

/// Outcome of one timed schedule run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Scheduler name, as reported by the policy itself.
    pub scheduler: String,
    /// Pods in the queue at the start of the run.
    pub total_pods: u64,
    /// Pods successfully placed.
    pub scheduled: u64,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: f64,
    /// Aggregate derived GPU capacity before any placement.
    pub total_gpu_capacity: f64,
    /// Aggregate derived GPU capacity left after the run.
    pub free_gpu_capacity: f64,
}

impl ScheduleReport {
    /// Fraction of pods placed, in `[0.0, 1.0]`.
    pub fn success_rate(&self) -> f64 {
        if self.total_pods == 0 {
            return 0.0;
        }
        self.scheduled as f64 / self.total_pods as f64
    }

    /// Mean scheduling time per pod in milliseconds.
    pub fn avg_time_per_pod_ms(&self) -> f64 {
        if self.total_pods == 0 {
            return 0.0;
        }
        self.elapsed_ms / self.total_pods as f64
    }

    /// Fraction of the cluster's GPU capacity consumed by the run.
    pub fn gpu_utilization(&self) -> f64 {
        if self.total_gpu_capacity == 0.0 {
            return 0.0;
        }
        1.0 - self.free_gpu_capacity / self.total_gpu_capacity
    }
}

/// Render one run's results as a human-readable table.
pub fn format_table(report: &ScheduleReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", report.scheduler));
    out.push_str(&format!(
        "  scheduled:      {} / {} pods ({:.2}%)\n",
        report.scheduled,
        report.total_pods,
        report.success_rate() * 100.0
    ));
    out.push_str(&format!(
        "  gpu capacity:   {:.1} free of {:.1} ({:.2}% utilized)\n",
        report.free_gpu_capacity,
        report.total_gpu_capacity,
        report.gpu_utilization() * 100.0
    ));
    out.push_str(&format!(
        "  elapsed:        {:.1} ms ({:.4} ms/pod)\n",
        report.elapsed_ms,
        report.avg_time_per_pod_ms()
    ));
    out
}

/// Render a side-by-side comparison of several runs.
pub fn format_comparison_table(reports: &[ScheduleReport]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16} {:>10} {:>10} {:>10} {:>12}\n",
        "scheduler", "scheduled", "total", "success", "ms/pod"
    ));
    for report in reports {
        out.push_str(&format!(
            "{:<16} {:>10} {:>10} {:>9.2}% {:>12.4}\n",
            report.scheduler,
            report.scheduled,
            report.total_pods,
            report.success_rate() * 100.0,
            report.avg_time_per_pod_ms()
        ));
    }
    out
}
