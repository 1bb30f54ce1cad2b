//! FIFO pod queue and the static workload shape distribution.

use crate::pod::{Pod, PodShape};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Probability of each pod shape in the workload.
///
/// Computed once from the initial pod population and held static for the
/// whole run: it represents the workload's statistical shape, not the
/// remaining demand, so it is never updated as pods are consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PodDistribution {
    probabilities: HashMap<PodShape, f64>,
}

impl PodDistribution {
    /// Bucket a pod population by shape and normalize counts by the total.
    pub fn from_pods(pods: &[Pod]) -> Self {
        let mut histogram: HashMap<PodShape, u64> = HashMap::new();
        for pod in pods {
            *histogram.entry(pod.shape()).or_insert(0) += 1;
        }
        let total = pods.len() as f64;
        let probabilities = histogram
            .into_iter()
            .map(|(shape, count)| (shape, count as f64 / total))
            .collect();
        Self { probabilities }
    }

    pub fn probability(&self, shape: &PodShape) -> f64 {
        self.probabilities.get(shape).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PodShape, f64)> {
        self.probabilities.iter().map(|(shape, &prob)| (shape, prob))
    }

    /// Number of distinct shapes.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

/// FIFO queue of pods awaiting placement, carrying the static shape
/// distribution alongside.
#[derive(Debug, Clone)]
pub struct PodQueue {
    queue: VecDeque<Pod>,
    /// Static workload shape distribution, computed from the initial
    /// population.
    pub distribution: PodDistribution,
}

impl PodQueue {
    /// Build a queue from the initial pod population, deriving the shape
    /// distribution from that same population.
    pub fn new(pods: Vec<Pod>) -> Self {
        let distribution = PodDistribution::from_pods(&pods);
        Self {
            queue: pods.into(),
            distribution,
        }
    }

    /// Build a queue with an externally computed distribution.
    pub fn with_distribution(pods: Vec<Pod>, distribution: PodDistribution) -> Self {
        Self {
            queue: pods.into(),
            distribution,
        }
    }

    pub fn has_next(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn peek(&self) -> Option<&Pod> {
        self.queue.front()
    }

    pub fn pop(&mut self) -> Option<Pod> {
        self.queue.pop_front()
    }

    /// Append a pod to the back of the queue.
    ///
    /// Available for retry policies; neither built-in heuristic requeues.
    pub fn requeue(&mut self, pod: Pod) {
        self.queue.push_back(pod);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
