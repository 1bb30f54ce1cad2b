/// Integration tests for the resource model invariants.
use fragsim_core::{Cluster, Node, Pod, PodQueue, ResourceError};
use fragsim_heuristics::{FirstFit, LocalFgd, Scheduler};

fn assert_derived_capacity_invariant(cluster: &Cluster) {
    for node in &cluster.nodes {
        let states = node.gpu_states();
        assert!(
            states.iter().all(|&s| (0.0..=1.0).contains(&s)),
            "gpu capacity out of range on {}: {:?}",
            node.id,
            states
        );
        let full = states.iter().filter(|&&s| s == 1.0).count() as f64;
        let best_partial = states
            .iter()
            .copied()
            .filter(|&s| s < 1.0)
            .fold(0.0_f64, f64::max);
        assert_eq!(
            node.gpu_capacity(),
            full + best_partial,
            "derived free_gpus out of sync on {}",
            node.id
        );
    }
}

fn mixed_workload(n: usize) -> Vec<Pod> {
    (0..n)
        .map(|i| {
            let gpu = match i % 5 {
                0 => 0.25,
                1 => 0.5,
                2 => 1.0,
                3 => 2.0,
                _ => 0.0, // cpu-only
            };
            Pod::new(format!("pod-{}", i), (i % 6 + 1) as u32, gpu)
        })
        .collect()
}

fn small_cluster() -> Vec<Node> {
    vec![
        Node::new("node-0", 16, 4),
        Node::new("node-1", 8, 2),
        Node::new("node-2", 32, 8),
    ]
}

#[test]
fn test_invariants_hold_after_first_fit_run() {
    let mut queue = PodQueue::new(mixed_workload(60));
    let mut cluster = Cluster::new(small_cluster());
    FirstFit::new().schedule(&mut queue, &mut cluster).unwrap();
    assert_derived_capacity_invariant(&cluster);
}

#[test]
fn test_invariants_hold_after_fgd_run() {
    let mut queue = PodQueue::new(mixed_workload(60));
    let mut cluster = Cluster::new(small_cluster());
    LocalFgd::new().schedule(&mut queue, &mut cluster).unwrap();
    assert_derived_capacity_invariant(&cluster);
}

#[test]
fn test_cpu_pool_never_oversubscribed() {
    let mut queue = PodQueue::new(mixed_workload(200));
    let mut cluster = Cluster::new(small_cluster());
    FirstFit::new().schedule(&mut queue, &mut cluster).unwrap();
    for node in &cluster.nodes {
        assert!(node.free_cpus <= node.total_cpus);
    }
}

#[test]
fn test_hypothetical_expected_frag_leaves_state_untouched() {
    let mut node = Node::new("n", 16, 4);
    node.serve(&mut Pod::new("filler", 2, 0.4)).unwrap();
    let queue = PodQueue::new(mixed_workload(20));

    let states_before = node.gpu_states();
    let cpus_before = node.free_cpus;

    let pod = Pod::new("probe", 1, 1.0);
    node.hypothetical_expected_frag(&pod, &queue.distribution)
        .unwrap();

    assert_eq!(node.gpu_states(), states_before);
    assert_eq!(node.free_cpus, cpus_before);
}

#[test]
fn test_serve_on_unservable_node_is_fatal_not_noop() {
    let mut node = Node::new("n", 2, 1);
    let mut pod = Pod::new("p", 4, 0.5);
    assert!(!node.can_serve(&pod));
    match node.serve(&mut pod) {
        Err(ResourceError::Unservable { node: n, pod: p }) => {
            assert_eq!(n, "n");
            assert_eq!(p, "p");
        }
        other => panic!("expected Unservable, got {:?}", other.err()),
    }
}

/// Scenario: one node, 1 GPU, 4 CPU; pod cpu=2, gpu=0.5.
#[test]
fn test_fractional_serve_scenario() {
    let mut node = Node::new("n", 4, 1);
    let mut pod = Pod::new("p", 2, 0.5);
    assert!(node.can_serve(&pod));
    node.serve(&mut pod).unwrap();
    assert_eq!(node.gpus[0].free_gpu, 0.5);
    assert_eq!(node.gpu_capacity(), 0.5);
}

/// Scenario: the same node cannot host a 2-GPU pod; a single-pod queue
/// schedules nothing under first fit.
#[test]
fn test_multi_gpu_scenario_unschedulable() {
    let mut cluster = Cluster::new(vec![Node::new("n", 4, 1)]);
    let mut queue = PodQueue::new(vec![Pod::new("p", 2, 2.0)]);
    assert!(!cluster.nodes[0].can_serve(queue.peek().unwrap()));
    let scheduled = FirstFit::new().schedule(&mut queue, &mut cluster).unwrap();
    assert_eq!(scheduled, 0);
}
