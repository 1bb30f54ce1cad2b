/// Integration tests for the placement heuristics.
use fragsim_core::{Cluster, Node, Pod, PodDistribution, PodQueue};
use fragsim_heuristics::{
    available_schedulers, compare_schedulers, run_scheduler, scheduler_by_name, FirstFit, LocalFgd,
    Scheduler,
};

fn two_node_cluster() -> Vec<Node> {
    vec![Node::new("a", 8, 2), Node::new("b", 8, 2)]
}

#[test]
fn test_first_fit_schedules_whenever_any_node_fits() {
    // Each pod fits somewhere until capacity truly runs out.
    let pods: Vec<Pod> = (0..4).map(|i| Pod::new(format!("p{i}"), 1, 1.0)).collect();
    let mut queue = PodQueue::new(pods);
    let mut cluster = Cluster::new(two_node_cluster());

    let scheduled = FirstFit::new().schedule(&mut queue, &mut cluster).unwrap();
    // 4 full GPUs across 2 nodes with 2 GPUs each: all fit.
    assert_eq!(scheduled, 4);
    assert!(cluster.nodes.iter().all(|n| n.gpu_capacity() == 0.0));
}

#[test]
fn test_first_fit_fills_in_cluster_order() {
    let mut queue = PodQueue::new(vec![Pod::new("p0", 1, 1.0), Pod::new("p1", 1, 1.0)]);
    let mut cluster = Cluster::new(two_node_cluster());

    FirstFit::new().schedule(&mut queue, &mut cluster).unwrap();
    // Both land on node a; node b untouched.
    assert_eq!(cluster.nodes[0].gpu_capacity(), 0.0);
    assert_eq!(cluster.nodes[1].gpu_capacity(), 2.0);
}

/// FGD spreads full-GPU pods away from nodes whose remaining capacity the
/// workload's fractional shapes still need, packing better than first fit
/// on fragmentation-sensitive workloads.
#[test]
fn test_fgd_avoids_fragmenting_scarce_full_units() {
    // Node a: one full unit left of two. Node b: one full unit of one, but
    // too little CPU for the workload's whole-GPU shape.
    let mut node_a = Node::new("a", 8, 2);
    node_a.serve(&mut Pod::new("filler", 0, 1.0)).unwrap();
    let node_b = Node::new("b", 1, 1);

    let distribution =
        PodDistribution::from_pods(&[Pod::new("x", 1, 0.3), Pod::new("y", 2, 1.0)]);
    let mut queue = PodQueue::with_distribution(vec![Pod::new("p", 1, 0.3)], distribution);
    let mut cluster = Cluster::new(vec![node_a, node_b]);

    LocalFgd::new().schedule(&mut queue, &mut cluster).unwrap();
    // The fractional pod goes to b, keeping a's full unit intact for the
    // (2, 1.0) shape.
    assert_eq!(cluster.nodes[0].gpu_capacity(), 1.0);
    assert_eq!(cluster.nodes[1].gpus[0].free_gpu, 0.7);
}

#[test]
fn test_fgd_tie_break_is_first_node_in_order() {
    let mut queue = PodQueue::new(vec![Pod::new("p", 1, 0.5)]);
    let mut cluster = Cluster::new(two_node_cluster());

    LocalFgd::new().schedule(&mut queue, &mut cluster).unwrap();
    assert_eq!(cluster.nodes[0].gpu_capacity(), 1.5);
    assert_eq!(cluster.nodes[1].gpu_capacity(), 2.0);
}

#[test]
fn test_both_schedulers_drop_unservable_pods_and_continue() {
    let pods = vec![
        Pod::new("too-big", 1, 8.0),
        Pod::new("fits-0", 1, 0.5),
        Pod::new("no-cpu", 99, 0.5),
        Pod::new("fits-1", 1, 0.5),
    ];
    for name in available_schedulers() {
        let mut scheduler = scheduler_by_name(name).unwrap();
        let mut queue = PodQueue::new(pods.clone());
        let mut cluster = Cluster::new(two_node_cluster());
        let scheduled = scheduler.schedule(&mut queue, &mut cluster).unwrap();
        assert_eq!(scheduled, 2, "{} scheduled wrong count", name);
        assert!(queue.is_empty());
    }
}

#[test]
fn test_run_scheduler_reports_success_rate() {
    let mut queue = PodQueue::new(vec![Pod::new("p", 1, 0.5), Pod::new("q", 1, 8.0)]);
    let mut cluster = Cluster::new(two_node_cluster());
    let mut scheduler = LocalFgd::new();

    let report = run_scheduler(&mut scheduler, &mut queue, &mut cluster).unwrap();
    assert_eq!(report.scheduled, 1);
    assert_eq!(report.total_pods, 2);
    assert_eq!(report.success_rate(), 0.5);
    assert_eq!(report.total_gpu_capacity, 4.0);
    assert_eq!(report.free_gpu_capacity, 3.5);
}

#[test]
fn test_compare_all_schedulers_same_trace() {
    let pods: Vec<Pod> = (0..12)
        .map(|i| Pod::new(format!("p{i}"), 1, if i % 2 == 0 { 0.5 } else { 1.0 }))
        .collect();
    let nodes = two_node_cluster();

    let reports = compare_schedulers(&available_schedulers(), &pods, &nodes).unwrap();
    assert_eq!(reports.len(), 2);
    for report in &reports {
        assert_eq!(report.total_pods, 12);
        assert!(report.scheduled > 0, "{} scheduled nothing", report.scheduler);
    }
}
