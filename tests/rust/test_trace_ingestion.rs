/// Integration tests for CSV trace ingestion feeding a full schedule run.
use fragsim_core::{trace, Cluster, PodQueue, PodShape};
use fragsim_heuristics::{FirstFit, Scheduler};

const NODE_CSV: &str = "\
sn,cpu,memory,gpu,model
openb-node-0,32,131072,2,V100
openb-node-1,16,65536,1,V100
";

const POD_CSV: &str = "\
name,cpu,memory,num_gpu,gpu_milli
openb-pod-0,2,4096,0,500
openb-pod-1,4,8192,1,1000
openb-pod-2,2,4096,0,500
openb-pod-3,8,16384,2,2000
";

#[test]
fn test_node_trace_defines_cluster_order() {
    let nodes = trace::parse_nodes(NODE_CSV.as_bytes()).unwrap();
    let cluster = Cluster::new(nodes);
    assert_eq!(cluster.len(), 2);
    assert_eq!(cluster.nodes[0].id, "openb-node-0");
    assert_eq!(cluster.nodes[1].id, "openb-node-1");
    assert_eq!(cluster.total_gpu_capacity, 3.0);
}

#[test]
fn test_pod_trace_defines_fifo_order_and_units() {
    let pods = trace::parse_pods(POD_CSV.as_bytes()).unwrap();
    let queue = PodQueue::new(pods);
    assert_eq!(queue.len(), 4);
    assert_eq!(queue.peek().unwrap().id, "openb-pod-0");
    // Milli column converted for sub-unit requests.
    assert_eq!(queue.peek().unwrap().gpu_request, 0.5);
}

#[test]
fn test_distribution_from_trace_population() {
    let pods = trace::parse_pods(POD_CSV.as_bytes()).unwrap();
    let queue = PodQueue::new(pods);
    // Two pods share a shape; two are singletons.
    assert_eq!(queue.distribution.len(), 3);
    assert_eq!(queue.distribution.probability(&PodShape::new(2, 0.5)), 0.5);
    assert_eq!(queue.distribution.probability(&PodShape::new(4, 1.0)), 0.25);
    assert_eq!(queue.distribution.probability(&PodShape::new(8, 2.0)), 0.25);
}

#[test]
fn test_end_to_end_run_from_trace() {
    let nodes = trace::parse_nodes(NODE_CSV.as_bytes()).unwrap();
    let pods = trace::parse_pods(POD_CSV.as_bytes()).unwrap();
    let mut cluster = Cluster::new(nodes);
    let mut queue = PodQueue::new(pods);

    let scheduled = FirstFit::new().schedule(&mut queue, &mut cluster).unwrap();
    // pod-0 (0.5) and pod-1 (1.0) and pod-2 (0.5, shares the partial unit)
    // land on node 0; pod-3 needs two full GPUs and no node has them left.
    assert_eq!(scheduled, 3);
    assert_eq!(cluster.nodes[0].gpu_states(), vec![0.0, 0.0]);
    assert_eq!(cluster.nodes[0].free_cpus, 24);
    assert_eq!(cluster.nodes[1].gpu_states(), vec![1.0]);
}

#[test]
fn test_load_from_filesystem() {
    let dir = std::env::temp_dir();
    let node_path = dir.join("fragsim_test_nodes.csv");
    let pod_path = dir.join("fragsim_test_pods.csv");
    std::fs::write(&node_path, NODE_CSV).unwrap();
    std::fs::write(&pod_path, POD_CSV).unwrap();

    let nodes = trace::load_nodes(&node_path).unwrap();
    let pods = trace::load_pods(&pod_path).unwrap();
    let dist = trace::load_pod_distribution(&pod_path).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(pods.len(), 4);
    assert_eq!(dist.len(), 3);

    std::fs::remove_file(&node_path).ok();
    std::fs::remove_file(&pod_path).ok();
}
