//! FragSim CLI — compare GPU cluster placement heuristics on real traces.

use clap::{Parser, Subcommand};
use fragsim_core::config::SimConfig;
use fragsim_core::{report, trace, Cluster, Node, Pod, PodQueue};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "fragsim",
    about = "Evaluate GPU cluster scheduling heuristics on pod traces",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single scheduler over a trace.
    Run {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: PathBuf,
        /// Override the node list CSV from the config.
        #[arg(long)]
        nodes: Option<PathBuf>,
        /// Override the pod list CSV from the config.
        #[arg(long)]
        pods: Option<PathBuf>,
        /// Scheduler name.
        #[arg(short, long, default_value = "first_fit")]
        scheduler: String,
        /// Write the report to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare several schedulers on the same trace.
    Compare {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: PathBuf,
        /// Override the node list CSV from the config.
        #[arg(long)]
        nodes: Option<PathBuf>,
        /// Override the pod list CSV from the config.
        #[arg(long)]
        pods: Option<PathBuf>,
        /// Comma-separated list of scheduler names (default: all).
        #[arg(short = 'S', long, value_delimiter = ',')]
        schedulers: Vec<String>,
        /// Write the reports to a JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List available schedulers.
    ListSchedulers,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            nodes,
            pods,
            scheduler,
            output,
        } => {
            let sim_config = load_config(&config);
            let node_list = load_node_list(&sim_config, nodes.as_deref());
            let pod_list = load_pod_list(&sim_config, pods.as_deref());

            let mut sched = fragsim_heuristics::scheduler_by_name(&scheduler).unwrap_or_else(|| {
                eprintln!(
                    "Unknown scheduler: {}. Available: {:?}",
                    scheduler,
                    fragsim_heuristics::available_schedulers()
                );
                std::process::exit(1);
            });

            println!(
                "[{}] scheduling {} pods onto {} nodes with {}",
                sim_config.simulation.name,
                pod_list.len(),
                node_list.len(),
                scheduler
            );

            let mut queue = PodQueue::new(pod_list);
            let mut cluster = Cluster::new(node_list);
            let result =
                fragsim_heuristics::run_scheduler(sched.as_mut(), &mut queue, &mut cluster)
                    .unwrap_or_else(|e| {
                        eprintln!("Scheduling aborted: {}", e);
                        std::process::exit(1);
                    });

            println!("{}", report::format_table(&result));
            if let Some(output_path) = output {
                write_json(&output_path, &result);
            }
        }
        Commands::Compare {
            config,
            nodes,
            pods,
            schedulers,
            output,
        } => {
            let sim_config = load_config(&config);
            let node_list = load_node_list(&sim_config, nodes.as_deref());
            let pod_list = load_pod_list(&sim_config, pods.as_deref());

            println!(
                "[{}] comparing schedulers on {} pods, {} nodes",
                sim_config.simulation.name,
                pod_list.len(),
                node_list.len()
            );

            let names: Vec<&str> = if schedulers.is_empty() {
                fragsim_heuristics::available_schedulers()
            } else {
                schedulers.iter().map(|s| s.as_str()).collect()
            };

            let results = fragsim_heuristics::compare_schedulers(&names, &pod_list, &node_list)
                .unwrap_or_else(|e| {
                    eprintln!("Scheduling aborted: {}", e);
                    std::process::exit(1);
                });

            println!("{}", report::format_comparison_table(&results));
            for result in &results {
                println!("{}", report::format_table(result));
            }
            if let Some(output_path) = output {
                write_json(&output_path, &results);
            }
        }
        Commands::ListSchedulers => {
            println!("Available schedulers:");
            for name in fragsim_heuristics::available_schedulers() {
                println!("  - {}", name);
            }
        }
    }
}

fn load_config(path: &Path) -> SimConfig {
    SimConfig::from_file(path).unwrap_or_else(|e| {
        eprintln!("Error loading config: {}", e);
        std::process::exit(1);
    })
}

fn load_node_list(config: &SimConfig, cli_override: Option<&Path>) -> Vec<Node> {
    let path = cli_override.unwrap_or_else(|| config.cluster.node_file.as_path());
    trace::load_nodes(path).unwrap_or_else(|e| {
        eprintln!("Error loading node trace: {}", e);
        std::process::exit(1);
    })
}

fn load_pod_list(config: &SimConfig, cli_override: Option<&Path>) -> Vec<Pod> {
    let path = cli_override.unwrap_or_else(|| config.workload.pod_file.as_path());
    trace::load_pods(path).unwrap_or_else(|e| {
        eprintln!("Error loading pod trace: {}", e);
        std::process::exit(1);
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(path, json).unwrap_or_else(|e| {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    });
    println!("Results written to {}", path.display());
}
