//! Trace ingestion for FragSim.
//!
//! Reads the OpenB-style cluster traces: one CSV of nodes and one CSV of
//! pods. Columns are addressed positionally, matching the published trace
//! layout:
//!
//! - Node list: column 0 id, column 1 CPU capacity, column 3 GPU count.
//!   Row order defines the cluster's evaluation and tie-break order.
//! - Pod list: column 0 id, column 1 CPU request, column 3 whole-GPU
//!   request; when that is below 1.0 the fractional request comes from
//!   column 4 (`gpu_milli`), scaled by 1/1000. Row order defines FIFO
//!   schedule order.

use crate::node::Node;
use crate::pod::Pod;
use crate::queue::PodDistribution;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Record {record}: missing column {column}")]
    MissingColumn { record: usize, column: usize },
    #[error("Record {record}: invalid {field} value '{value}'")]
    InvalidField {
        record: usize,
        field: &'static str,
        value: String,
    },
}

/// Load the node list from a CSV trace file.
pub fn load_nodes(path: &Path) -> Result<Vec<Node>, TraceError> {
    parse_nodes(std::fs::File::open(path)?)
}

/// Parse a node list from any reader. The first row is a header.
pub fn parse_nodes<R: Read>(reader: R) -> Result<Vec<Node>, TraceError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut nodes = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let id = column(&record, idx, 0)?;
        let total_cpus = parse_field::<u32>(column(&record, idx, 1)?, idx, "cpu capacity")?;
        let num_gpus = parse_field::<u32>(column(&record, idx, 3)?, idx, "gpu count")?;
        nodes.push(Node::new(id, total_cpus, num_gpus));
    }
    Ok(nodes)
}

/// Load the pod list from a CSV trace file.
pub fn load_pods(path: &Path) -> Result<Vec<Pod>, TraceError> {
    parse_pods(std::fs::File::open(path)?)
}

/// Parse a pod list from any reader. The first row is a header.
pub fn parse_pods<R: Read>(reader: R) -> Result<Vec<Pod>, TraceError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut pods = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let record = result?;
        let id = column(&record, idx, 0)?;
        let cpu_request = parse_field::<u32>(column(&record, idx, 1)?, idx, "cpu request")?;
        let num_gpus = parse_field::<f64>(column(&record, idx, 3)?, idx, "gpu request")?;
        let gpu_request = if num_gpus >= 1.0 {
            num_gpus
        } else {
            // Sub-unit requests are recorded in milli-GPUs.
            parse_field::<f64>(column(&record, idx, 4)?, idx, "gpu milli request")? / 1000.0
        };
        pods.push(Pod::new(id, cpu_request, gpu_request));
    }
    Ok(pods)
}

/// Load the static pod shape distribution from the same pod trace.
pub fn load_pod_distribution(path: &Path) -> Result<PodDistribution, TraceError> {
    Ok(PodDistribution::from_pods(&load_pods(path)?))
}

fn column<'a>(
    record: &'a csv::StringRecord,
    idx: usize,
    col: usize,
) -> Result<&'a str, TraceError> {
    record.get(col).ok_or(TraceError::MissingColumn {
        record: idx + 1,
        column: col,
    })
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    idx: usize,
    field: &'static str,
) -> Result<T, TraceError> {
    value.trim().parse().map_err(|_| TraceError::InvalidField {
        record: idx + 1,
        field,
        value: value.to_string(),
    })
}
