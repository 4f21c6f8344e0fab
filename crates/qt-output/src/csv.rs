//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `pipe_results.csv`
//! - `node_results.csv`
//! - `run_metrics.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MetricsRow, NodeResultRow, OutputResult, PipeResultRow};

/// Writes run results to three CSV files.
pub struct CsvWriter {
    pipes:    Writer<File>,
    nodes:    Writer<File>,
    metrics:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut pipes = Writer::from_path(dir.join("pipe_results.csv"))?;
        pipes.write_record([
            "elapsed_minutes", "pipe_id", "from", "to", "status", "is_physical", "stress",
            "failure_probability",
        ])?;

        let mut nodes = Writer::from_path(dir.join("node_results.csv"))?;
        nodes.write_record([
            "elapsed_minutes", "node_id", "lat", "lon", "priority", "critical", "served", "allocation",
        ])?;

        let mut metrics = Writer::from_path(dir.join("run_metrics.csv"))?;
        metrics.write_record([
            "elapsed_minutes",
            "magnitude",
            "threshold",
            "failed_pipes",
            "rerouted_pipes",
            "stranded_critical",
            "critical_nodes",
            "normal_nodes",
            "critical_service_ratio",
            "normal_service_ratio",
            "overall_service_ratio",
            "critical_connectivity_loss",
            "normal_connectivity_loss",
            "overall_connectivity_loss",
            "components_before",
            "components_after",
        ])?;

        Ok(Self { pipes, nodes, metrics, finished: false })
    }
}

/// Empty cell for a missing value.
fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_pipes(&mut self, rows: &[PipeResultRow]) -> OutputResult<()> {
        for row in rows {
            self.pipes.write_record(&[
                row.elapsed_minutes.to_string(),
                row.pipe_id.clone(),
                row.from.clone(),
                row.to.clone(),
                row.status.label().to_owned(),
                (row.is_physical as u8).to_string(),
                opt(row.stress),
                opt(row.failure_probability),
            ])?;
        }
        Ok(())
    }

    fn write_nodes(&mut self, rows: &[NodeResultRow]) -> OutputResult<()> {
        for row in rows {
            self.nodes.write_record(&[
                row.elapsed_minutes.to_string(),
                row.node_id.clone(),
                format!("{:.6}", row.lat),
                format!("{:.6}", row.lon),
                row.priority.to_string(),
                (row.critical as u8).to_string(),
                (row.served as u8).to_string(),
                row.allocation.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.elapsed_minutes.to_string(),
            row.magnitude.to_string(),
            opt(row.threshold),
            row.failed_pipes.to_string(),
            row.rerouted_pipes.to_string(),
            row.stranded_critical.to_string(),
            row.critical_nodes.to_string(),
            row.normal_nodes.to_string(),
            row.critical_service_ratio.to_string(),
            row.normal_service_ratio.to_string(),
            row.overall_service_ratio.to_string(),
            row.critical_connectivity_loss.to_string(),
            row.normal_connectivity_loss.to_string(),
            row.overall_connectivity_loss.to_string(),
            row.components_before.to_string(),
            row.components_after.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.pipes.flush()?;
        self.nodes.flush()?;
        self.metrics.flush()?;
        Ok(())
    }
}
