// Persist matrices and the edge list
//
// Writes the count table, the fraction table and the edge list into the
// output directory as CSV or JSON.

use crate::analysis::{ClassLabel, IntersectionMatrix};
use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Error, Result};
use crate::output::edges::{edge_list, EdgeRecord, EDGE_HEADER};
use crate::output::tables::{count_table, format_fraction, fraction_table, DenseTable};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Summary of what was written
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub counts_path: PathBuf,
    pub fractions_path: PathBuf,
    pub edges_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub edges: usize,
}

impl OutputReport {
    pub fn summary(&self) -> String {
        format!(
            "Wrote {}x{} intersection tables and {} edges",
            self.rows, self.columns, self.edges
        )
    }
}

/// Writes analysis tables to an output directory
pub struct OutputWriter {
    output_dir: PathBuf,
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>, config: OutputConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            config,
        }
    }

    /// Path of an output file for the configured format
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", name, self.config.format.extension()))
    }

    /// Write counts, fractions and edges
    pub fn write(&self, matrix: &IntersectionMatrix) -> Result<OutputReport> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::write(&self.output_dir, e))?;

        let counts = count_table(matrix);
        let fractions = fraction_table(matrix);
        let edges = edge_list(matrix);

        let report = OutputReport {
            counts_path: self.path_for(&self.config.counts_name),
            fractions_path: self.path_for(&self.config.fractions_name),
            edges_path: self.path_for(&self.config.edges_name),
            rows: counts.rows.len(),
            columns: counts.columns.len(),
            edges: edges.len(),
        };

        match self.config.format {
            OutputFormat::Csv => {
                write_table_csv(&report.counts_path, &counts, |v| v.to_string())?;
                write_table_csv(&report.fractions_path, &fractions, |v| format_fraction(*v))?;
                write_edges_csv(&report.edges_path, &edges)?;
            }
            OutputFormat::Json => {
                write_json(&report.counts_path, &nested(&counts))?;
                write_json(&report.fractions_path, &nested(&fractions))?;
                write_json(&report.edges_path, &edges)?;
            }
        }

        log::info!("{}", report.summary());
        Ok(report)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| Error::write(path, e))?;
    Ok(BufWriter::new(file))
}

/// Row-indexed CSV: blank corner cell, then column labels
fn write_table_csv<T>(
    path: &Path,
    table: &DenseTable<T>,
    render: impl Fn(&T) -> String,
) -> Result<()>
where
    T: Copy,
{
    let mut writer = csv::Writer::from_writer(create(path)?);

    let mut header = vec![String::new()];
    header.extend(table.columns.iter().map(ToString::to_string));
    writer.write_record(&header)?;

    for (label, values) in table.iter_rows() {
        let mut record = vec![label.to_string()];
        record.extend(values.iter().map(&render));
        writer.write_record(&record)?;
    }

    writer.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

fn write_edges_csv(path: &Path, edges: &[EdgeRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(create(path)?);
    writer.write_record(EDGE_HEADER)?;
    for edge in edges {
        writer.write_record([
            edge.id.to_string(),
            edge.source.to_string(),
            edge.target.to_string(),
            edge.weight.to_string(),
        ])?;
    }
    writer.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

/// Row label -> column label -> value, in label order
fn nested<T: Copy>(table: &DenseTable<T>) -> BTreeMap<ClassLabel, BTreeMap<ClassLabel, T>> {
    table
        .iter_rows()
        .map(|(row, values)| {
            let cols = table.columns.iter().copied().zip(values.iter().copied()).collect();
            (*row, cols)
        })
        .collect()
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, value)?;
    out.write_all(b"\n").map_err(|e| Error::write(path, e))?;
    out.flush().map_err(|e| Error::write(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Intersection;
    use tempfile::TempDir;

    fn matrix() -> IntersectionMatrix {
        let mut m = IntersectionMatrix::new();
        let a1 = ClassLabel::new(1, 1);
        let a2 = ClassLabel::new(1, 2);
        let b1 = ClassLabel::new(2, 1);
        m.insert(a1, b1, Intersection::new(2, 3));
        m.insert(a2, b1, Intersection::new(0, 1));
        m.insert(b1, a1, Intersection::new(2, 3));
        m.insert(b1, a2, Intersection::new(0, 3));
        m
    }

    #[test]
    fn test_csv_outputs() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputConfig::default());
        let report = writer.write(&matrix()).unwrap();

        assert_eq!(report.rows, 3);
        assert_eq!(report.columns, 3);
        assert_eq!(report.edges, 2);
        assert!(report.summary().contains("2 edges"));

        let counts = fs::read_to_string(dir.path().join("intersection_counts.csv")).unwrap();
        assert_eq!(
            counts,
            ",job001_class1,job001_class2,job002_class1\n\
             job001_class1,0,0,2\n\
             job001_class2,0,0,0\n\
             job002_class1,2,0,0\n"
        );

        let fractions =
            fs::read_to_string(dir.path().join("intersection_fractions.csv")).unwrap();
        assert!(fractions.contains("job001_class1,0.0,0.0,0.6666666666666666\n"));

        let edges = fs::read_to_string(dir.path().join("pysankey_input.csv")).unwrap();
        assert_eq!(
            edges,
            "id,jobANo_class,jobBNo_class,#particles\n\
             0,job001_class1,job002_class1,2\n\
             1,job001_class2,job002_class1,0\n"
        );
    }

    #[test]
    fn test_json_outputs() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        let report = OutputWriter::new(dir.path(), config).write(&matrix()).unwrap();
        assert!(report.counts_path.ends_with("intersection_counts.json"));

        let counts: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.counts_path).unwrap()).unwrap();
        assert_eq!(counts["job001_class1"]["job002_class1"], 2);
        assert_eq!(counts["job001_class2"]["job002_class1"], 0);

        let edges: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.edges_path).unwrap()).unwrap();
        assert_eq!(edges.as_array().unwrap().len(), 2);
        assert_eq!(edges[0]["source"], "job001_class1");
        assert_eq!(edges[0]["weight"], 2);
    }

    #[test]
    fn test_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested").join("out");
        OutputWriter::new(&out, OutputConfig::default())
            .write(&matrix())
            .unwrap();
        assert!(out.join("intersection_counts.csv").exists());
    }
}
