// Per-class STAR writer
//
// Splits one job's particle table into a file per class, keeping the
// source column order and record order.

use crate::config::StarConfig;
use crate::error::{Error, Result};
use crate::star::table::{ClassId, Table};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one STAR file per class of a job
#[derive(Debug, Clone)]
pub struct PerClassWriter {
    output_dir: PathBuf,
    config: StarConfig,
}

impl PerClassWriter {
    pub fn new(output_dir: impl Into<PathBuf>, config: StarConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            config,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for a job/class pair, e.g. `job085_class3.star`
    pub fn file_name(job: u32, class_id: ClassId) -> String {
        format!("job{:03}_class{}.star", job, class_id)
    }

    /// Write every class of `table`, returning the written paths in class order
    pub fn write_job(&self, job: u32, table: &Table) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::write(&self.output_dir, e))?;

        let mut written = Vec::new();
        for class_id in table.class_ids() {
            let path = self.output_dir.join(Self::file_name(job, class_id));
            let text = self.render_class(table, class_id);
            fs::write(&path, text).map_err(|e| Error::write(&path, e))?;
            log::info!("Written per-class STAR: {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    /// STAR text holding only the records of one class
    pub fn render_class(&self, table: &Table, class_id: ClassId) -> String {
        let cfg = &self.config;
        let mut out = String::new();

        if !cfg.version_line.is_empty() {
            out.push_str(&cfg.version_line);
            out.push_str("\n\n");
        }
        out.push_str(&cfg.section);
        out.push_str("\n\n");
        out.push_str(&cfg.loop_marker);
        out.push('\n');
        for column in table.columns() {
            let _ = writeln!(out, "{}{}", cfg.header_prefix, column);
        }
        for record in table.records_in_class(class_id) {
            out.push_str(&record.fields().join(" "));
            out.push('\n');
        }
        out
    }
}
