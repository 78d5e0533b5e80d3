// Run orchestration
//
// discovery -> parse -> per-class files -> analysis -> output tables.
// Per-class files of jobs handled before a fatal error stay on disk; the
// matrices and edge list are only written once analysis succeeds.

use crate::analysis::{self, ReciprocalAnalysis};
use crate::config::Config;
use crate::discovery::{JobLocator, ProjectFs};
use crate::error::{Error, Result};
use crate::output::{OutputReport, OutputWriter};
use crate::star::{PerClassWriter, StarParser, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A requested job that did not take part in the comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedJob {
    pub job: u32,
    pub reason: String,
}

/// Outcome of a complete run
#[derive(Debug)]
pub struct RunReport {
    pub analysis: ReciprocalAnalysis,
    pub sources: BTreeMap<u32, PathBuf>,
    pub skipped: Vec<SkippedJob>,
    pub per_class_files: Vec<PathBuf>,
    pub output: OutputReport,
}

impl RunReport {
    pub fn summary(&self) -> String {
        format!(
            "Compared {} jobs ({} skipped), {} per-class files. {}",
            self.sources.len(),
            self.skipped.len(),
            self.per_class_files.len(),
            self.output.summary()
        )
    }
}

/// Reciprocal analysis over a project directory
pub struct Pipeline<'a, F: ProjectFs + ?Sized> {
    config: Config,
    fs: &'a F,
    verbose: bool,
}

impl<'a, F: ProjectFs + ?Sized> Pipeline<'a, F> {
    pub fn new(config: Config, fs: &'a F) -> Self {
        Self {
            config,
            fs,
            verbose: false,
        }
    }

    /// Show a progress bar while reading jobs
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process `jobs` of the project at `project_root`.
    ///
    /// The project's job subdirectory is checked before the output
    /// directory is created.
    pub fn run(&self, project_root: &Path, jobs: &[u32]) -> Result<RunReport> {
        let locator = JobLocator::new(self.fs, project_root, self.config.discovery.clone())?;
        locator.require_project()?;

        let output_dir = &self.config.output.directory;
        std::fs::create_dir_all(output_dir).map_err(|e| Error::write(output_dir, e))?;

        let parser = StarParser::new(self.config.star.clone());
        let class_writer = self.config.output.per_class.then(|| {
            PerClassWriter::new(
                output_dir.join(&self.config.output.per_class_dir),
                self.config.star.clone(),
            )
        });

        let progress = if self.verbose {
            let pb = ProgressBar::new(jobs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut tables: BTreeMap<u32, Table> = BTreeMap::new();
        let mut sources = BTreeMap::new();
        let mut skipped = Vec::new();
        let mut per_class_files = Vec::new();
        let mut requested = BTreeSet::new();

        for &job in jobs {
            if let Some(ref pb) = progress {
                pb.set_message(format!("job{:03}", job));
                pb.inc(1);
            }

            if !requested.insert(job) {
                log::warn!("Job {:03} requested more than once, ignoring repeat", job);
                continue;
            }

            let Some(path) = locator.locate(job)? else {
                skipped.push(SkippedJob {
                    job,
                    reason: "no iteration file found".to_string(),
                });
                continue;
            };
            log::info!("Job {:03}: using STAR file {}", job, path.display());

            let source = self.fs.read_to_string(&path)?;
            let table = match parser.parse_source(&source, &path) {
                Ok(table) => table,
                Err(e) if e.is_parse() && self.config.discovery.skip_malformed => {
                    log::warn!("Skipping job {:03}: {}", job, e);
                    skipped.push(SkippedJob {
                        job,
                        reason: e.to_string(),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            if let Some(writer) = &class_writer {
                per_class_files.extend(writer.write_job(job, &table)?);
            }

            tables.insert(job, table);
            sources.insert(job, path);
        }

        if let Some(pb) = progress {
            pb.finish_with_message("Jobs read");
        }

        let analysis = analysis::analyze(&tables)?;
        let output = OutputWriter::new(output_dir, self.config.output.clone())
            .write(&analysis.matrix)?;

        Ok(RunReport {
            analysis,
            sources,
            skipped,
            per_class_files,
            output,
        })
    }
}
