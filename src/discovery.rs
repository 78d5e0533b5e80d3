// Locating the latest iteration file of each job
//
// Filesystem access goes through `ProjectFs` so the lookup can run
// against an in-memory tree in tests.

use crate::config::DiscoveryConfig;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only filesystem operations used by discovery and the pipeline
pub trait ProjectFs {
    fn is_dir(&self, path: &Path) -> bool;

    /// Files directly inside `dir` (no recursion), including symlinks to files
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl ProjectFs for DiskFs {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            // stat through symlinks; dangling links are not files
            if entry.path().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })
    }
}

/// In-memory file tree; directories exist implicitly above each file
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }
}

impl ProjectFs for MemoryFs {
    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|f| f != path && f.starts_with(path))
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(Error::missing("directory", dir));
        }
        Ok(self
            .files
            .keys()
            .filter(|f| f.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: not found", path.display()),
            ))
        })
    }
}

/// Finds job directories and their most recent iteration file
pub struct JobLocator<'a, F: ProjectFs + ?Sized> {
    fs: &'a F,
    config: DiscoveryConfig,
    pattern: glob::Pattern,
    jobs_root: PathBuf,
}

impl<'a, F: ProjectFs + ?Sized> JobLocator<'a, F> {
    /// Create a locator for `project_root/<subdirectory>`
    pub fn new(fs: &'a F, project_root: &Path, config: DiscoveryConfig) -> Result<Self> {
        let pattern = glob::Pattern::new(&config.pattern)?;
        let jobs_root = project_root.join(&config.subdirectory);
        Ok(Self {
            fs,
            config,
            pattern,
            jobs_root,
        })
    }

    /// Directory holding the job directories
    pub fn jobs_root(&self) -> &Path {
        &self.jobs_root
    }

    /// Fail unless the project's job subdirectory exists
    pub fn require_project(&self) -> Result<()> {
        if self.fs.is_dir(&self.jobs_root) {
            Ok(())
        } else {
            Err(Error::missing(
                format!("{} directory", self.config.subdirectory),
                &self.jobs_root,
            ))
        }
    }

    /// Directory of one job, e.g. `Class3D/job085`
    pub fn job_dir(&self, job: u32) -> PathBuf {
        self.jobs_root
            .join(format!("{}{:03}", self.config.job_prefix, job))
    }

    /// Iteration files of a job matching the pattern, sorted by name
    pub fn candidates(&self, job: u32) -> Result<Vec<PathBuf>> {
        let dir = self.job_dir(job);
        if !self.fs.is_dir(&dir) {
            return Err(Error::missing(format!("job {:03} directory", job), dir));
        }
        let mut files: Vec<PathBuf> = self
            .fs
            .list_files(&dir)?
            .into_iter()
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| self.pattern.matches(n))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Most recent iteration file of a job.
    ///
    /// A missing job directory or an empty candidate list is logged and
    /// reported as `Ok(None)` so the caller can drop the job.
    pub fn locate(&self, job: u32) -> Result<Option<PathBuf>> {
        let candidates = match self.candidates(job) {
            Ok(c) => c,
            Err(Error::MissingResource { kind, path }) => {
                log::warn!("No {} at {}, skipping job {:03}", kind, path.display(), job);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match candidates.into_iter().next_back() {
            Some(latest) => {
                log::debug!("Job {:03}: using {}", job, latest.display());
                Ok(Some(latest))
            }
            None => {
                log::warn!(
                    "No STAR file matching {} found for job {:03} in {}",
                    self.config.pattern,
                    job,
                    self.job_dir(job).display()
                );
                Ok(None)
            }
        }
    }
}
