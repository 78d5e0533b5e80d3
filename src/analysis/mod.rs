// Reciprocal analysis: per-job class sets and cross-job intersections

pub mod matrix;
pub mod sets;

pub use matrix::*;
pub use sets::*;

use crate::error::{Error, Result};
use crate::star::Table;
use std::collections::{BTreeMap, HashSet};

/// Minimum number of usable jobs for a comparison
pub const MIN_JOBS: usize = 2;

/// Result of comparing the class assignments of several jobs
#[derive(Debug, Clone)]
pub struct ReciprocalAnalysis {
    /// Class sets in job order
    pub jobs: Vec<JobClassSet>,
    /// Cross-job intersections
    pub matrix: IntersectionMatrix,
}

impl ReciprocalAnalysis {
    pub fn job_ids(&self) -> Vec<u32> {
        self.jobs.iter().map(JobClassSet::job).collect()
    }
}

/// Build class sets for every job and intersect them pairwise.
///
/// Every ordered pair of distinct jobs is compared, so each unordered
/// class pair appears twice with the same count and possibly different
/// fractions.
pub fn analyze(tables: &BTreeMap<u32, Table>) -> Result<ReciprocalAnalysis> {
    let mut jobs = Vec::with_capacity(tables.len());
    for (&job, table) in tables {
        let set = JobClassSet::from_table(job, table);
        if set.overlaps() > 0 {
            log::warn!(
                "Job {:03}: {} particles are assigned to more than one class",
                job,
                set.overlaps()
            );
        }
        if set.is_empty() {
            log::warn!("Job {:03}: no particles, skipping", job);
            continue;
        }
        jobs.push(set);
    }

    if jobs.len() < MIN_JOBS {
        return Err(Error::analysis(format!(
            "insufficient jobs for reciprocal comparison: need at least {}, got {}",
            MIN_JOBS,
            jobs.len()
        )));
    }

    let mut matrix = IntersectionMatrix::new();
    for job_a in &jobs {
        for job_b in &jobs {
            if job_a.job() == job_b.job() {
                continue;
            }
            for (class_a, set_a) in job_a.classes() {
                for (class_b, set_b) in job_b.classes() {
                    let count = intersection_size(set_a, set_b);
                    matrix.insert(
                        job_a.label(class_a),
                        job_b.label(class_b),
                        Intersection::new(count, set_a.len()),
                    );
                }
            }
        }
    }

    log::debug!(
        "Compared {} jobs: {} cross-job class pairs",
        jobs.len(),
        matrix.len()
    );

    Ok(ReciprocalAnalysis { jobs, matrix })
}

/// |a ∩ b|, probing the larger set from the smaller one
fn intersection_size(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|p| large.contains(*p)).count()
}
