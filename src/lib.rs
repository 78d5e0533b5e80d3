//! Reciprocal - cross-job class intersection analysis
//!
//! Reads the final-iteration particle tables of several RELION
//! classification jobs and measures how the particles of each class in one
//! job are distributed over the classes of every other job.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod star;

// Re-export main types
pub use analysis::{
    analyze, ClassLabel, Intersection, IntersectionMatrix, JobClassSet, ReciprocalAnalysis,
};
pub use config::{Config, OutputFormat};
pub use discovery::{DiskFs, JobLocator, MemoryFs, ProjectFs};
pub use error::{Error, Result};
pub use output::{edge_list, EdgeRecord, OutputReport, OutputWriter};
pub use pipeline::{Pipeline, RunReport, SkippedJob};
pub use star::{PerClassWriter, StarParser, Table};
