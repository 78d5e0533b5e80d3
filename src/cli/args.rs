//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reciprocal analysis of RELION classification jobs
#[derive(Parser, Debug)]
#[command(name = "reciprocal")]
#[command(about = "Reciprocal analysis of RELION classification jobs")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare the final class assignments of two or more jobs
    Analyze {
        /// RELION project directory (the job subdirectory is appended)
        #[arg(long)]
        project: PathBuf,

        /// Job numbers, e.g. --jobs 85 86
        #[arg(long, required = true, num_args = 1..)]
        jobs: Vec<u32>,

        /// Output directory
        #[arg(short, long, default_value = "reciprocal_analysis_out")]
        outdir: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format (csv, json)
        #[arg(long, value_parser = ["csv", "json"])]
        format: Option<String>,

        /// Do not write per-class STAR files
        #[arg(long)]
        no_per_class: bool,

        /// Skip jobs whose STAR file fails to parse instead of aborting
        #[arg(long)]
        skip_malformed: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show version information
    Version,
}

impl Command {
    /// Whether verbose logging was requested
    pub fn verbose(&self) -> bool {
        matches!(self, Command::Analyze { verbose: true, .. })
    }
}
