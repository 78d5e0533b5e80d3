//! CLI module for reciprocal

mod args;

pub use args::{Args, Command};

use crate::config::Config;
use crate::discovery::DiskFs;
use crate::error::Result;
use crate::pipeline::Pipeline;
use std::path::Path;
use std::process::ExitCode;

/// Default config file looked up in the working directory
const DEFAULT_CONFIG: &str = "reciprocal.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.command.verbose());

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the verbosity flag
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Analyze {
            project,
            jobs,
            outdir,
            config,
            format,
            no_per_class,
            skip_malformed,
            verbose,
        } => {
            let mut cfg = match &config {
                Some(path) => Config::load(path)?,
                None => Config::load_or_default(Path::new(DEFAULT_CONFIG)),
            };
            cfg.merge_cli(Some(outdir), format, no_per_class, skip_malformed);
            cfg.validate()?;

            if verbose {
                println!("Project: {}", project.display());
                println!("Jobs: {:?}", jobs);
                println!("Output: {}", cfg.output.directory.display());
                println!("Format: {:?}", cfg.output.format);
                println!("Per-class files: {}", cfg.output.per_class);
                println!("Skip malformed: {}", cfg.discovery.skip_malformed);
            }

            let pipeline = Pipeline::new(cfg, &DiskFs).with_verbose(verbose);
            let report = pipeline.run(&project, &jobs)?;

            for (job, path) in &report.sources {
                println!("Job {:03}: using STAR file {}", job, path.display());
            }
            for skipped in &report.skipped {
                println!("Job {:03}: skipped ({})", skipped.job, skipped.reason);
            }
            println!("{}", report.summary());
            println!("Reciprocal analysis complete.");
            println!(
                "Results written to: {}",
                pipeline.config().output.directory.display()
            );

            Ok(())
        }

        Command::Version => {
            println!("reciprocal {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
