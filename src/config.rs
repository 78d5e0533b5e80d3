use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub star: StarConfig,
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
}

/// STAR format markers and required columns
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub section: String,
    pub loop_marker: String,
    pub header_prefix: String,
    pub comment_prefix: String,
    pub version_line: String,
    pub particle_column: String,
    pub class_column: String,
}

/// Where iteration files live inside a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub subdirectory: String,
    pub job_prefix: String,
    pub pattern: String,
    /// Warn and drop a job whose file fails to parse instead of aborting
    pub skip_malformed: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub directory: PathBuf,
    pub per_class: bool,
    pub per_class_dir: String,
    pub counts_name: String,
    pub fractions_name: String,
    pub edges_name: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            section: "data_particles".to_string(),
            loop_marker: "loop_".to_string(),
            header_prefix: "_".to_string(),
            comment_prefix: "#".to_string(),
            version_line: "# version 50001".to_string(),
            particle_column: "rlnImageName".to_string(),
            class_column: "rlnClassNumber".to_string(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            subdirectory: "Class3D".to_string(),
            job_prefix: "job".to_string(),
            pattern: "run_it*_data.star".to_string(),
            skip_malformed: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: PathBuf::from("reciprocal_analysis_out"),
            per_class: true,
            per_class_dir: "per_class_star".to_string(),
            counts_name: "intersection_counts".to_string(),
            fractions_name: "intersection_fractions".to_string(),
            edges_name: "pysankey_input".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    log::warn!("Ignoring config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        format: Option<String>,
        no_per_class: bool,
        skip_malformed: bool,
    ) {
        if let Some(out) = output {
            self.output.directory = out;
        }

        if let Some(fmt) = format {
            self.output.format = match fmt.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Csv,
            };
        }

        if no_per_class {
            self.output.per_class = false;
        }

        if skip_malformed {
            self.discovery.skip_malformed = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("star.section", &self.star.section),
            ("star.loop_marker", &self.star.loop_marker),
            ("star.header_prefix", &self.star.header_prefix),
            ("star.particle_column", &self.star.particle_column),
            ("star.class_column", &self.star.class_column),
            ("discovery.subdirectory", &self.discovery.subdirectory),
            ("discovery.pattern", &self.discovery.pattern),
            ("output.per_class_dir", &self.output.per_class_dir),
            ("output.counts_name", &self.output.counts_name),
            ("output.fractions_name", &self.output.fractions_name),
            ("output.edges_name", &self.output.edges_name),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(Error::config_validation(format!("{} must not be empty", key)));
            }
        }

        if self.star.particle_column == self.star.class_column {
            return Err(Error::config_validation(
                "particle and class columns must differ",
            ));
        }

        let names = [
            &self.output.counts_name,
            &self.output.fractions_name,
            &self.output.edges_name,
        ];
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(Error::config_validation("output file names must be distinct"));
        }

        glob::Pattern::new(&self.discovery.pattern)?;

        Ok(())
    }
}
