use std::path::PathBuf;
use thiserror::Error;

/// Reciprocal analysis error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing {kind}: {path}")]
    MissingResource { kind: String, path: PathBuf },

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for reciprocal operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing resource error
    pub fn missing(kind: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::MissingResource {
            kind: kind.into(),
            path: path.into(),
        }
    }

    /// Wrap a filesystem write failure with the path that failed
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    /// Create an analysis error
    pub fn analysis(msg: impl Into<String>) -> Self {
        Error::Analysis(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True for errors raised while parsing a source file
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_write_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::write("/out/job001_class1.star", io_err);
        assert_eq!(
            err.to_string(),
            "Failed to write /out/job001_class1.star: denied"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::parse("/proj/run_it025_data.star", "no data rows");
        assert!(err.to_string().contains("/proj/run_it025_data.star"));
        assert!(err.to_string().contains("no data rows"));
        assert!(err.is_parse());
    }

    #[test]
    fn test_missing_resource_display() {
        let err = Error::missing("Class3D directory", "/proj/Class3D");
        assert_eq!(err.to_string(), "Missing Class3D directory: /proj/Class3D");
        assert!(!err.is_parse());
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("particle column must not be empty");
        assert_eq!(
            err.to_string(),
            "Config validation error: particle column must not be empty"
        );
    }

    #[test]
    fn test_analysis_error() {
        let err = Error::analysis("insufficient jobs for reciprocal comparison");
        assert_eq!(
            err.to_string(),
            "Analysis error: insufficient jobs for reciprocal comparison"
        );
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
