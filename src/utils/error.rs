use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cannot list directory '{path}': {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration file not found: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{failed} of {total} examples exited unsuccessfully")]
    ExamplesFailed { failed: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FileSystem,
    Process,
    Serialization,
    Execution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RunnerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RunnerError::IoError(_) | RunnerError::DirectoryError { .. } => ErrorCategory::FileSystem,
            RunnerError::SpawnError { .. } => ErrorCategory::Process,
            RunnerError::SerializationError(_) => ErrorCategory::Serialization,
            RunnerError::ConfigError { .. }
            | RunnerError::MissingConfigError { .. }
            | RunnerError::InvalidConfigValueError { .. }
            | RunnerError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            RunnerError::ExamplesFailed { .. } => ErrorCategory::Execution,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::FileSystem | ErrorCategory::Process => ErrorSeverity::Critical,
            ErrorCategory::Configuration | ErrorCategory::Execution => ErrorSeverity::High,
            ErrorCategory::Serialization => ErrorSeverity::Medium,
        }
    }

    /// Process exit code for this error, derived from its severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RunnerError::DirectoryError { .. } => {
                "Run from the project root or point --dir at an existing examples directory"
            }
            RunnerError::SpawnError { .. } => {
                "Check that the program is installed and on PATH, or pass --program"
            }
            RunnerError::IoError(_) => "Check file permissions and available disk space",
            RunnerError::SerializationError(_) => "Check that the report path is writable",
            RunnerError::ConfigError { .. } | RunnerError::ConfigValidationError { .. } => {
                "Fix the configuration file syntax and try again"
            }
            RunnerError::MissingConfigError { .. } => {
                "Check the --config path, or omit it to use the built-in defaults"
            }
            RunnerError::InvalidConfigValueError { .. } => {
                "Review the configuration values and command-line flags"
            }
            RunnerError::ExamplesFailed { .. } => {
                "Inspect the output above for the failing examples, or drop --strict"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RunnerError::DirectoryError { path, .. } => {
                format!("Examples directory '{}' could not be read", path)
            }
            RunnerError::SpawnError { program, .. } => {
                format!("Could not start '{}'", program)
            }
            RunnerError::MissingConfigError { field } => {
                format!("Configuration file '{}' does not exist", field)
            }
            RunnerError::ExamplesFailed { failed, total } => {
                format!("{} of {} examples failed", failed, total)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_critical() {
        let err = RunnerError::DirectoryError {
            path: "examples".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.category(), ErrorCategory::FileSystem);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("examples"));
    }

    #[test]
    fn test_strict_failure_exit_code() {
        let err = RunnerError::ExamplesFailed { failed: 2, total: 5 };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "2 of 5 examples exited unsuccessfully");
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = RunnerError::InvalidConfigValueError {
            field: "examples.suffix".to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }
}
