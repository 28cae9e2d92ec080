use crate::core::ConfigProvider;
use crate::utils::error::{Result, RunnerError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    pub examples: ExamplesConfig,
    pub command: CommandConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExamplesConfig {
    pub dir: String,
    pub suffix: String,
}

impl Default for ExamplesConfig {
    fn default() -> Self {
        Self {
            dir: "examples".to_string(),
            suffix: ".rs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
    pub program: String,
    /// Placed before the example name on every invocation.
    pub args: Vec<String>,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            args: vec!["run".to_string(), "--example".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Exit non-zero after the run if any example failed.
    pub strict: bool,
    /// Where to write the JSON run report.
    pub report: Option<String>,
}

impl RunnerConfig {
    /// Loads a config file. A file that does not exist is a configuration
    /// error, not a filesystem one.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RunnerError::MissingConfigError {
                field: path.display().to_string(),
            },
            _ => RunnerError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let (processed_content, substituted) = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| {
            let mut message = format!("TOML parsing error: {}", e);
            if !substituted.is_empty() {
                message.push_str(&format!(" (substituted variables: {})", substituted.join(", ")));
            }
            RunnerError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message,
            }
        })
    }

    /// Replaces `${VAR}` with the escaped value of `VAR`; unset variables stay
    /// verbatim. Returns the names that were substituted.
    fn substitute_env_vars(content: &str) -> Result<(String, Vec<String>)> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RunnerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let mut substituted = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    substituted.push(var_name.to_string());
                    escape_basic_string(&value)
                }
                Err(_) => format!("${{{}}}", var_name),
            }
        });

        Ok((result.to_string(), substituted))
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("examples.dir", &self.examples.dir)?;
        validation::validate_suffix("examples.suffix", &self.examples.suffix)?;
        validation::validate_non_empty_string("command.program", &self.command.program)?;

        if let Some(report) = &self.run.report {
            validation::validate_path("run.report", report)?;
        }

        Ok(())
    }
}

/// Values land inside TOML basic strings, so quotes, backslashes and control
/// characters must not end the string early.
fn escape_basic_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl ConfigProvider for RunnerConfig {
    fn examples_dir(&self) -> &str {
        &self.examples.dir
    }

    fn suffix(&self) -> &str {
        &self.examples.suffix
    }

    fn program(&self) -> &str {
        &self.command.program
    }

    fn fixed_args(&self) -> &[String] {
        &self.command.args
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
