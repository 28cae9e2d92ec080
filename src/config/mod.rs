pub mod toml_config;

pub use toml_config::RunnerConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "run-examples", version)]
#[command(about = "Build and run every example in a directory, one after another")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory to scan for examples
    #[arg(long)]
    pub dir: Option<String>,

    /// Entry name suffix that marks an example
    #[arg(long)]
    pub suffix: Option<String>,

    /// Program to invoke for each example
    #[arg(long)]
    pub program: Option<String>,

    /// Argument placed before the example name; repeat to build the list
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Exit non-zero if any example failed
    #[arg(long)]
    pub strict: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Show what would be run without executing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log CPU and memory usage after each example
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Defaults, then the config file, then flags given on the command line.
    pub fn resolve(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                RunnerConfig::from_file(path)?
            }
            None => RunnerConfig::default(),
        };

        if let Some(dir) = &self.dir {
            config.examples.dir = dir.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.examples.suffix = suffix.clone();
        }
        if let Some(program) = &self.program {
            config.command.program = program.clone();
        }
        if !self.args.is_empty() {
            config.command.args = self.args.clone();
        }
        if self.strict {
            config.run.strict = true;
        }
        if let Some(report) = &self.report {
            config.run.report = Some(report.clone());
        }

        Ok(config)
    }
}
