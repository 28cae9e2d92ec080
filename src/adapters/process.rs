use crate::domain::model::{Invocation, InvocationOutcome};
use crate::domain::ports::Runner;
use crate::utils::error::{Result, RunnerError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;

/// Spawns each invocation as a child process sharing this process's stdio,
/// environment and working directory.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_working_dir(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(working_dir.into()),
        }
    }
}

#[async_trait]
impl Runner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutcome> {
        let mut command = Command::new(&invocation.program);
        command
            .args(invocation.argv())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let started = Instant::now();
        let status = command
            .status()
            .await
            .map_err(|source| RunnerError::SpawnError {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(InvocationOutcome {
            name: invocation.name.clone(),
            exit_code: status.code(),
            success: status.success(),
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_successful_exit() {
        let outcome = ProcessRunner::new()
            .run(&Invocation::new("true", &[], "demo"))
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.name, "demo");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let outcome = ProcessRunner::new()
            .run(&Invocation::new("false", &[], "demo"))
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
    }

    #[tokio::test]
    async fn test_logical_name_is_last_argument() {
        let dir = TempDir::new().unwrap();
        let args = vec!["-c".to_string(), "touch \"$0\"".to_string()];

        let outcome = ProcessRunner::with_working_dir(dir.path())
            .run(&Invocation::new("sh", &args, "marker"))
            .await
            .unwrap();

        assert!(outcome.success);
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_missing_program_fails_to_launch() {
        let err = ProcessRunner::new()
            .run(&Invocation::new("run-examples-no-such-program", &[], "demo"))
            .await
            .unwrap_err();

        assert!(matches!(err, RunnerError::SpawnError { .. }));
    }
}
