use crate::core::filter;
use crate::core::{ConfigProvider, EntrySource, Invocation, Runner, RunReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

pub struct RunEngine<S: EntrySource, R: Runner, C: ConfigProvider> {
    source: S,
    runner: R,
    config: C,
    monitor: SystemMonitor,
}

impl<S: EntrySource, R: Runner, C: ConfigProvider> RunEngine<S, R, C> {
    pub fn new(source: S, runner: R, config: C) -> Self {
        Self::new_with_monitoring(source, runner, config, false)
    }

    pub fn new_with_monitoring(source: S, runner: R, config: C, monitor_enabled: bool) -> Self {
        Self {
            source,
            runner,
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Lists the examples directory and builds one invocation per matching entry.
    pub fn plan(&self) -> Result<Vec<Invocation>> {
        let entries = self.source.list_entries()?;
        tracing::debug!(
            "Found {} entries in {}",
            entries.len(),
            self.source.location()
        );

        let names = filter::select(&entries, self.config.suffix());
        tracing::debug!(
            "{} entries match suffix '{}'",
            names.len(),
            self.config.suffix()
        );

        Ok(names
            .iter()
            .map(|name| Invocation::new(self.config.program(), self.config.fixed_args(), name))
            .collect())
    }

    /// Runs every planned invocation, one at a time. Unsuccessful exits are
    /// recorded and the loop moves on; a launch failure aborts the run.
    pub async fn run(&self) -> Result<RunReport> {
        let started_at = Utc::now();
        let plan = self.plan()?;
        tracing::info!(
            "Running {} examples from {}",
            plan.len(),
            self.source.location()
        );

        let mut outcomes = Vec::with_capacity(plan.len());
        for (index, invocation) in plan.iter().enumerate() {
            tracing::info!(
                "▶ [{}/{}] {}",
                index + 1,
                plan.len(),
                invocation.command_line()
            );

            let outcome = self.runner.run(invocation).await?;
            if outcome.success {
                tracing::info!("✅ {} finished in {:?}", outcome.name, outcome.elapsed);
            } else {
                match outcome.exit_code {
                    Some(code) => tracing::warn!("❌ {} exited with status {}", outcome.name, code),
                    None => tracing::warn!("❌ {} was terminated by a signal", outcome.name),
                }
            }

            self.monitor.log_stats(&outcome.name);
            outcomes.push(outcome);
        }

        self.monitor.log_final_stats();

        Ok(RunReport {
            started_at,
            finished_at: Utc::now(),
            directory: self.source.location(),
            suffix: self.config.suffix().to_string(),
            program: self.config.program().to_string(),
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunnerConfig;
    use crate::core::InvocationOutcome;
    use crate::utils::error::RunnerError;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedEntries(Vec<&'static str>);

    impl EntrySource for FixedEntries {
        fn list_entries(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|e| e.to_string()).collect())
        }

        fn location(&self) -> String {
            "fixture".to_string()
        }
    }

    struct MissingDirectory;

    impl EntrySource for MissingDirectory {
        fn list_entries(&self) -> Result<Vec<String>> {
            Err(RunnerError::DirectoryError {
                path: "missing".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }

        fn location(&self) -> String {
            "missing".to_string()
        }
    }

    /// Records every call; names in `failing` exit 1, names in `unlaunchable` fail to start.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<Invocation>>,
        failing: HashSet<&'static str>,
        unlaunchable: HashSet<&'static str>,
    }

    impl RecordingRunner {
        fn names(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|i| i.name.clone()).collect()
        }
    }

    #[async_trait]
    impl Runner for RecordingRunner {
        async fn run(&self, invocation: &Invocation) -> Result<InvocationOutcome> {
            self.calls.lock().unwrap().push(invocation.clone());
            if self.unlaunchable.contains(invocation.name.as_str()) {
                return Err(RunnerError::SpawnError {
                    program: invocation.program.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            let success = !self.failing.contains(invocation.name.as_str());
            Ok(InvocationOutcome {
                name: invocation.name.clone(),
                exit_code: Some(if success { 0 } else { 1 }),
                success,
                elapsed: Duration::ZERO,
            })
        }
    }

    fn ext_config() -> RunnerConfig {
        let mut config = RunnerConfig::default();
        config.examples.suffix = ".ext".to_string();
        config
    }

    #[tokio::test]
    async fn test_runs_each_matching_entry_once() {
        let runner = RecordingRunner::default();
        let engine = RunEngine::new(FixedEntries(vec!["a.ext", "b.ext", "c.txt"]), runner, ext_config());

        let report = engine.run().await.unwrap();

        let mut names = engine.runner().names();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), 0);
    }

    #[tokio::test]
    async fn test_uses_fixed_argument_vector() {
        let runner = RecordingRunner::default();
        let engine = RunEngine::new(FixedEntries(vec!["path.rs"]), runner, RunnerConfig::default());

        engine.run().await.unwrap();

        let calls = engine.runner().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "cargo");
        assert_eq!(calls[0].argv(), vec!["run", "--example", "path"]);
    }

    #[tokio::test]
    async fn test_empty_directory_runs_nothing() {
        let runner = RecordingRunner::default();
        let engine = RunEngine::new(FixedEntries(vec![]), runner, RunnerConfig::default());

        let report = engine.run().await.unwrap();

        assert!(engine.runner().names().is_empty());
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn test_failed_example_does_not_stop_the_loop() {
        let runner = RecordingRunner {
            failing: HashSet::from(["b"]),
            ..Default::default()
        };
        let engine = RunEngine::new(
            FixedEntries(vec!["a.ext", "b.ext", "c.ext"]),
            runner,
            ext_config(),
        );

        let report = engine.run().await.unwrap();

        assert_eq!(engine.runner().names(), vec!["a", "b", "c"]);
        assert_eq!(report.failed_names(), vec!["b"]);
        assert_eq!(report.succeeded(), 2);
    }

    #[tokio::test]
    async fn test_launch_failure_aborts_the_run() {
        let runner = RecordingRunner {
            unlaunchable: HashSet::from(["a"]),
            ..Default::default()
        };
        let engine = RunEngine::new(FixedEntries(vec!["a.ext", "b.ext"]), runner, ext_config());

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, RunnerError::SpawnError { .. }));
        assert_eq!(engine.runner().names(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let runner = RecordingRunner::default();
        let engine = RunEngine::new(MissingDirectory, runner, RunnerConfig::default());

        let err = engine.run().await.unwrap_err();

        assert!(matches!(err, RunnerError::DirectoryError { .. }));
        assert!(engine.runner().names().is_empty());
    }

    #[test]
    fn test_plan_does_not_invoke_runner() {
        let runner = RecordingRunner::default();
        let engine = RunEngine::new(FixedEntries(vec!["x.rs", "y.rs"]), runner, RunnerConfig::default());

        let plan = engine.plan().unwrap();

        assert_eq!(plan.len(), 2);
        assert!(engine.runner().names().is_empty());
    }
}
