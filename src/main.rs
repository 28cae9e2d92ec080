use anyhow::Context;
use clap::Parser;
use run_examples::core::ConfigProvider;
use run_examples::utils::{logger, validation::Validate};
use run_examples::{CliConfig, LocalDirectory, ProcessRunner, RunEngine, RunnerConfig, RunnerError};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting run-examples");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    if cli.dry_run {
        display_dry_run(&config);
        return Ok(());
    }

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let source = LocalDirectory::new(config.examples_dir());
    let engine = RunEngine::new_with_monitoring(source, ProcessRunner::new(), config, cli.monitor);

    let report = match engine.run().await {
        Ok(report) => report,
        Err(e) => exit_with(e),
    };

    tracing::info!("🏁 {}", report.summary());
    if report.failed() > 0 {
        tracing::warn!("Failed examples: {}", report.failed_names().join(", "));
    }

    let config = engine.config();
    if let Some(path) = &config.run.report {
        report
            .save_to(Path::new(path))
            .with_context(|| format!("writing run report to {}", path))?;
        tracing::info!("📁 Report saved to: {}", path);
    }

    if config.run.strict && report.failed() > 0 {
        exit_with(RunnerError::ExamplesFailed {
            failed: report.failed(),
            total: report.total(),
        });
    }

    Ok(())
}

fn exit_with(e: RunnerError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

fn display_dry_run(config: &RunnerConfig) {
    println!("📋 Configuration Summary:");
    println!("  Directory: {}", config.examples_dir());
    println!("  Suffix: {}", config.suffix());
    println!("  Program: {}", config.program());
    println!("  Arguments: {}", config.fixed_args().join(" "));
    println!("  Strict: {}", config.run.strict);
    if let Some(report) = &config.run.report {
        println!("  Report: {}", report);
    }
    println!();

    let engine = RunEngine::new(
        LocalDirectory::new(config.examples_dir()),
        ProcessRunner::new(),
        config.clone(),
    );
    match engine.plan() {
        Ok(plan) => {
            println!("🔍 Would run {} examples:", plan.len());
            for invocation in &plan {
                println!("  {}", invocation.command_line());
            }
        }
        Err(e) => exit_with(e),
    }
}
