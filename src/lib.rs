pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{LocalDirectory, ProcessRunner};
pub use crate::config::RunnerConfig;
pub use crate::core::engine::RunEngine;
pub use crate::domain::model::{Invocation, InvocationOutcome, RunReport};
pub use crate::utils::error::{Result, RunnerError};
