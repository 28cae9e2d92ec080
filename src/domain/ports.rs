use crate::domain::model::{Invocation, InvocationOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of directory entry names. Order is whatever the backend yields.
pub trait EntrySource: Send + Sync {
    fn list_entries(&self) -> Result<Vec<String>>;
    fn location(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn examples_dir(&self) -> &str;
    fn suffix(&self) -> &str;
    fn program(&self) -> &str;
    fn fixed_args(&self) -> &[String];
}

#[async_trait]
pub trait Runner: Send + Sync {
    /// Runs one invocation to completion. A non-zero exit is an `Ok` outcome;
    /// only a failure to start the program is an error.
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutcome>;
}
