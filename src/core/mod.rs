pub mod engine;
pub mod filter;

pub use crate::domain::model::{Invocation, InvocationOutcome, RunReport};
pub use crate::domain::ports::{ConfigProvider, EntrySource, Runner};
pub use crate::utils::error::Result;
