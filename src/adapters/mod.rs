// Adapters layer: concrete implementations of the domain ports.

pub mod directory;
pub mod process;

pub use directory::LocalDirectory;
pub use process::ProcessRunner;
