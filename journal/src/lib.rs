pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Command, Params};
pub use commands::{flush, run};
pub use error::CommandError;
