pub mod commands;
pub mod generate;
pub mod templates;

pub use commands::{Cli, Commands};
