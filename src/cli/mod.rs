pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CheckArgs, CliArgs, Commands, ConfigArgs};
pub use output::{CheckReport, FileReport, FileStatus, OutputFormat, OutputFormatter};
