pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CheckArgs, CliArgs, Commands, MergeArgs, ParamsArgs, TemplateArgs};
pub use output::{OutputFormat, OutputFormatter};
