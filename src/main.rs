use explog::cli::commands::{CliArgs, Commands};
use explog::cli::handlers::{handle_check, handle_merge, handle_params};
use explog::util::{init_logging, LoggingConfig};
use explog::{ExplogConfig, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = ExplogConfig::default();
    init_logging(LoggingConfig::from_cli(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
        &config,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Merge(merge_args) => handle_merge(merge_args, &config),
        Commands::Params(params_args) => handle_params(params_args, &config),
        Commands::Check(check_args) => handle_check(check_args, &config),
    };

    process::exit(exit_code);
}
