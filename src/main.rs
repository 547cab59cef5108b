use imageguard::cli::commands::{CliArgs, Commands};
use imageguard::cli::handlers::{handle_check, handle_config};
use imageguard::util::logging::{init_logging, parse_level, LoggingConfig};
use imageguard::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let log_level = args.effective_log_level();

    let mut logging = LoggingConfig::from_env();
    if let Some(level) = log_level {
        logging.level = parse_level(level);
    }
    init_logging(logging);

    debug!("imageguard v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Check(check_args) => handle_check(check_args, log_level),
        Commands::Config(config_args) => handle_config(config_args, log_level),
    };

    std::process::exit(exit_code);
}
