use chef_survey::app::{handle_fatal_error, initialize_app};
use chef_survey::cli::{execute_command, Cli};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match initialize_app(verbose, cli.config.as_deref()) {
        Ok(config) => execute_command(cli.command, config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        handle_fatal_error(e, verbose);
    }
}
