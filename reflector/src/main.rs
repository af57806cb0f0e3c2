use clap::Parser;
use reflector::cli::{Cli, Commands};
use reflector::commands;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG takes precedence over -v/-q
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        None => commands::generate::run(&cli, Default::default()),
        Some(Commands::Generate(args)) => commands::generate::run(&cli, args.clone()),
        Some(Commands::List(args)) => commands::list::run(&cli, args.clone()),
        Some(Commands::Init(args)) => commands::init::run(&cli, args.clone()),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
