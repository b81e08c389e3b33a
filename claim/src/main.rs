use std::process::ExitCode;

use clap::Parser;
use simplefin_claim::{cli::Args, config::Config, error::Error, run, utils::load_dotenv};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    match claim() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn claim() -> Result<String, Error> {
    let args = Args::parse();

    // Load variables from .env file
    let dotenv_loaded = load_dotenv()?;

    // Parse config from env, then let arguments override it
    let mut config = Config::from_env()?;
    args.apply(&mut config);

    // Start logger, stdout is reserved for the result
    tracing_subscriber::registry()
        .with(config.log_filter()?)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if dotenv_loaded {
        tracing::info!(".env file has been loaded");
    }

    tracing::debug!(
        version = simplefin_claim::config::VERSION,
        timeout = config.timeout,
        origin = %config.origin,
        "Starting claim"
    );

    run(&args, &config)
}
