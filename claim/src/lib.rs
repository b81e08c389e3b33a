pub mod claim;
pub mod cli;
pub mod config;
pub mod error;
pub mod utils;

use claim::ClaimExchanger;
use cli::Args;
use config::Config;
use error::Error;

/// SimpleFIN Claim entrypoint, returns the line to print on success
pub fn run(args: &Args, config: &Config) -> Result<String, Error> {
    let token = config.setup_token.as_ref().ok_or_else(|| {
        Error::ConfigError(String::from(
            "no setup token: pass it as an argument or set SIMPLEFIN_SETUP_TOKEN",
        ))
    })?;

    let access_url = ClaimExchanger::new(config)?.claim(token)?;

    args.format.render(access_url)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn requires_token() {
        let args = Args::parse_from(["simplefin-claim"]);

        assert!(matches!(
            run(&args, &Config::default()),
            Err(Error::ConfigError(_))
        ));
    }
}
