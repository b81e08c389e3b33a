use clap::{Parser, ValueEnum};
use common::{access::AccessUrl, responses::ClaimResponse, token::SetupToken};

use crate::{config::Config, error::Error};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "simplefin-claim", version)]
#[command(about = "Exchanges a one-time SimpleFIN setup token for an access URL")]
pub struct Args {
    /// Setup token, falls back to SIMPLEFIN_SETUP_TOKEN
    pub token: Option<String>,

    /// How to print the access URL
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Claim request timeout in seconds, overrides SIMPLEFIN_TIMEOUT
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Args {
    /// Command line values take precedence over the environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(token) = &self.token {
            config.setup_token = Some(SetupToken::from(token.as_str()));
        }

        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `Access URL: <url>`
    Text,
    /// `SIMPLEFIN_ACCESS_URL=<url>`, ready for a .env file
    Env,
    /// `{"access_url":"<url>"}`
    Json,
}

impl OutputFormat {
    pub const ENV_KEY: &'static str = "SIMPLEFIN_ACCESS_URL";

    pub fn render(self, access_url: AccessUrl) -> Result<String, Error> {
        Ok(match self {
            OutputFormat::Text => format!("Access URL: {access_url}"),
            OutputFormat::Env => format!("{}={access_url}", Self::ENV_KEY),
            OutputFormat::Json => serde_json::to_string(&ClaimResponse::new(access_url))?,
        })
    }
}
