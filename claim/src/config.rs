use std::{str::FromStr, time::Duration};

use common::token::SetupToken;
use serde::{de, Deserialize, Deserializer};
use tracing::metadata::LevelFilter;
use tracing_subscriber::{filter::Directive, EnvFilter};
use url::Url;

use crate::error::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const ENV_PREFIX: &str = "SIMPLEFIN_";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub setup_token: Option<SetupToken>,
    /// Claim request timeout in seconds
    pub timeout: u64,
    /// Sent as both `Origin` and `Referer`
    pub origin: String,
    #[serde(deserialize_with = "Config::log_level_deserialize")]
    pub log_level: LevelFilter,
}

impl Config {
    pub const DEFAULT_LOG_FILTER: &[&'static str] = &["hyper=info", "reqwest=info"];
    pub const DEFAULT_TIMEOUT: u64 = 30;
    pub const MAX_TIMEOUT: u64 = 60 * 60;
    pub const DEFAULT_ORIGIN: &'static str = "http://localhost:5173";

    /// Reads `SIMPLEFIN_*` variables from the process environment
    pub fn from_env() -> Result<Self, Error> {
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    fn log_level_deserialize<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
    where
        D: Deserializer<'de>,
    {
        LevelFilter::from_str(&String::deserialize(deserializer)?).map_err(de::Error::custom)
    }

    pub fn log_filter(&self) -> Result<EnvFilter, Error> {
        let mut filter = EnvFilter::default().add_directive(self.log_level.into());

        for rule in Self::DEFAULT_LOG_FILTER {
            filter = filter.add_directive(rule.parse::<Directive>()?);
        }

        Ok(filter)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=Self::MAX_TIMEOUT).contains(&self.timeout) {
            return Err(Error::ConfigError(format!(
                "timeout must be between 1 and {} seconds, got {}",
                Self::MAX_TIMEOUT,
                self.timeout
            )));
        }

        if let Err(err) = Url::parse(&self.origin) {
            return Err(Error::ConfigError(format!(
                "origin '{}' is not a URL: {err}",
                self.origin
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            setup_token: None,
            timeout: Self::DEFAULT_TIMEOUT,
            origin: String::from(Self::DEFAULT_ORIGIN),
            #[cfg(debug_assertions)]
            log_level: LevelFilter::DEBUG,
            #[cfg(not(debug_assertions))]
            log_level: LevelFilter::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<Config, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_iter(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
    }

    #[test]
    fn defaults_without_environment() {
        let config = from_vars(&[]).unwrap();

        assert!(config.setup_token.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.origin, "http://localhost:5173");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = from_vars(&[
            ("SIMPLEFIN_SETUP_TOKEN", "aHR0cHM6Ly9leGFtcGxlLm9yZw=="),
            ("SIMPLEFIN_TIMEOUT", "5"),
            ("SIMPLEFIN_ORIGIN", "https://budget.example.org"),
            ("SIMPLEFIN_LOG_LEVEL", "warn"),
            ("UNRELATED", "ignored"),
        ])
        .unwrap();

        assert_eq!(
            config.setup_token,
            Some(SetupToken::from("aHR0cHM6Ly9leGFtcGxlLm9yZw=="))
        );
        assert_eq!(config.timeout, 5);
        assert_eq!(config.origin, "https://budget.example.org");
        assert_eq!(config.log_level, LevelFilter::WARN);
    }

    #[test]
    fn rejects_unknown_log_level() {
        assert!(from_vars(&[("SIMPLEFIN_LOG_LEVEL", "loud")]).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = Config {
            timeout: 0,
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn rejects_huge_timeout() {
        let config = Config {
            timeout: u64::MAX,
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
        assert!(Config {
            timeout: Config::MAX_TIMEOUT,
            ..Default::default()
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn rejects_bad_origin() {
        let config = Config {
            origin: String::from("localhost"),
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn builds_log_filter() {
        assert!(Config::default().log_filter().is_ok());
    }
}
