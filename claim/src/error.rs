use std::{error, fmt, io};

use common::{access::AccessUrlError, token::TokenError};
use reqwest::StatusCode;

macro_rules! impl_from_error {
    ($from: ty, $to: expr) => {
        impl From<$from> for Error {
            fn from(err: $from) -> Self {
                $to(err)
            }
        }
    };
}

#[derive(Debug)]
pub enum Error {
    ConfigError(String),
    EnvyError(envy::Error),
    DotenvError(dotenvy::Error),
    FilterError(tracing_subscriber::filter::ParseError),
    IOError(io::Error),
    JsonError(serde_json::Error),
    /// Setup token could not be decoded into a claim URL
    TokenError(TokenError),
    /// Claim succeeded but the body was not usable
    AccessUrlError(AccessUrlError),
    /// Server answered with a non-success status
    HttpStatusError(StatusCode),
    TimeoutError(reqwest::Error),
    ConnectionError(reqwest::Error),
    RequestError(reqwest::Error),
}

impl_from_error!(envy::Error, Error::EnvyError);
impl_from_error!(dotenvy::Error, Error::DotenvError);
impl_from_error!(tracing_subscriber::filter::ParseError, Error::FilterError);
impl_from_error!(io::Error, Error::IOError);
impl_from_error!(serde_json::Error, Error::JsonError);
impl_from_error!(TokenError, Error::TokenError);
impl_from_error!(AccessUrlError, Error::AccessUrlError);

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::TimeoutError(err)
        } else if err.is_connect() {
            Error::ConnectionError(err)
        } else if let Some(status) = err.status() {
            Error::HttpStatusError(status)
        } else {
            Error::RequestError(err)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigError(msg) => write!(f, "invalid configuration: {msg}"),
            Error::EnvyError(err) => write!(f, "failed to read environment: {err}"),
            Error::DotenvError(err) => write!(f, "failed to load .env file: {err}"),
            Error::FilterError(err) => write!(f, "invalid log filter: {err}"),
            Error::IOError(err) => write!(f, "{err}"),
            Error::JsonError(err) => write!(f, "failed to serialize output: {err}"),
            Error::TokenError(err) => write!(f, "{err}"),
            Error::AccessUrlError(err) => write!(f, "{err}"),
            Error::HttpStatusError(status) => {
                write!(f, "claim rejected by server: {status}")?;

                if matches!(*status, StatusCode::FORBIDDEN | StatusCode::GONE) {
                    f.write_str(" (the setup token may have been claimed already)")?;
                }

                Ok(())
            }
            Error::TimeoutError(err) => write!(f, "claim request timed out: {err}"),
            Error::ConnectionError(err) => write!(f, "failed to reach claim server: {err}"),
            Error::RequestError(err) => write!(f, "claim request failed: {err}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::ConfigError(_) | Error::HttpStatusError(_) => None,
            Error::EnvyError(err) => Some(err),
            Error::DotenvError(err) => Some(err),
            Error::FilterError(err) => Some(err),
            Error::IOError(err) => Some(err),
            Error::JsonError(err) => Some(err),
            Error::TokenError(err) => Some(err),
            Error::AccessUrlError(err) => Some(err),
            Error::TimeoutError(err) | Error::ConnectionError(err) | Error::RequestError(err) => {
                Some(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_at_claimed_token() {
        let gone = Error::HttpStatusError(StatusCode::GONE).to_string();
        let teapot = Error::HttpStatusError(StatusCode::IM_A_TEAPOT).to_string();

        assert!(gone.starts_with("claim rejected by server: 410 Gone"));
        assert!(gone.contains("claimed already"));
        assert!(!teapot.contains("claimed already"));
    }

    #[test]
    fn wraps_token_errors() {
        let err: Error = common::token::SetupToken::from("!!!")
            .claim_url()
            .unwrap_err()
            .into();

        assert!(matches!(err, Error::TokenError(TokenError::Base64(_))));
        assert!(error::Error::source(&err).is_some());
    }
}
