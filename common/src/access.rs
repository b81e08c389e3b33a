use std::{error, fmt};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::impl_from_error;

/// Durable SimpleFIN access URL returned by a successful claim
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct AccessUrl(String);

impl AccessUrl {
    pub const REDACTED: &'static str = "***";

    /// Builds an access URL from a claim response body
    pub fn from_body(body: &str) -> Result<Self, AccessUrlError> {
        match body.trim() {
            "" => Err(AccessUrlError::Empty),
            trimmed => Ok(Self(trimmed.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the access URL into the base URL and basic auth pair used by API clients
    pub fn credentials(&self) -> Result<AccessCredentials, AccessUrlError> {
        let parsed = Url::parse(&self.0)?;

        if parsed.username().is_empty() {
            return Err(AccessUrlError::MissingUsername);
        }

        let host = parsed.host_str().ok_or(AccessUrlError::MissingHost)?;
        let port = parsed.port().map(|port| format!(":{port}")).unwrap_or_default();

        Ok(AccessCredentials {
            base_url: format!(
                "{}://{}{}{}",
                parsed.scheme(),
                host,
                port,
                parsed.path().trim_end_matches('/')
            ),
            username: parsed.username().to_owned(),
            password: parsed.password().unwrap_or_default().to_owned(),
        })
    }

    /// Access URL with the password masked, safe for logs
    pub fn redacted(&self) -> String {
        match Url::parse(&self.0) {
            Ok(mut parsed) if parsed.password().is_some() => {
                // Only fails for URLs that cannot carry credentials
                match parsed.set_password(Some(Self::REDACTED)) {
                    Ok(()) => parsed.into(),
                    Err(()) => Self::REDACTED.to_owned(),
                }
            }
            Ok(parsed) => parsed.into(),
            Err(_) => Self::REDACTED.to_owned(),
        }
    }
}

impl fmt::Display for AccessUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AccessUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessUrl").field(&self.redacted()).finish()
    }
}

/// Access URL split into its HTTP basic auth parts
#[derive(Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for AccessCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessCredentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &AccessUrl::REDACTED)
            .finish()
    }
}

#[derive(Debug)]
pub enum AccessUrlError {
    Empty,
    Parse(url::ParseError),
    MissingUsername,
    MissingHost,
}

impl_from_error!(url::ParseError, AccessUrlError::Parse, AccessUrlError);

impl fmt::Display for AccessUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("server returned an empty access URL"),
            Self::Parse(err) => write!(f, "access URL is not a valid URL: {err}"),
            Self::MissingUsername => f.write_str("access URL must contain a username"),
            Self::MissingHost => f.write_str("access URL must contain a host"),
        }
    }
}

impl error::Error for AccessUrlError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
