use std::{error, fmt, string::FromUtf8Error};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::impl_from_error;

/// One-time SimpleFIN setup token, a base64-encoded claim URL
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct SetupToken(String);

impl SetupToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the token into the claim URL it carries.
    ///
    /// Surrounding whitespace is ignored, everything else must be standard padded base64
    /// of a UTF-8 URL.
    pub fn claim_url(&self) -> Result<Url, TokenError> {
        let decoded = String::from_utf8(BASE64.decode(self.0.trim())?)?;

        Ok(Url::parse(decoded.trim())?)
    }
}

impl fmt::Debug for SetupToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetupToken({} chars)", self.0.len())
    }
}

impl From<String> for SetupToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for SetupToken {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

#[derive(Debug)]
pub enum TokenError {
    Base64(base64::DecodeError),
    Utf8(FromUtf8Error),
    Url(url::ParseError),
}

impl_from_error!(base64::DecodeError, TokenError::Base64, TokenError);
impl_from_error!(FromUtf8Error, TokenError::Utf8, TokenError);
impl_from_error!(url::ParseError, TokenError::Url, TokenError);

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64(err) => write!(f, "setup token is not valid base64: {err}"),
            Self::Utf8(err) => write!(f, "setup token does not decode to text: {err}"),
            Self::Url(err) => write!(f, "setup token does not decode to a URL: {err}"),
        }
    }
}

impl error::Error for TokenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Base64(err) => Some(err),
            Self::Utf8(err) => Some(err),
            Self::Url(err) => Some(err),
        }
    }
}
