use common::{access::AccessUrl, token::SetupToken};
use reqwest::{
    blocking::Client,
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH, ORIGIN, REFERER},
};
use tracing::{debug, info, warn};

use crate::{config::Config, error::Error};

const SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");
const SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
const SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");

/// Trades setup tokens for access URLs, one POST per claim
#[derive(Debug)]
pub struct ClaimExchanger {
    client: Client,
    headers: HeaderMap,
}

impl ClaimExchanger {
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            headers: Self::claim_headers(&config.origin)?,
        })
    }

    /// Headers the bridge expects from a browser-initiated claim
    fn claim_headers(origin: &str) -> Result<HeaderMap, Error> {
        let origin = HeaderValue::from_str(origin).map_err(|err| {
            Error::ConfigError(format!("origin '{origin}' is not a header value: {err}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        headers.insert(ORIGIN, origin.clone());
        headers.insert(REFERER, origin);
        headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("empty"));
        headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("no-cors"));
        headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("cross-site"));

        Ok(headers)
    }

    /// Claims the access URL behind `token`.
    ///
    /// The token is decoded before anything touches the network. Claims are not idempotent,
    /// so no failure is retried.
    pub fn claim(&self, token: &SetupToken) -> Result<AccessUrl, Error> {
        let claim_url = token.claim_url()?;

        info!(
            host = claim_url.host_str().unwrap_or_default(),
            "Claiming access URL"
        );

        let response = self
            .client
            .post(claim_url)
            .headers(self.headers.clone())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Claim rejected");

            match response.text() {
                Ok(body) => debug!(body = body.trim(), "Rejected claim response"),
                Err(err) => debug!(%err, "Failed to read rejected claim response"),
            }

            return Err(Error::HttpStatusError(status));
        }

        let access_url = AccessUrl::from_body(&response.text()?)?;
        info!(access_url = %access_url.redacted(), "Access URL claimed");

        Ok(access_url)
    }
}

/// Claims with default settings
pub fn claim_access_url(token: &str) -> Result<AccessUrl, Error> {
    ClaimExchanger::new(&Config::default())?.claim(&SetupToken::from(token))
}
