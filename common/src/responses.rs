use serde::{Deserialize, Serialize};

use crate::access::AccessUrl;

#[derive(Deserialize, Serialize, Debug)]
pub struct ClaimResponse {
    pub access_url: AccessUrl,
}

impl ClaimResponse {
    pub fn new(access_url: AccessUrl) -> Self {
        Self { access_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_access_url_as_string() {
        let response = ClaimResponse::new(AccessUrl::from_body("https://u:p@h/s").unwrap());

        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"access_url":"https://u:p@h/s"}"#
        );
    }
}
