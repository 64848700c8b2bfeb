//! Decision service HTTP client.
//!
//! # Responsibilities
//! - Submit request metadata plus a rule list to the decide endpoint
//! - Bound every call with a timeout
//! - Map transport failures, bad statuses and undecodable bodies to an
//!   errored verdict, never to a panic or a denial
//!
//! No retries and no failover: a failed call is reported once and the
//! caller fails open.

use std::time::Duration;

use url::Url;

use crate::config::schema::DecisionConfig;
use crate::decision::types::{
    DecideRequest, DecideResponse, Decision, DecisionError, RequestMeta, Verdict,
};
use crate::security::policy::PolicyBundle;

/// Client for the decision service decide endpoint.
#[derive(Debug, Clone)]
pub struct DecisionClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl DecisionClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be built.
    pub fn new(config: &DecisionConfig) -> Result<Self, DecisionError> {
        let base: Url = config.base_url.parse()?;
        let endpoint = base.join("v1/decide")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Evaluate a request under a policy bundle.
    ///
    /// Always returns a `Decision`; a failed call yields an errored verdict
    /// carrying the failure message.
    pub async fn protect(&self, meta: &RequestMeta, bundle: &PolicyBundle) -> Decision {
        let verdict = match self.decide(meta, bundle).await {
            Ok(verdict) => verdict,
            Err(error) => Verdict::Errored(error.to_string()),
        };

        Decision {
            verdict,
            source: meta.source,
        }
    }

    async fn decide(
        &self,
        meta: &RequestMeta,
        bundle: &PolicyBundle,
    ) -> Result<Verdict, DecisionError> {
        let body = DecideRequest::new(meta, bundle.rules());

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DecisionError::Status(status));
        }

        let decoded: DecideResponse = response.json().await?;
        Ok(decoded.into_verdict())
    }
}
