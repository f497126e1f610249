use std::time::Duration;

use anyhow::{bail, Context, Result};

use super::protocol::{ENDPOINT_NEW_TOKEN, ENDPOINT_REGISTER};
use crate::registry::types::{NodeInfo, Register};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client side of the discovery service, used during node bootstrap.
///
/// Both operations carry a bounded request timeout; failures are returned to
/// the caller, which treats them as fatal to startup.
pub struct DiscoveryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DiscoveryClient {
    /// `base_url` is the discovery prefix, e.g. `http://localhost:8000/discover`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Asks the discovery service for a fresh group token.
    pub async fn new_token(&self) -> Result<String> {
        let url = format!("{}{}", self.base_url, ENDPOINT_NEW_TOKEN);

        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("requesting new group token from {}", url))?;

        if !response.status().is_success() {
            bail!("token request failed: {}", response.status());
        }

        let token = response
            .text()
            .await
            .context("reading group token response")?;

        tracing::info!("Obtained discovery token {}", token);

        Ok(token)
    }

    /// Registers the node's identity into the group and returns the current
    /// register as the initial cluster view.
    pub async fn register(&self, token: &str, identity: &NodeInfo) -> Result<Register> {
        let url = format!("{}/{}{}", self.base_url, token, ENDPOINT_REGISTER);

        let response = self
            .http
            .post(&url)
            .json(identity)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("registering node at {}", url))?;

        if !response.status().is_success() {
            bail!("registration failed: {}", response.status());
        }

        let body = response
            .bytes()
            .await
            .context("reading registration response")?;

        let register = Register::from_bytes(&body).context("parsing cluster register")?;

        tracing::info!(
            "Registered {} in group {} ({} member(s))",
            identity.address(),
            token,
            register.nodes.len()
        );

        Ok(register)
    }
}
