use anyhow::{Context, Result};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;
use url::Url;

#[derive(Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

/// Result of one identity-verification call.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifiedSession {
    pub valid: bool,
    #[serde(default)]
    pub subject_id: Option<String>,
}

impl VerifiedSession {
    /// No credential accompanied the request, or verification failed.
    #[must_use]
    pub const fn absent() -> Self {
        Self {
            valid: false,
            subject_id: None,
        }
    }
}

/// Client for the external identity-verification collaborator.
///
/// The credential itself is opaque here; whether it is cryptographically
/// sound or expired is entirely the collaborator's call.
#[derive(Debug, Clone)]
pub struct Verifier {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl Verifier {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: Url, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build verifier HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            timeout: request_timeout,
        })
    }

    /// Ask the identity provider whether the credential is valid.
    ///
    /// Fail closed: any transport error, timeout, non-success status or
    /// malformed body counts as an invalid session. Treating a verification
    /// error as authenticated would be a security regression, so no error
    /// ever propagates out of here.
    pub async fn verify(&self, token: &SecretString) -> VerifiedSession {
        match tokio::time::timeout(self.timeout, self.request(token)).await {
            Ok(Ok(session)) => session,
            Ok(Err(err)) => {
                warn!("identity verification failed: {err:#}");
                VerifiedSession::absent()
            }
            Err(_) => {
                warn!("identity verification timed out after {:?}", self.timeout);
                VerifiedSession::absent()
            }
        }
    }

    async fn request(&self, token: &SecretString) -> Result<VerifiedSession> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&VerifyRequest {
                token: token.expose_secret(),
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<VerifiedSession>().await?)
    }
}
