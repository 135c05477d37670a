#![doc = include_str!("../README.md")]

use thiserror::Error;

/// Errors an authenticator implementation may surface while producing an
/// attestation response.
#[allow(missing_docs)]
#[derive(Debug, Error)]
#[error("The authenticator failed to create a credential: {0}")]
pub struct Fido2Error(pub String);

/// The authenticator collaborator.
///
/// Given the relying-party challenge it either produces the attestation
/// response JSON or decides that no credential can be created on this
/// device (`Ok(None)`), which downstream is a branched outcome rather than
/// a failure.
#[async_trait::async_trait]
pub trait Fido2Authenticator: Send + Sync {
    /// Signs the challenge into an attestation response, or returns `None`
    /// when device-bound credential creation is not possible.
    async fn create_credential(
        &self,
        challenge: serde_json::Value,
    ) -> Result<Option<serde_json::Value>, Fido2Error>;
}

/// Outcome of asking the builder for a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialOutcome {
    /// The authenticator produced an attestation response.
    Created(serde_json::Value),
    /// No credential was produced — the capability is absent or declined.
    NoCredential,
}

/// Converts a relying-party challenge into a credential-creation response.
///
/// Holds an *optional* authenticator: builds constructed without one always
/// answer [`CredentialOutcome::NoCredential`], so callers branch on the
/// outcome instead of special-casing a missing capability.
pub struct CredentialBuilder<'a> {
    authenticator: Option<&'a dyn Fido2Authenticator>,
}

impl<'a> CredentialBuilder<'a> {
    /// Builder backed by a device authenticator.
    pub fn new(authenticator: &'a dyn Fido2Authenticator) -> Self {
        Self {
            authenticator: Some(authenticator),
        }
    }

    /// Builder for an environment without any authenticator capability.
    pub fn absent() -> Self {
        Self {
            authenticator: None,
        }
    }

    /// Runs the challenge through the authenticator, if any.
    pub async fn build(
        &self,
        challenge: serde_json::Value,
    ) -> Result<CredentialOutcome, Fido2Error> {
        let Some(authenticator) = self.authenticator else {
            log::debug!("no authenticator capability, skipping credential creation");
            return Ok(CredentialOutcome::NoCredential);
        };

        match authenticator.create_credential(challenge).await? {
            Some(response) => Ok(CredentialOutcome::Created(response)),
            None => Ok(CredentialOutcome::NoCredential),
        }
    }
}

/// Outcome of the full registration branch against the portal.
///
/// The branch has no marker-based validation gate; absence of a transport
/// error is the only success signal, so the result is structured instead of
/// boolean and callers must not assume the server kept the credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The final relay step was accepted at the transport level.
    Registered,
    /// No credential was produced, so the relay was never finished.
    NoCredential,
    /// The server answered the final relay step with an error status.
    ServerRejected,
}
