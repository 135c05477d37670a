//! Passkey (WebAuthn/FIDO2) registration against the portal.
//!
//! Runs post-login and independently of the login flow. This branch has no
//! marker-based validation gate — absence of a transport error is the only
//! success signal — so the result is the structured
//! [`RegistrationOutcome`] and callers must treat it as best-effort.

use idgate_core::{ApiError, Client, RequestDescriptor};
use idgate_fido::{
    CredentialBuilder, CredentialOutcome, Fido2Authenticator, Fido2Error, RegistrationOutcome,
};
use idgate_forms::{csrf_headers, extract_inputs, extract_meta, form_pairs, ParseError};
use thiserror::Error;

// The passkey branch carries its own anti-forgery pair, distinct from the
// standard page token.
const WEBAUTHN_TOKEN_FIELD: &str = "webauthn-csrf-token";
const WEBAUTHN_TOKEN_HEADER: &str = "X-WebAuthn-CSRF-Token";

/// Error type for passkey registration.
#[derive(Debug, Error)]
pub enum PasskeyRegistrationError {
    /// A settings or relay page could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The authenticator failed while signing the challenge.
    #[error(transparent)]
    Fido2(#[from] Fido2Error),
    /// A network round trip failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub(crate) async fn register_passkey(
    client: &Client,
    authenticator: Option<&dyn Fido2Authenticator>,
) -> Result<RegistrationOutcome, PasskeyRegistrationError> {
    let endpoints = client.internal.get_endpoints();

    let settings_page = client
        .internal
        .send(RequestDescriptor::get(endpoints.passkey_settings()))
        .await?;
    let metas = extract_meta(&settings_page)?;
    let fields = extract_inputs(&settings_page)?;
    let relay_headers = csrf_headers(&metas, WEBAUTHN_TOKEN_FIELD, WEBAUTHN_TOKEN_HEADER);

    client
        .internal
        .send(
            RequestDescriptor::post(endpoints.passkey_settings())
                .headers(relay_headers.clone())
                .form(form_pairs(&fields)),
        )
        .await?;

    let challenge_body = client
        .internal
        .send(RequestDescriptor::post(endpoints.passkey_relay()).headers(relay_headers.clone()))
        .await?;
    let challenge: serde_json::Value =
        serde_json::from_str(&challenge_body).map_err(ApiError::from)?;

    let builder = match authenticator {
        Some(authenticator) => CredentialBuilder::new(authenticator),
        None => CredentialBuilder::absent(),
    };
    let credential = match builder.build(challenge).await? {
        CredentialOutcome::Created(credential) => credential,
        CredentialOutcome::NoCredential => {
            log::info!("no credential produced, stopping passkey registration");
            return Ok(RegistrationOutcome::NoCredential);
        }
    };

    let finish = RequestDescriptor::post(endpoints.passkey_relay_verify())
        .headers(relay_headers)
        .json(credential);
    match client.internal.send(finish).await {
        Ok(_) => Ok(RegistrationOutcome::Registered),
        Err(ApiError::ResponseContent { status, .. }) => {
            log::warn!("portal rejected the passkey relay finish with status {status}");
            Ok(RegistrationOutcome::ServerRejected)
        }
        Err(e) => Err(e.into()),
    }
}
