use idgate_core::Client;
use idgate_fido::{Fido2Authenticator, RegistrationOutcome};

use crate::{
    error::LoginError,
    login::{EmailChallenge, LoginFlow},
    models::Account,
    registration::{self, PasskeyRegistrationError},
};

/// Subclient containing the portal auth functionality.
///
/// One-shot helpers cover the common paths; [`AuthClient::login_flow`] hands
/// out the underlying state machine when a caller needs to drive the steps
/// itself.
#[derive(Clone)]
pub struct AuthClient {
    pub(crate) client: Client,
}

impl AuthClient {
    /// Constructs a new `AuthClient` with the given `Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a fresh login attempt for `account`.
    pub fn login_flow(&self, account: Account) -> LoginFlow {
        LoginFlow::new(self.client.clone(), account)
    }

    /// Full login using the TOTP second factor. Returns the resource-list
    /// body on success.
    pub async fn login_via_totp(&self, account: Account) -> Result<String, LoginError> {
        let mut flow = self.login_flow(account);
        flow.begin().await?;
        flow.submit_username().await?;
        flow.submit_password().await?;
        flow.submit_totp().await
    }

    /// Runs the flow up to dispatching the email one-time password.
    ///
    /// Returns the flow together with the challenge; once the user has the
    /// digits, finish with [`LoginFlow::submit_email_otp`] on the same flow.
    pub async fn request_email_otp(
        &self,
        account: Account,
    ) -> Result<(LoginFlow, EmailChallenge), LoginError> {
        let mut flow = self.login_flow(account);
        flow.begin().await?;
        flow.submit_username().await?;
        flow.submit_password().await?;
        let challenge = flow.request_email_otp().await?;
        Ok((flow, challenge))
    }

    /// Checks a username/password pair without continuing the multi-factor
    /// chain.
    pub async fn probe_credentials(&self, account: Account) -> Result<bool, LoginError> {
        self.login_flow(account).probe_credentials().await
    }

    /// Registers a passkey on an already-authenticated session. Best-effort;
    /// see [`RegistrationOutcome`].
    pub async fn register_passkey(
        &self,
        authenticator: Option<&dyn Fido2Authenticator>,
    ) -> Result<RegistrationOutcome, PasskeyRegistrationError> {
        registration::register_passkey(&self.client, authenticator).await
    }
}

/// Extension trait for `Client` to provide access to the `AuthClient`.
pub trait AuthClientExt {
    /// Creates a new `AuthClient` instance.
    fn auth(&self) -> AuthClient;
}

impl AuthClientExt for Client {
    fn auth(&self) -> AuthClient {
        AuthClient {
            client: self.clone(),
        }
    }
}
