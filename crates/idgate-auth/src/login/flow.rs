use idgate_core::{ApiError, Client, Endpoints, RequestDescriptor, HEADER_REFERER};
use idgate_forms::{
    csrf_headers, extract_fragment, extract_inputs, extract_meta, form_pairs, inject, redirect_url,
};
use idgate_otp::Totp;
use serde::Deserialize;

use crate::{
    error::LoginError,
    login::{
        EmailChallenge, EMAIL_OTP_FORM_SELECTOR, IDENTIFIER_REGION_SELECTOR, LOGIN_FORM_SELECTOR,
        PAGE_TOKEN_FIELD, PAGE_TOKEN_HEADER, TOTP_FORM_SELECTOR,
    },
    models::Account,
    pages,
};

/// Where a login attempt currently stands. Owned exclusively by
/// [`LoginFlow`]; advances only after the prior response validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing submitted yet.
    Start,
    /// The username check accepted the identifier.
    UsernameEntered,
    /// The password submission was acknowledged with a redirect.
    PasswordEntered,
    /// The method-selection page validated.
    MethodSelected,
    /// The email one-time password was dispatched.
    EmailChallengeIssued,
    /// The TOTP submission was acknowledged with a redirect.
    TotpChallengeIssued,
    /// The waiting page validated.
    Waiting,
    /// The resource-list page validated; the session is established.
    ResourceListReached,
}

/// Response of the username check.
#[derive(Deserialize)]
struct UsernameCheck {
    password: bool,
    identifier: String,
}

/// One login attempt against the portal.
///
/// Strictly sequential: each operation performs at most a handful of round
/// trips and every response is validated before the next request goes out.
/// Any validation failure is terminal for the attempt — create a fresh flow
/// to retry.
#[derive(Debug)]
pub struct LoginFlow {
    client: Client,
    account: Account,
    state: SessionState,
    username_page: Option<String>,
    method_page: Option<String>,
}

impl LoginFlow {
    pub(crate) fn new(client: Client, account: Account) -> Self {
        Self {
            client,
            account,
            state: SessionState::Start,
            username_page: None,
            method_page: None,
        }
    }

    /// The current state of the attempt.
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn endpoints(&self) -> &Endpoints {
        self.client.internal.get_endpoints()
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: SessionState,
    ) -> Result<(), LoginError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LoginError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn username_page_ref(&self, operation: &'static str) -> Result<&str, LoginError> {
        self.username_page
            .as_deref()
            .ok_or(LoginError::InvalidState {
                operation,
                state: self.state,
            })
    }

    fn method_page_ref(&self, operation: &'static str) -> Result<&str, LoginError> {
        self.method_page.as_deref().ok_or(LoginError::InvalidState {
            operation,
            state: self.state,
        })
    }

    /// Fetches the login page and validates the username step.
    ///
    /// If the first page already shows the resource-list marker the session
    /// is authenticated: the attempt aborts with
    /// [`LoginError::AlreadyLoggedIn`] before any further network step, and
    /// the state remains [`SessionState::Start`].
    pub async fn begin(&mut self) -> Result<(), LoginError> {
        self.expect_state("begin", SessionState::Start)?;

        let request = RequestDescriptor::get(self.endpoints().login_page());
        let body = self.client.internal.send(request).await?;

        if pages::already_authenticated(&body)? {
            log::info!("session already authenticated, aborting the attempt");
            return Err(LoginError::AlreadyLoggedIn);
        }
        if !pages::is_username_page(&body)? {
            return Err(LoginError::InvalidUsernamePage);
        }

        log::debug!("username page validated");
        self.username_page = Some(body);
        Ok(())
    }

    /// Submits the username and checks the portal's answer.
    ///
    /// The identifier region of the stored login page provides the form; the
    /// JSON response must confirm the identifier and that a password step
    /// follows.
    pub async fn submit_username(&mut self) -> Result<(), LoginError> {
        self.expect_state("submit_username", SessionState::Start)?;
        let page = self.username_page_ref("submit_username")?;

        let metas = extract_meta(page)?;
        let region = extract_fragment(page, IDENTIFIER_REGION_SELECTOR)?;
        let fields = inject(&extract_inputs(&region)?, &self.account.username, "");

        let request = RequestDescriptor::post(self.endpoints().identify())
            .headers(csrf_headers(&metas, PAGE_TOKEN_FIELD, PAGE_TOKEN_HEADER))
            .form(form_pairs(&fields));
        let body = self.client.internal.send(request).await?;

        let check: UsernameCheck = serde_json::from_str(&body).map_err(ApiError::from)?;
        if !check.password || check.identifier != self.account.username {
            log::warn!("username check rejected the identifier");
            return Err(LoginError::InvalidUsernamePage);
        }

        log::debug!("username accepted");
        self.state = SessionState::UsernameEntered;
        Ok(())
    }

    async fn send_password_submission(
        &self,
        operation: &'static str,
    ) -> Result<String, LoginError> {
        // The login form region comes from the original username page, not
        // from the username-check JSON response.
        let page = self.username_page_ref(operation)?;

        let metas = extract_meta(page)?;
        let region = extract_fragment(page, LOGIN_FORM_SELECTOR)?;
        let fields = inject(
            &extract_inputs(&region)?,
            &self.account.username,
            &self.account.password,
        );

        let request = RequestDescriptor::post(self.endpoints().password())
            .headers(csrf_headers(&metas, PAGE_TOKEN_FIELD, PAGE_TOKEN_HEADER))
            .form(form_pairs(&fields));
        Ok(self.client.internal.send(request).await?)
    }

    /// Submits the password, then loads and validates the method-selection
    /// page.
    pub async fn submit_password(&mut self) -> Result<(), LoginError> {
        self.expect_state("submit_password", SessionState::UsernameEntered)?;

        let body = self.send_password_submission("submit_password").await?;
        if !pages::is_redirect_response(&body) {
            log::warn!("password submission was not acknowledged");
            return Err(LoginError::InvalidPasswordPage);
        }
        self.state = SessionState::PasswordEntered;

        let request = RequestDescriptor::get(self.endpoints().method_selection());
        let method_page = self.client.internal.send(request).await?;
        if !pages::is_method_selection_page(&method_page)? {
            return Err(LoginError::InvalidMethodSelectionPage);
        }

        log::debug!("method-selection page validated");
        self.method_page = Some(method_page);
        self.state = SessionState::MethodSelected;
        Ok(())
    }

    /// Runs the flow up to the password submission and returns the boolean
    /// outcome of its validation instead of raising.
    ///
    /// For testing a username/password pair without continuing the
    /// multi-factor chain. The attempt ends here either way.
    pub async fn probe_credentials(&mut self) -> Result<bool, LoginError> {
        self.begin().await?;
        self.submit_username().await?;

        let body = self.send_password_submission("probe_credentials").await?;
        Ok(pages::is_redirect_response(&body))
    }

    /// Second-factor branch (a): asks the portal to email a one-time
    /// password.
    ///
    /// Returns the extracted OTP form and page tokens; pass them back to
    /// [`LoginFlow::submit_email_otp`] once the user has the digits.
    pub async fn request_email_otp(&mut self) -> Result<EmailChallenge, LoginError> {
        self.expect_state("request_email_otp", SessionState::MethodSelected)?;
        let page = self.method_page_ref("request_email_otp")?;

        let metas = extract_meta(page)?;
        let request = RequestDescriptor::post(self.endpoints().email_dispatch())
            .headers(csrf_headers(&metas, PAGE_TOKEN_FIELD, PAGE_TOKEN_HEADER));
        let body = self.client.internal.send(request).await?;

        if !pages::is_email_dispatch_success(&body) {
            log::warn!("email dispatch did not report success");
            return Err(LoginError::InvalidEmailSending);
        }

        let region = extract_fragment(page, EMAIL_OTP_FORM_SELECTOR)?;
        let fields = extract_inputs(&region)?;

        log::info!("email one-time password dispatched");
        self.state = SessionState::EmailChallengeIssued;
        Ok(EmailChallenge {
            fields,
            tokens: metas,
        })
    }

    /// Second-factor branch (c): completes the email challenge with the
    /// user-entered digits, then follows the redirect chain to the resource
    /// list.
    pub async fn submit_email_otp(
        &mut self,
        challenge: EmailChallenge,
        otp: &str,
    ) -> Result<String, LoginError> {
        self.expect_state("submit_email_otp", SessionState::EmailChallengeIssued)?;

        let fields = inject(&challenge.fields, otp, "");
        let request = RequestDescriptor::post(self.endpoints().email_verify())
            .headers(csrf_headers(
                &challenge.tokens,
                PAGE_TOKEN_FIELD,
                PAGE_TOKEN_HEADER,
            ))
            .form(form_pairs(&fields));
        let body = self.client.internal.send(request).await?;

        if !pages::is_redirect_response(&body) {
            log::warn!("email one-time password was not accepted");
            return Err(LoginError::InvalidEmailOtpPage);
        }

        self.finish_via_redirect(&body).await
    }

    /// Second-factor branch (b): computes a TOTP code from the account's
    /// shared secret, submits it and follows the redirect chain to the
    /// resource list.
    pub async fn submit_totp(&mut self) -> Result<String, LoginError> {
        self.expect_state("submit_totp", SessionState::MethodSelected)?;
        let page = self.method_page_ref("submit_totp")?;

        let metas = extract_meta(page)?;
        let region = extract_fragment(page, TOTP_FORM_SELECTOR)?;
        let fields = extract_inputs(&region)?;

        // Resolved before any submission round trip.
        let secret = self
            .account
            .totp_secret
            .as_deref()
            .ok_or(LoginError::MissingTotpSecret)?;
        let code = Totp::new(secret).generate_current()?;

        let fields = inject(&fields, &code, "");
        let request = RequestDescriptor::post(self.endpoints().totp())
            .headers(csrf_headers(&metas, PAGE_TOKEN_FIELD, PAGE_TOKEN_HEADER))
            .form(form_pairs(&fields));
        let body = self.client.internal.send(request).await?;

        if !pages::is_redirect_response(&body) {
            log::warn!("TOTP code was not accepted");
            return Err(LoginError::InvalidTotpPage);
        }
        self.state = SessionState::TotpChallengeIssued;

        self.finish_via_redirect(&body).await
    }

    /// Follows a validated submission response to the resource list: parse
    /// the redirect URL, validate the waiting page, replay its fields
    /// against the resource list with the waiting-page URL as referer.
    async fn finish_via_redirect(&mut self, script: &str) -> Result<String, LoginError> {
        let waiting_url = redirect_url(script)?;

        let waiting_page = self
            .client
            .internal
            .send(RequestDescriptor::get(waiting_url.as_str()))
            .await?;
        if !pages::is_waiting_page(&waiting_page)? {
            return Err(LoginError::InvalidWaitingPage);
        }
        self.state = SessionState::Waiting;

        let fields = extract_inputs(&waiting_page)?;
        let request = RequestDescriptor::post(self.endpoints().resource_list())
            .header(HEADER_REFERER, waiting_url.as_str())
            .form(form_pairs(&fields));
        let resources = self.client.internal.send(request).await?;

        if !pages::is_resource_list_page(&resources)? {
            return Err(LoginError::InvalidResourceListPage);
        }
        self.state = SessionState::ResourceListReached;

        log::info!("resource list reached, session established");
        Ok(resources)
    }
}
