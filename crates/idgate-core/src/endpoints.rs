//! The fixed endpoint set of the portal.
//!
//! Every URL the login flow touches is derived from the configured base URL;
//! the one exception is the waiting-page URL, which the portal hands back
//! inside a redirect script and is therefore dynamic.

/// Resolves the portal's fixed endpoints against a base URL.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Creates the endpoint set for `base_url`. A trailing slash is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The login page carrying the username form.
    pub fn login_page(&self) -> String {
        format!("{}/portal/login", self.base)
    }

    /// Username check, answered with JSON.
    pub fn identify(&self) -> String {
        format!("{}/portal/login/identify", self.base)
    }

    /// Password submission, answered with a redirect script.
    pub fn password(&self) -> String {
        format!("{}/portal/login/password", self.base)
    }

    /// Second-factor method selection page.
    pub fn method_selection(&self) -> String {
        format!("{}/portal/login/mfa", self.base)
    }

    /// Email one-time-password dispatch.
    pub fn email_dispatch(&self) -> String {
        format!("{}/portal/login/mfa/email", self.base)
    }

    /// Email one-time-password submission.
    pub fn email_verify(&self) -> String {
        format!("{}/portal/login/mfa/email/verify", self.base)
    }

    /// TOTP submission.
    pub fn totp(&self) -> String {
        format!("{}/portal/login/mfa/totp", self.base)
    }

    /// The resource-list page that marks a fully established session.
    pub fn resource_list(&self) -> String {
        format!("{}/portal/resources", self.base)
    }

    /// Passkey settings page.
    pub fn passkey_settings(&self) -> String {
        format!("{}/portal/settings/passkey", self.base)
    }

    /// First relay step, answered with the relying-party challenge.
    pub fn passkey_relay(&self) -> String {
        format!("{}/portal/settings/passkey/relay", self.base)
    }

    /// Final relay step, taking the attestation response.
    pub fn passkey_relay_verify(&self) -> String {
        format!("{}/portal/settings/passkey/relay/verify", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_ignored() {
        let endpoints = Endpoints::new("https://idp.example.ac.jp/");
        assert_eq!(
            endpoints.login_page(),
            "https://idp.example.ac.jp/portal/login"
        );
    }

    #[test]
    fn test_endpoints_share_the_base() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080");
        assert_eq!(endpoints.identify(), "http://127.0.0.1:8080/portal/login/identify");
        assert_eq!(endpoints.totp(), "http://127.0.0.1:8080/portal/login/mfa/totp");
        assert_eq!(
            endpoints.passkey_relay_verify(),
            "http://127.0.0.1:8080/portal/settings/passkey/relay/verify"
        );
    }
}
