use std::fmt;

/// A portal account. Caller-supplied, immutable, never persisted.
///
/// The `Debug` impl redacts the password and the TOTP secret so accounts can
/// appear in logs without leaking credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Portal username.
    pub username: String,
    /// Portal password.
    pub password: String,
    /// Base32 TOTP shared secret, when the account has the TOTP factor
    /// enrolled.
    pub totp_secret: Option<String>,
}

impl Account {
    /// Account without a TOTP factor.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            totp_secret: None,
        }
    }

    /// Account with a TOTP shared secret.
    pub fn with_totp_secret(
        username: impl Into<String>,
        password: impl Into<String>,
        totp_secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            totp_secret: Some(totp_secret.into()),
        }
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field(
                "totp_secret",
                &self.totp_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
