use chrono::{DateTime, Utc};
use data_encoding::BASE32_NOPAD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;

type HmacSha1 = Hmac<Sha1>;

/// Default time-step, per RFC 6238.
pub const DEFAULT_PERIOD: u32 = 30;
/// Default code length.
pub const DEFAULT_DIGITS: u32 = 6;

/// Errors from computing a one-time code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotpError {
    /// The shared secret is not valid base32.
    #[error("The TOTP shared secret is not valid base32")]
    InvalidSecret,
}

/// A TOTP generator over a base32 shared secret.
///
/// Codes are deterministic for a fixed secret and time window:
/// `generate` takes the evaluation time explicitly, `generate_current`
/// reads the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totp {
    secret: String,
    period: u32,
    digits: u32,
}

impl Totp {
    /// Creates a generator with the portal's parameters (30s window, 6
    /// digits).
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_parameters(secret, DEFAULT_PERIOD, DEFAULT_DIGITS)
    }

    /// Creates a generator with explicit parameters. `period` must be
    /// non-zero.
    pub fn with_parameters(secret: impl Into<String>, period: u32, digits: u32) -> Self {
        debug_assert!(period > 0, "TOTP period must be non-zero");
        Self {
            secret: secret.into(),
            period,
            digits,
        }
    }

    /// Computes the code for the current time window.
    pub fn generate_current(&self) -> Result<String, TotpError> {
        self.generate(Utc::now())
    }

    /// Computes the code for the window containing `time`.
    ///
    /// HMAC-SHA1 over the big-endian window counter with RFC 4226 dynamic
    /// truncation, reduced modulo `10^digits` and zero-padded.
    pub fn generate(&self, time: DateTime<Utc>) -> Result<String, TotpError> {
        let key = decode_secret(&self.secret)?;
        let counter = time.timestamp() as u64 / u64::from(self.period);

        let mut mac =
            HmacSha1::new_from_slice(&key).expect("HMAC can take a key of any size");
        mac.update(&counter.to_be_bytes());
        let digest = mac.finalize().into_bytes();

        let offset = usize::from(digest[digest.len() - 1] & 0xf);
        let binary = (u32::from(digest[offset] & 0x7f) << 24)
            | (u32::from(digest[offset + 1]) << 16)
            | (u32::from(digest[offset + 2]) << 8)
            | u32::from(digest[offset + 3]);

        let code = binary % 10u32.pow(self.digits);
        Ok(format!("{code:0width$}", width = self.digits as usize))
    }
}

/// Decodes the shared secret, tolerating the padding, spacing and casing
/// variations issuers put into provisioning strings.
fn decode_secret(secret: &str) -> Result<Vec<u8>, TotpError> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .collect::<String>()
        .to_uppercase();

    if normalized.is_empty() {
        return Err(TotpError::InvalidSecret);
    }

    BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map_err(|_| TotpError::InvalidSecret)
}
