use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These specify the targeted portal and how
/// the client identifies itself. They are optional and uneditable once the
/// client is initialized.
///
/// Defaults to
///
/// ```
/// # use idgate_core::ClientSettings;
/// let settings = ClientSettings {
///     base_url: "https://idp.example.ac.jp".to_string(),
///     user_agent: "idgate Rust-SDK".to_string(),
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// Base URL of the targeted identity portal. Defaults to `https://idp.example.ac.jp`
    pub base_url: String,
    /// The user_agent sent to the portal. Defaults to `idgate Rust-SDK`
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "https://idp.example.ac.jp".into(),
            user_agent: "idgate Rust-SDK".into(),
        }
    }
}
