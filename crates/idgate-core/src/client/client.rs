use std::sync::Arc;

use super::internal::InternalClient;
use crate::{
    endpoints::Endpoints,
    transport::{PortalTransport, ReqwestTransport},
    ClientSettings,
};

/// The main struct to interact with the idgate SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance, so subclients observe the same session. Any shared state
    // needs to live inside the [`InternalClient`] behind the Arc.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new portal client with the production HTTP transport.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        let settings = settings.unwrap_or_default();
        let transport = Arc::new(ReqwestTransport::new(&settings));
        Self::new_internal(settings, transport)
    }

    /// Create a new portal client over a caller-provided transport.
    ///
    /// The transport owns cookie/session continuity, so swapping it out also
    /// swaps the session the flow operates on.
    pub fn new_with_transport(
        settings: Option<ClientSettings>,
        transport: Arc<dyn PortalTransport>,
    ) -> Self {
        Self::new_internal(settings.unwrap_or_default(), transport)
    }

    fn new_internal(settings: ClientSettings, transport: Arc<dyn PortalTransport>) -> Self {
        let endpoints = Endpoints::new(&settings.base_url);

        Self {
            internal: Arc::new(InternalClient {
                settings,
                endpoints,
                transport,
            }),
        }
    }
}
