use std::{fmt, sync::Arc};

use crate::{
    endpoints::Endpoints, error::ApiError, transport::PortalTransport, ClientSettings,
    RequestDescriptor,
};

/// Mutable-free interior of a [`Client`](crate::Client); shared behind an
/// `Arc` so subclients can clone the handle cheaply.
pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    pub(crate) endpoints: Endpoints,
    pub(crate) transport: Arc<dyn PortalTransport>,
}

impl InternalClient {
    /// The settings the client was created with.
    pub fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The portal's fixed endpoint set.
    pub fn get_endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Performs one round trip through the configured transport.
    pub async fn send(&self, request: RequestDescriptor) -> Result<String, ApiError> {
        self.transport.send(request).await
    }
}

impl fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InternalClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
