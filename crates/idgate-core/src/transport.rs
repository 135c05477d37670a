use std::sync::Arc;

use crate::{error::ApiError, ClientSettings};

/// Header name for the `Referer` header the resource-list fetch requires.
pub const HEADER_REFERER: &str = "Referer";

/// HTTP method of a [`RequestDescriptor`]. The portal flow only ever issues
/// page fetches and form/JSON submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch a page.
    Get,
    /// Submit a step.
    Post,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// No body (page fetches, the email dispatch).
    Empty,
    /// URL-encoded form fields, submitted in order.
    Form(Vec<(String, String)>),
    /// JSON payload (FIDO2 relay steps).
    Json(serde_json::Value),
}

/// Description of one portal round trip, handed to the [`PortalTransport`].
///
/// Carries everything the transport needs: method, one of the fixed endpoint
/// URLs, headers (including any anti-forgery header) and the body. Cookie and
/// session continuity are the transport's responsibility, not the caller's.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Additional headers, applied in order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl RequestDescriptor {
    /// Describes a page fetch.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Describes a step submission.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Appends a single header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a set of headers, preserving their order.
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets an URL-encoded form body from ordered fields.
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }
}

/// The HTTP transport collaborator.
///
/// One round trip per call: the orchestrator never issues the next request
/// before the previous response has been validated, so implementations can
/// assume strictly sequential use within an attempt.
#[async_trait::async_trait]
pub trait PortalTransport: Send + Sync {
    /// Performs the round trip and returns the response body.
    async fn send(&self, request: RequestDescriptor) -> Result<String, ApiError>;
}

/// Production transport backed by [`reqwest`] with an in-memory cookie jar,
/// so the portal's session cookies survive across the steps of an attempt.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the transport for the given settings.
    pub fn new(settings: &ClientSettings) -> Self {
        let http = reqwest::Client::builder()
            .cookie_provider(Arc::new(reqwest::cookie::Jar::default()))
            .user_agent(settings.user_agent.clone())
            .build()
            .expect("HTTP client build should not fail");

        Self { http }
    }
}

#[async_trait::async_trait]
impl PortalTransport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<String, ApiError> {
        log::debug!("{:?} {}", request.method, request.url);

        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Json(value) => builder.json(&value),
        };

        let response = builder.send().await?;
        let status = response.status();
        let message = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::ResponseContent { status, message });
        }

        Ok(message)
    }
}
