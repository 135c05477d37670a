#![doc = include_str!("../README.md")]

pub mod client;
mod endpoints;
mod error;
mod transport;

pub use client::{Client, ClientSettings};
pub use endpoints::Endpoints;
pub use error::ApiError;
pub use transport::{
    Method, PortalTransport, RequestBody, RequestDescriptor, ReqwestTransport, HEADER_REFERER,
};
