#![doc = include_str!("../README.md")]

mod auth_client;
mod error;
mod models;
mod registration;

pub mod login;
pub mod pages;

pub use auth_client::{AuthClient, AuthClientExt};
pub use error::LoginError;
pub use login::{EmailChallenge, LoginFlow, SessionState};
pub use models::Account;
pub use registration::PasskeyRegistrationError;
