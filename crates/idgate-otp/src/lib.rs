#![doc = include_str!("../README.md")]

mod totp;

pub use totp::{Totp, TotpError, DEFAULT_DIGITS, DEFAULT_PERIOD};
