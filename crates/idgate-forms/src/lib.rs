#![doc = include_str!("../README.md")]

mod csrf;
mod error;
mod extract;
mod field;
mod inject;
mod script;

pub use csrf::csrf_headers;
pub use error::ParseError;
pub use extract::{extract_fragment, extract_inputs, extract_meta, extract_select_groups};
pub use field::{form_pairs, FieldKind, FormField, MetaToken, SelectGroup};
pub use inject::inject;
pub use script::redirect_url;
