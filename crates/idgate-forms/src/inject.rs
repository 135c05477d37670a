//! Credential injection into extracted form fields.

use crate::field::{FieldKind, FormField};

/// Returns a copy of `fields` with the first text-kind field's value replaced
/// by `text_value` and the first password-kind field's value replaced by
/// `password_value`.
///
/// Length and order are preserved; every other field is untouched. A form
/// with no field of one kind simply leaves that slot unfilled — the portal
/// decides later whether that was acceptable.
///
/// The same function carries every submission of the flow: username,
/// password, email one-time password and TOTP (OTP digits occupy the text
/// slot).
pub fn inject(fields: &[FormField], text_value: &str, password_value: &str) -> Vec<FormField> {
    let mut text_filled = false;
    let mut password_filled = false;

    fields
        .iter()
        .map(|field| {
            let mut field = field.clone();
            match field.kind {
                FieldKind::Text if !text_filled => {
                    field.value = text_value.to_string();
                    text_filled = true;
                }
                FieldKind::Password if !password_filled => {
                    field.value = password_value.to_string();
                    password_filled = true;
                }
                _ => {}
            }
            field
        })
        .collect()
}
