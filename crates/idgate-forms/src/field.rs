/// Kind of a form input, derived from its `type` attribute.
///
/// The flow only ever distinguishes the text slot (username, OTP digits) and
/// the password slot; everything else rides along untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `type="text"`
    Text,
    /// `type="password"`
    Password,
    /// Any other (or missing) `type` attribute.
    Other,
}

impl FieldKind {
    pub(crate) fn from_type_attr(value: Option<&str>) -> Self {
        match value {
            Some("text") => FieldKind::Text,
            Some("password") => FieldKind::Password,
            _ => FieldKind::Other,
        }
    }
}

/// One form input, as extracted from a page. Equality is by
/// (name, kind, value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// The `name` attribute, empty when absent.
    pub name: String,
    /// Input kind.
    pub kind: FieldKind,
    /// The `value` attribute, empty when absent.
    pub value: String,
}

impl FormField {
    /// Convenience constructor, mainly for tests and fixtures.
    pub fn new(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
        }
    }
}

/// Flattens fields into the ordered `(name, value)` pairs a form submission
/// carries.
pub fn form_pairs(fields: &[FormField]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.value.clone()))
        .collect()
}

/// One meta tag, the carrier of the portal's anti-forgery tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaToken {
    /// The `name` attribute, empty when absent.
    pub name: String,
    /// The `content` attribute, empty when absent.
    pub content: String,
}

/// A select element and its ordered option values. Read-only; no step of the
/// described flow submits one, but pages carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectGroup {
    /// The `name` attribute, empty when absent.
    pub name: String,
    /// The `value` of each option, in document order.
    pub options: Vec<String>,
}
