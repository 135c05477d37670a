//! Extraction of typed descriptors from response bodies.
//!
//! The parse engine is browser-tolerant: any body yields a document tree, so
//! missing elements surface as empty results rather than errors. Extraction
//! happens eagerly into owned values; callers never hold a DOM reference.

use scraper::{Html, Selector};

use crate::{
    error::ParseError,
    field::{FieldKind, FormField, MetaToken, SelectGroup},
};

fn compile(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Extracts every input element of `body` in document order.
///
/// Missing `name`/`value` attributes default to the empty string; the kind
/// comes from the `type` attribute.
pub fn extract_inputs(body: &str) -> Result<Vec<FormField>, ParseError> {
    let document = Html::parse_document(body);
    let inputs = compile("input")?;

    Ok(document
        .select(&inputs)
        .map(|input| FormField {
            name: input.value().attr("name").unwrap_or_default().to_string(),
            kind: FieldKind::from_type_attr(input.value().attr("type")),
            value: input.value().attr("value").unwrap_or_default().to_string(),
        })
        .collect())
}

/// Extracts every meta element of `body` in document order.
pub fn extract_meta(body: &str) -> Result<Vec<MetaToken>, ParseError> {
    let document = Html::parse_document(body);
    let metas = compile("meta")?;

    Ok(document
        .select(&metas)
        .map(|meta| MetaToken {
            name: meta.value().attr("name").unwrap_or_default().to_string(),
            content: meta.value().attr("content").unwrap_or_default().to_string(),
        })
        .collect())
}

/// Extracts every select element with its ordered option values.
pub fn extract_select_groups(body: &str) -> Result<Vec<SelectGroup>, ParseError> {
    let document = Html::parse_document(body);
    let selects = compile("select")?;
    let options = compile("option")?;

    Ok(document
        .select(&selects)
        .map(|select| SelectGroup {
            name: select.value().attr("name").unwrap_or_default().to_string(),
            options: select
                .select(&options)
                .map(|option| option.value().attr("value").unwrap_or_default().to_string())
                .collect(),
        })
        .collect())
}

/// Returns the inner markup of the first element matching `selector`, or the
/// empty string when nothing matches.
pub fn extract_fragment(body: &str, selector: &str) -> Result<String, ParseError> {
    let document = Html::parse_document(body);
    let target = compile(selector)?;

    Ok(document
        .select(&target)
        .next()
        .map(|element| element.inner_html())
        .unwrap_or_default())
}
