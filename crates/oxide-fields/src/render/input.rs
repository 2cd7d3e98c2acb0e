//! Input and textarea builders.

use indexmap::IndexMap;

use super::{push_attributes, strip_tags};

/// Closes a void element, self-closing for XHTML.
fn close_void(html: &mut String, xhtml: bool) {
    html.push_str(if xhtml { " />" } else { ">" });
}

/// Builds an `<input>` of the given type.
///
/// `value` is the submitted value, if any; tags are stripped from it.
pub(super) fn input_box(
    name: &str,
    input_type: &str,
    attrs: &IndexMap<String, String>,
    value: Option<&str>,
    xhtml: bool,
) -> String {
    let mut html = format!(r#"<input type="{input_type}" name="{name}""#);
    push_attributes(&mut html, attrs);

    if let Some(value) = value {
        html.push_str(&format!(r#" value="{}""#, strip_tags(value)));
    }

    close_void(&mut html, xhtml);
    html
}

/// Builds a checkbox whose `value` is the comparison value.
pub(super) fn checkbox(
    name: &str,
    compare: &str,
    attrs: &IndexMap<String, String>,
    checked: bool,
    xhtml: bool,
) -> String {
    let mut html = format!(r#"<input type="checkbox" name="{name}" value="{compare}""#);
    push_attributes(&mut html, attrs);

    if checked {
        html.push_str(r#" checked="checked""#);
    }

    close_void(&mut html, xhtml);
    html
}

/// Builds a `<textarea>` holding the submitted value verbatim.
pub(super) fn textarea(name: &str, attrs: &IndexMap<String, String>, value: Option<&str>) -> String {
    let mut html = format!(r#"<textarea name="{name}""#);
    push_attributes(&mut html, attrs);
    html.push('>');
    html.push_str(value.unwrap_or_default());
    html.push_str("</textarea>");
    html
}
