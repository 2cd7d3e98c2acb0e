//! Rendering of schema fields into HTML markup.
//!
//! Every builder writes the opening tag, then the schema attributes in
//! insertion order, then its own content, then the closing tag. Attribute
//! values and textarea content are written as given; escaping untrusted
//! input is the caller's job.

mod input;
mod select;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::schema::{FieldSchemaEntry, FieldType, OptionValues, Schema};
use crate::value::Values;

/// Comparison value used by checkboxes that do not declare one.
pub const DEFAULT_CHECKBOX_VALUE: &str = "Y";

/// The markup produced for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderedElement {
    /// A single fragment.
    Markup(String),
    /// Named fragments of a composite field, in display order.
    Composite(IndexMap<String, String>),
}

impl RenderedElement {
    /// Returns the markup of a single-fragment element.
    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Self::Markup(html) => Some(html),
            Self::Composite(_) => None,
        }
    }

    /// Returns a named fragment of a composite element.
    pub fn part(&self, name: &str) -> Option<&str> {
        match self {
            Self::Composite(parts) => parts.get(name).map(String::as_str),
            Self::Markup(_) => None,
        }
    }

    /// Returns the fragments of a composite element.
    pub fn parts(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Composite(parts) => Some(parts),
            Self::Markup(_) => None,
        }
    }

    /// Returns whether no markup was produced.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Markup(html) => html.is_empty(),
            Self::Composite(parts) => parts.values().all(String::is_empty),
        }
    }
}

impl Default for RenderedElement {
    fn default() -> Self {
        Self::Markup(String::new())
    }
}

impl From<String> for RenderedElement {
    fn from(html: String) -> Self {
        Self::Markup(html)
    }
}

impl std::fmt::Display for RenderedElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markup(html) => f.write_str(html),
            Self::Composite(parts) => parts.values().try_for_each(|html| f.write_str(html)),
        }
    }
}

/// Renders schema fields, pre-filled from submitted values.
///
/// # Example
///
/// ```rust
/// use oxide_fields::{FieldRenderer, FieldSchemaEntry, Schema, Values};
///
/// let schema = Schema::new().field("name", FieldSchemaEntry::text().attr("id", "name"));
/// let values = Values::new().with("name", "Ada");
///
/// let mut renderer = FieldRenderer::new(&schema, &values);
/// renderer.render();
///
/// assert_eq!(
///     renderer.get_element("name").and_then(|e| e.as_markup()),
///     Some(r#"<input type="text" name="name" id="name" value="Ada">"#),
/// );
/// ```
#[derive(Debug)]
pub struct FieldRenderer<'a, C: Clock = SystemClock> {
    schema: &'a Schema,
    values: &'a Values,
    clock: C,
    elements: IndexMap<String, RenderedElement>,
}

impl<'a> FieldRenderer<'a> {
    /// Creates a renderer using the system date.
    pub fn new(schema: &'a Schema, values: &'a Values) -> Self {
        Self {
            schema,
            values,
            clock: SystemClock,
            elements: IndexMap::new(),
        }
    }
}

impl<'a, C: Clock> FieldRenderer<'a, C> {
    /// Replaces the clock used by date-dependent fields.
    #[must_use]
    pub fn with_clock<D: Clock>(self, clock: D) -> FieldRenderer<'a, D> {
        FieldRenderer {
            schema: self.schema,
            values: self.values,
            clock,
            elements: self.elements,
        }
    }

    /// Renders every typed field of the schema.
    ///
    /// Entries without a type, or with a type that has no builder, produce
    /// no element. The results replace those of any previous call.
    pub fn render(&mut self) -> &IndexMap<String, RenderedElement> {
        let schema = self.schema;
        self.elements.clear();
        for (name, entry) in schema.iter() {
            let Some(tag) = entry.field_type.as_deref() else {
                continue;
            };
            match FieldType::from_tag(tag) {
                Some(kind) => {
                    let element = self.build(kind, name, entry);
                    self.elements.insert(name.to_string(), element);
                }
                None => debug!(field = name, field_type = tag, "skipping unknown field type"),
            }
        }
        &self.elements
    }

    /// Returns an element from the last render.
    pub fn get_element(&self, name: &str) -> Option<&RenderedElement> {
        self.elements.get(name)
    }

    /// Returns every element from the last render.
    pub fn elements(&self) -> &IndexMap<String, RenderedElement> {
        &self.elements
    }

    /// Renders one field without touching the stored results.
    ///
    /// An entry with a missing or unknown type renders as empty markup.
    pub fn build_single(&self, name: &str, entry: &FieldSchemaEntry) -> RenderedElement {
        match entry.kind() {
            Some(kind) => self.build(kind, name, entry),
            None => RenderedElement::default(),
        }
    }

    fn build(&self, kind: FieldType, name: &str, entry: &FieldSchemaEntry) -> RenderedElement {
        debug!(field = name, field_type = %kind, "rendering field");
        let attrs = &entry.attributes;
        let xhtml = entry.xhtml;

        match kind {
            FieldType::Text => {
                input::input_box(name, "text", attrs, self.values.get_text(name), xhtml).into()
            }
            FieldType::Date => {
                input::input_box(name, "date", attrs, self.values.get_text(name), xhtml).into()
            }
            // Hidden fields only carry what the schema gives them.
            FieldType::Hidden => input::input_box(name, "hidden", attrs, None, xhtml).into(),
            FieldType::Textarea => input::textarea(name, attrs, self.values.get_text(name)).into(),
            FieldType::Checkbox => {
                let compare = entry
                    .values
                    .as_ref()
                    .and_then(OptionValues::as_single)
                    .unwrap_or(DEFAULT_CHECKBOX_VALUE);
                let checked = self.values.get(name).is_some_and(|v| v.matches(compare));
                input::checkbox(name, compare, attrs, checked, xhtml).into()
            }
            FieldType::Select => entry
                .values
                .as_ref()
                .and_then(OptionValues::as_options)
                .map(|options| {
                    select::select_box(
                        name,
                        attrs,
                        options.iter().map(|(v, l)| (v.as_str(), l.as_str())),
                        self.values.get_text(name),
                    )
                })
                .unwrap_or_default()
                .into(),
            FieldType::DateSelect => select::date_select(
                name,
                attrs,
                self.clock.today(),
                self.values.get_text(name),
            )
            .into(),
            FieldType::Dob => {
                RenderedElement::Composite(select::dob(attrs, self.values, self.clock.today()))
            }
        }
    }
}

/// Writes ` key="value"` for every attribute, unescaped.
fn push_attributes(html: &mut String, attributes: &IndexMap<String, String>) {
    for (key, value) in attributes {
        html.push_str(&format!(r#" {key}="{value}""#));
    }
}

/// Removes HTML tags, leaving their text content.
///
/// Any `<` followed by a non-whitespace character opens a tag; a `<` before
/// whitespace or at the end is kept as text. Quoted attribute values may
/// contain `>`, comments run to `-->`, and an unterminated tag is dropped.
pub fn strip_tags(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        if !after.starts_with(|c: char| !c.is_whitespace()) {
            result.push('<');
            rest = after;
            continue;
        }
        rest = match after.strip_prefix("!--") {
            Some(comment) => comment.find("-->").map_or("", |end| &comment[end + 3..]),
            None => skip_tag(after),
        };
    }

    result.push_str(rest);
    result
}

/// Returns the text after the `>` that closes a tag body.
fn skip_tag(body: &str) -> &str {
    let mut quote = None;
    for (i, c) in body.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return &body[i + 1..],
            _ => {}
        }
    }
    ""
}
