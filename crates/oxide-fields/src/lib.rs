//! # oxide-fields
//!
//! Schema-driven HTML form fields that remember what the user submitted,
//! plus a companion field validator.
//!
//! This crate provides:
//! - A declarative field schema (text, hidden, textarea, checkbox, select,
//!   date, date select and date-of-birth fields)
//! - A renderer that pre-fills and pre-selects fields from submitted values
//! - A validator for required, length and type rules that injects defaults
//! - An injectable clock for the date-dependent fields
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_fields::{FieldRenderer, FieldSchemaEntry, Schema, Values};
//!
//! let schema = Schema::new()
//!     .field(
//!         "title",
//!         FieldSchemaEntry::select([("Mr", "Mr"), ("Mrs", "Mrs"), ("Ms", "Ms")])
//!             .attr("id", "title"),
//!     )
//!     .field("firstName", FieldSchemaEntry::text().attr("id", "firstName"))
//!     .field("dob", FieldSchemaEntry::dob());
//!
//! let values = Values::from_query_string("title=Ms&firstName=Ada&year=1990");
//!
//! let mut renderer = FieldRenderer::new(&schema, &values);
//! renderer.render();
//!
//! let title = renderer.get_element("title").unwrap().to_string();
//! assert!(title.contains(r#"<option value="Ms" selected="selected">Ms</option>"#));
//!
//! // Composite fields render as several fragments.
//! let dob = renderer.get_element("dob").unwrap();
//! assert!(dob.part("year").unwrap().contains(r#"value="1990" selected="selected""#));
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use oxide_fields::{validate_all, FieldValue, Rules, RuleType, ValidationRule, Values};
//!
//! let rules = Rules::new()
//!     .rule("lastName", ValidationRule::new().required().max_length(50))
//!     .rule("newsletter", ValidationRule::new().of_type(RuleType::Boolean));
//!
//! let mut values = Values::from_query_string("newsletter=yes");
//! let errors = validate_all(&mut values, &rules);
//!
//! assert_eq!(errors.get("lastName"), Some(" is required"));
//! assert_eq!(values.get("newsletter"), Some(&FieldValue::Bool(true)));
//! ```
//!
//! ## Schemas from JSON
//!
//! ```rust
//! use oxide_fields::Schema;
//!
//! let schema = Schema::from_json(r#"{
//!     "name": {"type": "text", "attributes": {"id": "name"}}
//! }"#).unwrap();
//! assert_eq!(schema.len(), 1);
//! ```
//!
//! ## Escaping
//!
//! Attribute values and textarea content are written without escaping, and
//! text inputs only strip tags from submitted values. Escape untrusted data
//! before it reaches the schema or the value mapping.

pub mod clock;
mod error;
mod loose;
pub mod render;
pub mod schema;
pub mod validation;
mod value;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{FieldError, Result, ValidationErrors};
pub use render::{FieldRenderer, RenderedElement};
pub use schema::{FieldSchemaEntry, FieldType, OptionValues, Schema};
pub use validation::{validate_all, validate_field, RuleType, Rules, ValidationRule};
pub use value::{FieldValue, Values};
