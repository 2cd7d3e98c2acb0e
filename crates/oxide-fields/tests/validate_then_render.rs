//! Validating a submission and re-rendering the form from the corrected
//! values.

mod common;
use common::*;

use oxide_fields::{
    validate_all, FieldRenderer, FieldSchemaEntry, RuleType, Rules, Schema, ValidationRule,
};

fn user_schema() -> Schema {
    Schema::new()
        .field(
            "title",
            FieldSchemaEntry::select([("Mr", "Mr"), ("Mrs", "Mrs"), ("Ms", "Ms")])
                .attr("id", "title"),
        )
        .field("firstName", FieldSchemaEntry::text().attr("id", "firstName"))
        .field("lastName", FieldSchemaEntry::text().attr("id", "lastName"))
        .field("newsletter", FieldSchemaEntry::checkbox().value("1"))
        .field("dob", FieldSchemaEntry::dob())
}

fn user_rules() -> Rules {
    Rules::new()
        .rule("title", ValidationRule::new().required().max_length(5))
        .rule("firstName", ValidationRule::new().max_length(50))
        .rule("lastName", ValidationRule::new().required().max_length(50))
        .rule(
            "newsletter",
            ValidationRule::new().of_type(RuleType::Boolean),
        )
}

#[test]
fn failed_submission_is_remembered() {
    let schema = user_schema();
    let mut values =
        query("title=Ms&firstName=Ada&lastName=&newsletter=yes&day=10&month=12&year=1815");

    let errors = validate_all(&mut values, &user_rules());
    assert_eq!(errors.get("lastName"), Some(" is required"));
    assert_eq!(errors.len(), 1);

    let mut renderer = FieldRenderer::new(&schema, &values).with_clock(clock());
    renderer.render();

    let title = renderer.get_element("title").unwrap().to_string();
    assert!(title.contains(r#"<option value="Ms" selected="selected">Ms</option>"#));

    assert_eq!(
        renderer.get_element("firstName").unwrap().to_string(),
        r#"<input type="text" name="firstName" id="firstName" value="Ada">"#
    );
    assert_eq!(
        renderer.get_element("lastName").unwrap().to_string(),
        r#"<input type="text" name="lastName" id="lastName" value="">"#
    );

    // the coerced boolean renders as "1"
    assert_eq!(
        renderer.get_element("newsletter").unwrap().to_string(),
        r#"<input type="checkbox" name="newsletter" value="1" checked="checked">"#
    );

    let dob = renderer.get_element("dob").unwrap();
    assert!(dob.part("day").unwrap().contains(r#"value="10" selected="selected""#));
    assert!(dob.part("month").unwrap().contains(r#"value="12" selected="selected""#));
    // 1815 is outside the hundred-year window
    assert_eq!(count(dob.part("year").unwrap(), "selected"), 0);
}

#[test]
fn defaults_injected_by_validation_prefill_fields() {
    let schema = Schema::new().field("country", FieldSchemaEntry::text());
    let rules = Rules::new().rule("country", ValidationRule::new().default_value("UK"));
    let mut values = query("");

    assert!(validate_all(&mut values, &rules).is_empty());
    assert_eq!(
        render_one(&schema, &values, "country"),
        r#"<input type="text" name="country" value="UK">"#
    );
}
