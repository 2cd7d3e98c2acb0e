//! User Form - validate a submission and re-render the form
//!
//! This example demonstrates:
//! - Declaring a schema with select, text and date-of-birth fields
//! - Validating a query string against per-field rules
//! - Re-rendering the form so it remembers what was submitted
//!
//! Run with: cargo run --example user_form -- 'title=Mrs&firstName=Ada&day=10'

use oxide_fields::{
    validate_all, FieldRenderer, FieldSchemaEntry, Rules, Schema, ValidationRule, Values,
};

fn schema() -> Schema {
    Schema::new()
        .field(
            "title",
            FieldSchemaEntry::select([
                ("Mr", "Mr"),
                ("Mrs", "Mrs"),
                ("Ms", "Ms"),
                ("Miss", "Miss"),
                ("Prof", "Prof"),
                ("Rev", "Rev"),
            ])
            .attr("id", "title"),
        )
        .field("firstName", FieldSchemaEntry::text().attr("id", "firstName"))
        .field("lastName", FieldSchemaEntry::text().attr("id", "lastName"))
        .field("dob", FieldSchemaEntry::dob())
}

fn rules() -> Rules {
    Rules::new()
        .rule("title", ValidationRule::new().required().max_length(5))
        .rule("firstName", ValidationRule::new().max_length(50))
        .rule("lastName", ValidationRule::new().required().max_length(50))
}

fn main() {
    let query = std::env::args().nth(1).unwrap_or_default();
    let mut values = Values::from_query_string(&query);

    if !values.is_empty() {
        let errors = validate_all(&mut values, &rules());
        for (field, message) in errors.iter() {
            eprintln!("{field}{message}");
        }
    }

    let schema = schema();
    let mut renderer = FieldRenderer::new(&schema, &values);
    renderer.render();

    println!(r#"<form method="get">"#);
    println!("    <fieldset>");
    println!("        <legend>User Form</legend>");
    for (label, name) in [
        ("Title", "title"),
        ("First name", "firstName"),
        ("Last name", "lastName"),
        ("Date Of Birth", "dob"),
    ] {
        let element = renderer
            .get_element(name)
            .map(ToString::to_string)
            .unwrap_or_default();
        println!("        <div>");
        println!(r#"            <label for="{name}">{label}</label>"#);
        println!("            {element}");
        println!("        </div>");
    }
    println!("    </fieldset>");
    println!(r#"    <input type="submit" value="Submit">"#);
    println!("</form>");
}
