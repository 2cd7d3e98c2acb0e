//! Full form page rendering.

use indexmap::IndexMap;
use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Fieldset, Label, Legend, Li, Ul};

use oxide_fields::{RenderedElement, Schema, ValidationErrors};

/// Turns a field name into a label: `firstName` becomes `First name`.
pub fn label_for(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c == '_' || c == '-' {
            label.push(' ');
        } else if c.is_uppercase() {
            label.push(' ');
            label.extend(c.to_lowercase());
        } else {
            label.push(c);
        }
    }
    label
}

/// Builds the label for one field.
///
/// `for` is only written when the schema gives the field an `id`. Composite
/// fields label the group, since their boxes share the entry's attributes.
fn field_label(schema: &Schema, name: &str, element: &RenderedElement) -> Element<Label> {
    let label_text = label_for(name);
    let target = schema
        .get(name)
        .filter(|_| element.parts().is_none())
        .and_then(|entry| entry.attributes.get("id"));
    match target {
        Some(target) => html! { label.for_(#target) { #label_text } },
        None => html! { label { #label_text } },
    }
}

/// Renders a `<form>` with one labelled block per rendered element and a
/// list of validation errors above them.
pub fn render_form_page(
    legend: &str,
    schema: &Schema,
    elements: &IndexMap<String, RenderedElement>,
    errors: &ValidationErrors,
    action: &str,
    method: &str,
) -> String {
    let mut form = html! {
        form.action(#action).method(#method)
    };

    if !errors.is_empty() {
        let messages: Vec<String> = errors
            .iter()
            .map(|(field, message)| format!("{}{message}", label_for(field)))
            .collect();
        form = form.child::<Div, _>(|d| {
            d.class("errors")
                .attr("role", "alert")
                .child::<Ul, _>(|ul| {
                    ul.children(messages.iter(), |e, li: Element<Li>| li.text(e))
                })
        });
    }

    form = form.child::<Fieldset, _>(|fieldset| {
        let mut fieldset = fieldset.child::<Legend, _>(|l| l.text(legend));
        for (name, element) in elements {
            let label_el = field_label(schema, name, element);
            let field_html = element.to_string();
            fieldset = fieldset
                .child::<Div, _>(|d| d.class("field").raw(label_el.render()).raw(&field_html));
        }
        fieldset
    });

    form = form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit") {
                "Submit"
            }
        };
        d.raw(btn.render())
    });

    form.render()
}
