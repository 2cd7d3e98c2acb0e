#![allow(dead_code)]

use oxide_fields::{FieldRenderer, FixedClock, RenderedElement, Schema, Values};

/// The date every date-dependent test renders against.
pub fn clock() -> FixedClock {
    FixedClock::from_ymd(2024, 3, 15).expect("valid test date")
}

pub fn render(schema: &Schema, values: &Values) -> Vec<(String, RenderedElement)> {
    let mut renderer = FieldRenderer::new(schema, values).with_clock(clock());
    renderer
        .render()
        .iter()
        .map(|(name, element)| (name.clone(), element.clone()))
        .collect()
}

pub fn render_one(schema: &Schema, values: &Values, name: &str) -> String {
    let mut renderer = FieldRenderer::new(schema, values).with_clock(clock());
    renderer.render();
    renderer
        .get_element(name)
        .unwrap_or_else(|| panic!("no element rendered for {name}"))
        .to_string()
}

pub fn query(q: &str) -> Values {
    Values::from_query_string(q)
}

pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
