//! Select box builders, including the generated date and date-of-birth
//! boxes.

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;

use super::push_attributes;
use crate::value::Values;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Years offered by the date-of-birth year box, counting back from today.
const DOB_YEARS: i32 = 100;

/// Builds a `<select>` from `(value, label)` options.
///
/// The option whose value equals `selected` is marked selected.
pub(super) fn select_box<'o>(
    name: &str,
    attrs: &IndexMap<String, String>,
    options: impl IntoIterator<Item = (&'o str, &'o str)>,
    selected: Option<&str>,
) -> String {
    let mut html = format!(r#"<select name="{name}""#);
    push_attributes(&mut html, attrs);
    html.push('>');

    for (value, label) in options {
        let selected_attr = if selected == Some(value) {
            r#" selected="selected""#
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<option value="{value}"{selected_attr}>{label}</option>"#
        ));
    }

    html.push_str("</select>");
    html
}

/// Builds a select listing every day from `today` to the end of next year.
pub(super) fn date_select(
    name: &str,
    attrs: &IndexMap<String, String>,
    today: NaiveDate,
    selected: Option<&str>,
) -> String {
    let options = date_options(today);
    select_box(
        name,
        attrs,
        std::iter::once(("", "Any"))
            .chain(options.iter().map(|(v, l)| (v.as_str(), l.as_str()))),
        selected,
    )
}

/// One `("dd-mm-yyyy", "dd Month yyyy")` pair per day, inclusive of Dec 31
/// next year.
pub(super) fn date_options(today: NaiveDate) -> Vec<(String, String)> {
    let Some(last) = NaiveDate::from_ymd_opt(today.year() + 1, 12, 31) else {
        return Vec::new();
    };
    today
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| {
            (
                day.format("%d-%m-%Y").to_string(),
                day.format("%d %B %Y").to_string(),
            )
        })
        .collect()
}

/// Builds the day, month and year boxes of a date of birth.
///
/// The boxes are named `day`, `month` and `year` and pre-selected from the
/// values of those names, whatever the schema field is called.
pub(super) fn dob(
    attrs: &IndexMap<String, String>,
    values: &Values,
    today: NaiveDate,
) -> IndexMap<String, String> {
    let days: Vec<String> = (1..=31).map(|d: u32| d.to_string()).collect();
    let day = select_box(
        "day",
        attrs,
        std::iter::once(("", "Day")).chain(days.iter().map(|d| (d.as_str(), d.as_str()))),
        values.get_text("day"),
    );

    let month_numbers: Vec<String> = (1..=12).map(|m: u32| m.to_string()).collect();
    let month = select_box(
        "month",
        attrs,
        std::iter::once(("", "Month")).chain(
            month_numbers
                .iter()
                .map(String::as_str)
                .zip(MONTHS.iter().copied()),
        ),
        values.get_text("month"),
    );

    let this_year = today.year();
    let years: Vec<String> = ((this_year - DOB_YEARS)..=this_year)
        .rev()
        .map(|y| y.to_string())
        .collect();
    let year = select_box(
        "year",
        attrs,
        std::iter::once(("", "Year")).chain(years.iter().map(|y| (y.as_str(), y.as_str()))),
        values.get_text("year"),
    );

    IndexMap::from([
        ("day".to_string(), day),
        ("month".to_string(), month),
        ("year".to_string(), year),
    ])
}
