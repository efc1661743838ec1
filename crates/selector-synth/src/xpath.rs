//! XPath fallback synthesis
//!
//! Both strategies walk the same attribute order (id, test id,
//! ARIA label, form name, text, position) and always return a path
//! starting with `//`.

use selector_core_types::ElementDescriptor;

use crate::predicates::is_form_element;
use crate::syntax::{prefix_chars, xpath_literal};

const NOT_DISABLED: &str = "not(@disabled)";
const NOT_HIDDEN: &str = "not(@aria-hidden='true')";

/// Predicate chosen for the element, tagged by the rule that produced it.
enum Anchor {
    Id(String),
    TestId(String),
    AriaLabel(String),
    Name(String),
    Text(String),
}

fn pick_anchor(d: &ElementDescriptor, text_chars: usize) -> Option<Anchor> {
    let tag = d.tag();
    if let Some(id) = d.id() {
        return Some(Anchor::Id(format!("@id={}", xpath_literal(id))));
    }
    if let Some(test_id) = d.attr("data-testid") {
        return Some(Anchor::TestId(format!(
            "@data-testid={}",
            xpath_literal(test_id)
        )));
    }
    if let Some(label) = d.aria_label() {
        return Some(Anchor::AriaLabel(format!(
            "@aria-label={}",
            xpath_literal(label)
        )));
    }
    if is_form_element(&tag) {
        if let Some(name) = d.attr("name") {
            return Some(Anchor::Name(format!("@name={}", xpath_literal(name))));
        }
    }
    let text = d.display_text();
    if !text.is_empty() {
        return Some(Anchor::Text(format!(
            "contains(normalize-space(.), {})",
            xpath_literal(prefix_chars(&text, text_chars))
        )));
    }
    None
}

/// First applicable attribute, else the element's position.
pub fn simple_xpath(d: &ElementDescriptor, text_chars: usize) -> String {
    let tag = d.tag();
    match pick_anchor(d, text_chars) {
        Some(
            Anchor::Id(predicate)
            | Anchor::TestId(predicate)
            | Anchor::AriaLabel(predicate)
            | Anchor::Name(predicate)
            | Anchor::Text(predicate),
        ) => format!("//{tag}[{predicate}]"),
        None => {
            let position = d.sibling_index.map_or(1, |index| index.saturating_add(1));
            match d.parent_tag() {
                Some(parent) => format!("//{parent}/{tag}[{position}]"),
                None => format!("//{tag}[{position}]"),
            }
        }
    }
}

/// Same order as [`simple_xpath`], each branch guarded against disabled
/// and hidden matches.
pub fn advanced_xpath(d: &ElementDescriptor, text_chars: usize) -> String {
    let tag = d.tag();
    match pick_anchor(d, text_chars) {
        Some(Anchor::Id(predicate) | Anchor::Name(predicate)) => {
            format!("//{tag}[{predicate} and {NOT_DISABLED}]")
        }
        Some(
            Anchor::TestId(predicate) | Anchor::AriaLabel(predicate) | Anchor::Text(predicate),
        ) => format!("//{tag}[{predicate} and {NOT_DISABLED} and {NOT_HIDDEN}]"),
        None => format!("//{tag}[{NOT_DISABLED} and {NOT_HIDDEN}][1]"),
    }
}
