//! Four independent quality axes per selector
//!
//! Every axis starts from a fixed base, applies additive and subtractive
//! rules and is clamped to `[0, 1]`. Scores depend only on the selector
//! and the descriptor, never on the other candidates.

use once_cell::sync::Lazy;
use regex::Regex;
use selector_core_types::ElementDescriptor;

use crate::predicates::{
    is_bare_tag, is_form_element, is_positional, is_simple_id_selector,
    is_simple_stable_id_selector, is_text_selector, references_css_in_js_class,
    references_hashed_class, strip_quoted, uses_nth, uses_partial_attribute_match,
    uses_partial_class_match,
};
use crate::types::ScoredSelector;

static ATTRIBUTE_PREDICATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[\w-]+").expect("attribute predicate pattern"));

fn clamp(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

fn is_test_attribute_selector(selector: &str) -> bool {
    ["data-test", "data-cy", "data-qa"]
        .iter()
        .any(|attr| selector.contains(attr))
}

/// Score `selector` on every axis.
pub fn score_selector(
    selector: &str,
    priority: u8,
    descriptor: &ElementDescriptor,
) -> ScoredSelector {
    ScoredSelector {
        selector: selector.to_string(),
        priority,
        reliability: reliability(selector, descriptor),
        browser_compatibility: browser_compatibility(selector),
        uniqueness: uniqueness(selector, descriptor),
        stability: stability(selector),
    }
}

pub fn browser_compatibility(selector: &str) -> f64 {
    let mut score: f64 = 1.0;

    if is_text_selector(selector) {
        score -= 0.3;
    }
    if selector.starts_with("xpath:") {
        score -= 0.1;
    }
    if uses_partial_attribute_match(selector) {
        score -= 0.1;
    }
    if uses_nth(selector) {
        score -= 0.2;
    }

    if selector.contains("data-testid") {
        score += 0.2;
    } else if selector.contains("data-test") {
        score += 0.2;
    }
    if selector.contains("aria-label") {
        score += 0.1;
    }
    if selector.contains("role=") {
        score += 0.1;
    }
    if is_simple_id_selector(selector) {
        score += 0.1;
    }

    clamp(score)
}

pub fn reliability(selector: &str, descriptor: &ElementDescriptor) -> f64 {
    let mut score: f64 = 0.5;
    let tag = descriptor.tag();

    if selector.contains("data-testid") {
        score += 0.4;
    } else if is_test_attribute_selector(selector) {
        score += 0.35;
    }
    if selector.contains("aria-label") {
        score += 0.3;
    }
    if selector.contains("role=") {
        score += 0.25;
    }
    if is_simple_stable_id_selector(selector) {
        score += 0.3;
    }

    if is_form_element(&tag) {
        if selector.contains("name=") {
            score += 0.25;
        }
        if selector.contains("type=") {
            score += 0.2;
        }
        if selector.contains("placeholder=") {
            score += 0.15;
        }
    }

    if is_text_selector(selector) && matches!(tag.as_str(), "button" | "a" | "span") {
        score += 0.2;
    }

    if references_css_in_js_class(selector) {
        score -= 0.3;
    }
    if references_hashed_class(selector) {
        score -= 0.25;
    }
    if is_positional(selector) {
        score -= 0.2;
    }
    if uses_partial_class_match(selector) {
        score -= 0.15;
    }
    if is_bare_tag(selector) {
        score -= 0.2;
    }

    clamp(score)
}

pub fn uniqueness(selector: &str, descriptor: &ElementDescriptor) -> f64 {
    let mut score: f64 = 0.5;
    let structure = strip_quoted(selector);

    if selector.contains("data-testid") || selector.contains("data-test") {
        score += 0.4;
    }
    if selector.starts_with('#') {
        score += 0.4;
    }
    if selector.contains("aria-label") {
        score += 0.3;
    }

    let predicates = ATTRIBUTE_PREDICATE.find_iter(&structure).count();
    score += (predicates as f64 * 0.1).min(0.2);

    if structure.contains('>') {
        score += 0.1;
    }

    let tag = descriptor.tag();
    if tag != "*" && contains_tag(&structure, &tag) {
        score += 0.05;
    }

    if is_text_selector(selector) && descriptor.display_text().chars().count() > 20 {
        score += 0.15;
    }

    clamp(score)
}

pub fn stability(selector: &str) -> f64 {
    let mut score: f64 = 0.5;

    if is_test_attribute_selector(selector) {
        score += 0.4;
    }
    if selector.contains("aria-label") {
        score += 0.3;
    }
    if selector.contains("role=") {
        score += 0.25;
    }
    if is_simple_stable_id_selector(selector) {
        score += 0.3;
    }
    if selector.contains("name=") {
        score += 0.25;
    }

    if is_positional(selector) {
        score -= 0.3;
    }
    if references_css_in_js_class(selector) {
        score -= 0.4;
    }
    if references_hashed_class(selector) {
        score -= 0.3;
    }
    if uses_partial_class_match(selector) {
        score -= 0.2;
    }
    if is_bare_tag(selector) {
        score -= 0.2;
    }

    clamp(score)
}

/// Tag appears as a type selector, not as part of a longer name.
fn contains_tag(structure: &str, tag: &str) -> bool {
    let is_name_char = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    structure.match_indices(tag).any(|(start, _)| {
        let before = structure[..start].chars().next_back();
        let after = structure[start + tag.len()..].chars().next();
        !before.is_some_and(|c| is_name_char(c) || matches!(c, '.' | '#' | '[' | ':'))
            && !after.is_some_and(is_name_char)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_test_id_scores() {
        let d = ElementDescriptor::new("button").with_attribute("data-testid", "submit");
        let scored = score_selector("[data-testid=\"submit\"]", 100, &d);
        assert!(approx(scored.reliability, 0.9));
        assert!(approx(scored.browser_compatibility, 1.0));
        assert!(approx(scored.stability, 0.9));
        // 0.5 + 0.4 test id + 0.1 one predicate
        assert!(approx(scored.uniqueness, 1.0));
    }

    #[test]
    fn test_stable_id_beats_tag_qualified_id() {
        let d = ElementDescriptor::new("button").with_attribute("id", "submit-btn");
        assert!(approx(reliability("#submit-btn", &d), 0.8));
        assert!(approx(reliability("button#submit-btn", &d), 0.5));
        assert!(approx(browser_compatibility("#submit-btn"), 1.0));
    }

    #[test]
    fn test_positional_and_hashed_penalties() {
        let d = ElementDescriptor::new("div").with_attribute("class", "css-x7y8z9");
        assert!(approx(reliability("div.css-x7y8z9", &d), 0.2));
        assert!(approx(stability("div.css-x7y8z9"), 0.1));
        assert!(approx(reliability("div:nth-child(odd)", &d), 0.3));
        assert!(approx(browser_compatibility("div:nth-child(odd)"), 0.8));
        assert!(approx(reliability("div:first-child", &d), 0.3));
        assert!(approx(browser_compatibility("div:first-child"), 1.0));
    }

    #[test]
    fn test_bare_tag_scores_low() {
        let d = ElementDescriptor::new("div");
        let scored = score_selector("div", 1, &d);
        assert!(scored.reliability < 0.5);
        assert!(scored.stability < 0.5);
    }

    #[test]
    fn test_text_selector_scores() {
        let d = ElementDescriptor::new("button").with_text("Continue to payment details");
        let selector = "button:has-text(\"Continue to payment details\")";
        assert!(approx(browser_compatibility(selector), 0.7));
        assert!(approx(reliability(selector, &d), 0.7));
        // base + tag + long text
        assert!(approx(uniqueness(selector, &d), 0.7));
    }

    #[test]
    fn test_form_attributes_raise_reliability() {
        let d = ElementDescriptor::new("input").with_attribute("name", "email");
        assert!(approx(reliability("input[name=\"email\"][type=\"email\"]", &d), 0.95));
        let div = ElementDescriptor::new("div");
        assert!(approx(reliability("div[name=\"email\"]", &div), 0.5));
    }

    #[test]
    fn test_uniqueness_components() {
        let d = ElementDescriptor::new("li");
        // base + 0.1 child combinator + 0.05 tag
        assert!(approx(uniqueness("ul > li", &d), 0.65));
        // predicates capped at 0.2
        assert!(approx(uniqueness("li[a=\"1\"][b=\"2\"][c=\"3\"]", &d), 0.75));
        assert!(!contains_tag("[data-li=\"\"]", "li"));
        assert!(!contains_tag("a.link", "link"));
    }

    #[test]
    fn test_scores_are_clamped() {
        let d = ElementDescriptor::new("button");
        let scored = score_selector(
            "button[data-testid=\"x\"][aria-label=\"y\"][role=\"button\"]",
            100,
            &d,
        );
        for value in [
            scored.reliability,
            scored.browser_compatibility,
            scored.uniqueness,
            scored.stability,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
