//! Tiered candidate generation
//!
//! Four tiers, each a fixed battery of rules evaluated independently:
//! 1. Attribute - test ids, stable ids, ARIA, form names, structure guards
//! 2. PartialMatch - prefix/suffix/word attribute matches, sibling structure
//! 3. State - interactive and UI-state pseudo-classes
//! 4. Text - text-content matching
//!
//! A rule that does not apply to the descriptor contributes nothing.

use std::collections::HashSet;

use selector_core_types::ElementDescriptor;
use tracing::{debug, trace};

use crate::config::SynthesisConfig;
use crate::predicates::{
    is_form_element, is_interactive_element, is_semantic_class_name, is_stable_class,
    is_stable_id, is_valid_selector,
};
use crate::syntax::{attr_eq, css_ident, css_string, literal_pattern, prefix_chars};
use crate::types::{Candidate, Tier};

/// Excludes disabled and hidden matches.
pub const STATE_GUARD: &str = ":not([disabled]):not([aria-hidden=\"true\"])";

const TEST_ATTRIBUTES: [(&str, u8); 4] = [
    ("data-testid", 100),
    ("data-test", 95),
    ("data-cy", 95),
    ("data-qa", 95),
];

struct TierBattery<'a> {
    tier: Tier,
    out: &'a mut Vec<Candidate>,
}

impl TierBattery<'_> {
    fn push(&mut self, selector: String, priority: u8) {
        self.out.push(Candidate::new(selector, self.tier, priority));
    }
}

/// Every candidate from every tier, in tier then rule order.
pub fn generate_candidates(
    descriptor: &ElementDescriptor,
    config: &SynthesisConfig,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    for tier in Tier::all() {
        let before = out.len();
        let mut battery = TierBattery {
            tier,
            out: &mut out,
        };
        match tier {
            Tier::Attribute => attribute_tier(descriptor, &mut battery),
            Tier::PartialMatch => partial_match_tier(descriptor, &mut battery),
            Tier::State => state_tier(descriptor, &mut battery),
            Tier::Text => text_tier(descriptor, config, &mut battery),
        }
        trace!("Tier {} produced {} candidates", tier.name(), out.len() - before);
    }
    out
}

/// Drops invalid selectors, sorts by priority (earlier tier wins ties),
/// removes duplicates and keeps the top `limit`.
pub fn rank_candidates(candidates: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    let total = candidates.len();
    let mut ranked: Vec<Candidate> = candidates
        .into_iter()
        .filter(|candidate| is_valid_selector(&candidate.selector))
        .collect();
    if ranked.len() < total {
        debug!("Dropped {} invalid candidates", total - ranked.len());
    }

    ranked.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.tier.rank().cmp(&b.tier.rank()))
    });

    let mut seen = HashSet::new();
    ranked.retain(|candidate| seen.insert(candidate.selector.clone()));
    ranked.truncate(limit);
    ranked
}

fn attribute_tier(d: &ElementDescriptor, b: &mut TierBattery<'_>) {
    let tag = d.tag();

    for (attr, base) in TEST_ATTRIBUTES {
        if let Some(value) = d.attr(attr) {
            let selector = attr_eq(attr, value);
            b.push(selector.clone(), base);
            b.push(format!("{selector}{STATE_GUARD}:enabled"), base - 1);
            b.push(
                format!("{selector}:not(:disabled):not(:invalid):enabled"),
                base - 2,
            );
        }
    }

    if let Some(id) = d.id().filter(|id| is_stable_id(id)) {
        let ident = css_ident(id);
        b.push(format!("#{ident}"), 95);
        b.push(format!("{tag}#{ident}{STATE_GUARD}"), 94);
        b.push(format!(":is(#{ident})"), 93);
    }

    if let Some(label) = d.aria_label() {
        let labelled = format!("{tag}{}", attr_eq("aria-label", label));
        b.push(labelled.clone(), 90);
        if d.has_text_content() {
            let text = d.display_text();
            if !text.is_empty() {
                b.push(
                    format!("{labelled}:has-text({})", css_string(prefix_chars(&text, 50))),
                    89,
                );
            }
        }
        if let Some(role) = d.role() {
            b.push(
                format!(
                    "{tag}:is({}{})",
                    attr_eq("role", role),
                    attr_eq("aria-label", label)
                ),
                88,
            );
        }
    }

    if is_form_element(&tag) {
        if let Some(name) = d.attr("name") {
            let named = format!("{tag}{}", attr_eq("name", name));
            b.push(format!("{named}:valid"), 85);
            b.push(format!("{named}:focus-within"), 84);
            let input_type = d.input_type();
            if let Some(ty) = input_type.as_deref() {
                b.push(format!("{named}{}", attr_eq("type", ty)), 83);
            }
            if d.has_attr("required") {
                b.push(format!("{named}:required"), 82);
            }
            if matches!(input_type.as_deref(), Some("number" | "range")) {
                b.push(format!("{named}:in-range"), 81);
            }
        }
    }

    if let Some(index) = d.sibling_index {
        let position = index.saturating_add(1);
        let scope = d
            .parent_tag()
            .map(|parent| format!("{parent} > "))
            .unwrap_or_default();
        b.push(
            format!("{scope}{tag}:nth-of-type({position}){STATE_GUARD}"),
            78,
        );
        b.push(format!("{scope}{tag}:nth-child({position}){STATE_GUARD}"), 77);
    }

    b.push(format!("{tag}:first-child{STATE_GUARD}"), 76);
    b.push(format!("{tag}:last-child{STATE_GUARD}"), 75);
}

fn partial_match_tier(d: &ElementDescriptor, b: &mut TierBattery<'_>) {
    let tag = d.tag();

    if let Some(id) = d.id() {
        b.push(
            format!("{tag}[id^={}]", css_string(prefix_chars(id, 6))),
            70,
        );
    }

    let classes = d.classes();
    if let Some(class) = classes
        .iter()
        .find(|class| is_semantic_class_name(class) && is_stable_class(class))
    {
        b.push(format!("{tag}[class$={}]", css_string(class)), 69);
    }

    if let Some(title) = d.title() {
        b.push(
            format!("{tag}[title*={}]", css_string(prefix_chars(title, 10))),
            68,
        );
    }

    if let Some(class) = classes.iter().find(|class| is_stable_class(class)) {
        b.push(format!("{tag}[class~={}]", css_string(class)), 67);
    }

    if let Some(parent) = d.parent_tag() {
        b.push(format!("{parent} > {tag}:first-of-type"), 65);
        b.push(format!("{parent} > * ~ {tag}"), 64);
    }

    b.push(format!("{tag}:nth-child(odd)"), 60);
    b.push(format!("{tag}:nth-child(even)"), 59);
    b.push(format!("{tag}:nth-child(2n+1)"), 58);
    b.push(format!("{tag}:only-child"), 57);
    b.push(format!("{tag}:only-of-type"), 56);
}

fn state_tier(d: &ElementDescriptor, b: &mut TierBattery<'_>) {
    let tag = d.tag();

    if is_interactive_element(&tag) {
        b.push(format!("{tag}:hover{STATE_GUARD}"), 50);
        b.push(format!("{tag}:focus{STATE_GUARD}"), 49);
        b.push(format!("{tag}:active{STATE_GUARD}"), 48);
    }

    if let Some(ty) = d
        .input_type()
        .filter(|ty| matches!(ty.as_str(), "checkbox" | "radio"))
    {
        let typed = format!("{tag}{}", attr_eq("type", &ty));
        b.push(format!("{typed}:checked"), 47);
        b.push(format!("{typed}:indeterminate"), 46);
    }

    if d.has_text_content() {
        b.push(format!("{tag}:not(:empty)"), 45);
    } else {
        b.push(format!("{tag}:empty"), 44);
    }

    if tag == "a" {
        b.push("a:link".to_string(), 40);
        b.push("a:visited".to_string(), 39);
        if let Some(href) = d.link_href() {
            b.push(format!("a{}:any-link", attr_eq("href", href)), 38);
        }
    }
}

fn text_tier(d: &ElementDescriptor, config: &SynthesisConfig, b: &mut TierBattery<'_>) {
    let text = d.display_text();
    if text.is_empty() {
        return;
    }
    let tag = d.tag();
    let snippet = prefix_chars(&text, config.text_snippet_chars);

    b.push(format!("{tag}:has-text({})", css_string(snippet)), 35);
    if text.chars().count() <= config.exact_text_max_chars {
        b.push(format!("{tag}:text-is({})", css_string(&text)), 34);
    }
    b.push(
        format!(
            "{tag}:text-matches({}, \"i\")",
            css_string(&literal_pattern(snippet))
        ),
        33,
    );

    let lead = text.split(' ').take(3).collect::<Vec<_>>().join(" ");
    if lead != text && lead.chars().count() > 5 {
        b.push(
            format!(
                "{tag}:text-matches({}, \"i\")",
                css_string(&format!("^{}", literal_pattern(&lead)))
            ),
            32,
        );
    }
}
