//! Flat ten-strategy candidate pool
//!
//! Independent of the tiered generator: every strategy emits plain
//! selectors with a static priority, and the pool is deduplicated, filtered
//! and capped before scoring. Descriptor-supplied selectors are appended
//! after the cap.

use std::collections::HashSet;

use selector_core_types::ElementDescriptor;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::predicates::{is_form_element, is_stable_class, is_stable_id, is_valid_selector};
use crate::syntax::{attr_eq, css_ident, css_string, prefix_chars};

/// Strategy that contributed a pooled selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolStrategy {
    TestAttribute,
    StableId,
    Aria,
    FormField,
    Text,
    StableClass,
    Link,
    Title,
    ParentContext,
    Positional,
    /// Pre-computed upstream by the capture collaborator
    Supplied,
}

impl PoolStrategy {
    /// Get strategy name as string
    pub fn name(&self) -> &'static str {
        match self {
            PoolStrategy::TestAttribute => "test-attribute",
            PoolStrategy::StableId => "stable-id",
            PoolStrategy::Aria => "aria",
            PoolStrategy::FormField => "form-field",
            PoolStrategy::Text => "text",
            PoolStrategy::StableClass => "stable-class",
            PoolStrategy::Link => "link",
            PoolStrategy::Title => "title",
            PoolStrategy::ParentContext => "parent-context",
            PoolStrategy::Positional => "positional",
            PoolStrategy::Supplied => "supplied",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PooledSelector {
    pub selector: String,
    pub strategy: PoolStrategy,
    pub priority: u8,
}

const SUPPLIED_PRIORITY: u8 = 40;

/// Deduplicated, valid selectors from every strategy, capped at `limit`,
/// followed by any new supplied selectors.
pub fn exhaustive_pool(
    d: &ElementDescriptor,
    limit: usize,
    text_chars: usize,
) -> Vec<PooledSelector> {
    let tag = d.tag();
    let mut raw: Vec<PooledSelector> = Vec::new();
    let mut push = |strategy: PoolStrategy, selector: String, priority: u8| {
        raw.push(PooledSelector {
            selector,
            strategy,
            priority,
        });
    };

    for (attr, priority) in [
        ("data-testid", 100),
        ("data-test", 97),
        ("data-cy", 97),
        ("data-qa", 97),
    ] {
        if let Some(value) = d.attr(attr) {
            let predicate = attr_eq(attr, value);
            push(PoolStrategy::TestAttribute, predicate.clone(), priority);
            push(
                PoolStrategy::TestAttribute,
                format!("{tag}{predicate}"),
                priority - 1,
            );
        }
    }

    if let Some(id) = d.id().filter(|id| is_stable_id(id)) {
        let ident = css_ident(id);
        push(PoolStrategy::StableId, format!("#{ident}"), 95);
        push(PoolStrategy::StableId, format!("{tag}#{ident}"), 94);
    }

    let label = d.aria_label();
    let role = d.role();
    if let Some(label) = label {
        let predicate = attr_eq("aria-label", label);
        push(PoolStrategy::Aria, predicate.clone(), 90);
        push(PoolStrategy::Aria, format!("{tag}{predicate}"), 89);
        if let Some(role) = role {
            push(
                PoolStrategy::Aria,
                format!("{tag}{}{predicate}", attr_eq("role", role)),
                88,
            );
        }
    }
    if let Some(role) = role {
        push(PoolStrategy::Aria, format!("{tag}{}", attr_eq("role", role)), 86);
    }

    if is_form_element(&tag) {
        let input_type = d.input_type();
        if let Some(name) = d.attr("name") {
            let named = format!("{tag}{}", attr_eq("name", name));
            push(PoolStrategy::FormField, named.clone(), 85);
            if let Some(ty) = input_type.as_deref() {
                push(
                    PoolStrategy::FormField,
                    format!("{named}{}", attr_eq("type", ty)),
                    84,
                );
            }
        }
        if let Some(placeholder) = d.placeholder() {
            push(
                PoolStrategy::FormField,
                format!("{tag}{}", attr_eq("placeholder", placeholder)),
                82,
            );
        }
        if let Some(ty) = input_type.as_deref() {
            push(
                PoolStrategy::FormField,
                format!("{tag}{}", attr_eq("type", ty)),
                80,
            );
        }
    }

    if matches!(tag.as_str(), "button" | "a" | "span" | "div" | "p") {
        let text = d.display_text();
        if !text.is_empty() {
            push(
                PoolStrategy::Text,
                format!("{tag}:has-text({})", css_string(prefix_chars(&text, text_chars))),
                70,
            );
        }
    }

    let stable: Vec<String> = d
        .classes()
        .into_iter()
        .filter(|class| is_stable_class(class))
        .take(3)
        .map(css_ident)
        .collect();
    if stable.len() >= 2 {
        push(
            PoolStrategy::StableClass,
            format!("{tag}.{}", stable.join(".")),
            65,
        );
    }
    for (class, priority) in stable.iter().take(2).zip([62, 61]) {
        push(PoolStrategy::StableClass, format!("{tag}.{class}"), priority);
    }

    if tag == "a" {
        if let Some(href) = d.link_href() {
            push(PoolStrategy::Link, format!("a{}", attr_eq("href", href)), 60);
            let prefix = href.split(['?', '#']).next().unwrap_or_default();
            if !prefix.is_empty() && prefix != href {
                push(
                    PoolStrategy::Link,
                    format!("a[href^={}]", css_string(prefix)),
                    58,
                );
            }
        }
    }

    if let Some(title) = d.title() {
        push(PoolStrategy::Title, format!("{tag}{}", attr_eq("title", title)), 55);
    }

    let parent = d.parent_tag();
    if let Some(parent) = parent.as_deref() {
        if let Some(class) = d
            .parent_class_list()
            .into_iter()
            .find(|class| is_stable_class(class))
        {
            push(
                PoolStrategy::ParentContext,
                format!("{parent}.{} > {tag}", css_ident(class)),
                48,
            );
        }
        push(PoolStrategy::ParentContext, format!("{parent} > {tag}"), 45);
    }

    if let Some(index) = d.sibling_index {
        let scope = parent
            .as_deref()
            .map(|parent| format!("{parent} > "))
            .unwrap_or_default();
        let position = index.saturating_add(1);
        push(
            PoolStrategy::Positional,
            format!("{scope}{tag}:nth-of-type({position})"),
            31,
        );
        push(
            PoolStrategy::Positional,
            format!("{scope}{tag}:nth-child({position})"),
            30,
        );
    }

    let generated = raw.len();
    let mut seen = HashSet::new();
    let mut pool: Vec<PooledSelector> = raw
        .into_iter()
        .filter(|entry| is_valid_selector(&entry.selector))
        .filter(|entry| seen.insert(entry.selector.clone()))
        .collect();
    pool.truncate(limit);

    // supplied selectors sit outside the cap
    let capped = pool.len();
    let mut seen: HashSet<String> = pool.iter().map(|entry| entry.selector.clone()).collect();
    pool.extend(
        d.supplied_selectors()
            .iter()
            .map(|selector| selector.trim())
            .filter(|selector| is_valid_selector(selector))
            .filter(|selector| seen.insert(selector.to_string()))
            .map(|selector| PooledSelector {
                selector: selector.to_string(),
                strategy: PoolStrategy::Supplied,
                priority: SUPPLIED_PRIORITY,
            }),
    );

    debug!(
        "Exhaustive pool: {} generated, {} kept, {} supplied",
        generated,
        capped,
        pool.len() - capped
    );
    for entry in &pool {
        trace!("  [{}] {}", entry.strategy.name(), entry.selector);
    }
    pool
}
