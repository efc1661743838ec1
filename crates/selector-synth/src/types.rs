//! Core types for selector synthesis

use serde::{Deserialize, Serialize};

/// Candidate tier
///
/// Closed set of generation tiers, most robust first:
/// - Attribute: test ids, stable ids, ARIA, form names
/// - PartialMatch: prefix/suffix/word attribute matches and structure
/// - State: interactive and UI-state pseudo-classes
/// - Text: text-content matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Attribute,
    PartialMatch,
    State,
    Text,
}

impl Tier {
    /// Numeric rank, 1 (most robust) through 4
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Attribute => 1,
            Tier::PartialMatch => 2,
            Tier::State => 3,
            Tier::Text => 4,
        }
    }

    /// Get tier name as string
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Attribute => "attribute",
            Tier::PartialMatch => "partial-match",
            Tier::State => "state",
            Tier::Text => "text",
        }
    }

    /// All tiers in merge order
    pub fn all() -> [Tier; 4] {
        [Tier::Attribute, Tier::PartialMatch, Tier::State, Tier::Text]
    }
}

/// One synthesized selector with its static priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub selector: String,
    pub tier: Tier,
    /// Assigned by the rule that produced it (1..=100), never recomputed.
    pub priority: u8,
}

impl Candidate {
    pub fn new(selector: impl Into<String>, tier: Tier, priority: u8) -> Self {
        Self {
            selector: selector.into(),
            tier,
            priority,
        }
    }
}

/// A selector with its four independent quality scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSelector {
    pub selector: String,
    pub priority: u8,
    pub reliability: f64,
    pub browser_compatibility: f64,
    pub uniqueness: f64,
    pub stability: f64,
}

/// Scores and XPath attached to the primary selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationMetadata {
    pub priority: u8,
    pub reliability: f64,
    pub browser_compatibility: f64,
    pub uniqueness: f64,
    pub stability: f64,
    /// Last-resort locator; always starts with `//`.
    pub xpath: String,
}

/// Result of the tiered pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobustSelectorResult {
    pub selector: String,
    pub fallback_selectors: Vec<String>,
    pub automation_metadata: AutomationMetadata,
}

impl RobustSelectorResult {
    /// Ordered attempts: primary, each fallback, then the XPath.
    pub fn fallback_chain(&self) -> Vec<FallbackLink> {
        build_chain(
            &self.selector,
            &self.fallback_selectors,
            &self.automation_metadata.xpath,
        )
    }
}

/// Result of the flat ten-strategy pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhaustiveSelectorResult {
    pub primary: String,
    pub fallbacks: Vec<String>,
    pub xpath: String,
    /// Every surviving candidate, best first.
    pub validated: Vec<ScoredSelector>,
}

impl ExhaustiveSelectorResult {
    /// Ordered attempts: primary, each fallback, then the XPath.
    pub fn fallback_chain(&self) -> Vec<FallbackLink> {
        build_chain(&self.primary, &self.fallbacks, &self.xpath)
    }
}

/// How a consumer should evaluate a selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    /// Standard CSS
    Css,
    /// CSS extended with text pseudo-classes
    Text,
    /// XPath expression
    XPath,
}

impl SelectorKind {
    /// Get kind name as string
    pub fn name(&self) -> &'static str {
        match self {
            SelectorKind::Css => "css",
            SelectorKind::Text => "text",
            SelectorKind::XPath => "xpath",
        }
    }

    /// Classify an emitted selector string
    pub fn classify(selector: &str) -> Self {
        if selector.starts_with("xpath:") || selector.starts_with("//") {
            SelectorKind::XPath
        } else if crate::predicates::is_text_selector(selector) {
            SelectorKind::Text
        } else {
            SelectorKind::Css
        }
    }
}

/// One entry of a fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackLink {
    pub kind: SelectorKind,
    pub selector: String,
}

fn build_chain(primary: &str, fallbacks: &[String], xpath: &str) -> Vec<FallbackLink> {
    std::iter::once(primary)
        .chain(fallbacks.iter().map(String::as_str))
        .map(|selector| FallbackLink {
            kind: SelectorKind::classify(selector),
            selector: selector.to_string(),
        })
        .chain(std::iter::once(FallbackLink {
            kind: SelectorKind::XPath,
            selector: xpath.to_string(),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_rank_order() {
        let ranks: Vec<u8> = Tier::all().iter().map(Tier::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert!(Tier::Attribute < Tier::Text);
    }

    #[test]
    fn test_selector_kind_classify() {
        assert_eq!(SelectorKind::classify("#save"), SelectorKind::Css);
        assert_eq!(
            SelectorKind::classify("button:has-text(\"Save\")"),
            SelectorKind::Text
        );
        assert_eq!(
            SelectorKind::classify("xpath://button[1]"),
            SelectorKind::XPath
        );
        assert_eq!(SelectorKind::classify("//button[1]").name(), "xpath");
        assert_eq!(SelectorKind::Text.name(), "text");
    }

    #[test]
    fn test_fallback_chain_ends_with_xpath() {
        let result = RobustSelectorResult {
            selector: "#save".into(),
            fallback_selectors: vec!["button#save".into()],
            automation_metadata: AutomationMetadata {
                priority: 95,
                reliability: 0.8,
                browser_compatibility: 1.0,
                uniqueness: 0.9,
                stability: 0.8,
                xpath: "//button[@id='save' and not(@disabled)]".into(),
            },
        };

        let chain = result.fallback_chain();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].selector, "#save");
        assert_eq!(chain[2].kind, SelectorKind::XPath);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = ExhaustiveSelectorResult {
            primary: "div".into(),
            fallbacks: Vec::new(),
            xpath: "//div[1]".into(),
            validated: vec![ScoredSelector {
                selector: "div".into(),
                priority: 1,
                reliability: 0.3,
                browser_compatibility: 1.0,
                uniqueness: 0.55,
                stability: 0.3,
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["validated"][0].get("browserCompatibility").is_some());
    }
}
