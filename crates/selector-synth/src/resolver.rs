//! Chain assembly: primary selector, ordered fallbacks and XPath

use selector_core_types::ElementDescriptor;
use tracing::debug;

use crate::config::SynthesisConfig;
use crate::errors::SynthesisError;
use crate::exhaustive::exhaustive_pool;
use crate::predicates::is_valid_selector;
use crate::scorer::score_selector;
use crate::strategies::{generate_candidates, rank_candidates};
use crate::syntax::{attr_eq, css_ident};
use crate::types::{
    AutomationMetadata, ExhaustiveSelectorResult, RobustSelectorResult, ScoredSelector,
    SelectorKind,
};
use crate::xpath::{advanced_xpath, simple_xpath};

/// Priority reported for the last-resort selector.
const LAST_RESORT_PRIORITY: u8 = 1;

/// Selector synthesizer trait
///
/// Both pipelines are exposed; the calling collaborator picks one.
pub trait SelectorSynthesizer: Send + Sync {
    /// Tiered CSS pipeline with scored primary and guarded XPath
    fn synthesize_robust(&self, descriptor: &ElementDescriptor) -> RobustSelectorResult;

    /// Flat ten-strategy pipeline with every survivor scored
    fn synthesize_exhaustive(&self, descriptor: &ElementDescriptor) -> ExhaustiveSelectorResult;
}

/// Default synthesizer implementation
#[derive(Debug, Clone, Default)]
pub struct DefaultSelectorSynthesizer {
    config: SynthesisConfig,
}

impl DefaultSelectorSynthesizer {
    /// Create a synthesizer with validated limits
    pub fn new(config: SynthesisConfig) -> Result<Self, SynthesisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }
}

impl SelectorSynthesizer for DefaultSelectorSynthesizer {
    fn synthesize_robust(&self, descriptor: &ElementDescriptor) -> RobustSelectorResult {
        let candidates = generate_candidates(descriptor, &self.config);
        debug!(
            "Generated {} tiered candidates for <{}>",
            candidates.len(),
            descriptor.tag()
        );

        let mut ranked = rank_candidates(candidates, self.config.max_candidates).into_iter();
        let (selector, priority) = match ranked.next() {
            Some(top) => (top.selector, top.priority),
            None => (last_resort(descriptor), LAST_RESORT_PRIORITY),
        };
        let fallback_selectors: Vec<String> = ranked
            .map(|candidate| candidate.selector)
            .take(self.config.max_fallbacks)
            .collect();

        let scored = score_selector(&selector, priority, descriptor);
        debug!(
            "Robust primary {} ({}, priority {}, reliability {:.2})",
            selector,
            SelectorKind::classify(&selector).name(),
            priority,
            scored.reliability
        );

        RobustSelectorResult {
            selector,
            fallback_selectors,
            automation_metadata: AutomationMetadata {
                priority,
                reliability: scored.reliability,
                browser_compatibility: scored.browser_compatibility,
                uniqueness: scored.uniqueness,
                stability: scored.stability,
                xpath: advanced_xpath(descriptor, self.config.text_snippet_chars),
            },
        }
    }

    fn synthesize_exhaustive(&self, descriptor: &ElementDescriptor) -> ExhaustiveSelectorResult {
        let pool = exhaustive_pool(
            descriptor,
            self.config.exhaustive_pool_limit,
            self.config.text_snippet_chars,
        );

        let mut validated: Vec<ScoredSelector> = pool
            .iter()
            .map(|entry| score_selector(&entry.selector, entry.priority, descriptor))
            .collect();
        validated.sort_by(|a, b| {
            b.browser_compatibility
                .total_cmp(&a.browser_compatibility)
                .then_with(|| b.reliability.total_cmp(&a.reliability))
                .then_with(|| b.priority.cmp(&a.priority))
        });

        if validated.is_empty() {
            let selector = last_resort(descriptor);
            debug!("Exhaustive pool empty, using last resort {}", selector);
            validated.push(score_selector(&selector, LAST_RESORT_PRIORITY, descriptor));
        }

        let primary = validated[0].selector.clone();
        let fallbacks = validated
            .iter()
            .skip(1)
            .take(self.config.exhaustive_fallbacks)
            .map(|scored| scored.selector.clone())
            .collect();

        ExhaustiveSelectorResult {
            primary,
            fallbacks,
            xpath: simple_xpath(descriptor, self.config.text_snippet_chars),
            validated,
        }
    }
}

/// Single-attribute selector that is never empty: `#id`, `[data-testid]`,
/// `[name]`, `[aria-label]`, then the bare tag.
pub fn last_resort(descriptor: &ElementDescriptor) -> String {
    let options = [
        descriptor.id().map(|id| format!("#{}", css_ident(id))),
        descriptor
            .attr("data-testid")
            .map(|value| attr_eq("data-testid", value)),
        descriptor.attr("name").map(|value| attr_eq("name", value)),
        descriptor
            .aria_label()
            .map(|value| attr_eq("aria-label", value)),
    ];
    options
        .into_iter()
        .flatten()
        .find(|selector| is_valid_selector(selector))
        .unwrap_or_else(|| descriptor.tag())
}

/// Tiered pipeline with default limits.
pub fn synthesize_robust(descriptor: &ElementDescriptor) -> RobustSelectorResult {
    DefaultSelectorSynthesizer::default().synthesize_robust(descriptor)
}

/// Flat pipeline with default limits.
pub fn synthesize_exhaustive(descriptor: &ElementDescriptor) -> ExhaustiveSelectorResult {
    DefaultSelectorSynthesizer::default().synthesize_exhaustive(descriptor)
}

/// Decode a descriptor captured as camelCase JSON.
pub fn parse_descriptor(json: &str) -> Result<ElementDescriptor, SynthesisError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_resort_order() {
        let d = ElementDescriptor::new("input")
            .with_attribute("name", "q")
            .with_attribute("aria-label", "Search");
        assert_eq!(last_resort(&d), "[name=\"q\"]");

        let d = ElementDescriptor::new("DIV");
        assert_eq!(last_resort(&d), "div");

        // unstable ids still win here
        let d = ElementDescriptor::new("div").with_attribute("id", "a1b2c3d4");
        assert_eq!(last_resort(&d), "#a1b2c3d4");
    }

    #[test]
    fn test_last_resort_skips_invalid() {
        let d = ElementDescriptor::new("span")
            .with_attribute("id", "null")
            .with_attribute("data-testid", "badge");
        assert_eq!(last_resort(&d), "[data-testid=\"badge\"]");
    }

    #[test]
    fn test_robust_fallbacks_are_bounded_and_distinct() {
        let d = ElementDescriptor::new("input")
            .with_attribute("data-testid", "email")
            .with_attribute("id", "email")
            .with_attribute("name", "email")
            .with_attribute("type", "email");
        let result = synthesize_robust(&d);
        assert_eq!(result.selector, "[data-testid=\"email\"]");
        assert_eq!(result.fallback_selectors.len(), 7);
        assert!(!result.fallback_selectors.contains(&result.selector));
    }

    #[test]
    fn test_custom_limits() {
        let synthesizer = DefaultSelectorSynthesizer::new(SynthesisConfig {
            max_candidates: 3,
            max_fallbacks: 2,
            exhaustive_fallbacks: 1,
            ..SynthesisConfig::default()
        })
        .unwrap();
        assert_eq!(synthesizer.config().max_candidates, 3);
        let d = ElementDescriptor::new("button")
            .with_attribute("data-testid", "go")
            .with_attribute("aria-label", "Go");
        assert_eq!(synthesizer.synthesize_robust(&d).fallback_selectors.len(), 2);
        assert_eq!(synthesizer.synthesize_exhaustive(&d).fallbacks.len(), 1);
    }

    #[test]
    fn test_last_sibling_index_does_not_panic() {
        let d = ElementDescriptor::new("li")
            .with_parent("ul", None)
            .with_sibling_index(u32::MAX);
        let robust = synthesize_robust(&d);
        assert!(!robust.selector.is_empty());
        let exhaustive = synthesize_exhaustive(&d);
        assert_eq!(exhaustive.xpath, format!("//ul/li[{}]", u32::MAX));
        assert!(exhaustive
            .validated
            .iter()
            .any(|s| s.selector == format!("ul > li:nth-of-type({})", u32::MAX)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SynthesisConfig {
            max_candidates: 0,
            ..SynthesisConfig::default()
        };
        assert!(DefaultSelectorSynthesizer::new(config).is_err());
    }

    #[test]
    fn test_parse_descriptor_errors_on_bad_json() {
        assert!(matches!(
            parse_descriptor("{not json"),
            Err(SynthesisError::Descriptor(_))
        ));
        let d = parse_descriptor(r#"{"tagName":"a"}"#).unwrap();
        assert_eq!(d.tag(), "a");
    }
}
