//! Anti-pattern predicates shared by the generator and the scorer
//!
//! Machine-generated ids, CSS-in-JS class names and position-dependent
//! selectors all break as soon as the page is rebuilt; these checks keep
//! them out of the top of the chain.

use once_cell::sync::Lazy;
use regex::Regex;

/// Eight or more hex characters anywhere in the value.
static HEX_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[0-9a-f]{8,}").expect("hex hash pattern"));

static LAYOUT_PREFIXES: &[&str] = &["p-", "m-", "w-", "h-", "text-", "bg-", "border-"];

static SEMANTIC_WORDS: &[&str] = &[
    "header", "footer", "nav", "menu", "sidebar", "main", "content", "container", "wrapper",
    "button", "btn", "link", "form", "field", "input", "search", "submit", "login", "logout",
    "signup", "card", "modal", "dialog", "popup", "dropdown", "tooltip", "tab", "panel", "list",
    "item", "row", "table", "title", "label", "logo", "icon", "avatar", "banner", "hero",
    "active", "selected", "disabled", "primary", "secondary", "error", "success", "warning",
];

static POSITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r":(?:nth-child|nth-last-child|nth-of-type|nth-last-of-type|first-child|last-child|only-child|first-of-type|last-of-type|only-of-type)\b",
    )
    .expect("positional pattern")
});

static NTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":nth-(?:last-)?(?:child|of-type)\(").expect("nth pattern"));

static SIMPLE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#-?[A-Za-z_][\w-]*$").expect("simple id pattern"));

static PARTIAL_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[[\w-]+[\^$*]="#).expect("partial attribute pattern"));

static PARTIAL_CLASS_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[class[~^$*|]="#).expect("partial class pattern"));

static CLASS_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(-?[_a-zA-Z][\w-]*)").expect("class token pattern"));

static CLASS_ATTR_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[class[~^$*|]?="((?:[^"\\]|\\.)*)"\]"#).expect("class attribute pattern")
});

const TEXT_PSEUDO: &[&str] = &[":has-text(", ":text-is(", ":text-matches(", ":text(", ":contains("];

/// Ids that look hand-written rather than framework-generated.
pub fn is_stable_id(id: &str) -> bool {
    if id.chars().count() < 2 {
        return false;
    }
    if HEX_HASH.is_match(id) {
        return false;
    }
    let lower = id.to_ascii_lowercase();
    if ["react", "auto", "generated"]
        .iter()
        .any(|marker| lower.contains(marker))
    {
        return false;
    }
    !id.chars().all(|c| c.is_ascii_digit())
}

/// Class tokens that are neither CSS-in-JS output, hashes, nor utility classes.
pub fn is_stable_class(class: &str) -> bool {
    if class.chars().count() < 2 {
        return false;
    }
    if class.starts_with("css-") || class.starts_with("sc-") {
        return false;
    }
    if HEX_HASH.is_match(class) {
        return false;
    }
    !LAYOUT_PREFIXES.iter().any(|prefix| class.starts_with(prefix))
}

pub fn is_semantic_class_name(class: &str) -> bool {
    let lower = class.to_ascii_lowercase();
    SEMANTIC_WORDS.iter().any(|word| lower.contains(word))
}

pub fn is_form_element(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select" | "button" | "form")
}

pub fn is_interactive_element(tag: &str) -> bool {
    matches!(
        tag,
        "button" | "input" | "textarea" | "select" | "a" | "details" | "summary"
    )
}

/// Syntactic sanity filter applied to every candidate before ranking.
pub fn is_valid_selector(selector: &str) -> bool {
    if selector.starts_with("xpath:") {
        return true;
    }
    if selector.is_empty() {
        return false;
    }
    if selector.contains("undefined") || selector.contains("null") {
        return false;
    }
    !(selector.contains("..") || selector.contains(">>") || selector.contains("  "))
}

/// Uses one of the engine-specific text pseudo-classes.
pub fn is_text_selector(selector: &str) -> bool {
    TEXT_PSEUDO.iter().any(|pseudo| selector.contains(pseudo))
}

/// Depends on the element's position among its siblings.
pub fn is_positional(selector: &str) -> bool {
    POSITIONAL.is_match(&strip_quoted(selector))
}

pub fn uses_nth(selector: &str) -> bool {
    NTH.is_match(&strip_quoted(selector))
}

/// `#ident` with nothing else attached.
pub fn is_simple_id_selector(selector: &str) -> bool {
    SIMPLE_ID.is_match(selector)
}

pub fn is_simple_stable_id_selector(selector: &str) -> bool {
    is_simple_id_selector(selector) && is_stable_id(&selector[1..])
}

pub fn uses_partial_attribute_match(selector: &str) -> bool {
    PARTIAL_ATTR.is_match(selector)
}

pub fn uses_partial_class_match(selector: &str) -> bool {
    PARTIAL_CLASS_ATTR.is_match(selector)
}

/// Class names referenced either as `.token` or through a `[class…="…"]` predicate.
pub fn class_references(selector: &str) -> Vec<String> {
    let mut refs: Vec<String> = CLASS_TOKEN
        .captures_iter(&strip_quoted(selector))
        .map(|caps| caps[1].to_string())
        .collect();
    for caps in CLASS_ATTR_VALUE.captures_iter(selector) {
        refs.extend(caps[1].split_whitespace().map(str::to_string));
    }
    refs
}

pub fn references_css_in_js_class(selector: &str) -> bool {
    class_references(selector)
        .iter()
        .any(|class| class.starts_with("css-"))
}

pub fn references_hashed_class(selector: &str) -> bool {
    class_references(selector)
        .iter()
        .any(|class| HEX_HASH.is_match(class))
}

/// Nothing but a tag name (or the universal selector).
pub fn is_bare_tag(selector: &str) -> bool {
    selector == "*"
        || (!selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

/// Selector text with quoted segments blanked out, so that structure
/// checks never match inside attribute values or text arguments.
pub(crate) fn strip_quoted(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in selector.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                    out.push(c);
                }
            }
            None => {
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_id() {
        assert!(is_stable_id("submit-btn"));
        assert!(is_stable_id("main_nav"));
        assert!(!is_stable_id("a1b2c3d4"));
        assert!(!is_stable_id("x"));
        assert!(!is_stable_id("12345"));
        assert!(!is_stable_id("react-select-3"));
        assert!(!is_stable_id("autoId"));
        assert!(!is_stable_id("generated-field"));
    }

    #[test]
    fn test_stable_class() {
        assert!(is_stable_class("nav-link"));
        assert!(!is_stable_class("css-x7y8z9"));
        assert!(!is_stable_class("sc-bdVaJa"));
        assert!(!is_stable_class("deadbeef01"));
        assert!(!is_stable_class("p-4"));
        assert!(!is_stable_class("text-center"));
        assert!(!is_stable_class("border-gray"));
        assert!(!is_stable_class("a"));
    }

    #[test]
    fn test_semantic_class() {
        assert!(is_semantic_class_name("site-header"));
        assert!(is_semantic_class_name("Modal-Body"));
        assert!(!is_semantic_class_name("x7y8z9"));
    }

    #[test]
    fn test_element_kinds() {
        assert!(is_form_element("form"));
        assert!(!is_form_element("a"));
        assert!(is_interactive_element("summary"));
        assert!(!is_interactive_element("div"));
    }

    #[test]
    fn test_valid_selector() {
        assert!(is_valid_selector("#ok"));
        assert!(is_valid_selector("xpath://div[..]"));
        assert!(!is_valid_selector(""));
        assert!(!is_valid_selector("#undefined"));
        assert!(!is_valid_selector("[name=\"null\"]"));
        assert!(!is_valid_selector("a..b"));
        assert!(!is_valid_selector("div >> span"));
        assert!(!is_valid_selector("div  span"));
    }

    #[test]
    fn test_positional_ignores_quoted_text() {
        assert!(is_positional("li:nth-child(2)"));
        assert!(is_positional("div:first-child"));
        assert!(!is_positional("button:has-text(\":first-child\")"));
        assert!(uses_nth("li:nth-of-type(3)"));
        assert!(!uses_nth("li:first-child"));
    }

    #[test]
    fn test_class_references() {
        let refs = class_references("div.card.css-1a2b > span[class~=\"deadbeef99 x\"]");
        assert_eq!(refs, vec!["card", "css-1a2b", "deadbeef99", "x"]);
        assert!(references_css_in_js_class("div.css-abc"));
        assert!(references_hashed_class("[class$=\"a1b2c3d4e5\"]"));
        assert!(!references_hashed_class("a[href=\"x.deadbeef00\"]"));
    }

    #[test]
    fn test_simple_id_and_bare_tag() {
        assert!(is_simple_id_selector("#submit-btn"));
        assert!(!is_simple_id_selector("button#submit-btn"));
        assert!(!is_simple_stable_id_selector("#a1b2c3d4"));
        assert!(is_bare_tag("div"));
        assert!(is_bare_tag("*"));
        assert!(!is_bare_tag("div.card"));
    }
}
