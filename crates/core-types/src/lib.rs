//! Element snapshot primitives shared by the selector engine and the
//! DOM capture collaborators that feed it.

use std::collections::BTreeMap;

/// Geometry captured alongside the element. Informational only.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(default))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Normalized snapshot of one DOM element.
///
/// Produced by the capture script injected into a live page. Every optional
/// field is "not present" when absent; nothing here is ever an error.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "camelCase", default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementDescriptor {
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
    pub text_content: String,
    pub inner_text: String,
    pub bounding_rect: BoundingRect,
    pub href: Option<String>,
    pub src: Option<String>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub title: Option<String>,
    pub role: Option<String>,
    pub aria_label: Option<String>,
    pub parent_tag_name: Option<String>,
    pub parent_classes: Option<String>,
    pub sibling_index: Option<u32>,
    /// Candidates from an upstream, simpler detector.
    pub selectors: Option<Vec<String>>,
}

impl ElementDescriptor {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.inner_text = text.clone();
        self.text_content = text;
        self
    }

    pub fn with_parent(mut self, tag: impl Into<String>, classes: Option<&str>) -> Self {
        self.parent_tag_name = Some(tag.into());
        self.parent_classes = classes.map(str::to_string);
        self
    }

    pub fn with_sibling_index(mut self, index: u32) -> Self {
        self.sibling_index = Some(index);
        self
    }

    /// Lower-cased tag name, `*` when the capture left it blank.
    pub fn tag(&self) -> String {
        let tag = self.tag_name.trim().to_ascii_lowercase();
        if tag.is_empty() {
            "*".to_string()
        } else {
            tag
        }
    }

    /// Non-blank attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id").map(str::trim)
    }

    pub fn title(&self) -> Option<&str> {
        self.attr("title").or_else(|| non_blank(&self.title))
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.attr("placeholder")
            .or_else(|| non_blank(&self.placeholder))
    }

    pub fn role(&self) -> Option<&str> {
        self.attr("role").or_else(|| non_blank(&self.role))
    }

    pub fn aria_label(&self) -> Option<&str> {
        self.attr("aria-label")
            .or_else(|| non_blank(&self.aria_label))
    }

    pub fn link_href(&self) -> Option<&str> {
        self.attr("href").or_else(|| non_blank(&self.href))
    }

    pub fn input_type(&self) -> Option<String> {
        self.attr("type").map(|ty| ty.trim().to_ascii_lowercase())
    }

    /// Whitespace-separated class tokens in document order.
    pub fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|raw| raw.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn parent_tag(&self) -> Option<String> {
        non_blank(&self.parent_tag_name).map(|tag| tag.trim().to_ascii_lowercase())
    }

    pub fn parent_class_list(&self) -> Vec<&str> {
        self.parent_classes
            .as_deref()
            .map(|raw| raw.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Displayable text: `innerText` first, then `textContent`, with runs of
    /// whitespace collapsed to one space.
    pub fn display_text(&self) -> String {
        let source = if self.inner_text.trim().is_empty() {
            &self.text_content
        } else {
            &self.inner_text
        };
        source.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn has_text_content(&self) -> bool {
        !self.text_content.trim().is_empty()
    }

    pub fn supplied_selectors(&self) -> &[String] {
        self.selectors.as_deref().unwrap_or(&[])
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_lowercased_and_defaults_to_universal() {
        assert_eq!(ElementDescriptor::new("BUTTON").tag(), "button");
        assert_eq!(ElementDescriptor::new("  ").tag(), "*");
    }

    #[test]
    fn attribute_fallbacks_use_top_level_fields() {
        let mut descriptor = ElementDescriptor::new("a");
        descriptor.title = Some("Docs".into());
        descriptor.href = Some("/docs".into());
        assert_eq!(descriptor.title(), Some("Docs"));
        assert_eq!(descriptor.link_href(), Some("/docs"));

        let descriptor = descriptor.with_attribute("title", "Attr title");
        assert_eq!(descriptor.title(), Some("Attr title"));
    }

    #[test]
    fn blank_attributes_are_absent() {
        let descriptor = ElementDescriptor::new("div").with_attribute("id", "   ");
        assert_eq!(descriptor.id(), None);
        assert!(descriptor.has_attr("id"));
    }

    #[test]
    fn display_text_prefers_inner_text_and_collapses_whitespace() {
        let mut descriptor = ElementDescriptor::new("p");
        descriptor.text_content = "hidden  raw".into();
        descriptor.inner_text = "  Hello \n  world ".into();
        assert_eq!(descriptor.display_text(), "Hello world");

        descriptor.inner_text.clear();
        assert_eq!(descriptor.display_text(), "hidden raw");
    }

    #[test]
    fn class_tokens_split_on_whitespace() {
        let descriptor = ElementDescriptor::new("div").with_attribute("class", " card  active ");
        assert_eq!(descriptor.classes(), vec!["card", "active"]);
        assert!(ElementDescriptor::new("div").classes().is_empty());
    }

    #[cfg(feature = "serde-full")]
    #[test]
    fn deserializes_capture_payload() {
        let descriptor: ElementDescriptor = serde_json::from_str(
            r#"{
                "tagName": "INPUT",
                "attributes": {"name": "email", "type": "email"},
                "boundingRect": {"x": 1.0, "y": 2.0, "width": 100.0, "height": 20.0},
                "parentTagName": "FORM",
                "siblingIndex": 2
            }"#,
        )
        .unwrap();
        assert_eq!(descriptor.tag(), "input");
        assert_eq!(descriptor.attr("name"), Some("email"));
        assert_eq!(descriptor.parent_tag().as_deref(), Some("form"));
        assert_eq!(descriptor.sibling_index, Some(2));
        assert!(descriptor.text_content.is_empty());
    }
}
