/// In-memory XML element.
///
/// Names and attribute keys are kept exactly as written (qualified names
/// included), so namespace declarations survive a read/write cycle. An element
/// holds either child elements or a single text value, which is all the mapper
/// produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn builder_sets_attribute_and_text() {
        let element = Element::new("eprint")
            .with_attribute("xmlns", "urn:test")
            .with_text("body");
        assert_eq!(element.attribute("xmlns"), Some("urn:test"));
        assert_eq!(element.text(), Some("body"));
        assert!(element.child("missing").is_none());
    }
}
