//! A small owned XML tree with path queries, built on top of `quick-xml`.
//!
//! The WeatherBug API returns namespaced XML (`aws:` prefixed elements with
//! attribute-heavy payloads). The data layer only ever needs three lookups
//! against a parsed response: a single descendant element, an ordered list of
//! descendant elements, and a text value. This module provides exactly that
//! surface; everything else (predicates, axes, wildcards) is out of scope.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

/// Error raised while turning response bytes into a [`Document`].
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(#[from] quick_xml::Error),

    #[error("malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("document has no root element")]
    NoRoot,
}

/// A parsed XML document, owning its element tree.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse a document from its textual form.
    ///
    /// Text and attribute values are entity-unescaped. The WeatherBug feed
    /// embeds HTML escapes (`&deg;`) the XML parser does not know; those are
    /// kept verbatim instead of failing the parse, and normalized later by
    /// the units extractor.
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(element_from_start(&start)?);
                }
                Event::Empty(start) => {
                    let elem = element_from_start(&start)?;
                    attach(&mut stack, &mut root, elem);
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let value = text
                            .unescape()
                            .map(Cow::into_owned)
                            .unwrap_or_else(|_| String::from_utf8_lossy(text.as_ref()).into_owned());
                        current.text.push_str(&value);
                    }
                }
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(cdata.as_ref()));
                    }
                }
                Event::End(_) => {
                    if let Some(elem) = stack.pop() {
                        attach(&mut stack, &mut root, elem);
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes
                // carry nothing the data layer reads.
                _ => {}
            }
        }

        root.map(|root| Self { root }).ok_or(XmlError::NoRoot)
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// One element of a parsed document: a name, attributes, direct text and
/// child elements, queryable by path expression.
///
/// Path expressions are a fixed mini-dialect, sufficient for the WeatherBug
/// schema: `/`-separated element steps using qualified names as written in
/// the document (`aws:month`), optionally ending in an attribute step
/// (`@number`). A leading `/` anchors the first step at this element itself
/// rather than at its children, so the absolute paths the binding layer uses
/// against a response root (`/aws:weather`) resolve the same way they would
/// in a full XPath engine.
#[derive(Debug, Clone, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// The qualified element name, prefix included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of an attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The element's own text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// The first element matched by `path`, if any.
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// All elements matched by `path`, in document order.
    ///
    /// A path ending in an attribute step selects no elements.
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        let (steps, attribute) = split_path(path);
        if attribute.is_some() {
            return Vec::new();
        }
        self.resolve(path, &steps)
    }

    /// The text value selected by `path`, or the empty string when the path
    /// resolves to nothing.
    ///
    /// An element path yields the string-value of the first match (its text
    /// plus the text of its descendants); a trailing `@attr` step yields that
    /// attribute of the first matched element. `value_of("@attr")` reads the
    /// attribute off this element itself.
    pub fn value_of(&self, path: &str) -> String {
        let (steps, attribute) = split_path(path);
        let Some(target) = self.resolve(path, &steps).into_iter().next() else {
            return String::new();
        };
        match attribute {
            Some(name) => target.attribute(name).unwrap_or_default().to_string(),
            None => target.string_value(),
        }
    }

    /// Resolves element steps, honouring the leading-`/` self anchor.
    fn resolve<'a>(&'a self, path: &str, steps: &[&str]) -> Vec<&'a Element> {
        let mut remaining = steps;
        if path.starts_with('/') {
            match remaining.first() {
                Some(first) if *first == self.name => remaining = &remaining[1..],
                Some(_) => return Vec::new(),
                None => {}
            }
        }

        let mut current = vec![self];
        for step in remaining {
            let mut next = Vec::new();
            for elem in current {
                next.extend(elem.children.iter().filter(|child| child.name == *step));
            }
            current = next;
        }
        current
    }

    /// Concatenated text of this element and its descendants.
    fn string_value(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.string_value());
        }
        out
    }
}

/// Splits a path into its element steps and the optional trailing attribute
/// step.
fn split_path(path: &str) -> (Vec<&str>, Option<&str>) {
    let mut steps: Vec<&str> = path.split('/').filter(|step| !step.is_empty()).collect();
    let mut attribute = None;
    if steps.last().is_some_and(|step| step.starts_with('@')) {
        attribute = steps.pop().map(|step| &step[1..]);
    }
    (steps, attribute)
}

fn element_from_start(start: &quick_xml::events::BytesStart<'_>) -> Result<Element, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map(Cow::into_owned)
            .unwrap_or_else(|_| String::from_utf8_lossy(&attribute.value).into_owned());
        attributes.push((key, value));
    }
    Ok(Element { name, attributes, children: Vec::new(), text: String::new() })
}

/// Hands a finished element to its parent, or makes it the root.
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, elem: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(elem),
        None => {
            if root.is_none() {
                *root = Some(elem);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <aws:weather xmlns:aws="http://www.aws.com/aws">
          <aws:alerts>
            <aws:alert><aws:id>a1</aws:id></aws:alert>
            <aws:alert><aws:id>a2</aws:id></aws:alert>
          </aws:alerts>
          <aws:stations>
            <aws:station id="KSMO" city="Santa Monica" distance="2.5"/>
          </aws:stations>
          <aws:units>&amp;deg;F</aws:units>
        </aws:weather>"#;

    #[test]
    fn parses_nested_elements_in_document_order() {
        let doc = Document::parse(SAMPLE).expect("sample must parse");
        let alerts = doc.root().find_all("aws:alerts/aws:alert");

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].value_of("aws:id"), "a1");
        assert_eq!(alerts[1].value_of("aws:id"), "a2");
    }

    #[test]
    fn value_of_reads_attributes_and_text() {
        let doc = Document::parse(SAMPLE).expect("sample must parse");
        let root = doc.root();

        assert_eq!(root.value_of("aws:stations/aws:station/@id"), "KSMO");
        assert_eq!(root.value_of("aws:stations/aws:station/@city"), "Santa Monica");
        assert_eq!(root.value_of("aws:alerts/aws:alert/aws:id"), "a1");
    }

    #[test]
    fn value_of_yields_empty_string_when_nothing_matches() {
        let doc = Document::parse(SAMPLE).expect("sample must parse");

        assert_eq!(doc.root().value_of("aws:nowhere"), "");
        assert_eq!(doc.root().value_of("aws:stations/aws:station/@missing"), "");
    }

    #[test]
    fn leading_slash_anchors_at_the_element_itself() {
        let doc = Document::parse(SAMPLE).expect("sample must parse");
        let root = doc.root();

        assert_eq!(root.find_all("/aws:weather").len(), 1);
        assert!(root.find_all("/aws:somethingelse").is_empty());
        assert_eq!(root.find_all("/aws:weather/aws:alerts/aws:alert").len(), 2);
    }

    #[test]
    fn keeps_unknown_entities_verbatim() {
        // The feed double-escapes the degree entity; after XML unescaping the
        // text must read "&deg;F" for the units extractor to normalize.
        let doc = Document::parse(SAMPLE).expect("sample must parse");
        assert_eq!(doc.root().value_of("aws:units"), "&deg;F");
    }

    #[test]
    fn attribute_paths_select_no_elements() {
        let doc = Document::parse(SAMPLE).expect("sample must parse");
        assert!(doc.root().find_all("aws:stations/aws:station/@id").is_empty());
    }

    #[test]
    fn rejects_documents_without_a_root() {
        assert!(matches!(Document::parse("  <!-- nothing -->  "), Err(XmlError::NoRoot)));
    }

    #[test]
    fn self_closing_elements_are_children_too() {
        let doc = Document::parse(r#"<a><b x="1"/><b x="2"/></a>"#).expect("must parse");
        let matched = doc.root().find_all("b");

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[1].attribute("x"), Some("2"));
    }
}
