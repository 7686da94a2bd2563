//! Minimal owned XML tree.
//!
//! Documents are read with `quick-xml` into a small element tree that
//! supports the lookups the archive needs: an absolute element path
//! (`/info`), attributes, child elements and text content. Comments,
//! processing instructions, the XML declaration and doctype are dropped.
//! Byte input is decoded by its byte order mark or encoding declaration,
//! defaulting to UTF-8.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::encoding::{EncodingError, decode, detect_encoding};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Errors that can occur while building an XML tree
#[derive(Error, Debug)]
pub enum XmlError {
    /// The document is not well-formed
    #[error("XML parsing error: {0}")]
    Syntax(#[from] quick_xml::Error),
    /// The document is not valid UTF-8
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// The document does not match its declared encoding
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
    /// An entity reference other than the five predefined ones
    #[error("Unknown entity '&{0};'")]
    UnknownEntity(String),
    /// A closing tag with no matching open element
    #[error("Unexpected closing tag </{0}>")]
    UnexpectedEndTag(String),
    /// The document ended inside an element
    #[error("Unclosed element <{0}>")]
    UnclosedTag(String),
    /// Non-whitespace text before or after the root element
    #[error("Content is not allowed outside the root element")]
    ContentOutsideRoot,
    #[error("Document has no root element")]
    NoRoot,
    #[error("Document has more than one root element")]
    MultipleRoots,
}

pub type XmlResult<T> = Result<T, XmlError>;

/// A parsed XML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
    /// Text of this element and its descendants in document order
    content: String,
}

impl XmlElement {
    /// Qualified tag name, including any namespace prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value, `None` if the attribute is not present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Text directly inside this element, excluding child elements
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text of this element and all of its descendants, in document order
    pub fn text_content(&self) -> &str {
        &self.content
    }
}

/// A parsed XML document with exactly one root element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    /// Parse an encoded document.
    ///
    /// A byte order mark takes precedence over the encoding declaration.
    /// Without either the document must be UTF-8.
    pub fn parse(bytes: &[u8]) -> XmlResult<Self> {
        let content = decode_document(bytes)?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> XmlResult<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut reader = Reader::from_str(content);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    stack.push(start_element(e)?);
                }
                Event::Empty(ref e) => {
                    let element = start_element(e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(ref e) => {
                    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
                    let element = match stack.pop() {
                        Some(element) if element.name == name => element,
                        _ => return Err(XmlError::UnexpectedEndTag(name)),
                    };
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(ref e) => {
                    let raw = std::str::from_utf8(e)?;
                    let text = unescape(raw).map_err(quick_xml::Error::from)?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(ref e) => {
                    let text = std::str::from_utf8(e)?;
                    push_text(&mut stack, text)?;
                }
                Event::GeneralRef(ref e) => {
                    let text = match e.resolve_char_ref().map_err(quick_xml::Error::from)? {
                        Some(ch) => ch.to_string(),
                        None => {
                            let name = std::str::from_utf8(e)?;
                            resolve_predefined_entity(name)
                                .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))?
                                .to_string()
                        }
                    };
                    push_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::UnclosedTag(open.name));
        }

        root.map(|root| Self { root }).ok_or(XmlError::NoRoot)
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Resolve an absolute element path such as `/info` or `/class/method`.
    ///
    /// The first segment must name the root element; each following segment
    /// selects the first child with that name.
    pub fn element(&self, path: &str) -> Option<&XmlElement> {
        let mut segments = path
            .strip_prefix('/')?
            .split('/')
            .filter(|segment| !segment.is_empty());

        let first = segments.next()?;
        if self.root.name != first {
            return None;
        }

        segments.try_fold(&self.root, |element, segment| element.child(segment))
    }
}

fn decode_document(bytes: &[u8]) -> XmlResult<Cow<'_, str>> {
    // UTF-16 has to be decoded before the declaration can be read
    if let Some((encoding, bom_len)) = detect_encoding(bytes)
        && (bom_len > 0 || !encoding.is_ascii_compatible())
    {
        return Ok(decode(&bytes[bom_len..], encoding)?);
    }

    // Syntax errors in the first event are reported by the real parse
    let mut reader = Reader::from_reader(bytes);
    if let Ok(Event::Decl(decl)) = reader.read_event()
        && let Some(encoding) = decl.encoder()
    {
        return Ok(decode(bytes, encoding)?);
    }

    Ok(Cow::Borrowed(std::str::from_utf8(bytes)?))
}

fn start_element(e: &BytesStart) -> XmlResult<XmlElement> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw).map_err(quick_xml::Error::from)?;
        attributes.push((key, value.into_owned()));
    }

    Ok(XmlElement {
        name,
        attributes,
        ..XmlElement::default()
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> XmlResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.content.push_str(&element.content);
            parent.children.push(element);
        }
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str) -> XmlResult<()> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(text);
            element.content.push_str(text);
        }
        None if text.trim().is_empty() => {}
        None => return Err(XmlError::ContentOutsideRoot),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_attributes_and_children() {
        let doc = XmlDocument::parse(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated -->
<class name="java.lang.String" modifiers="public final">
  <description>Immutable &lt;b&gt;text&lt;/b&gt; &amp; more</description>
  <method name="length" returns="int"/>
  <method name="isEmpty" returns="boolean"/>
</class>"#,
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.name(), "class");
        assert_eq!(root.attribute("name"), Some("java.lang.String"));
        assert_eq!(root.attribute("missing"), None);
        assert_eq!(root.children().len(), 3);
        assert_eq!(
            root.child("description").unwrap().text(),
            "Immutable <b>text</b> & more"
        );

        let methods: Vec<_> = root
            .children_named("method")
            .filter_map(|m| m.attribute("name"))
            .collect();
        assert_eq!(methods, ["length", "isEmpty"]);
    }

    #[test]
    fn test_element_path() {
        let doc = XmlDocument::parse_str("<info><a><b x=\"1\"/></a></info>").unwrap();
        assert_eq!(doc.element("/info").unwrap().name(), "info");
        assert_eq!(doc.element("/info/a/b").unwrap().attribute("x"), Some("1"));
        assert!(doc.element("/other").is_none());
        assert!(doc.element("/info/c").is_none());
        assert!(doc.element("info").is_none());
        assert!(doc.element("/").is_none());
    }

    #[test]
    fn test_character_references_and_cdata() {
        let doc = XmlDocument::parse_str(
            "<d>caf&#233; &#x41;<![CDATA[<raw> & stuff]]></d>",
        )
        .unwrap();
        assert_eq!(doc.root().text(), "café A<raw> & stuff");
    }

    #[test]
    fn test_escaped_attribute_value() {
        let doc = XmlDocument::parse_str(r#"<info name="a &amp; b &quot;c&quot;"/>"#).unwrap();
        assert_eq!(doc.root().attribute("name"), Some(r#"a & b "c""#));
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let doc = XmlDocument::parse_str("<p>Hello <b>big</b> <i>wide</i> world</p>").unwrap();
        assert_eq!(doc.root().text(), "Hello   world");
        assert_eq!(doc.root().text_content(), "Hello big wide world");
    }

    #[test]
    fn test_byte_order_mark() {
        let doc = XmlDocument::parse("\u{feff}<info/>".as_bytes()).unwrap();
        assert_eq!(doc.root().name(), "info");
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(XmlDocument::parse(b""), Err(XmlError::NoRoot)));
        assert!(matches!(
            XmlDocument::parse(b"<?xml version=\"1.0\"?>\n"),
            Err(XmlError::NoRoot)
        ));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(XmlDocument::parse(b"<info>").is_err());
        assert!(XmlDocument::parse(b"<a><b></a></b>").is_err());
        assert!(XmlDocument::parse(b"</a>").is_err());
        assert!(XmlDocument::parse(b"<a x=\"1\" x=\"2\"/>").is_err());
        assert!(XmlDocument::parse(b"<a>&bogus;</a>").is_err());
        assert!(matches!(
            XmlDocument::parse(b"<a/><b/>"),
            Err(XmlError::MultipleRoots)
        ));
        assert!(matches!(
            XmlDocument::parse(b"junk<a/>"),
            Err(XmlError::ContentOutsideRoot)
        ));
        assert!(matches!(
            XmlDocument::parse(&[b'<', b'a', b'>', 0xff, b'<', b'/', b'a', b'>']),
            Err(XmlError::Utf8(_))
        ));
        assert!(matches!(
            XmlDocument::parse(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><a>\xff</a>"),
            Err(XmlError::Encoding(_))
        ));
    }

    #[test]
    fn test_declared_single_byte_encoding() {
        let doc = XmlDocument::parse(
            b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<info name=\"caf\xe9\">na\xefve</info>",
        )
        .unwrap();
        assert_eq!(doc.root().attribute("name"), Some("café"));
        assert_eq!(doc.root().text(), "naïve");
    }

    #[test]
    fn test_utf16_documents() {
        let text = "<?xml version=\"1.0\" encoding=\"UTF-16\"?><info name=\"café\"/>";

        let mut little_endian = vec![0xff, 0xfe];
        little_endian.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        let doc = XmlDocument::parse(&little_endian).unwrap();
        assert_eq!(doc.root().attribute("name"), Some("café"));

        // No byte order mark: the byte pattern of `<?` gives the byte order away
        let big_endian: Vec<u8> = text.encode_utf16().flat_map(u16::to_be_bytes).collect();
        let doc = XmlDocument::parse(&big_endian).unwrap();
        assert_eq!(doc.root().attribute("name"), Some("café"));
    }
}
