use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::opml::OpmlError;
use crate::podcast::Attributes;

/// Default limit on element nesting. Deeper documents are rejected before
/// the recursive outline walk ever sees them.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// One decoded XML element: its name, attributes and child elements.
///
/// Text content is dropped; OPML carries everything in attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&OutlineNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Nested `<outline>` elements of `node`, as a sequence.
///
/// An absent node and a node without outline children both give an empty
/// sequence; a single child gives a one-element sequence.
pub fn outlines(node: Option<&OutlineNode>) -> impl Iterator<Item = &OutlineNode> {
    node.into_iter()
        .flat_map(|n| n.children.iter())
        .filter(|c| c.name == "outline")
}

fn malformed(reason: impl Into<String>) -> OpmlError {
    OpmlError::MalformedDocument(reason.into())
}

/// Decodes XML text into its root element.
///
/// Returns `Ok(None)` when the text holds no element at all (only
/// whitespace, comments or declarations).
///
/// # Errors
///
/// [`OpmlError::MalformedDocument`] for any well-formedness violation:
/// syntax errors, mismatched or unclosed tags, unknown entities, duplicate
/// attributes, text or a second element outside the root, or nesting deeper
/// than `max_depth`.
pub fn decode(content: &str, max_depth: usize) -> Result<Option<OutlineNode>, OpmlError> {
    // SEC-002: quick-xml (0.37) never expands <!ENTITY> declarations. Only the
    // five predefined entities resolve; anything else fails in
    // `decode_and_unescape_value()`.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<OutlineNode> = Vec::new();
    let mut root: Option<OutlineNode> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                check_depth(stack.len() + 1, max_depth)?;
                let node = element(&e, &reader)?;
                stack.push(node);
            }
            Ok(Event::Empty(e)) => {
                check_depth(stack.len() + 1, max_depth)?;
                let node = element(&e, &reader)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                // quick-xml checks end names; an End always has an open element
                let node = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Text(t)) if stack.is_empty() && !t.iter().all(u8::is_ascii_whitespace) => {
                return Err(malformed("text outside the root element"));
            }
            Ok(Event::CData(_)) if stack.is_empty() => {
                return Err(malformed("text outside the root element"));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(malformed(format!(
                    "{} at position {}",
                    e,
                    reader.error_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(malformed(format!("unclosed element <{}>", open.name)));
    }

    Ok(root)
}

/// SEC-003: Bounds nesting so the recursive outline walk cannot overflow.
fn check_depth(depth: usize, max_depth: usize) -> Result<(), OpmlError> {
    if depth > max_depth {
        return Err(malformed(format!(
            "nesting depth exceeds maximum of {} levels",
            max_depth
        )));
    }
    Ok(())
}

/// Places a completed element under its parent, or as the document root.
fn attach(
    stack: &mut [OutlineNode],
    root: &mut Option<OutlineNode>,
    node: OutlineNode,
) -> Result<(), OpmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(malformed("more than one root element")),
    }
    Ok(())
}

fn element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<OutlineNode, OpmlError> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| malformed(format!("invalid element name: {}", err)))?
        .to_string();

    let decoder = reader.decoder();
    let mut attributes = Attributes::new();
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|err| malformed(format!("in <{}>: {}", name, err)))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| malformed(format!("invalid attribute name: {}", err)))?;
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|err| malformed(format!("attribute {:?} of <{}>: {}", key, name, err)))?;
        attributes.push(key, value);
    }

    Ok(OutlineNode {
        name,
        attributes,
        children: Vec::new(),
    })
}
