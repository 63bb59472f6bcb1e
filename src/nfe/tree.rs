use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;

use super::NFE_NAMESPACE;
use crate::core::ExtractError;

/// NF-e documents nest about a dozen levels deep; anything far beyond is
/// rejected rather than built.
const MAX_DEPTH: usize = 256;

/// An owned, namespace-resolved XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    /// Resolved namespace URI, `None` when unqualified.
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// `true` when this is the NF-e element `name`.
    pub fn is(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(NFE_NAMESPACE)
    }

    /// First direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(name))
    }

    /// All direct children named `name`, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is(name))
    }

    /// Text of the first direct child named `name`.
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(|c| c.text.clone())
    }

    /// First descendant (excluding `self`) named `name`, in document order.
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        let mut pending: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(el) = pending.pop() {
            if el.is(name) {
                return Some(el);
            }
            pending.extend(el.children.iter().rev());
        }
        None
    }

    /// Text of the first descendant named `name`.
    pub fn descendant_text(&self, name: &str) -> Option<String> {
        self.descendant(name).map(|c| c.text.clone())
    }

    /// Text of `leaf` under the first descendant `group` that has one.
    pub fn grouped_text(&self, group: &str, leaf: &str) -> Option<String> {
        let mut pending: Vec<&Element> = self.children.iter().rev().collect();
        while let Some(el) = pending.pop() {
            if el.is(group) {
                if let Some(text) = el.child_text(leaf) {
                    return Some(text);
                }
            }
            pending.extend(el.children.iter().rev());
        }
        None
    }

    /// Every element named `name` in this subtree, including `self`.
    /// Matches are not searched for nested matches.
    pub fn find_all(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        let mut pending = vec![self];
        while let Some(el) = pending.pop() {
            if el.is(name) {
                found.push(el);
            } else {
                pending.extend(el.children.iter().rev());
            }
        }
        found
    }

    /// Value of the unqualified attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn xml_err(e: impl std::fmt::Display) -> ExtractError {
    ExtractError::Xml(format!("XML parse error: {e}"))
}

/// Parse `source` into an element tree.
///
/// Fails on anything that is not a single well-formed, namespace-correct
/// XML document.
pub(crate) fn parse_tree(source: &[u8]) -> Result<Element, ExtractError> {
    let mut reader = NsReader::from_reader(source);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(ref e))) => {
                if root.is_some() {
                    return Err(ExtractError::Xml(
                        "content after the document element".into(),
                    ));
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(ExtractError::Xml(format!(
                        "element nesting deeper than {MAX_DEPTH} levels"
                    )));
                }
                stack.push(open_element(ns, e)?);
            }
            Ok((ns, Event::Empty(ref e))) => {
                if root.is_some() {
                    return Err(ExtractError::Xml(
                        "content after the document element".into(),
                    ));
                }
                let el = open_element(ns, e)?;
                attach(el, &mut stack, &mut root);
            }
            Ok((_, Event::End(_))) => {
                let mut el = stack
                    .pop()
                    .ok_or_else(|| ExtractError::Xml("unmatched closing tag".into()))?;
                // Indentation only; values keep their own whitespace.
                if el.text.trim().is_empty() {
                    el.text.clear();
                }
                attach(el, &mut stack, &mut root);
            }
            Ok((_, Event::Text(ref e))) => {
                let text = e.unescape().map_err(xml_err)?;
                push_text(&mut stack, &text)?;
            }
            Ok((_, Event::CData(ref e))) => {
                let text = String::from_utf8_lossy(e).into_owned();
                push_text(&mut stack, &text)?;
            }
            Ok((_, Event::Eof)) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_err(e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(ExtractError::Xml(format!(
            "unexpected end of document: <{}> is not closed",
            open.name
        )));
    }
    root.ok_or_else(|| ExtractError::Xml("document has no root element".into()))
}

fn open_element(ns: ResolveResult<'_>, e: &BytesStart<'_>) -> Result<Element, ExtractError> {
    let namespace = match ns {
        ResolveResult::Bound(uri) => Some(String::from_utf8_lossy(uri.as_ref()).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(ExtractError::Xml(format!(
                "unbound namespace prefix '{}'",
                String::from_utf8_lossy(&prefix)
            )));
        }
    };
    let name = std::str::from_utf8(e.local_name().as_ref())
        .map_err(xml_err)?
        .to_string();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(xml_err)?
            .to_string();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        namespace,
        name,
        attributes,
        ..Default::default()
    })
}

fn attach(el: Element, stack: &mut Vec<Element>, root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None => *root = Some(el),
    }
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), ExtractError> {
    match stack.last_mut() {
        Some(el) => {
            el.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ExtractError::Xml("text outside the document element".into())),
    }
}
