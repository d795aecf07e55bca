//! Minimal element tree over quick-xml events.
//!
//! Only elements are modelled. Everything else (text, entity references,
//! comments, CDATA, declarations, doctype, processing instructions) is kept
//! as the exact source slice and written back untouched, so a parse /
//! serialize cycle only normalizes whitespace inside tags.
//!
//! Attribute values are stored in their escaped source form.

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Write;

use super::SvgError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Written as `<name/>` when it has no children.
    self_closing: bool,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, self_closing: bool) -> Result<Self, SvgError> {
        let name = utf8(start.name().as_ref())?;
        let mut attrs = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| SvgError::Parse(format!("<{name}>: {e}")))?;
            attrs.push((utf8(attr.key.as_ref())?, utf8(&attr.value)?));
        }

        Ok(Self {
            name,
            attrs,
            children: Vec::new(),
            self_closing,
        })
    }

    /// Tag name without namespace (`svg:text` and `{ns}text` give `text`).
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Raw (escaped) attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute from an unescaped value, replacing it in place or
    /// appending it.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let value = escape(value).into_owned();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => *slot = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attrs {
            // values read from single-quoted attributes may hold `"`
            let quote = if value.contains('"') { '\'' } else { '"' };
            let _ = write!(out, " {key}={quote}{value}{quote}");
        }

        if self.children.is_empty() && self.self_closing {
            out.push_str("/>");
            return;
        }

        out.push('>');
        write_nodes(&self.children, out);
        let _ = write!(out, "</{}>", self.name);
    }
}

/// A parsed document: prolog, exactly one root element, epilogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Parse well-formed markup.
    ///
    /// Mismatched or unclosed tags, malformed attributes, stray text around
    /// the root, and zero or several root elements are all errors.
    pub fn parse(markup: &str) -> Result<Self, SvgError> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().trim_text(false);

        let mut top: Vec<Node> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut roots = 0usize;

        loop {
            let before = position(&reader);
            let event = reader.read_event().map_err(|e| {
                SvgError::Parse(format!("at byte {}: {e}", reader.error_position()))
            })?;
            let after = position(&reader);

            let node = match event {
                Event::Eof => break,
                Event::Start(start) => {
                    stack.push(Element::from_start(&start, false)?);
                    continue;
                }
                Event::End(_) => match stack.pop() {
                    Some(element) => Node::Element(element),
                    None => return Err(SvgError::Parse(format!("unexpected end tag at byte {before}"))),
                },
                Event::Empty(start) => Node::Element(Element::from_start(&start, true)?),
                Event::Text(_) if stack.is_empty() => {
                    let raw = &markup[before..after];
                    if !raw.trim().is_empty() {
                        return Err(SvgError::Parse(format!("text outside the root element at byte {before}")));
                    }
                    Node::Raw(raw.to_string())
                }
                _ => Node::Raw(markup[before..after].to_string()),
            };

            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    if matches!(node, Node::Element(_)) {
                        roots += 1;
                    }
                    top.push(node);
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(SvgError::Parse(format!("unclosed element <{}>", open.name)));
        }
        match roots {
            0 => Err(SvgError::Parse("no root element".to_string())),
            1 => Ok(Self { nodes: top }),
            n => Err(SvgError::Parse(format!("{n} root elements, expected one"))),
        }
    }

    /// Remove every element matching `predicate`, with its subtree, at any depth.
    ///
    /// Returns the number of removed elements (nested matches inside a
    /// removed subtree are not counted).
    pub fn remove_elements(&mut self, predicate: impl Fn(&Element) -> bool) -> usize {
        remove_in(&mut self.nodes, &predicate)
    }

    /// Visit every element depth-first, parents before children.
    pub fn for_each_element_mut(&mut self, mut f: impl FnMut(&mut Element)) {
        visit_in(&mut self.nodes, &mut f);
    }

    pub fn root(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Raw(_) => None,
        })
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        write_nodes(&self.nodes, &mut out);
        out
    }
}

fn remove_in(nodes: &mut Vec<Node>, predicate: &impl Fn(&Element) -> bool) -> usize {
    let before = nodes.len();
    nodes.retain(|node| !matches!(node, Node::Element(element) if predicate(element)));
    let mut removed = before - nodes.len();

    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            removed += remove_in(&mut element.children, predicate);
        }
    }
    removed
}

fn visit_in(nodes: &mut [Node], f: &mut impl FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(element) = node {
            f(element);
            visit_in(&mut element.children, f);
        }
    }
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Element(element) => element.write_to(out),
            Node::Raw(raw) => out.push_str(raw),
        }
    }
}

/// Strip a `prefix:` or `{namespace}` qualifier.
pub fn local_name(name: &str) -> &str {
    let name = name.rsplit('}').next().unwrap_or(name);
    name.rsplit(':').next().unwrap_or(name)
}

#[allow(clippy::cast_possible_truncation)]
fn position(reader: &Reader<&[u8]>) -> usize {
    reader.buffer_position() as usize
}

fn utf8(bytes: &[u8]) -> Result<String, SvgError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| SvgError::Parse(e.to_string()))
}
