//! Owned element tree built from a quick-xml event stream.
//!
//! The feeds are small, so each document is read once into memory and the
//! normalizers query it with descendant paths such as `["Images",
//! "EventSmallImagePortrait"]`, the same way a CSS descendant selector does.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Why a feed body could not be read as an XML document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("text found outside the root element")]
    TextOutsideRoot,
    #[error("document has no root element")]
    NoRootElement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and everything below it
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Every descendant matching `path`, in document order.
    ///
    /// `path` is a chain of element names where each name must appear
    /// somewhere below the previous one. The element itself never matches.
    pub fn select_all<'a>(&'a self, path: &[&str]) -> Vec<&'a Element> {
        let mut found = Vec::new();
        if !path.is_empty() {
            for child in self.child_elements() {
                child.collect_matches(path, 0, false, &mut found);
            }
        }
        found
    }

    /// First descendant matching `path`, in document order
    pub fn select_first<'a>(&'a self, path: &[&str]) -> Option<&'a Element> {
        if path.is_empty() {
            return None;
        }
        self.child_elements()
            .find_map(|child| child.first_match(path, 0))
    }

    /// Text of the first descendant matching `path`, or an empty string
    pub fn field(&self, path: &[&str]) -> String {
        self.select_first(path)
            .map(Element::text_content)
            .unwrap_or_default()
    }

    // `matched` counts the leading path segments already satisfied by
    // ancestors. Matching ancestors greedily is exact for descendant chains.
    fn collect_matches<'a>(
        &'a self,
        path: &[&str],
        matched: usize,
        first_only: bool,
        found: &mut Vec<&'a Element>,
    ) {
        let last = path.len() - 1;
        if matched == last && self.name == path[last] {
            found.push(self);
            if first_only {
                return;
            }
        }
        let matched = if matched < last && self.name == path[matched] {
            matched + 1
        } else {
            matched
        };
        for child in self.child_elements() {
            if first_only && !found.is_empty() {
                return;
            }
            child.collect_matches(path, matched, first_only, found);
        }
    }

    fn first_match<'a>(&'a self, path: &[&str], matched: usize) -> Option<&'a Element> {
        let mut found = Vec::with_capacity(1);
        self.collect_matches(path, matched, true, &mut found);
        found.into_iter().next()
    }
}

/// Read a whole document into its root element.
///
/// Any well-formedness problem fails the whole call, so callers never see
/// a partially built tree.
pub fn parse_document(input: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(input);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|source| ParseError::Xml {
            position: reader.buffer_position(),
            source,
        })?;

        match event {
            Event::Start(start) => open.push(Element::from_start(&start)),
            Event::Empty(start) => attach(Element::from_start(&start), &mut open, &mut root)?,
            Event::End(_) => {
                // quick-xml rejects mismatched and unmatched end tags itself
                let element = open.pop().ok_or(ParseError::NoRootElement)?;
                attach(element, &mut open, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|source| ParseError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                push_text(text.into_owned(), &mut open)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(cdata.as_ref()).into_owned();
                push_text(text, &mut open)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(ParseError::UnclosedElement(unclosed.name));
    }
    root.ok_or(ParseError::NoRootElement)
}

fn attach(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => return Err(ParseError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(text: String, open: &mut [Element]) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Text(text)),
        None if text.trim().is_empty() => {}
        None => return Err(ParseError::TextOutsideRoot),
    }
    Ok(())
}
