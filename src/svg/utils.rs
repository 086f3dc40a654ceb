//! Utility functions shared by the SVG passes: parsing, escaping, element lookup and
//! position-based editing of the source text.

use std::ops::Range;

use roxmltree::{Document, Node, ParsingOptions};

use crate::errors::{Result, StandardizeError};

// --- Parsing ---

/// Parses SVG text into a read-only tree that keeps byte positions of nodes and attributes.
/// DOCTYPE declarations are allowed since exported SVGs commonly carry one.
pub(crate) fn parse_document(svg: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(svg, options)?)
}

// --- Element Lookup ---

/// All `<text>` elements in document order, matched by local name.
pub(crate) fn text_elements<'a, 'input>(
    doc: &'a Document<'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    doc.descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "text")
}

/// The first `<style>` element in document order.
pub(crate) fn find_style_element<'a, 'input>(doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    doc.descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "style")
}

/// Concatenation of all descendant text, like DOM `textContent`.
pub(crate) fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

// --- Escaping ---

/// Escapes a value for an attribute delimited by `quote`.
pub(crate) fn escape_attr_value(value: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' if quote == '"' => escaped.push_str("&quot;"),
            '\'' if quote == '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Rejects family names that would break out of a CSS declaration or the markup around it.
pub(crate) fn validate_font_family(family: &str) -> Result<()> {
    if family.trim().is_empty() {
        return Err(StandardizeError::InvalidInput(
            "font family must not be empty".to_string(),
        ));
    }
    if let Some(c) = family.chars().find(|c| matches!(c, ';' | '{' | '}' | '<' | '>' | '&')) {
        return Err(StandardizeError::InvalidInput(format!(
            "font family must not contain '{c}'"
        )));
    }
    Ok(())
}

// --- Source Positions ---

/// Byte offset just past the element's qualified tag name (`<svg:text|`).
pub(crate) fn tag_name_end(source: &str, node: Node<'_, '_>) -> usize {
    let start = node.range().start + 1;
    source[start..]
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .map_or(source.len(), |offset| start + offset)
}

/// Byte offset just past the `>` that closes the element's start tag.
pub(crate) fn start_tag_end(source: &str, node: Node<'_, '_>) -> usize {
    let bytes = source.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(node.range().start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return i + 1,
            None => {}
        }
    }
    bytes.len()
}

/// Raw text between the element's start and end tags. `None` for an empty element tag.
pub(crate) fn element_content_range(source: &str, node: Node<'_, '_>) -> Option<Range<usize>> {
    let start = start_tag_end(source, node);
    if source[..start].ends_with("/>") {
        return None;
    }
    let end = source[..node.range().end].rfind("</")?;
    (start <= end).then_some(start..end)
}

/// An attribute located in the source text.
#[derive(Debug, Clone)]
pub(crate) struct AttributeSpan {
    /// The unescaped value.
    pub value: String,
    pub quote: char,
    /// Raw value between the quotes.
    pub value_range: Range<usize>,
    /// The whole attribute including leading whitespace and the closing quote.
    pub full_range: Range<usize>,
}

/// Locates an un-namespaced attribute of `node` in `source`.
pub(crate) fn attribute_span(source: &str, node: Node<'_, '_>, name: &str) -> Option<AttributeSpan> {
    let attr = node
        .attributes()
        .find(|a| a.namespace().is_none() && a.name() == name)?;
    let value_range = attr.range_value();
    let quote = source[..value_range.start].chars().next_back().unwrap_or('"');
    let mut start = attr.range_qname().start;
    while start > 0 && source.as_bytes()[start - 1].is_ascii_whitespace() {
        start -= 1;
    }
    let full_end = (value_range.end + 1).min(source.len());
    Some(AttributeSpan {
        value: attr.value().to_string(),
        quote,
        full_range: start..full_end,
        value_range,
    })
}

// --- Editing ---

/// Collects replacements against an immutable source and produces a new string.
///
/// The source is never modified. Untouched bytes are copied verbatim, so markup the
/// edits do not cover survives exactly as written.
#[derive(Debug)]
pub(crate) struct SourceEditor<'a> {
    source: &'a str,
    edits: Vec<(Range<usize>, String)>,
}

impl<'a> SourceEditor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        SourceEditor {
            source,
            edits: Vec::new(),
        }
    }

    pub(crate) fn replace(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.edits.push((range, text.into()));
    }

    pub(crate) fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.edits.push((at..at, text.into()));
    }

    /// Sets an attribute value, adding the attribute after the tag name when missing.
    pub(crate) fn set_attribute(&mut self, node: Node<'_, '_>, name: &str, value: &str) {
        match attribute_span(self.source, node, name) {
            Some(span) => {
                let escaped = escape_attr_value(value, span.quote);
                self.replace(span.value_range, escaped);
            }
            None => {
                let at = tag_name_end(self.source, node);
                self.insert(at, format!(r#" {}="{}""#, name, escape_attr_value(value, '"')));
            }
        }
    }

    pub(crate) fn remove_attribute(&mut self, node: Node<'_, '_>, name: &str) {
        if let Some(span) = attribute_span(self.source, node, name) {
            self.replace(span.full_range, "");
        }
    }

    pub(crate) fn finish(mut self) -> String {
        self.edits.sort_by_key(|(range, _)| (range.start, range.end));
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (range, text) in self.edits {
            if range.start < cursor {
                log::warn!(
                    "Skipping overlapping edit at {}..{}",
                    range.start,
                    range.end
                );
                continue;
            }
            out.push_str(&self.source[cursor..range.start]);
            out.push_str(&text);
            cursor = range.end;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}
