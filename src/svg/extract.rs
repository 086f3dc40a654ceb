//! Extraction of text element descriptors and the unique effective sizes of a document.

use std::collections::BTreeSet;

use log::debug;
use roxmltree::Document;
use serde::Serialize;

use super::{
    style::StyleResolver,
    transform::scale_of,
    utils::{find_style_element, parse_document, text_content, text_elements},
};
use crate::errors::Result;
use crate::models::text_descriptor::{SizeKey, TextDescriptor};

/// Descriptors of all text elements plus their distinct effective sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub descriptors: Vec<TextDescriptor>,
    /// Ascending, without duplicates.
    pub unique_sizes: Vec<SizeKey>,
}

impl Extraction {
    /// Descriptors whose rounded effective size equals `size`.
    pub fn descriptors_for_size(&self, size: SizeKey) -> impl Iterator<Item = &TextDescriptor> {
        self.descriptors
            .iter()
            .filter(move |descriptor| descriptor.size_key() == size)
    }
}

/// Parses `svg` and extracts its text descriptors.
///
/// # Errors
/// Returns [`crate::StandardizeError::Parse`] when `svg` is not well-formed; no partial
/// result is produced.
pub fn extract(svg: &str) -> Result<Extraction> {
    let doc = parse_document(svg)?;
    Ok(extract_from_document(&doc))
}

pub(crate) fn extract_from_document(doc: &Document<'_>) -> Extraction {
    let style_text = find_style_element(doc).map(text_content);
    let resolver = StyleResolver::new(style_text.as_deref());

    let descriptors: Vec<TextDescriptor> = text_elements(doc)
        .enumerate()
        .map(|(index, node)| {
            let transform = node.attribute("transform").unwrap_or_default().to_string();
            let (scale_x, scale_y) = scale_of(&transform);
            TextDescriptor {
                index,
                font_size: resolver.font_size(node),
                font_family: resolver.font_family(node),
                transform,
                scale_x,
                scale_y,
                text_content: text_content(node),
                class_name: node.attribute("class").unwrap_or_default().to_string(),
            }
        })
        .collect();

    let unique_sizes = unique_sizes(&descriptors);
    debug!(
        "Extracted {} text elements with {} unique sizes",
        descriptors.len(),
        unique_sizes.len()
    );
    Extraction {
        descriptors,
        unique_sizes,
    }
}

/// Distinct rounded effective sizes, ascending.
pub fn unique_sizes(descriptors: &[TextDescriptor]) -> Vec<SizeKey> {
    descriptors
        .iter()
        .map(TextDescriptor::size_key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
