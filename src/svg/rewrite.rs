//! Produces the standardized document from the canonical original text.
//!
//! Every call parses the original afresh and collects edits against it; the original
//! string is only ever borrowed. Markup the edits do not cover is copied byte for byte.

use log::{debug, info};

use super::{
    css,
    transform::strip_scale,
    utils::{
        element_content_range, find_style_element, parse_document, text_elements,
        validate_font_family, SourceEditor,
    },
};
use crate::errors::{Result, StandardizeError};
use crate::mapping::SizeMapper;
use crate::models::{standard_sizes::StandardSizes, text_descriptor::TextDescriptor};

/// The standard size a descriptor is rewritten to: its mapping entry, else the closest
/// standard size to its unrounded effective size.
pub fn mapped_size(
    descriptor: &TextDescriptor,
    mapping: &SizeMapper,
    standard_sizes: &StandardSizes,
) -> f64 {
    mapping
        .get(descriptor.size_key())
        .unwrap_or_else(|| standard_sizes.closest(descriptor.effective_size()))
}

/// Rewrites `original` so that each text element uses its mapped standard size and
/// `font_family`, with scale transforms removed.
///
/// Text elements are matched to `descriptors` by document order.
///
/// # Errors
/// * [`StandardizeError::Parse`] if `original` is not well-formed.
/// * [`StandardizeError::DescriptorMismatch`] if the text element count differs from
///   the number of descriptors.
/// * [`StandardizeError::InvalidInput`] if `font_family` is empty or contains markup or
///   CSS delimiters.
pub fn apply(
    original: &str,
    descriptors: &[TextDescriptor],
    mapping: &SizeMapper,
    standard_sizes: &StandardSizes,
    font_family: &str,
) -> Result<String> {
    validate_font_family(font_family)?;
    let doc = parse_document(original)?;

    let texts: Vec<_> = text_elements(&doc).collect();
    if texts.len() != descriptors.len() {
        return Err(StandardizeError::DescriptorMismatch {
            expected: descriptors.len(),
            found: texts.len(),
        });
    }

    let style_range = find_style_element(&doc).and_then(|style| element_content_range(original, style));
    let mut style_text = style_range.clone().map(|range| original[range].to_string());

    let mut editor = SourceEditor::new(original);
    for (node, descriptor) in texts.iter().zip(descriptors) {
        let size = mapped_size(descriptor, mapping, standard_sizes);

        let transform = strip_scale(&descriptor.transform);
        if transform.is_empty() {
            editor.remove_attribute(*node, "transform");
        } else if transform != descriptor.transform {
            editor.set_attribute(*node, "transform", &transform);
        }

        let style = css::rewrite_inline_style(
            node.attribute("style").unwrap_or_default(),
            size,
            font_family,
        );
        editor.set_attribute(*node, "style", &style);

        if let Some(sheet) = style_text.as_mut() {
            for class in descriptor.classes() {
                *sheet = css::rewrite_class_rules(sheet, class, size, font_family);
            }
        }

        debug!(
            "Text #{}: {}px -> {}px",
            descriptor.index,
            descriptor.size_key(),
            size
        );
    }

    if let (Some(range), Some(sheet)) = (style_range, style_text) {
        if sheet != original[range.clone()] {
            editor.replace(range, sheet);
        }
    }

    info!(
        "Standardized {} text elements to {} standard sizes",
        descriptors.len(),
        standard_sizes.len()
    );
    Ok(editor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::text_descriptor::SizeKey;
    use crate::svg::extract::extract;
    use pretty_assertions::assert_eq;

    const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg">
  <style>
    .label { font-size: 11px; font-family: Georgia; fill: #222; }
    .other { font-size: 40px; }
  </style>
  <text class="label" x="1">Label</text>
  <text style="fill: red; font-size: 10px" transform="translate(5 10) scale(1.5)">Title</text>
  <text transform="scale(2)" style="font-family: 'Comic Sans'">Big</text>
</svg>"#;

    fn standard() -> StandardSizes {
        StandardSizes::new([12.0, 14.0, 24.0]).unwrap()
    }

    #[test]
    fn test_apply_rewrites_all_text_elements() {
        let extraction = extract(SVG).unwrap();
        let mut mapping = SizeMapper::new();
        mapping.seed_defaults(&extraction.unique_sizes, &standard());

        let out = apply(SVG, &extraction.descriptors, &mapping, &standard(), "Inter").unwrap();
        assert_eq!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg">
  <style>
    .label { font-size: 12px; font-family: Inter; fill: #222; }
    .other { font-size: 40px; }
  </style>
  <text style="font-size: 12px; font-family: Inter;" class="label" x="1">Label</text>
  <text style="fill: red; font-size: 14px; font-family: Inter;" transform="translate(5 10)">Title</text>
  <text style="font-size: 24px; font-family: Inter;">Big</text>
</svg>"#
        );
    }

    #[test]
    fn test_apply_uses_explicit_mapping() {
        let extraction = extract(SVG).unwrap();
        let mut mapping = SizeMapper::new();
        mapping.set_mapping(SizeKey::from_size(15.0), 24.0);

        let out = apply(SVG, &extraction.descriptors, &mapping, &standard(), "Inter").unwrap();
        assert!(out.contains(r#"<text style="fill: red; font-size: 24px; font-family: Inter;" transform="translate(5 10)">"#));
        // Unmapped sizes fall back to the closest standard size.
        assert!(out.contains(".label { font-size: 12px;"));
    }

    #[test]
    fn test_apply_is_reproducible_and_leaves_original() {
        let original = SVG.to_string();
        let extraction = extract(&original).unwrap();
        let mapping = SizeMapper::new();
        let first = apply(&original, &extraction.descriptors, &mapping, &standard(), "Inter").unwrap();
        let second = apply(&original, &extraction.descriptors, &mapping, &standard(), "Inter").unwrap();
        assert_eq!(first, second);
        assert_eq!(original, SVG);
        assert_eq!(extract(&original).unwrap(), extraction);
    }

    #[test]
    fn test_apply_only_rewrites_rules_targeting_the_class() {
        let svg = r#"<svg><style>.card .title { font-size: 30px } .card { font-size: 10px }</style><text class="card">a</text></svg>"#;
        let extraction = extract(svg).unwrap();
        assert_eq!(extraction.descriptors[0].font_size, 10.0);

        let out = apply(svg, &extraction.descriptors, &SizeMapper::new(), &standard(), "Arial").unwrap();
        assert_eq!(
            out,
            r#"<svg><style>.card .title { font-size: 30px } .card { font-size: 12px }</style><text style="font-size: 12px; font-family: Arial;" class="card">a</text></svg>"#
        );
    }

    #[test]
    fn test_apply_rewrites_cdata_style_block() {
        let svg = "<svg><style><![CDATA[\n.big { font-size: 23px }\n]]></style><text class=\"big\">a</text></svg>";
        let extraction = extract(svg).unwrap();
        assert_eq!(extraction.descriptors[0].font_size, 23.0);

        let out = apply(svg, &extraction.descriptors, &SizeMapper::new(), &standard(), "Arial").unwrap();
        assert!(out.contains("<style><![CDATA[\n.big { font-size: 24px }\n]]></style>"));
    }

    #[test]
    fn test_apply_checks_descriptor_count() {
        let extraction = extract(SVG).unwrap();
        let result = apply(
            SVG,
            &extraction.descriptors[..1],
            &SizeMapper::new(),
            &standard(),
            "Inter",
        );
        assert!(matches!(
            result,
            Err(StandardizeError::DescriptorMismatch {
                expected: 1,
                found: 3
            })
        ));
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let extraction = extract(SVG).unwrap();
        assert!(matches!(
            apply("<svg>", &extraction.descriptors, &SizeMapper::new(), &standard(), "Inter"),
            Err(StandardizeError::Parse(_))
        ));
        assert!(matches!(
            apply(SVG, &extraction.descriptors, &SizeMapper::new(), &standard(), "A}B"),
            Err(StandardizeError::InvalidInput(_))
        ));
    }
}
