// src/models/mapping_view.rs

use serde::Serialize;

use crate::mapping::SizeMapper;
use crate::models::{
    standard_sizes::StandardSizes,
    text_descriptor::{SizeKey, TextDescriptor},
};
use crate::svg::Extraction;
use crate::svg::constants::{EMPTY_MAPPING_INSTRUCTIONS, MAPPING_INSTRUCTIONS, TEXT_PREVIEW_CHARS};

/// One text element listed under a detected size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDetail {
    pub index: usize,
    /// Content truncated to 40 characters, with `...` appended when cut.
    pub preview: String,
    /// Declared font size with two decimals, before scaling.
    pub font_size: String,
    pub font_family: String,
    /// `"<sx>x, <sy>y"`, only for stretched elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

/// A detected size with its elements and the standard size currently chosen for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRow {
    pub size: SizeKey,
    /// e.g. `"15.00px"`.
    pub label: String,
    pub details: Vec<TextDetail>,
    pub options: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<f64>,
}

/// What a mapping UI renders: instructions plus one row per unique size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingView {
    pub instructions: String,
    pub rows: Vec<MappingRow>,
}

impl MappingView {
    /// The view shown before any document is loaded.
    pub fn empty() -> Self {
        MappingView {
            instructions: EMPTY_MAPPING_INSTRUCTIONS.to_string(),
            rows: Vec::new(),
        }
    }

    /// Builds one row per unique size. With no valid standard sizes the rows have no
    /// options to pick from.
    pub fn build(
        extraction: &Extraction,
        mapping: &SizeMapper,
        standard_sizes: Option<&StandardSizes>,
    ) -> Self {
        if extraction.unique_sizes.is_empty() {
            return Self::empty();
        }
        let options: Vec<f64> = standard_sizes
            .map(|sizes| sizes.iter().collect())
            .unwrap_or_default();
        let rows = extraction
            .unique_sizes
            .iter()
            .map(|&size| MappingRow {
                size,
                label: format!("{}px", size),
                details: extraction
                    .descriptors_for_size(size)
                    .map(TextDetail::from_descriptor)
                    .collect(),
                options: options.clone(),
                selected: mapping.get(size),
            })
            .collect();
        MappingView {
            instructions: MAPPING_INSTRUCTIONS.to_string(),
            rows,
        }
    }
}

impl TextDetail {
    fn from_descriptor(descriptor: &TextDescriptor) -> Self {
        TextDetail {
            index: descriptor.index,
            preview: preview(&descriptor.text_content),
            font_size: format!("{:.2}px", descriptor.font_size),
            font_family: descriptor.font_family.clone(),
            scale: descriptor
                .is_scaled()
                .then(|| format!("{:.2}x, {:.2}y", descriptor.scale_x, descriptor.scale_y)),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > TEXT_PREVIEW_CHARS {
        let cut: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn descriptor(index: usize, font_size: f64, scale: f64, text: &str) -> TextDescriptor {
        TextDescriptor {
            index,
            font_size,
            font_family: "Arial".to_string(),
            transform: String::new(),
            scale_x: scale,
            scale_y: scale,
            text_content: text.to_string(),
            class_name: String::new(),
        }
    }

    #[test]
    fn test_empty_view_without_sizes() {
        let view = MappingView::build(&Extraction::default(), &SizeMapper::new(), None);
        assert_eq!(view, MappingView::empty());
        assert_eq!(view.instructions, "Load an SVG file to see size mappings");
    }

    #[test]
    fn test_rows_group_descriptors_by_effective_size() {
        let long = "x".repeat(45);
        let descriptors = vec![
            descriptor(0, 10.0, 1.5, "scaled"),
            descriptor(1, 15.0, 1.0, &long),
            descriptor(2, 9.0, 1.0, "small"),
        ];
        let extraction = Extraction {
            unique_sizes: crate::svg::unique_sizes(&descriptors),
            descriptors,
        };
        let standard = StandardSizes::new([10.0, 16.0]).unwrap();
        let mut mapping = SizeMapper::new();
        mapping.seed_defaults(&extraction.unique_sizes, &standard);

        let view = MappingView::build(&extraction, &mapping, Some(&standard));
        assert_eq!(view.rows.len(), 2);

        let row = &view.rows[1];
        assert_eq!(row.label, "15.00px");
        assert_eq!(row.selected, Some(16.0));
        assert_eq!(row.options, vec![10.0, 16.0]);
        assert_eq!(row.details.len(), 2);
        assert_eq!(row.details[0].font_size, "10.00px");
        assert_eq!(row.details[0].scale.as_deref(), Some("1.50x, 1.50y"));
        assert_eq!(row.details[1].scale, None);
        assert_eq!(row.details[1].preview, format!("{}...", "x".repeat(40)));
    }
}
