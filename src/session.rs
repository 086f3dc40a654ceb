//! Document state for one standardization session.
//!
//! A session holds the canonical original (read-only once loaded), what was extracted
//! from it, the size mapping, the standard size inputs, the target family and the last
//! output. Each user action is one method call; a failed action leaves the state as it
//! was before the call.

use log::{info, warn};
use serde::Serialize;

use crate::diff::{compare_svg_content, SvgDiffReport};
use crate::errors::{Result, StandardizeError};
use crate::mapping::{MappingEntry, SizeMapper};
use crate::models::{
    config::StandardizeConfig,
    mapping_view::MappingView,
    standard_sizes::{SizeInputs, StandardSizes},
    text_descriptor::{SizeKey, TextDescriptor},
};
use crate::svg::{
    self,
    constants::{DEFAULT_FONT_FAMILY, DOWNLOAD_FILENAME, SVG_MIME_TYPE},
    utils::validate_font_family,
    Extraction,
};

/// A loaded document. `original` is never modified after load.
#[derive(Debug, Clone)]
struct LoadedDocument {
    original: String,
    isolated: String,
    extraction: Extraction,
}

/// The downloadable result of the last apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadArtifact {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

impl DownloadArtifact {
    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

#[derive(Debug, Clone)]
pub struct StandardizerSession {
    document: Option<LoadedDocument>,
    mapper: SizeMapper,
    inputs: SizeInputs,
    font_family: String,
    modified: Option<String>,
}

impl Default for StandardizerSession {
    fn default() -> Self {
        StandardizerSession {
            document: None,
            mapper: SizeMapper::new(),
            inputs: SizeInputs::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            modified: None,
        }
    }
}

impl StandardizerSession {
    pub fn new() -> Self {
        Default::default()
    }

    /// A session whose standard size inputs are `sizes`.
    pub fn with_standard_sizes(sizes: &[f64]) -> Self {
        StandardizerSession {
            inputs: SizeInputs::from_sizes(sizes),
            ..Default::default()
        }
    }

    /// A session configured from `config`. Overrides are applied by [`Self::load`] callers
    /// through [`Self::apply_overrides`] once a document is loaded.
    pub fn from_config(config: &StandardizeConfig) -> Result<Self> {
        let mut session = Self::with_standard_sizes(&config.standard_sizes);
        session.set_font_family(&config.font_family)?;
        Ok(session)
    }

    // --- Loading ---

    /// Loads a new document, replacing the previous one.
    ///
    /// Extraction, the isolated display copy, the mapping and the output are all rebuilt.
    /// On a parse error nothing changes.
    pub fn load(&mut self, svg: impl Into<String>) -> Result<()> {
        let original = svg.into();
        let extraction = svg::extract(&original)?;
        let isolated = svg::isolate(&original);
        info!(
            "Loaded SVG: {} text elements, {} unique sizes",
            extraction.descriptors.len(),
            extraction.unique_sizes.len()
        );

        self.document = Some(LoadedDocument {
            original,
            isolated,
            extraction,
        });
        self.mapper.clear();
        self.modified = None;
        self.seed_mapping();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// The canonical original text.
    pub fn original(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.original.as_str())
    }

    /// The display-only isolated copy of the original.
    pub fn isolated_original(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.isolated.as_str())
    }

    /// Regenerates the isolated copy with a new token and returns it.
    pub fn refresh_isolated_original(&mut self) -> Option<&str> {
        let doc = self.document.as_mut()?;
        doc.isolated = svg::isolate(&doc.original);
        Some(doc.isolated.as_str())
    }

    pub fn descriptors(&self) -> &[TextDescriptor] {
        self.document
            .as_ref()
            .map_or(&[], |doc| doc.extraction.descriptors.as_slice())
    }

    pub fn unique_sizes(&self) -> &[SizeKey] {
        self.document
            .as_ref()
            .map_or(&[], |doc| doc.extraction.unique_sizes.as_slice())
    }

    // --- Standard Sizes ---

    pub fn size_inputs(&self) -> &SizeInputs {
        &self.inputs
    }

    /// The valid standard sizes from the current inputs.
    pub fn standard_sizes(&self) -> Result<StandardSizes> {
        self.inputs.standard_sizes()
    }

    /// Replaces all inputs at once (at least one input is kept).
    pub fn set_size_inputs<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs = SizeInputs::new(values);
        self.seed_mapping();
    }

    pub fn add_size_input(&mut self, value: impl Into<String>) -> usize {
        let index = self.inputs.add(value);
        self.seed_mapping();
        index
    }

    pub fn set_size_input(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.inputs.set(index, value)?;
        self.seed_mapping();
        Ok(())
    }

    /// Removes a standard size input; removing the last one fails with
    /// [`StandardizeError::MinimumSizeInputInvariant`].
    pub fn remove_size_input(&mut self, index: usize) -> Result<()> {
        self.inputs.remove(index)?;
        self.seed_mapping();
        Ok(())
    }

    // --- Mapping & Family ---

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn set_font_family(&mut self, family: &str) -> Result<()> {
        let family = family.trim();
        validate_font_family(family)?;
        self.font_family = family.to_string();
        Ok(())
    }

    /// Explicitly maps a detected size to a standard size, replacing any previous choice.
    pub fn set_mapping(&mut self, size: impl Into<SizeKey>, standard: f64) -> Result<()> {
        if !(standard.is_finite() && standard > 0.0) {
            return Err(StandardizeError::InvalidInput(format!(
                "standard size must be a positive number, got {standard}"
            )));
        }
        let size = size.into();
        if !self.unique_sizes().contains(&size) {
            warn!("Mapping {}px which is not a detected size", size);
        }
        self.mapper.set_mapping(size, standard);
        Ok(())
    }

    /// Applies configured overrides (`from` detected size, `to` standard size).
    pub fn apply_overrides(&mut self, config: &StandardizeConfig) -> Result<()> {
        for size_override in &config.overrides {
            self.set_mapping(size_override.from, size_override.to)?;
        }
        Ok(())
    }

    pub fn mapping(&self) -> &SizeMapper {
        &self.mapper
    }

    pub fn mapping_entries(&self) -> Vec<MappingEntry> {
        self.mapper.entries()
    }

    /// Rows for the mapping UI.
    pub fn mapping_view(&self) -> MappingView {
        match &self.document {
            Some(doc) => MappingView::build(
                &doc.extraction,
                &self.mapper,
                self.standard_sizes().ok().as_ref(),
            ),
            None => MappingView::empty(),
        }
    }

    // --- Apply / Reset / Download ---

    /// Produces a new standardized document from the canonical original.
    ///
    /// # Errors
    /// [`StandardizeError::NoStandardSizes`] without a valid standard size,
    /// [`StandardizeError::NoDocument`] before a load, and any error of
    /// [`svg::apply`]. On error the previous output is kept.
    pub fn apply(&mut self) -> Result<&str> {
        let standard_sizes = self.standard_sizes()?;
        let doc = self.document.as_ref().ok_or(StandardizeError::NoDocument)?;
        let output = svg::apply(
            &doc.original,
            &doc.extraction.descriptors,
            &self.mapper,
            &standard_sizes,
            &self.font_family,
        )?;
        Ok(self.modified.insert(output).as_str())
    }

    /// The output of the last successful apply.
    pub fn modified(&self) -> Option<&str> {
        self.modified.as_deref()
    }

    /// Clears the output and recomputes every mapping entry with the closest standard
    /// size. The original and the unique sizes are untouched.
    pub fn reset(&mut self) {
        let Some(doc) = &self.document else {
            return;
        };
        self.modified = None;
        if let Ok(standard_sizes) = self.inputs.standard_sizes() {
            self.mapper
                .reset_all(&doc.extraction.unique_sizes, &standard_sizes);
        }
    }

    pub fn download(&self) -> Option<DownloadArtifact> {
        self.modified.as_ref().map(|content| DownloadArtifact {
            filename: DOWNLOAD_FILENAME.to_string(),
            mime_type: SVG_MIME_TYPE.to_string(),
            content: content.clone(),
        })
    }

    /// Line diff between the original and the last output.
    pub fn change_report(&self) -> Option<Result<SvgDiffReport>> {
        let original = self.original()?;
        let modified = self.modified()?;
        Some(compare_svg_content(
            original,
            modified,
            "original.svg",
            DOWNLOAD_FILENAME,
        ))
    }

    /// Fills missing mapping entries when a document is loaded and the inputs hold at
    /// least one valid size.
    fn seed_mapping(&mut self) {
        let Some(doc) = &self.document else {
            return;
        };
        if let Ok(standard_sizes) = self.inputs.standard_sizes() {
            self.mapper
                .seed_defaults(&doc.extraction.unique_sizes, &standard_sizes);
        }
    }
}
