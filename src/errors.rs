use thiserror::Error;

/// Represents errors that can occur while analysing or standardizing an SVG document.
#[derive(Error, Debug)]
pub enum StandardizeError {
    /// The input text is not well-formed XML/SVG.
    #[error("Error parsing SVG: {0}")]
    Parse(#[from] roxmltree::Error),

    /// An apply was requested while no valid standard size is configured.
    #[error("Please add at least one standard size")]
    NoStandardSizes,

    /// Removal of the last remaining standard-size input was refused.
    #[error("You must have at least one standard size")]
    MinimumSizeInputInvariant,

    /// An action that needs a loaded document ran before any document was loaded.
    #[error("No SVG document has been loaded")]
    NoDocument,

    /// The fresh parse of the original yielded a different number of text nodes
    /// than the descriptors extracted on load.
    #[error("Text element count mismatch: expected {expected}, found {found}")]
    DescriptorMismatch { expected: usize, found: usize },

    /// An error indicating invalid input was provided to a session operation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Formatting error while building output text.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// A type alias for `Result<T, StandardizeError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, StandardizeError>;
