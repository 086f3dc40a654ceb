//! Defines constants used throughout SVG analysis and rewriting.

// Default values used when a text element declares nothing.
pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0; // Fallback font size in px
pub const DEFAULT_FONT_FAMILY: &str = "Arial"; // Fallback font family

// Download artifact produced by the session.
pub const DOWNLOAD_FILENAME: &str = "standardized.svg";
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

// Isolation token prefix and random suffix length.
pub const ISOLATION_PREFIX: &str = "original-svg";
pub const ISOLATION_SUFFIX_LEN: usize = 9;

// Mapping view.
pub const TEXT_PREVIEW_CHARS: usize = 40;
pub const MAPPING_INSTRUCTIONS: &str = "Map each detected size to one of the standard sizes above";
pub const EMPTY_MAPPING_INSTRUCTIONS: &str = "Load an SVG file to see size mappings";
