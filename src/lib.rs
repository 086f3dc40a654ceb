pub mod errors;
pub mod mapping;
pub mod models;
pub mod session;
pub mod svg;

pub use errors::{Result, StandardizeError};
pub use mapping::{MappingEntry, SizeMapper};
pub use models::{
    config::StandardizeConfig,
    mapping_view::MappingView,
    standard_sizes::{SizeInputs, StandardSizes},
    text_descriptor::{SizeKey, TextDescriptor},
};
pub use session::{DownloadArtifact, StandardizerSession};

// features
pub mod diff;
pub use diff::{compare_svg_content, SvgDiffReport};

pub mod wasm;
pub use wasm::WasmSession;
