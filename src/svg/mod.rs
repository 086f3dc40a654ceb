//! Analysis and rewriting of SVG text styling.
//!
//! # Pipeline
//! *   [`extract`] parses a document and describes every `<text>` element (resolved font
//!     size and family, scale factors, content, classes) plus the unique effective sizes.
//! *   [`isolate`] makes a display copy whose ids and class names cannot collide with
//!     another copy on the same page.
//! *   [`apply`] re-parses the canonical original and writes normalized sizes and family
//!     into inline styles and class rules, dropping `scale(...)` transforms.
//!
//! # Limitations
//! *   Only the first `<style>` block is read or rewritten.
//! *   CSS handling covers flat rules with class selectors; `@import`, comments containing
//!     braces and inherited styles from parent groups are not interpreted.
//! *   Only `scale(...)` transform functions are considered; `matrix(...)` scaling is kept.

pub mod constants;
mod css;
pub mod extract;
pub mod isolate;
pub mod rewrite;
pub mod style;
pub mod transform;
pub(crate) mod utils;

pub use extract::{extract, unique_sizes, Extraction};
pub use isolate::{isolate, isolate_with_token, unique_token};
pub use rewrite::{apply, mapped_size};
pub use style::StyleResolver;
pub use transform::{scale_of, strip_scale};
