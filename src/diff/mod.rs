//! Line-level comparison of an original SVG and its standardized output.

pub mod svg_diff;

pub use svg_diff::{compare_svg_content, SvgDiffReport};
