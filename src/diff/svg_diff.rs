use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

use crate::errors::Result;

/// Holds the results of comparing an original SVG with its standardized output,
/// formatted as a Markdown report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgDiffReport {
    pub markdown_report: String,
    pub has_differences: bool,
    pub lines_added: usize,
    pub lines_removed: usize,
}

/// Compares two SVG documents line by line and builds a Markdown report with a
/// unified diff.
///
/// # Arguments
/// * `base_svg_content` - The original SVG.
/// * `changed_svg_content` - The rewritten SVG.
/// * `base_filename` - Name shown for the original in the headers.
/// * `changed_filename` - Name shown for the rewritten file in the headers.
pub fn compare_svg_content(
    base_svg_content: &str,
    changed_svg_content: &str,
    base_filename: &str,
    changed_filename: &str,
) -> Result<SvgDiffReport> {
    let diff = TextDiff::from_lines(base_svg_content, changed_svg_content);
    let has_differences = base_svg_content != changed_svg_content;
    let mut lines_added = 0;
    let mut lines_removed = 0;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => lines_added += 1,
            ChangeTag::Delete => lines_removed += 1,
            ChangeTag::Equal => (),
        }
    }

    let mut report = String::new();
    writeln!(report, "# Font Standardization Changes\n")?;
    writeln!(report, "## `{}` → `{}`\n", base_filename, changed_filename)?;

    if has_differences {
        writeln!(report, "> - Lines Added: {}", lines_added)?;
        writeln!(report, "> - Lines Removed: {}\n", lines_removed)?;
        writeln!(report, "```diff")?;
        let hunks = diff
            .unified_diff()
            .header(base_filename, changed_filename)
            .context_radius(2)
            .to_string();
        report.push_str(&hunks);
        if !hunks.ends_with('\n') {
            report.push('\n');
        }
        writeln!(report, "```")?;
    } else {
        writeln!(report, "> No changes.")?;
    }

    Ok(SvgDiffReport {
        markdown_report: report,
        has_differences,
        lines_added,
        lines_removed,
    })
}
