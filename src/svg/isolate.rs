//! Display copies with a unique root id and prefixed class names, so that several
//! renderings of similar markup in one page never share style rules.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};

use super::{
    constants::{ISOLATION_PREFIX, ISOLATION_SUFFIX_LEN},
    css,
    utils::{element_content_range, find_style_element, parse_document, SourceEditor},
};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Returns an isolated copy of `svg` using a freshly generated token.
///
/// Isolation is best effort: when `svg` cannot be parsed, it is returned unchanged.
pub fn isolate(svg: &str) -> String {
    isolate_with_token(svg, &unique_token())
}

/// Same as [`isolate`] with a caller-chosen token.
///
/// Every class name used by any element becomes `<token>-<class>`, both in `class`
/// attributes and in the style block's selectors, and the root element's id becomes
/// `token`. Nothing else in the markup changes.
pub fn isolate_with_token(svg: &str, token: &str) -> String {
    let doc = match parse_document(svg) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Isolation skipped, SVG could not be parsed: {}", e);
            return svg.to_string();
        }
    };

    let classes: IndexSet<&str> = doc
        .descendants()
        .filter(|node| node.is_element())
        .filter_map(|node| node.attribute("class"))
        .flat_map(str::split_whitespace)
        .collect();
    let renames: IndexMap<String, String> = classes
        .iter()
        .map(|class| (class.to_string(), format!("{}-{}", token, class)))
        .collect();

    let mut editor = SourceEditor::new(svg);
    editor.set_attribute(doc.root_element(), "id", token);

    if let Some(range) = find_style_element(&doc).and_then(|style| element_content_range(svg, style)) {
        let original_css = &svg[range.clone()];
        let renamed_css = css::rename_classes(original_css, &renames);
        if renamed_css != original_css {
            editor.replace(range, renamed_css);
        }
    }

    for node in doc.descendants().filter(|node| node.is_element()) {
        if let Some(class_attr) = node.attribute("class") {
            let prefixed = class_attr
                .split_whitespace()
                .map(|class| format!("{}-{}", token, class))
                .collect::<Vec<_>>()
                .join(" ");
            editor.set_attribute(node, "class", &prefixed);
        }
    }

    debug!("Isolated {} class names under {}", renames.len(), token);
    editor.finish()
}

/// A token unique within the running process: `original-svg-<time>-<random>`.
/// Not cryptographically strong.
pub fn unique_token() -> String {
    format!(
        "{}-{}-{}",
        ISOLATION_PREFIX,
        timestamp_millis(),
        random_suffix(ISOLATION_SUFFIX_LEN)
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

// std has no clock on wasm32-unknown-unknown; the host's Date is used instead.
#[cfg(target_arch = "wasm32")]
fn timestamp_millis() -> u128 {
    js_sys::Date::now() as u128
}

fn random_suffix(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    if let Err(e) = getrandom::getrandom(&mut bytes) {
        warn!("Random source unavailable ({}), using sequence suffix", e);
        let seed = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed).to_le_bytes();
        for (byte, seed_byte) in bytes.iter_mut().zip(seed.iter().cycle()) {
            *byte = *seed_byte;
        }
    }
    bytes
        .iter()
        .map(|b| BASE36[usize::from(*b) % BASE36.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_isolate_renames_classes_and_sets_root_id() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" id="old"><style>.foo { fill: red } .foobar { fill: blue } .foo.bar{}</style><text class="foo  bar">a</text><rect class="foobar"/></svg>"#;
        let isolated = isolate_with_token(svg, "tok");
        assert_eq!(
            isolated,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="tok"><style>.tok-foo { fill: red } .tok-foobar { fill: blue } .tok-foo.tok-bar{}</style><text class="tok-foo tok-bar">a</text><rect class="tok-foobar"/></svg>"#
        );
    }

    #[test]
    fn test_isolate_leaves_unused_selectors() {
        let svg = r#"<svg><style>.foo{} .unused{}</style><text class="foo">a</text></svg>"#;
        let isolated = isolate_with_token(svg, "t");
        assert_eq!(
            isolated,
            r#"<svg id="t"><style>.t-foo{} .unused{}</style><text class="t-foo">a</text></svg>"#
        );
    }

    #[test]
    fn test_isolate_falls_back_on_parse_error() {
        let broken = "<svg><text class='a'></svg>";
        assert_eq!(isolate(broken), broken);
    }

    #[test]
    fn test_token_time_part_is_epoch_millis() {
        let token = unique_token();
        let rest = token.strip_prefix("original-svg-").unwrap();
        let (millis, suffix) = rest.split_once('-').unwrap();
        let millis: u128 = millis.parse().unwrap();
        // After 2020-09-13, in milliseconds.
        assert!(millis > 1_600_000_000_000);
        assert_eq!(suffix.len(), ISOLATION_SUFFIX_LEN);
    }

    #[test]
    fn test_unique_tokens_differ() {
        let a = unique_token();
        let b = unique_token();
        assert!(a.starts_with("original-svg-"));
        assert_ne!(a, b);
        let suffix = a.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), ISOLATION_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
