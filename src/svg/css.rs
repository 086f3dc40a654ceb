//! Pattern-based handling of the narrow CSS subset found in SVG style blocks and
//! `style` attributes: flat rules with simple class selectors and `name: value`
//! declarations.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::{Captures, Regex};

/// `selector { body }` with no nested braces. Nested rules inside at-rules still match
/// on their own since the outer prelude never reaches a closing brace.
fn rule_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^{};]*)\{([^{}]*)\}").unwrap())
}

/// A rule prelude up to and including its opening brace.
fn prelude_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^{};]*\{").unwrap())
}

/// A complete class selector token. Capturing the whole identifier keeps `.foo` from
/// matching inside `.foobar`.
fn class_selector_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.(-?[_\p{L}][\w-]*)").unwrap())
}

fn px_value_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)px").unwrap())
}

fn font_size_declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)((?:^|[;\s])font-size\s*:\s*)[\d.]+px").unwrap())
}

/// The value runs to the next `;` outside an entity reference, so raw style block text
/// such as `&quot;Open Sans&quot;` is consumed whole. Group 2 keeps the terminator.
fn font_family_declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)((?:^|[;\s])font-family\s*:\s*)(?:&#?[0-9a-z]+;|[^;])*?(\s*(?:;|$))").unwrap()
    })
}

/// A rule found in a style sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CssRule<'a> {
    pub selector: &'a str,
    pub body: &'a str,
}

pub(crate) fn rules(css: &str) -> impl Iterator<Item = CssRule<'_>> {
    rule_regex().captures_iter(css).filter_map(|caps| {
        Some(CssRule {
            selector: caps.get(1)?.as_str(),
            body: caps.get(2)?.as_str(),
        })
    })
}

/// The class ending a compound selector, e.g. `note` in `text.note`.
fn trailing_class_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.(-?[_\p{L}][\w-]*)$").unwrap())
}

/// True when one selector of the list targets elements of `class` itself: its last
/// compound ends in `.<class>` and carries no pseudo-class or pseudo-element.
/// `.card .title` targets `title` only, and `.note:hover` targets nothing.
pub(crate) fn selector_targets_class(selector_list: &str, class: &str) -> bool {
    selector_list.split(',').any(|selector| {
        let Some(compound) = selector
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '>' | '+' | '~'))
            .find(|part| !part.is_empty())
        else {
            return false;
        };
        !compound.contains(':')
            && trailing_class_regex()
                .captures(compound)
                .is_some_and(|caps| &caps[1] == class)
    })
}

/// `name: value` pairs of a declaration block, trimmed, in source order.
pub(crate) fn declarations(block: &str) -> impl Iterator<Item = (&str, &str)> {
    block.split(';').filter_map(|declaration| {
        let (name, value) = declaration.split_once(':')?;
        Some((name.trim(), value.trim()))
    })
}

/// Value of the first declaration of `property` (ASCII case-insensitive).
pub(crate) fn declaration_value<'a>(block: &'a str, property: &str) -> Option<&'a str> {
    declarations(block)
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
        .map(|(_, value)| value)
}

/// Parses a leading `<number>px`; only finite positive sizes are accepted.
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let caps = px_value_regex().captures(value.trim())?;
    caps[1]
        .parse::<f64>()
        .ok()
        .filter(|size| size.is_finite() && *size > 0.0)
}

/// First alternative of a `font-family` value with quotes removed.
pub(crate) fn first_family(value: &str) -> String {
    let unquoted = value.replace(['\'', '"'], "");
    unquoted
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Formats a size the way it is written back into CSS (`12`, `12.5`).
pub(crate) fn format_px(size: f64) -> String {
    format!("{}px", size)
}

/// Replaces the font declarations of an inline style, keeping every other declaration
/// in its original order.
pub(crate) fn rewrite_inline_style(style: &str, size: f64, family: &str) -> String {
    let kept: Vec<&str> = style
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .filter(|declaration| {
            let name = declaration
                .split_once(':')
                .map_or(*declaration, |(name, _)| name)
                .trim();
            !name.eq_ignore_ascii_case("font-size") && !name.eq_ignore_ascii_case("font-family")
        })
        .collect();
    let font = format!("font-size: {}; font-family: {};", format_px(size), family);
    if kept.is_empty() {
        font
    } else {
        format!("{}; {}", kept.join("; "), font)
    }
}

/// Rewrites the font-size and font-family values inside every rule whose selector
/// targets `.<class>`. Other rules and declarations are left as written.
pub(crate) fn rewrite_class_rules(css: &str, class: &str, size: f64, family: &str) -> String {
    rule_regex()
        .replace_all(css, |caps: &Captures| {
            let selector = &caps[1];
            if !selector_targets_class(selector, class) {
                return caps[0].to_string();
            }
            let body = font_size_declaration_regex().replace_all(&caps[2], |c: &Captures| {
                format!("{}{}", &c[1], format_px(size))
            });
            let body = font_family_declaration_regex()
                .replace_all(&body, |c: &Captures| format!("{}{}{}", &c[1], family, &c[2]));
            format!("{}{{{}}}", selector, body)
        })
        .into_owned()
}

/// Renames class selectors in rule preludes using `renames` (old name to new name).
/// Declaration values are never touched.
pub(crate) fn rename_classes(css: &str, renames: &IndexMap<String, String>) -> String {
    prelude_regex()
        .replace_all(css, |prelude: &Captures| {
            class_selector_regex()
                .replace_all(&prelude[0], |caps: &Captures| match renames.get(&caps[1]) {
                    Some(renamed) => format!(".{}", renamed),
                    None => caps[0].to_string(),
                })
                .into_owned()
        })
        .into_owned()
}
