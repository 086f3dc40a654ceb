//! Scale extraction from, and scale removal in, SVG `transform` attribute values.

use std::sync::OnceLock;

use regex::Regex;

/// `scale(sx sy)`, `scale(sx, sy)` or `scale(s)` with unsigned numbers.
fn scale_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\bscale\(\s*(\d+(?:\.\d*)?|\.\d+)(?:(?:\s*,\s*|\s+)(\d+(?:\.\d*)?|\.\d+))?\s*\)",
        )
        .unwrap()
    })
}

/// Any `scale(...)` call, whatever its arguments.
fn scale_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bscale\([^)]*\)").unwrap())
}

fn comma_space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\s+").unwrap())
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Returns `(scale_x, scale_y)` of the first recognised scale token, or `(1.0, 1.0)`.
/// A single argument applies to both axes. Other transform functions are ignored.
pub fn scale_of(transform: &str) -> (f64, f64) {
    let Some(caps) = scale_regex().captures(transform) else {
        return (1.0, 1.0);
    };
    let sx = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(1.0);
    let sy = match caps.get(2) {
        Some(m) => m.as_str().parse::<f64>().unwrap_or(1.0),
        None => sx,
    };
    (sx, sy)
}

/// Removes every `scale(...)` call, keeping the remaining functions in order, then
/// collapses the leftover separators. Returns an empty string when nothing remains.
pub fn strip_scale(transform: &str) -> String {
    let stripped = scale_token_regex().replace_all(transform, "");
    let collapsed = comma_space_regex().replace_all(&stripped, " ");
    let collapsed = whitespace_regex().replace_all(&collapsed, " ");
    collapsed
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}
