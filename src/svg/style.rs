//! Resolution of a text element's font size and family.
//!
//! Lookup order is inline `style` attribute, then a class rule in the document's style
//! block, then the defaults (12px, Arial).

use roxmltree::Node;

use super::{
    constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_PX},
    css,
};

/// Resolves font properties against one document's style block text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleResolver<'s> {
    style_text: Option<&'s str>,
}

impl<'s> StyleResolver<'s> {
    pub fn new(style_text: Option<&'s str>) -> Self {
        StyleResolver { style_text }
    }

    /// Resolved `font-size` in px from raw `style` and `class` attribute values.
    pub fn resolve_font_size(&self, inline_style: Option<&str>, class_attr: Option<&str>) -> f64 {
        inline_style
            .and_then(|style| css::declaration_value(style, "font-size"))
            .and_then(css::parse_px)
            .or_else(|| self.class_value(class_attr, "font-size", css::parse_px))
            .unwrap_or(DEFAULT_FONT_SIZE_PX)
    }

    /// Resolved first `font-family` alternative from raw `style` and `class` attribute values.
    pub fn resolve_font_family(&self, inline_style: Option<&str>, class_attr: Option<&str>) -> String {
        inline_style
            .and_then(|style| css::declaration_value(style, "font-family"))
            .map(css::first_family)
            .filter(|family| !family.is_empty())
            .or_else(|| {
                self.class_value(class_attr, "font-family", |value| {
                    Some(css::first_family(value)).filter(|family| !family.is_empty())
                })
            })
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string())
    }

    pub(crate) fn font_size(&self, node: Node<'_, '_>) -> f64 {
        self.resolve_font_size(node.attribute("style"), node.attribute("class"))
    }

    pub(crate) fn font_family(&self, node: Node<'_, '_>) -> String {
        self.resolve_font_family(node.attribute("style"), node.attribute("class"))
    }

    /// Tries the element's classes in order; the first class with a rule carrying a
    /// usable `property` value wins.
    fn class_value<T>(
        &self,
        class_attr: Option<&str>,
        property: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let style_text = self.style_text?;
        class_attr?.split_whitespace().find_map(|class| {
            css::rules(style_text)
                .filter(|rule| css::selector_targets_class(rule.selector, class))
                .find_map(|rule| css::declaration_value(rule.body, property).and_then(&parse))
        })
    }
}
