//! Markup sanitization via ammonia.

use std::collections::HashSet;

use ammonia::Builder;

use quill_core::ports::Sanitizer;

/// Ammonia-backed sanitizer.
///
/// Post content keeps ammonia's default safe tag set; everything else
/// (titles, hashtags, categories, links, comment text) is stripped down
/// to plain text. Script bodies are dropped entirely in both modes.
pub struct AmmoniaSanitizer {
    rich: Builder<'static>,
    plain: Builder<'static>,
}

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        let mut plain = Builder::default();
        plain.tags(HashSet::new());

        Self {
            rich: Builder::default(),
            plain,
        }
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for AmmoniaSanitizer {
    fn clean(&self, input: &str) -> String {
        self.rich.clean(input).to_string()
    }

    fn clean_text(&self, input: &str) -> String {
        self.plain.clean(input).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_drops_script_but_keeps_formatting() {
        let sanitizer = AmmoniaSanitizer::new();

        let out = sanitizer.clean("<b>hello</b><script>alert('x')</script>");
        assert_eq!(out, "<b>hello</b>");
    }

    #[test]
    fn clean_text_strips_all_tags() {
        let sanitizer = AmmoniaSanitizer::new();

        let out = sanitizer.clean_text("<b>My</b> <i>title</i>");
        assert_eq!(out, "My title");
    }

    #[test]
    fn plain_strings_pass_through() {
        let sanitizer = AmmoniaSanitizer::new();

        assert_eq!(sanitizer.clean_text("rust 2024"), "rust 2024");
        assert_eq!(sanitizer.clean("just words"), "just words");
    }
}
