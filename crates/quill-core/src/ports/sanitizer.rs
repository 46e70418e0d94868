//! Markup sanitization port.
//!
//! All user-supplied free text is sanitized once, at the write boundary.
//! Output escaping is left to response consumers.

/// Strips unsafe markup from user-supplied strings.
pub trait Sanitizer: Send + Sync {
    /// Clean rich text (post content): unsafe markup removed, a safe
    /// subset of formatting tags may survive.
    fn clean(&self, input: &str) -> String;

    /// Clean plain text (titles, hashtags, categories, links, comments):
    /// all markup removed.
    fn clean_text(&self, input: &str) -> String;
}
