// ABOUTME: Readable-content extraction: the ContentExtractor seam and its built-in implementation.
// ABOUTME: Re-exports ReadableExtractor and the scoring helpers it relies on.

pub mod readable;
pub mod scoring;

pub use readable::ReadableExtractor;

/// Turns raw page markup into readable main-content text.
///
/// Implementations work on the original markup, never on a cleaned tree.
/// `None` means nothing readable was found.
pub trait ContentExtractor {
    fn extract(&self, html: &str) -> Option<String>;
}

impl<F> ContentExtractor for F
where
    F: Fn(&str) -> Option<String>,
{
    fn extract(&self, html: &str) -> Option<String> {
        self(html)
    }
}
