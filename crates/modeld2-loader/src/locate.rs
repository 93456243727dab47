//! Best-effort mapping of registry items back to positions in the document.
//!
//! The registry is deserialized without position tracking, so validation
//! finds its items again by searching for their quoted JSON keys in
//! document order. When an item cannot be found the span falls back to an
//! empty span at the last known anchor.

use crate::span::Span;

pub(crate) struct Locator<'s> {
    source: &'s str,
}

impl<'s> Locator<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self { source }
    }

    /// Finds the first quoted occurrence of `text` at or after `from`.
    pub(crate) fn find_quoted(&self, text: &str, from: usize) -> Option<Span> {
        let needle = serde_json::to_string(text).ok()?;
        let haystack = self.source.get(from..)?;
        haystack
            .find(&needle)
            .map(|pos| Span::new(from + pos..from + pos + needle.len()))
    }

    /// Finds the `nth` (0-based) quoted occurrence of `text` after `anchor`.
    pub(crate) fn find_nth_quoted(&self, text: &str, anchor: Span, nth: usize) -> Span {
        let mut from = anchor.end();
        let mut found = None;
        for _ in 0..=nth {
            match self.find_quoted(text, from) {
                Some(span) => {
                    from = span.end();
                    found = Some(span);
                }
                None => return found.unwrap_or_else(|| Span::point(anchor.start())),
            }
        }
        found.unwrap_or_else(|| Span::point(anchor.start()))
    }

    /// Locates the key of an app.
    pub(crate) fn app(&self, app: &str) -> Span {
        self.find_quoted(app, 0).unwrap_or_default()
    }

    /// Locates the key of an entity inside its app.
    pub(crate) fn entity(&self, app: &str, entity: &str) -> Span {
        let app_span = self.app(app);
        self.find_quoted(entity, app_span.end())
            .unwrap_or_else(|| Span::point(app_span.start()))
    }
}
