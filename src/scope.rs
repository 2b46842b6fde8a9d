//! A read-only `[start, end)` window over a text, in byte offsets.

use std::fmt;
use std::str::CharIndices;

use crate::error::{Error, QuotescanResult};

/// The region of text a single scan walks over.
///
/// Offsets are byte offsets into `text` and always fall on UTF-8 char boundaries,
/// so slicing the text with them never panics.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scope<'t> {
    text: &'t str,
    start: usize,
    end: usize,
}

impl<'t> Scope<'t> {
    /// Create a scope over `text[start..end]`, checking the offsets are usable
    pub fn new(text: &'t str, start: usize, end: usize) -> QuotescanResult<Self> {
        if start > end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return Err(Error::InvalidScope {
                start,
                end,
                len: text.len(),
            });
        }
        Ok(Self { text, start, end })
    }

    /// A scope covering the whole text
    pub fn whole(text: &'t str) -> Self {
        Self {
            text,
            start: 0,
            end: text.len(),
        }
    }

    /// Only for callers that already checked the offsets, like the reader
    pub(crate) fn new_unchecked(text: &'t str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= text.len());
        debug_assert!(text.is_char_boundary(start) && text.is_char_boundary(end));
        Self { text, start, end }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The full backing text, not only the part in scope
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// The part of the text in scope
    pub fn as_str(&self) -> &'t str {
        &self.text[self.start..self.end]
    }

    /// Characters in scope paired with their absolute byte position in the text
    pub fn char_indices(&self) -> ScopeChars<'t> {
        ScopeChars {
            offset: self.start,
            inner: self.as_str().char_indices(),
        }
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scope({}..{}, {:?})", self.start, self.end, self.as_str())
    }
}

/// Iterator returned by [`Scope::char_indices`]
#[derive(Debug, Clone)]
pub struct ScopeChars<'t> {
    offset: usize,
    inner: CharIndices<'t>,
}

impl Iterator for ScopeChars<'_> {
    type Item = (usize, char);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, c)| (self.offset + i, c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_scope() {
        let scope = Scope::whole("hello");
        assert_eq!(scope.start(), 0);
        assert_eq!(scope.end(), 5);
        assert_eq!(scope.as_str(), "hello");
        assert!(!scope.is_empty());
    }

    #[test]
    fn test_sub_scope_positions_are_absolute() {
        let scope = Scope::new("abcdef", 2, 5).unwrap();
        assert_eq!(scope.as_str(), "cde");
        let positions: Vec<_> = scope.char_indices().collect();
        assert_eq!(positions, vec![(2, 'c'), (3, 'd'), (4, 'e')]);
    }

    #[test]
    fn test_empty_scope() {
        let scope = Scope::new("abc", 3, 3).unwrap();
        assert!(scope.is_empty());
        assert_eq!(scope.char_indices().count(), 0);
    }

    #[test]
    fn test_rejects_bad_offsets() {
        assert!(matches!(
            Scope::new("abc", 2, 1),
            Err(Error::InvalidScope { start: 2, end: 1, len: 3 })
        ));
        assert!(Scope::new("abc", 0, 4).is_err());
        // 'é' is two bytes long
        assert!(Scope::new("é", 1, 2).is_err());
        assert!(Scope::new("é", 0, 2).is_ok());
    }

    #[test]
    fn test_debug_output() {
        let scope = Scope::new("key=value", 4, 9).unwrap();
        insta::assert_snapshot!(format!("{scope:?}"), @r#"Scope(4..9, "value")"#);
    }
}
