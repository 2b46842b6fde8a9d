//! A cursor-based reader built on top of [`scan`].
//!
//! The reader never holds a mutable position: every call takes a [`Cursor`] and
//! hands back the next one in its [`Read`], so the same reader can be shared freely.

use crate::error::QuotescanResult;
use crate::options::{OnNotFound, ReadOptions};
use crate::quotes::QuoteLayering;
use crate::scanner::{DelimiterSpec, ScanResult, scan};
use crate::scope::Scope;

/// The only notion of whitespace used when trimming
#[inline]
pub fn is_blank(c: char) -> bool {
    c.is_whitespace()
}

/// A byte position in the text of a [`TextReader`].
///
/// Only a reader creates cursors, and a cursor is only meaningful for the reader
/// that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    position: usize,
}

impl Cursor {
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

/// The outcome of a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Read<'t> {
    /// Where the next read should start
    pub cursor: Cursor,
    /// `None` when nothing was found and the options asked for an absent result
    pub text: Option<&'t str>,
    /// Which member of a `CharSet` delimiter matched
    pub matched_index: Option<usize>,
    /// Whether a delimiter was actually hit, as opposed to falling back to the remainder
    pub found: bool,
}

impl Read<'_> {
    pub fn is_absent(&self) -> bool {
        self.text.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextReader<'t> {
    text: &'t str,
    /// Nothing at or after this byte is ever read
    end: usize,
}

impl<'t> TextReader<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            end: text.len(),
        }
    }

    /// A reader that stops at `end` instead of the end of the text
    pub fn with_end(text: &'t str, end: usize) -> QuotescanResult<Self> {
        let scope = Scope::new(text, 0, end)?;
        Ok(Self {
            text,
            end: scope.end(),
        })
    }

    pub fn start(&self) -> Cursor {
        Cursor { position: 0 }
    }

    pub fn end(&self) -> Cursor {
        Cursor { position: self.end }
    }

    /// A cursor at an arbitrary byte position, which has to be a char boundary
    /// inside the readable region
    pub fn cursor_at(&self, position: usize) -> QuotescanResult<Cursor> {
        let scope = Scope::new(self.text, position, self.end)?;
        Ok(Cursor {
            position: scope.start(),
        })
    }

    /// The region a scan starting at `cursor` walks over.
    ///
    /// A cursor from another reader is clamped to the readable region and moved back
    /// to the start of the character it points into.
    pub fn scope(&self, cursor: Cursor) -> Scope<'t> {
        let mut start = cursor.position.min(self.end);
        while !self.text.is_char_boundary(start) {
            start -= 1;
        }
        Scope::new_unchecked(self.text, start, self.end)
    }

    pub fn remaining(&self, cursor: Cursor) -> &'t str {
        self.scope(cursor).as_str()
    }

    pub fn is_at_end(&self, cursor: Cursor) -> bool {
        cursor.position >= self.end
    }

    /// Move the cursor over any blank characters
    pub fn skip_blanks(&self, cursor: Cursor) -> Cursor {
        let scope = self.scope(cursor);
        let remaining = scope.as_str();
        let skipped = remaining.len() - remaining.trim_start_matches(is_blank).len();
        Cursor {
            position: scope.start() + skipped,
        }
    }

    /// Scan from `cursor` for `delimiter` and shape the result according to `options`
    pub fn read(
        &self,
        cursor: Cursor,
        delimiter: DelimiterSpec<'_>,
        layering: &QuoteLayering,
        options: ReadOptions,
    ) -> Read<'t> {
        let scope = self.scope(cursor);

        match scan(scope, delimiter, layering) {
            ScanResult::Found {
                position,
                matched_index,
            } => {
                let width = self.text[position..]
                    .chars()
                    .next()
                    .map_or(0, char::len_utf8);
                let after = position + width;
                let text_end = if options.keeps_delimiter() {
                    after
                } else {
                    position
                };
                let next = if options.stop_after_delimiter {
                    after
                } else {
                    position
                };
                #[cfg(feature = "debug")]
                log::debug!(
                    "[read] {delimiter:?} found at {position}, cursor {} -> {next}",
                    scope.start()
                );
                Read {
                    cursor: Cursor { position: next },
                    text: Some(trim(&self.text[scope.start()..text_end], options)),
                    matched_index,
                    found: true,
                }
            }
            ScanResult::NotFound => {
                #[cfg(feature = "debug")]
                log::debug!(
                    "[read] {delimiter:?} not found from {}, {:?}",
                    scope.start(),
                    options.on_not_found
                );
                match options.on_not_found {
                    OnNotFound::ReturnRemainder => Read {
                        cursor: self.end(),
                        text: Some(trim(scope.as_str(), options)),
                        matched_index: None,
                        found: false,
                    },
                    OnNotFound::ReturnAbsent => Read {
                        cursor,
                        text: None,
                        matched_index: None,
                        found: false,
                    },
                }
            }
        }
    }

    /// Text up to the delimiter, leaving the cursor on it
    pub fn read_before(
        &self,
        cursor: Cursor,
        delimiter: DelimiterSpec<'_>,
        layering: &QuoteLayering,
    ) -> Read<'t> {
        let options = ReadOptions::new().stop_after_delimiter(false);
        self.read(cursor, delimiter, layering, options)
    }

    /// Text up to the delimiter, moving the cursor past it
    pub fn read_past(
        &self,
        cursor: Cursor,
        delimiter: DelimiterSpec<'_>,
        layering: &QuoteLayering,
    ) -> Read<'t> {
        self.read(cursor, delimiter, layering, ReadOptions::new())
    }

    /// Text up to and including the delimiter, moving the cursor past it
    pub fn read_through(
        &self,
        cursor: Cursor,
        delimiter: DelimiterSpec<'_>,
        layering: &QuoteLayering,
    ) -> Read<'t> {
        let options = ReadOptions::new().discard_delimiter(false);
        self.read(cursor, delimiter, layering, options)
    }

    /// A trimmed field ending at the delimiter or at the end of the readable region
    pub fn read_field(
        &self,
        cursor: Cursor,
        delimiter: DelimiterSpec<'_>,
        layering: &QuoteLayering,
    ) -> Read<'t> {
        let options = ReadOptions::new()
            .trim(true)
            .on_not_found(OnNotFound::ReturnRemainder);
        self.read(cursor, delimiter, layering, options)
    }

    /// Every field between delimiters, the last one running to the end.
    ///
    /// The cursor always moves past the delimiter and a missing delimiter always
    /// yields the remainder, whatever `options` say. Trimming and keeping the
    /// delimiter are honoured.
    pub fn split<'d>(
        &self,
        delimiter: DelimiterSpec<'d>,
        layering: &'d QuoteLayering,
        options: ReadOptions,
    ) -> Split<'t, 'd> {
        Split {
            reader: *self,
            cursor: Some(self.start()),
            delimiter,
            layering,
            options: options
                .stop_after_delimiter(true)
                .on_not_found(OnNotFound::ReturnRemainder),
        }
    }
}

fn trim(text: &str, options: ReadOptions) -> &str {
    let text = if options.trim_start {
        text.trim_start_matches(is_blank)
    } else {
        text
    };
    if options.trim_end {
        text.trim_end_matches(is_blank)
    } else {
        text
    }
}

/// Iterator returned by [`TextReader::split`]
#[derive(Debug)]
pub struct Split<'t, 'd> {
    reader: TextReader<'t>,
    /// `None` once the last field was produced
    cursor: Option<Cursor>,
    delimiter: DelimiterSpec<'d>,
    layering: &'d QuoteLayering,
    options: ReadOptions,
}

impl<'t> Iterator for Split<'t, '_> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        let read = self
            .reader
            .read(cursor, self.delimiter, self.layering, self.options);
        self.cursor = read.found.then_some(read.cursor);
        read.text
    }
}
