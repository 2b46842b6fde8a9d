//! The quote-aware scan: a single left to right pass over a scope that reports the
//! first delimiter not hidden inside a quote region.

use std::fmt;

use serde::Serialize;

use crate::quotes::QuoteLayering;
use crate::scope::{Scope, ScopeChars};

mod tracker;

pub use tracker::{QuoteState, Region};

/// What a scan is looking for
#[derive(Clone, Copy)]
pub enum DelimiterSpec<'d> {
    Char(char),
    /// Any of the characters. The hit reports which one matched.
    CharSet(&'d [char]),
    Predicate(&'d dyn Fn(char) -> bool),
}

impl DelimiterSpec<'_> {
    /// `None` if `c` is not a delimiter. Otherwise the index in the set for
    /// `CharSet`, the lowest one if the set repeats a character.
    #[inline]
    pub fn matches(&self, c: char) -> Option<Option<usize>> {
        match self {
            DelimiterSpec::Char(d) => (*d == c).then_some(None),
            DelimiterSpec::CharSet(set) => set.iter().position(|d| *d == c).map(Some),
            DelimiterSpec::Predicate(f) => f(c).then_some(None),
        }
    }
}

impl fmt::Debug for DelimiterSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelimiterSpec::Char(c) => f.debug_tuple("Char").field(c).finish(),
            DelimiterSpec::CharSet(set) => f.debug_tuple("CharSet").field(set).finish(),
            DelimiterSpec::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<char> for DelimiterSpec<'_> {
    fn from(c: char) -> Self {
        DelimiterSpec::Char(c)
    }
}

impl<'d> From<&'d [char]> for DelimiterSpec<'d> {
    fn from(set: &'d [char]) -> Self {
        DelimiterSpec::CharSet(set)
    }
}

/// A single delimiter occurrence outside of any quote region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScanHit {
    /// Byte position of the delimiter in the text
    pub position: usize,
    /// Only set for `CharSet` delimiters
    pub matched_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanResult {
    Found {
        position: usize,
        matched_index: Option<usize>,
    },
    NotFound,
}

impl ScanResult {
    pub fn is_found(&self) -> bool {
        matches!(self, ScanResult::Found { .. })
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            ScanResult::Found { position, .. } => Some(*position),
            ScanResult::NotFound => None,
        }
    }

    pub fn matched_index(&self) -> Option<usize> {
        match self {
            ScanResult::Found { matched_index, .. } => *matched_index,
            ScanResult::NotFound => None,
        }
    }
}

impl From<Option<ScanHit>> for ScanResult {
    fn from(hit: Option<ScanHit>) -> Self {
        match hit {
            Some(ScanHit {
                position,
                matched_index,
            }) => ScanResult::Found {
                position,
                matched_index,
            },
            None => ScanResult::NotFound,
        }
    }
}

/// Find the first position in `scope` where `delimiter` matches outside of any
/// quote region described by `layering`.
///
/// A character that opens a region is never a hit, even if it is also a delimiter.
/// Regions still open at the end of the scope are not an error: everything after the
/// opening quote is simply never a hit.
pub fn scan(
    scope: Scope<'_>,
    delimiter: DelimiterSpec<'_>,
    layering: &QuoteLayering,
) -> ScanResult {
    let mut chars = scope.char_indices();
    let mut state = QuoteState::default();
    next_hit(&mut chars, &mut state, delimiter, layering).into()
}

#[inline]
fn next_hit(
    chars: &mut ScopeChars<'_>,
    state: &mut QuoteState,
    delimiter: DelimiterSpec<'_>,
    layering: &QuoteLayering,
) -> Option<ScanHit> {
    for (position, c) in chars {
        if state.is_bare()
            && !state.would_open(c, layering)
            && let Some(matched_index) = delimiter.matches(c)
        {
            #[cfg(feature = "debug")]
            log::trace!("[scan] hit {c:?} at {position}");
            return Some(ScanHit {
                position,
                matched_index,
            });
        }
        *state = state.transition(c, layering);
    }
    None
}

/// A delimiter and its quoting bundled together so they can be run over many scopes
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'d> {
    delimiter: DelimiterSpec<'d>,
    layering: &'d QuoteLayering,
}

impl<'d> Scanner<'d> {
    pub fn new(delimiter: DelimiterSpec<'d>, layering: &'d QuoteLayering) -> Self {
        Self {
            delimiter,
            layering,
        }
    }

    pub fn scan(&self, scope: Scope<'_>) -> ScanResult {
        scan(scope, self.delimiter, self.layering)
    }

    /// Every hit in the scope, in order
    pub fn find_all<'t>(&self, scope: Scope<'t>) -> FindAll<'d, 't> {
        FindAll {
            chars: scope.char_indices(),
            state: QuoteState::default(),
            delimiter: self.delimiter,
            layering: self.layering,
        }
    }
}

/// Iterator returned by [`Scanner::find_all`]
#[derive(Debug)]
pub struct FindAll<'d, 't> {
    chars: ScopeChars<'t>,
    state: QuoteState,
    delimiter: DelimiterSpec<'d>,
    layering: &'d QuoteLayering,
}

impl Iterator for FindAll<'_, '_> {
    type Item = ScanHit;

    fn next(&mut self) -> Option<Self::Item> {
        next_hit(&mut self.chars, &mut self.state, self.delimiter, self.layering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::QuoteVocabulary;

    fn found(position: usize) -> ScanResult {
        ScanResult::Found {
            position,
            matched_index: None,
        }
    }

    fn scan_str(
        text: &str,
        delimiter: DelimiterSpec<'_>,
        layering: &QuoteLayering,
    ) -> ScanResult {
        scan(Scope::whole(text), delimiter, layering)
    }

    #[test]
    fn test_no_quotes_matches_naive_search() {
        let layering = QuoteLayering::none();
        for text in ["", "abc", "a,b", ",", "ab,", "\"a,b\",c", "(x,y)", "é,a,"] {
            let expected: ScanResult = text
                .find(',')
                .map(|position| ScanHit {
                    position,
                    matched_index: None,
                })
                .into();
            assert_eq!(scan_str(text, ','.into(), &layering), expected, "{text:?}");
        }
    }

    #[test]
    fn test_delimiter_inside_quotes_is_skipped() {
        let layering = QuoteLayering::single(QuoteVocabulary::single('"', '"'));
        assert_eq!(scan_str(r#""a,b",c"#, ','.into(), &layering), found(5));
        assert_eq!(scan_str(r#""a,b""c,d""#, ','.into(), &layering), ScanResult::NotFound);
    }

    #[test]
    fn test_escaped_quote_does_not_close() {
        let layering = QuoteLayering::single(QuoteVocabulary::double_quotes());
        // The only unquoted quote characters open or close regions, so none is a hit
        let text = r#"a"b\"c"d"#;
        assert_eq!(scan_str(text, '"'.into(), &layering), ScanResult::NotFound);
        // The region closes on the last quote only: `d` is reachable, `c` is not
        assert_eq!(scan_str(text, 'd'.into(), &layering), found(7));
        assert_eq!(scan_str(text, 'c'.into(), &layering), ScanResult::NotFound);
        // Without the escape the region closes early and `c` is bare
        let plain = QuoteLayering::single(QuoteVocabulary::single('"', '"'));
        assert_eq!(scan_str(text, 'c'.into(), &plain), found(5));
    }

    #[test]
    fn test_secondary_quotes_are_inert_inside_primary() {
        let layering = QuoteLayering::layered(
            QuoteVocabulary::single('(', ')'),
            QuoteVocabulary::single('\'', '\''),
        )
        .unwrap();
        assert_eq!(scan_str("(it's fine), done", ','.into(), &layering), found(11));
    }

    #[test]
    fn test_primary_quotes_are_inert_inside_secondary() {
        let layering = QuoteLayering::layered(
            QuoteVocabulary::single('(', ')'),
            QuoteVocabulary::single('\'', '\''),
        )
        .unwrap();
        // The `(` inside '...' does not open a primary region
        assert_eq!(scan_str("'a(b', c)", ','.into(), &layering), found(5));
    }

    #[test]
    fn test_escaped_secondary_quote_does_not_close() {
        let layering = QuoteLayering::layered(
            QuoteVocabulary::single('(', ')'),
            QuoteVocabulary::single_escaped('\'', '\'', '\\').unwrap(),
        )
        .unwrap();
        assert_eq!(scan_str(r"'a\',b',c", ','.into(), &layering), found(7));
    }

    #[test]
    fn test_escaped_multi_pair_quote_does_not_close() {
        let vocabulary = QuoteVocabulary::multi_escaped(&['(', '['], &[')', ']'], '\\').unwrap();
        let layering = QuoteLayering::single(vocabulary);
        assert_eq!(scan_str(r"[a\],b],c", ','.into(), &layering), found(7));
        assert_eq!(scan_str(r"(a\),b),c", ','.into(), &layering), found(7));
    }

    #[test]
    fn test_unterminated_quote_hides_the_rest() {
        let layering = QuoteLayering::single(QuoteVocabulary::single('"', '"'));
        assert_eq!(scan_str(r#"ab "c,d;e"#, ','.into(), &layering), ScanResult::NotFound);
        assert_eq!(
            scan_str(r#"ab "c,d;e"#, DelimiterSpec::Predicate(&|c| c == ';'), &layering),
            ScanResult::NotFound
        );
    }

    #[test]
    fn test_scan_is_deterministic() {
        let layering = QuoteLayering::single(QuoteVocabulary::brackets());
        let set = [';', ','];
        let first = scan_str("f(a, b); g", DelimiterSpec::CharSet(&set), &layering);
        let second = scan_str("f(a, b); g", DelimiterSpec::CharSet(&set), &layering);
        assert_eq!(first, second);
        assert_eq!(
            first,
            ScanResult::Found {
                position: 7,
                matched_index: Some(0)
            }
        );
    }

    #[test]
    fn test_char_set_earliest_position_wins() {
        let set = [',', ';'];
        let result = scan_str("a;b,c", DelimiterSpec::CharSet(&set), &QuoteLayering::none());
        assert_eq!(
            result,
            ScanResult::Found {
                position: 1,
                matched_index: Some(1)
            }
        );
    }

    #[test]
    fn test_char_set_duplicate_reports_lowest_index() {
        let set = ['x', ';', ';'];
        let result = scan_str("a;b", DelimiterSpec::CharSet(&set), &QuoteLayering::none());
        assert_eq!(result.matched_index(), Some(1));
    }

    #[test]
    fn test_empty_char_set_never_matches() {
        let result = scan_str("a;b", DelimiterSpec::CharSet(&[]), &QuoteLayering::none());
        assert_eq!(result, ScanResult::NotFound);
    }

    #[test]
    fn test_quote_char_that_is_also_the_delimiter() {
        let layering = QuoteLayering::single(QuoteVocabulary::brackets());
        // `(` opens a region so it is not a hit
        assert_eq!(scan_str("a(b)c(", '('.into(), &layering), ScanResult::NotFound);
        // A stray closing bracket while bare doesn't open anything so it is a hit
        assert_eq!(scan_str("a)b", ')'.into(), &layering), found(1));
    }

    #[test]
    fn test_predicate() {
        let is_digit = |c: char| c.is_ascii_digit();
        let layering = QuoteLayering::single(QuoteVocabulary::single('[', ']'));
        let result = scan_str("ab[12]c3", DelimiterSpec::Predicate(&is_digit), &layering);
        assert_eq!(result, found(7));
    }

    #[test]
    fn test_positions_are_byte_offsets_within_a_sub_scope() {
        let text = "héllo, wörld; end";
        let scope = Scope::new(text, 7, text.len()).unwrap();
        let result = scan(scope, ';'.into(), &QuoteLayering::none());
        assert_eq!(result, found(14));
        assert_eq!(&text[14..15], ";");
    }

    #[test]
    fn test_scan_respects_scope_end() {
        let text = "abc,def";
        let scope = Scope::new(text, 0, 3).unwrap();
        assert_eq!(scan(scope, ','.into(), &QuoteLayering::none()), ScanResult::NotFound);
    }

    #[test]
    fn test_find_all() {
        let layering = QuoteLayering::single(QuoteVocabulary::double_quotes());
        let scanner = Scanner::new(','.into(), &layering);
        let text = r#"a,"b,c",d,"e\",f""#;
        let positions: Vec<_> = scanner
            .find_all(Scope::whole(text))
            .map(|hit| hit.position)
            .collect();
        assert_eq!(positions, vec![1, 7, 9]);
        assert_eq!(scanner.scan(Scope::whole(text)), found(1));
    }

    #[test]
    fn test_scan_result_serialization() {
        let set = [',', ';'];
        let result = scan_str("a;b", DelimiterSpec::CharSet(&set), &QuoteLayering::none());
        insta::assert_snapshot!(
            serde_json::to_string(&result).unwrap(),
            @r#"{"kind":"found","position":1,"matched_index":1}"#
        );
        insta::assert_snapshot!(
            serde_json::to_string(&ScanResult::NotFound).unwrap(),
            @r#"{"kind":"not_found"}"#
        );
    }

    #[test]
    fn test_delimiter_debug() {
        let set = ['a', 'b'];
        insta::assert_snapshot!(format!("{:?}", DelimiterSpec::CharSet(&set)), @"CharSet(['a', 'b'])");
        insta::assert_snapshot!(format!("{:?}", DelimiterSpec::Predicate(&|_| true)), @"Predicate(..)");
    }
}
