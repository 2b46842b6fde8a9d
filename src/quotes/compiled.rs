use std::fmt;
use std::slice;

use serde::Serialize;

/// One opening/closing quote couple, with the optional escape character that keeps
/// a closing quote from closing the region when it directly precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QuotePair {
    left: char,
    right: char,
    escape: Option<char>,
}

impl QuotePair {
    fn new(left: char, right: char, escape: Option<char>) -> Result<Self, ConfigError> {
        if escape == Some(right) {
            return Err(ConfigError::EscapeIsRightQuote { quote: right });
        }
        Ok(Self {
            left,
            right,
            escape,
        })
    }

    #[inline]
    pub fn left(&self) -> char {
        self.left
    }

    #[inline]
    pub fn right(&self) -> char {
        self.right
    }

    #[inline]
    pub fn escape(&self) -> Option<char> {
        self.escape
    }
}

/// An ordered, validated list of quote pairs: never empty, no left quote twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuotePairs {
    pairs: Vec<QuotePair>,
}

impl QuotePairs {
    fn new(pairs: Vec<QuotePair>) -> Result<Self, ConfigError> {
        if pairs.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }
        for (i, pair) in pairs.iter().enumerate() {
            if pairs[..i].iter().any(|p| p.left == pair.left) {
                return Err(ConfigError::DuplicateLeftQuote { quote: pair.left });
            }
        }
        Ok(Self { pairs })
    }

    pub fn as_slice(&self) -> &[QuotePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// What counts as a quote at one nesting layer.
///
/// Only the constructors below can build a `SinglePair` or a `MultiPair`, so any
/// vocabulary that exists has already been validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum QuoteVocabulary {
    /// No quoting: every character is a delimiter candidate
    #[default]
    None,
    /// A single opening/closing couple
    SinglePair(QuotePair),
    /// Several couples, a region opened by `lefts[i]` is only closed by `rights[i]`
    MultiPair(QuotePairs),
}

impl QuoteVocabulary {
    pub fn none() -> Self {
        QuoteVocabulary::None
    }

    /// `left` opens and `right` closes. They can be the same character, like `"`.
    pub fn single(left: char, right: char) -> Self {
        QuoteVocabulary::SinglePair(QuotePair {
            left,
            right,
            escape: None,
        })
    }

    pub fn single_escaped(left: char, right: char, escape: char) -> Result<Self, ConfigError> {
        Ok(QuoteVocabulary::SinglePair(QuotePair::new(
            left,
            right,
            Some(escape),
        )?))
    }

    /// Parallel lists: `lefts[i]` and `rights[i]` form a pair.
    pub fn multi(lefts: &[char], rights: &[char]) -> Result<Self, ConfigError> {
        Self::build_multi(lefts, rights, None)
    }

    /// Like [`QuoteVocabulary::multi`] but every pair honours the same escape character
    pub fn multi_escaped(
        lefts: &[char],
        rights: &[char],
        escape: char,
    ) -> Result<Self, ConfigError> {
        Self::build_multi(lefts, rights, Some(escape))
    }

    fn build_multi(
        lefts: &[char],
        rights: &[char],
        escape: Option<char>,
    ) -> Result<Self, ConfigError> {
        if lefts.len() != rights.len() {
            return Err(ConfigError::MismatchedPairs {
                lefts: lefts.len(),
                rights: rights.len(),
            });
        }
        let pairs = lefts
            .iter()
            .zip(rights)
            .map(|(&left, &right)| QuotePair::new(left, right, escape))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuoteVocabulary::MultiPair(QuotePairs::new(pairs)?))
    }

    /// `"` quoting with `\` as the escape character
    pub fn double_quotes() -> Self {
        QuoteVocabulary::SinglePair(QuotePair {
            left: '"',
            right: '"',
            escape: Some('\\'),
        })
    }

    /// Parentheses, square brackets and curly braces
    pub fn brackets() -> Self {
        QuoteVocabulary::MultiPair(QuotePairs {
            pairs: vec![
                QuotePair {
                    left: '(',
                    right: ')',
                    escape: None,
                },
                QuotePair {
                    left: '[',
                    right: ']',
                    escape: None,
                },
                QuotePair {
                    left: '{',
                    right: '}',
                    escape: None,
                },
            ],
        })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, QuoteVocabulary::None)
    }

    /// All the pairs, in declaration order. Empty for `None`.
    pub fn pairs(&self) -> &[QuotePair] {
        match self {
            QuoteVocabulary::None => &[],
            QuoteVocabulary::SinglePair(pair) => slice::from_ref(pair),
            QuoteVocabulary::MultiPair(pairs) => pairs.as_slice(),
        }
    }

    pub fn pair(&self, index: usize) -> Option<&QuotePair> {
        self.pairs().get(index)
    }

    /// Index of the pair `c` opens, if any
    #[inline]
    pub fn opening(&self, c: char) -> Option<usize> {
        self.pairs().iter().position(|p| p.left == c)
    }

    /// Whether `c` plays any role in this vocabulary
    pub fn is_quote_char(&self, c: char) -> bool {
        self.pairs()
            .iter()
            .any(|p| p.left == c || p.right == c || p.escape == Some(c))
    }
}

/// One or two layers of quoting.
///
/// Secondary quote characters are inert while a primary region is open and primary
/// quote characters are inert while a secondary region is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QuoteLayering {
    primary: QuoteVocabulary,
    /// `QuoteVocabulary::None` when there is a single layer
    secondary: QuoteVocabulary,
}

impl QuoteLayering {
    /// No quoting at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(vocabulary: QuoteVocabulary) -> Self {
        Self {
            primary: vocabulary,
            secondary: QuoteVocabulary::None,
        }
    }

    /// Two layers. A character opening both layers would make the secondary
    /// unreachable so that is rejected.
    pub fn layered(
        primary: QuoteVocabulary,
        secondary: QuoteVocabulary,
    ) -> Result<Self, ConfigError> {
        if let Some(pair) = secondary
            .pairs()
            .iter()
            .find(|p| primary.opening(p.left).is_some())
        {
            return Err(ConfigError::OverlappingLayers { quote: pair.left });
        }
        Ok(Self { primary, secondary })
    }

    #[inline]
    pub fn primary(&self) -> &QuoteVocabulary {
        &self.primary
    }

    #[inline]
    pub fn secondary(&self) -> Option<&QuoteVocabulary> {
        if self.secondary.is_none() {
            None
        } else {
            Some(&self.secondary)
        }
    }

    /// True when neither layer quotes anything
    pub fn is_none(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

impl From<QuoteVocabulary> for QuoteLayering {
    fn from(vocabulary: QuoteVocabulary) -> Self {
        QuoteLayering::single(vocabulary)
    }
}

/// Errors that can occur when building a quote vocabulary or layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyVocabulary,
    MismatchedPairs { lefts: usize, rights: usize },
    EscapeIsRightQuote { quote: char },
    DuplicateLeftQuote { quote: char },
    OverlappingLayers { quote: char },
    EscapeWithoutQuotes { escape: char },
    InvalidQuoteChar { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyVocabulary => {
                write!(f, "a multi-pair vocabulary needs at least one pair")
            }
            ConfigError::MismatchedPairs { lefts, rights } => {
                write!(f, "{} left quotes but {} right quotes", lefts, rights)
            }
            ConfigError::EscapeIsRightQuote { quote } => {
                write!(f, "escape character '{}' is also the right quote", quote)
            }
            ConfigError::DuplicateLeftQuote { quote } => {
                write!(f, "left quote '{}' is declared twice", quote)
            }
            ConfigError::OverlappingLayers { quote } => {
                write!(f, "'{}' opens both the primary and the secondary layer", quote)
            }
            ConfigError::EscapeWithoutQuotes { escape } => {
                write!(f, "escape character '{}' given for a layer without quotes", escape)
            }
            ConfigError::InvalidQuoteChar { value } => {
                write!(f, "expected a single quote character, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
