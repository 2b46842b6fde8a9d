use crate::quotes::{QuoteLayering, QuotePair, QuoteVocabulary};

/// Where a position sits relative to the quote regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Bare,
    InPrimary,
    InSecondary,
}

/// The quote automaton, one step per character.
///
/// At most one region is open at a time: while in a primary region the secondary
/// quote characters are plain text and the other way around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QuoteState {
    /// Index of the primary pair that opened the current region
    primary: Option<usize>,
    /// Index of the secondary pair that opened the current region
    secondary: Option<usize>,
    /// The previous character was the escape character of the open pair
    pending_escape: bool,
}

/// What a single character does to an open region
enum Step {
    Literal,
    Close,
    Escape,
}

impl QuoteState {
    #[inline]
    pub fn is_bare(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }

    pub fn region(&self) -> Region {
        if self.primary.is_some() {
            Region::InPrimary
        } else if self.secondary.is_some() {
            Region::InSecondary
        } else {
            Region::Bare
        }
    }

    /// Whether `c` opens a region from the current state
    #[inline]
    pub fn would_open(&self, c: char, layering: &QuoteLayering) -> bool {
        self.is_bare() && opening_index(c, layering).is_some()
    }

    /// Apply `c` and return the state for the next character
    pub fn transition(self, c: char, layering: &QuoteLayering) -> Self {
        if let Some(index) = self.primary {
            return self.step_inside(c, layering.primary(), index);
        }
        if let Some(index) = self.secondary {
            return match layering.secondary() {
                Some(vocabulary) => self.step_inside(c, vocabulary, index),
                None => Self::default(),
            };
        }

        match opening_index(c, layering) {
            Some((Region::InPrimary, index)) => {
                #[cfg(feature = "debug")]
                log::trace!("[transition] {c:?} opens primary pair {index}");
                QuoteState {
                    primary: Some(index),
                    ..Self::default()
                }
            }
            Some((_, index)) => {
                #[cfg(feature = "debug")]
                log::trace!("[transition] {c:?} opens secondary pair {index}");
                QuoteState {
                    secondary: Some(index),
                    ..Self::default()
                }
            }
            None => self,
        }
    }

    fn step_inside(self, c: char, vocabulary: &QuoteVocabulary, index: usize) -> Self {
        let Some(pair) = vocabulary.pair(index) else {
            // The index always comes from the same vocabulary
            return Self::default();
        };

        match step(pair, self.pending_escape, c) {
            Step::Literal => QuoteState {
                pending_escape: false,
                ..self
            },
            Step::Escape => QuoteState {
                pending_escape: true,
                ..self
            },
            Step::Close => {
                #[cfg(feature = "debug")]
                log::trace!("[transition] {c:?} closes {:?} pair {index}", self.region());
                Self::default()
            }
        }
    }
}

#[inline]
fn step(pair: &QuotePair, pending_escape: bool, c: char) -> Step {
    if pending_escape && pair.escape().is_some() {
        Step::Literal
    } else if c == pair.right() {
        Step::Close
    } else if Some(c) == pair.escape() {
        Step::Escape
    } else {
        Step::Literal
    }
}

/// Which layer and pair `c` would open from a bare state. Primary wins.
#[inline]
fn opening_index(c: char, layering: &QuoteLayering) -> Option<(Region, usize)> {
    if let Some(index) = layering.primary().opening(c) {
        return Some((Region::InPrimary, index));
    }
    layering
        .secondary()
        .and_then(|s| s.opening(c))
        .map(|index| (Region::InSecondary, index))
}
