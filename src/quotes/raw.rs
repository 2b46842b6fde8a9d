use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use super::compiled::{ConfigError, QuoteLayering, QuoteVocabulary};
use crate::error::QuotescanResult;

/// One layer of quotes as written in a configuration file.
///
/// `lefts` and `rights` are read character by character: one character each gives a
/// single pair, more give a multi-pair vocabulary and both empty means no quoting.
///
/// # Examples
/// ```json
/// { "lefts": "\"", "rights": "\"", "escape": "\\" }
/// ```
///
/// ```json
/// { "lefts": "([{", "rights": ")]}" }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawVocabulary {
    pub lefts: String,
    pub rights: String,
    /// Applied to every pair of the layer, must be a single character
    pub escape: Option<String>,
}

impl RawVocabulary {
    fn compile(self) -> Result<QuoteVocabulary, ConfigError> {
        let lefts: Vec<char> = self.lefts.chars().collect();
        let rights: Vec<char> = self.rights.chars().collect();
        let escape = self.escape.as_deref().map(single_char).transpose()?;

        match (lefts.as_slice(), rights.as_slice(), escape) {
            ([], [], None) => Ok(QuoteVocabulary::None),
            ([], [], Some(escape)) => Err(ConfigError::EscapeWithoutQuotes { escape }),
            (&[left], &[right], None) => Ok(QuoteVocabulary::single(left, right)),
            (&[left], &[right], Some(escape)) => {
                QuoteVocabulary::single_escaped(left, right, escape)
            }
            (lefts, rights, None) => QuoteVocabulary::multi(lefts, rights),
            (lefts, rights, Some(escape)) => QuoteVocabulary::multi_escaped(lefts, rights, escape),
        }
    }
}

fn single_char(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidQuoteChar {
            value: value.to_string(),
        }),
    }
}

/// Quote configuration as loaded from JSON, compiled into a [`QuoteLayering`]
///
/// # Examples
/// ```json
/// {
///   "primary": { "lefts": "(", "rights": ")" },
///   "secondary": { "lefts": "'", "rights": "'" }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawQuotes {
    pub primary: Option<RawVocabulary>,
    pub secondary: Option<RawVocabulary>,
}

impl RawQuotes {
    pub fn from_json(input: &str) -> QuotescanResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> QuotescanResult<Self> {
        let file = File::open(&path)?;
        let raw_quotes = serde_json::from_reader(&file)?;
        Ok(raw_quotes)
    }

    /// Validate this configuration and turn it into something the scanner can use
    pub fn compile(self) -> Result<QuoteLayering, ConfigError> {
        let primary = match self.primary {
            Some(raw) => raw.compile()?,
            None => QuoteVocabulary::None,
        };
        match self.secondary {
            Some(raw) => QuoteLayering::layered(primary, raw.compile()?),
            None => Ok(QuoteLayering::single(primary)),
        }
    }
}
