use std::fmt;
use std::io;

use crate::quotes::ConfigError;

pub(crate) type QuotescanResult<T> = Result<T, Error>;

/// Errors that can occur during quotescan usage
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred when reading a quote configuration file
    Io(io::Error),

    /// JSON parsing failed when loading a quote configuration.
    Json(serde_json::Error),

    /// A quote vocabulary or layering was rejected when it was built.
    Config(ConfigError),

    /// Offsets given for a scope or a cursor don't describe a valid region of the text:
    /// either `start > end`, `end` is past the end of the text, or one of them
    /// splits a UTF-8 character.
    #[allow(missing_docs)]
    InvalidScope { start: usize, end: usize, len: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON parsing error: {}", err),
            Error::Config(err) => write!(f, "invalid quote configuration: {}", err),
            Error::InvalidScope { start, end, len } => {
                write!(
                    f,
                    "invalid scope {}..{} over a text of {} bytes",
                    start, end, len
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Config(err) => Some(err),
            Error::InvalidScope { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}
