mod error;
mod options;
mod quotes;
mod reader;
mod scanner;
mod scope;

pub use error::Error;
pub use options::{OnNotFound, ReadOptions};
pub use quotes::{
    ConfigError, QuoteLayering, QuotePair, QuotePairs, QuoteVocabulary, RawQuotes, RawVocabulary,
};
pub use reader::{Cursor, Read, Split, TextReader, is_blank};
pub use scanner::{
    DelimiterSpec, FindAll, QuoteState, Region, ScanHit, ScanResult, Scanner, scan,
};
pub use scope::{Scope, ScopeChars};
