mod compiled;
mod raw;

pub use compiled::*;
pub use raw::{RawQuotes, RawVocabulary};
