use serde::{Deserialize, Serialize};

/// What a read does when no delimiter is found
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnNotFound {
    /// Act as if the delimiter was right at the end: everything left is returned
    /// and the cursor moves to the end
    ReturnRemainder,
    /// Return nothing and leave the cursor where it was
    #[default]
    ReturnAbsent,
}

/// How a read shapes its text and moves the cursor once the scan is done
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Move the cursor past the delimiter rather than onto it
    pub(crate) stop_after_delimiter: bool,
    /// Never include the delimiter in the returned text
    pub(crate) discard_delimiter: bool,
    pub(crate) trim_start: bool,
    pub(crate) trim_end: bool,
    pub(crate) on_not_found: OnNotFound,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            stop_after_delimiter: true,
            discard_delimiter: true,
            trim_start: false,
            trim_end: false,
            on_not_found: OnNotFound::ReturnAbsent,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_after_delimiter(mut self, value: bool) -> Self {
        self.stop_after_delimiter = value;
        self
    }

    /// Has no visible effect when `stop_after_delimiter` is `false` since the
    /// delimiter is never part of the text then
    pub fn discard_delimiter(mut self, value: bool) -> Self {
        self.discard_delimiter = value;
        self
    }

    pub fn trim_start(mut self, value: bool) -> Self {
        self.trim_start = value;
        self
    }

    pub fn trim_end(mut self, value: bool) -> Self {
        self.trim_end = value;
        self
    }

    /// Shorthand for both `trim_start` and `trim_end`
    pub fn trim(self, value: bool) -> Self {
        self.trim_start(value).trim_end(value)
    }

    pub fn on_not_found(mut self, value: OnNotFound) -> Self {
        self.on_not_found = value;
        self
    }

    /// Whether the delimiter ends up in the returned text
    pub(crate) fn keeps_delimiter(&self) -> bool {
        self.stop_after_delimiter && !self.discard_delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReadOptions::default();
        assert!(options.stop_after_delimiter);
        assert!(options.discard_delimiter);
        assert!(!options.keeps_delimiter());
        assert_eq!(options.on_not_found, OnNotFound::ReturnAbsent);
    }

    #[test]
    fn test_keeps_delimiter() {
        assert!(ReadOptions::new().discard_delimiter(false).keeps_delimiter());
        assert!(
            !ReadOptions::new()
                .discard_delimiter(false)
                .stop_after_delimiter(false)
                .keeps_delimiter()
        );
    }

    #[test]
    fn test_from_json() {
        let options: ReadOptions =
            serde_json::from_str(r#"{"trim_end": true, "on_not_found": "return_remainder"}"#)
                .unwrap();
        assert_eq!(
            options,
            ReadOptions::new()
                .trim_end(true)
                .on_not_found(OnNotFound::ReturnRemainder)
        );
    }
}
