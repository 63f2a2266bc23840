//! String helpers shared by the namer and the selector.

use glob::{MatchOptions, Pattern};
use heck::AsUpperCamelCase;

use crate::error::ConfigError;

/// `*` and `?` don't match `/`; `**` does.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A list of glob patterns.
#[derive(Clone, Debug, Default)]
pub struct Patterns(Vec<Pattern>);

impl Patterns {
    pub fn new<S: AsRef<str>>(patterns: impl IntoIterator<Item = S>) -> Result<Self, ConfigError> {
        patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Pattern::new(pattern).map_err(|err| ConfigError::BadPattern(pattern.to_owned(), err))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `text` matches any of the patterns.
    pub fn matches_any(&self, text: &str) -> bool {
        self.0
            .iter()
            .any(|pattern| pattern.matches_with(text, MATCH_OPTIONS))
    }
}

/// Converts `s` to `PascalCase`, splitting words on case changes and
/// non-alphanumeric characters.
pub fn pascal_case(s: &str) -> String {
    AsUpperCamelCase(s).to_string()
}

/// Returns the word used in declaration names for an HTTP status code.
pub fn status_text(status: &str) -> &str {
    match status {
        "200" => "Ok",
        "201" => "Created",
        _ => status,
    }
}
