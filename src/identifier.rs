use std::borrow::Cow;
use std::fmt;

/// Selects which delimiter a resource file is split on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartIdentifier {
    /// Numbered part marker, becomes `<prefix><n>` (`part--3` with the default prefix)
    Numbered(u64),
    /// Used verbatim as the delimiter
    Literal(String),
}

impl PartIdentifier {
    pub fn literal(delimiter: impl Into<String>) -> Self {
        PartIdentifier::Literal(delimiter.into())
    }

    /// Build the delimiter string for this identifier.
    /// Literal identifiers ignore the prefix.
    pub fn delimiter<'a>(&'a self, part_prefix: &str) -> Cow<'a, str> {
        match self {
            PartIdentifier::Numbered(number) => Cow::Owned(format!("{part_prefix}{number}")),
            PartIdentifier::Literal(delimiter) => Cow::Borrowed(delimiter.as_str()),
        }
    }
}

impl From<u64> for PartIdentifier {
    fn from(number: u64) -> Self {
        PartIdentifier::Numbered(number)
    }
}

impl From<&str> for PartIdentifier {
    fn from(delimiter: &str) -> Self {
        PartIdentifier::Literal(delimiter.to_string())
    }
}

impl fmt::Display for PartIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartIdentifier::Numbered(number) => write!(f, "part #{number}"),
            PartIdentifier::Literal(delimiter) => write!(f, "delimiter {delimiter:?}"),
        }
    }
}
