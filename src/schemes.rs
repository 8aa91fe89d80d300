/**
This module gives the tooling necessary to classify BIO/BIOES tags: the prefix alphabet, the
boundary rules and the errors raised when a tag cannot be parsed.
*/
use enum_iterator::{all, Sequence};
use std::error::Error;
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Sequence)]
/// Prefix represent an annotation specifying the place of a token in a chunk. It is the leading
/// character of a tag, such as the `B` in `B-NP`. A prefix is a single ascii character.
pub enum Prefix {
    B,
    I,
    O,
    E,
    S,
}

impl Prefix {
    /// Parses the leading character of a tag into a `Prefix`.
    pub fn of_tag(tag: &str) -> Result<Self, TagParseError> {
        let leading = tag.chars().next().ok_or(TagParseError::EmptyTag)?;
        Self::try_from(leading)
    }

    /// A boundary prefix closes the currently open chunk and opens a new one.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Prefix::B | Prefix::O | Prefix::S)
    }

    /// A continuation prefix extends the currently open chunk.
    pub fn is_continuation(&self) -> bool {
        !self.is_boundary()
    }

    fn as_char(&self) -> char {
        match self {
            Prefix::B => 'B',
            Prefix::I => 'I',
            Prefix::O => 'O',
            Prefix::E => 'E',
            Prefix::S => 'S',
        }
    }
}

impl TryFrom<char> for Prefix {
    type Error = TagParseError;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'B' => Ok(Self::B),
            'I' => Ok(Self::I),
            'O' => Ok(Self::O),
            'E' => Ok(Self::E),
            'S' => Ok(Self::S),
            c => Err(TagParseError::UnknownPrefix(c)),
        }
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Could not parse a tag into a `Prefix`.
pub enum TagParseError {
    UnknownPrefix(char),
    EmptyTag,
}

impl Display for TagParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPrefix(c) => {
                let recognized: Vec<Prefix> = all::<Prefix>().collect();
                write!(
                    f,
                    "The leading character ({}) is not a recognized prefix. Recognized prefixes: {:?}",
                    c, recognized
                )
            }
            Self::EmptyTag => {
                write!(f, "Received an empty tag")
            }
        }
    }
}

impl Error for TagParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The tag column of a row: the reference annotation (`Gold`) or the predicted one (`Guess`).
pub enum TagColumn {
    Gold,
    Guess,
}

impl Display for TagColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gold => write!(f, "gold"),
            Self::Guess => write!(f, "guess"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A tag violated the scheme during extraction. Carries the column and the row offset of the
/// offending tag.
pub enum InvalidTagError {
    /// The tag could not be parsed into a `Prefix`.
    Malformed {
        column: TagColumn,
        row: usize,
        source: TagParseError,
    },
    /// The first tag of a sequence is a continuation prefix. A sequence must not start mid-chunk.
    OpensMidChunk {
        column: TagColumn,
        row: usize,
        tag: String,
    },
}

impl Display for InvalidTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed {
                column,
                row,
                source,
            } => {
                write!(f, "Invalid tag in `{}` column at row {}: {}", column, row, source)
            }
            Self::OpensMidChunk { column, row, tag } => {
                write!(
                    f,
                    "The `{}` column starts mid-chunk at row {} with tag `{}`. A sequence must start on a boundary prefix (B, O or S)",
                    column, row, tag
                )
            }
        }
    }
}

impl Error for InvalidTagError {}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{QuickCheck, TestResult};
    use rstest::rstest;

    #[rstest]
    #[case("B-NP", Prefix::B)]
    #[case("I-NP", Prefix::I)]
    #[case("O", Prefix::O)]
    #[case("E-VP", Prefix::E)]
    #[case("S-PER", Prefix::S)]
    fn test_of_tag(#[case] tag: &str, #[case] expected: Prefix) {
        assert_eq!(Prefix::of_tag(tag), Ok(expected));
    }

    #[rstest]
    #[case(Prefix::B, true)]
    #[case(Prefix::O, true)]
    #[case(Prefix::S, true)]
    #[case(Prefix::I, false)]
    #[case(Prefix::E, false)]
    fn test_boundary_classification(#[case] prefix: Prefix, #[case] is_boundary: bool) {
        assert_eq!(prefix.is_boundary(), is_boundary);
        assert_eq!(prefix.is_continuation(), !is_boundary);
    }

    #[test]
    fn test_empty_tag_is_rejected() {
        assert_eq!(Prefix::of_tag(""), Err(TagParseError::EmptyTag));
    }

    #[test]
    fn test_unknown_leading_char_is_rejected() {
        fn unknown_chars_fail(leading: char, rest: String) -> TestResult {
            if Prefix::try_from(leading).is_ok() {
                return TestResult::discard();
            }
            let tag = leading.to_string() + &rest;
            match Prefix::of_tag(&tag) {
                Err(TagParseError::UnknownPrefix(c)) if c == leading => TestResult::passed(),
                _ => TestResult::failed(),
            }
        }
        let mut qc = QuickCheck::new().tests(1000);
        qc.quickcheck(unknown_chars_fail as fn(char, String) -> TestResult)
    }

    #[test]
    fn test_only_the_leading_char_matters() {
        // The rest of the tag is free-form and never inspected here.
        assert_eq!(Prefix::of_tag("B"), Ok(Prefix::B));
        assert_eq!(Prefix::of_tag("Bogus"), Ok(Prefix::B));
        assert_eq!(Prefix::of_tag("S-some/odd|label"), Ok(Prefix::S));
    }
}
