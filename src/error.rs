use crate::segment::Segment;

/// Why a version string was rejected by [`Version::parse`](crate::Version::parse).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing but whitespace was given.
    #[error("version string is empty")]
    Empty,

    /// The release segment (e.g. `1.2.3`) is missing where it should be.
    #[error("expected a release number such as `1.0`")]
    MissingRelease,

    /// A character that cannot appear at this point of a version.
    #[error("unexpected character `{character}` at position {position}")]
    UnexpectedCharacter {
        /// The offending character, lowercased.
        character: char,
        /// Byte offset into the trimmed, lowercased version string.
        position: usize,
    },

    /// The version string ends in the middle of a field (e.g. `1.0+`).
    #[error("version string ends unexpectedly")]
    UnexpectedEnd,

    /// A known qualifier appears after a field that must follow it, or a field appears twice,
    /// like `1.0.dev1a1` or `1.0a1b2`.
    #[error("`{found}` cannot appear after the {after} segment")]
    OutOfOrder {
        /// The qualifier spelling that was found.
        found: String,
        /// The name of the field that it was found after.
        after: &'static str,
    },

    /// An alphabetic qualifier that is none of the PEP 440 spellings, like `gamma`.
    #[error("`{qualifier}` is not a recognized pre-, post- or dev-release qualifier")]
    UnrecognizedQualifier {
        /// The unrecognized spelling, lowercased.
        qualifier: String,
    },

    /// A numeric segment too large to represent.
    #[error("number `{digits}` is too large")]
    NumberTooLarge {
        /// The digits as written.
        digits: String,
    },
}

/// Returned when a string is not a valid PEP 440 version.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("`{version}` is not a valid PEP 440 version: {kind}")]
pub struct ParseError {
    /// The offending input, as given.
    pub version: String,
    /// The reason it was rejected.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(version: &str, kind: ParseErrorKind) -> Self {
        Self {
            version: version.to_owned(),
            kind,
        }
    }
}

/// Returned when a version cannot be updated as requested.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// `pre` was requested on a version without a pre-release, so there is no kind to bump.
    #[error("version has no pre-release segment to update")]
    MissingPre,

    /// The update would make a segment negative.
    #[error("updating `{segment}` would make it negative ({value})")]
    Negative {
        /// The segment being updated.
        segment: Segment,
        /// The would-be value.
        value: i128,
    },

    /// A release position so far past the end of the release that zero-padding up to it is
    /// refused.
    #[error("release position {index} is too far past the end of the release")]
    PositionTooLarge {
        /// The requested position.
        index: usize,
    },

    /// The update would not fit in a segment.
    #[error("updating `{segment}` overflows")]
    Overflow {
        /// The segment being updated.
        segment: Segment,
    },

    /// A segment name that is not one of `major`, `minor`, `micro`, `release`, `pre`, `post`,
    /// `dev`, or a release index.
    #[error("unknown segment `{name}`, should be one of major, minor, micro, release, pre, post, dev or a release index")]
    UnknownSegment {
        /// The name as given.
        name: String,
    },
}

/// Returned when a [`Version`](crate::Version) is constructed from fields that break its
/// invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidVersion {
    /// The release has no numbers.
    #[error("release should have at least one number")]
    EmptyRelease,

    /// The local version label has no segments.
    #[error("local version label should have at least one segment")]
    EmptyLocal,

    /// A local token is empty, has other characters, or is only digits.
    #[error("local segment `{segment}` should be non-empty lowercase ASCII letters and digits")]
    InvalidLocalSegment {
        /// The segment as given.
        segment: String,
    },
}

/// Any error this crate produces.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// See [`UpdateError`].
    #[error(transparent)]
    Update(#[from] UpdateError),

    /// See [`InvalidVersion`].
    #[error(transparent)]
    Invalid(#[from] InvalidVersion),
}
