use crate::{
    error::{ParseError, ParseErrorKind},
    normalize,
    version::Version,
};
use tracing::{debug, trace};

/// The fields of a version that are introduced by a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Pre,
    Post,
    Dev,
}

impl Field {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Field::Pre => "pre-release",
            Field::Post => "post-release",
            Field::Dev => "dev-release",
        }
    }
}

pub(crate) struct Qualifier {
    pub(crate) spelling: &'static str,
    pub(crate) field: Field,
}

/// Every keyword spelling, longest first so that a prefix (`pre`, `r`, `a`) never shadows a
/// longer spelling (`preview`, `rev`, `alpha`).
#[rustfmt::skip]
pub(crate) static QUALIFIERS: &[Qualifier] = &[
    Qualifier { spelling: "preview", field: Field::Pre },
    Qualifier { spelling: "alpha", field: Field::Pre },
    Qualifier { spelling: "beta", field: Field::Pre },
    Qualifier { spelling: "post", field: Field::Post },
    Qualifier { spelling: "pre", field: Field::Pre },
    Qualifier { spelling: "rev", field: Field::Post },
    Qualifier { spelling: "dev", field: Field::Dev },
    Qualifier { spelling: "rc", field: Field::Pre },
    Qualifier { spelling: "a", field: Field::Pre },
    Qualifier { spelling: "b", field: Field::Pre },
    Qualifier { spelling: "c", field: Field::Pre },
    Qualifier { spelling: "r", field: Field::Post },
];

/// A keyword-introduced field as written: its spelling (absent for the implicit `-N` post-release)
/// and its digits, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawQualifier<'a> {
    pub(crate) spelling: Option<&'a str>,
    pub(crate) number: Option<&'a str>,
}

/// The pieces of a version string, still as text. Produced by [Scanner::scan] and consumed by
/// [normalize::normalize].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawVersion<'a> {
    pub(crate) epoch: Option<&'a str>,
    pub(crate) release: Vec<&'a str>,
    pub(crate) pre: Option<RawQualifier<'a>>,
    pub(crate) post: Option<RawQualifier<'a>>,
    pub(crate) dev: Option<RawQualifier<'a>>,
    pub(crate) local: Option<&'a str>,
}

fn is_separator(byte: u8) -> bool {
    matches!(byte, b'.' | b'-' | b'_')
}

/// Walks a trimmed, lowercased version string field by field. Each field is optional except the
/// release, and fields are only looked for in order, so anything left over once the local label
/// has been tried is an error.
pub(crate) struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a [u8] {
        &self.text.as_bytes()[self.pos..]
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.rest().get(offset).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek_at(0) == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_separator(&mut self) -> bool {
        match self.peek_at(0) {
            Some(byte) if is_separator(byte) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consumes a run of bytes matching `pred`, returning it if non-empty.
    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a str> {
        let len = self.rest().iter().take_while(|&&b| pred(b)).count();
        if len == 0 {
            return None;
        }
        let start = self.pos;
        self.pos += len;
        // only ASCII bytes are ever consumed, so this is always on a char boundary
        Some(&self.text[start..self.pos])
    }

    fn digits(&mut self) -> Option<&'a str> {
        self.take_while(|b| b.is_ascii_digit())
    }

    /// Consumes an optional separator and a keyword spelling for `field`. Leaves the position
    /// untouched if the keyword found there (if any) belongs to another field.
    fn keyword(&mut self, field: Field) -> Option<&'static str> {
        let checkpoint = self.pos;
        self.eat_separator();
        let rest = self.rest();
        match QUALIFIERS
            .iter()
            .find(|q| rest.starts_with(q.spelling.as_bytes()))
        {
            Some(q) if q.field == field => {
                self.pos += q.spelling.len();
                Some(q.spelling)
            }
            _ => {
                self.pos = checkpoint;
                None
            }
        }
    }

    /// keyword, optional separator, optional digits
    fn qualifier(&mut self, field: Field) -> Option<RawQualifier<'a>> {
        let spelling = self.keyword(field)?;
        self.eat_separator();
        Some(RawQualifier {
            spelling: Some(spelling),
            number: self.digits(),
        })
    }

    /// A bare hyphen directly followed by digits, like the `-3` of `1.0-3`.
    fn implicit_post(&mut self) -> Option<RawQualifier<'a>> {
        if self.peek_at(0) == Some(b'-') && self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            Some(RawQualifier {
                spelling: None,
                number: self.digits(),
            })
        } else {
            None
        }
    }

    fn local_segment(&mut self) -> Option<&'a str> {
        self.take_while(|b| b.is_ascii_alphanumeric())
    }

    fn unexpected_here(&self) -> ParseErrorKind {
        match self.text[self.pos..].chars().next() {
            Some(character) => ParseErrorKind::UnexpectedCharacter {
                character,
                position: self.pos,
            },
            None => ParseErrorKind::UnexpectedEnd,
        }
    }

    pub(crate) fn scan(mut self) -> Result<RawVersion<'a>, ParseErrorKind> {
        self.eat(b'v');

        let leading = self.digits().ok_or(ParseErrorKind::MissingRelease)?;
        let (epoch, first) = if self.eat(b'!') {
            let first = self.digits().ok_or(ParseErrorKind::MissingRelease)?;
            (Some(leading), first)
        } else {
            (None, leading)
        };

        let mut release = vec![first];
        loop {
            let checkpoint = self.pos;
            if self.eat(b'.') {
                if let Some(number) = self.digits() {
                    release.push(number);
                    continue;
                }
            }
            self.pos = checkpoint;
            break;
        }
        let mut last_field = "release";

        let pre = self.qualifier(Field::Pre);
        if pre.is_some() {
            last_field = Field::Pre.name();
        }

        let post = self
            .implicit_post()
            .or_else(|| self.qualifier(Field::Post));
        if post.is_some() {
            last_field = Field::Post.name();
        }

        let dev = self.qualifier(Field::Dev);
        if dev.is_some() {
            last_field = Field::Dev.name();
        }

        let local = if self.eat(b'+') {
            let start = self.pos;
            self.local_segment().ok_or_else(|| self.unexpected_here())?;
            loop {
                let checkpoint = self.pos;
                if self.eat_separator() && self.local_segment().is_some() {
                    continue;
                }
                self.pos = checkpoint;
                break;
            }
            last_field = "local";
            Some(&self.text[start..self.pos])
        } else {
            None
        };

        if self.pos < self.text.len() {
            return Err(self.diagnose(last_field));
        }

        Ok(RawVersion {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Explains why the text left over after the last field could not be matched.
    fn diagnose(&mut self, last_field: &'static str) -> ParseErrorKind {
        let start = self.pos;
        let had_separator = self.eat_separator();
        if had_separator && self.pos == self.text.len() {
            return ParseErrorKind::UnexpectedEnd;
        }
        match self.take_while(|b| b.is_ascii_alphabetic()) {
            Some(word) if QUALIFIERS.iter().any(|q| q.spelling == word) => {
                ParseErrorKind::OutOfOrder {
                    found: word.to_owned(),
                    after: last_field,
                }
            }
            Some(word) => ParseErrorKind::UnrecognizedQualifier {
                qualifier: word.to_owned(),
            },
            None => {
                self.pos = start;
                self.unexpected_here()
            }
        }
    }
}

/// Parses a version string: trims and lowercases it, scans it into its raw fields, and
/// normalizes those into a [Version].
pub(crate) fn parse(input: &str) -> Result<Version, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(input, ParseErrorKind::Empty));
    }
    let lowered = trimmed.to_ascii_lowercase();

    let result = Scanner::new(&lowered)
        .scan()
        .and_then(normalize::normalize)
        .map_err(|kind| ParseError::new(input, kind));

    match &result {
        Ok(version) => trace!(input, %version, "parsed version"),
        Err(err) => debug!(input, error = %err.kind, "could not parse version"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn scan(text: &str) -> Result<RawVersion<'_>, ParseErrorKind> {
        Scanner::new(text).scan()
    }

    #[test]
    fn test_qualifiers_longest_first() {
        // a spelling must never be preceded by one of its own prefixes
        for (index, later) in QUALIFIERS.iter().enumerate() {
            for earlier in &QUALIFIERS[..index] {
                assert!(
                    !later.spelling.starts_with(earlier.spelling),
                    "`{}` is shadowed by `{}`",
                    later.spelling,
                    earlier.spelling
                );
            }
        }
    }

    #[test]
    fn test_scan_all_fields() {
        let raw = scan("v00!1.02.3-alpha_4-5_dev.6+ubuntu-1.x").unwrap();
        assert_eq!(
            RawVersion {
                epoch: Some("00"),
                release: vec!["1", "02", "3"],
                pre: Some(RawQualifier {
                    spelling: Some("alpha"),
                    number: Some("4"),
                }),
                post: Some(RawQualifier {
                    spelling: None,
                    number: Some("5"),
                }),
                dev: Some(RawQualifier {
                    spelling: Some("dev"),
                    number: Some("6"),
                }),
                local: Some("ubuntu-1.x"),
            },
            raw
        );
    }

    #[test]
    fn test_scan_release_only() {
        let raw = scan("12.34.56.78.9").unwrap();
        assert_eq!(None, raw.epoch);
        assert_eq!(vec!["12", "34", "56", "78", "9"], raw.release);
        assert_eq!((None, None, None, None), (raw.pre, raw.post, raw.dev, raw.local));
    }

    #[rstest]
    #[case("1.0pre", "pre", None)]
    #[case("1.0preview2", "preview", Some("2"))]
    #[case("1.0.c2", "c", Some("2"))]
    #[case("1.0rc", "rc", None)]
    #[case("1.0-beta-3", "beta", Some("3"))]
    #[case("1.0a.1", "a", Some("1"))]
    fn test_scan_pre(
        #[case] text: &str,
        #[case] spelling: &str,
        #[case] number: Option<&str>,
    ) {
        let raw = scan(text).unwrap();
        assert_eq!(
            Some(RawQualifier {
                spelling: Some(spelling),
                number
            }),
            raw.pre
        );
    }

    #[rstest]
    #[case("1.0rev1", Some("rev"), Some("1"))]
    #[case("1.0-r", Some("r"), None)]
    #[case("1.0_post", Some("post"), None)]
    #[case("1.0-11", None, Some("11"))]
    #[case("1.0a1-2", None, Some("2"))]
    fn test_scan_post(
        #[case] text: &str,
        #[case] spelling: Option<&str>,
        #[case] number: Option<&str>,
    ) {
        let raw = scan(text).unwrap();
        assert_eq!(Some(RawQualifier { spelling, number }), raw.post);
    }

    #[rstest]
    #[case("", ParseErrorKind::MissingRelease)]
    #[case("v", ParseErrorKind::MissingRelease)]
    #[case("not-a-version", ParseErrorKind::MissingRelease)]
    #[case("1!", ParseErrorKind::MissingRelease)]
    #[case("1.0.", ParseErrorKind::UnexpectedEnd)]
    #[case("1.0+", ParseErrorKind::UnexpectedEnd)]
    #[case("1.0+abc.", ParseErrorKind::UnexpectedEnd)]
    #[case("1.0-", ParseErrorKind::UnexpectedEnd)]
    #[case("1.0+abc!", ParseErrorKind::UnexpectedCharacter { character: '!', position: 7 })]
    #[case("1.0 a1", ParseErrorKind::UnexpectedCharacter { character: ' ', position: 3 })]
    #[case("1.0é", ParseErrorKind::UnexpectedCharacter { character: 'é', position: 3 })]
    #[case("1.0gamma1", ParseErrorKind::UnrecognizedQualifier { qualifier: "gamma".into() })]
    #[case(
        "1.0.dev1a1",
        ParseErrorKind::OutOfOrder { found: "a".into(), after: "dev-release" }
    )]
    #[case(
        "1.0.post1rc1",
        ParseErrorKind::OutOfOrder { found: "rc".into(), after: "post-release" }
    )]
    #[case(
        "1.0a1b2",
        ParseErrorKind::OutOfOrder { found: "b".into(), after: "pre-release" }
    )]
    #[case(
        "1.0+abc+def",
        ParseErrorKind::UnexpectedCharacter { character: '+', position: 7 }
    )]
    #[case(
        "1.0.post1.dev1.post2",
        ParseErrorKind::OutOfOrder { found: "post".into(), after: "dev-release" }
    )]
    fn test_scan_errors(#[case] text: &str, #[case] expected: ParseErrorKind) {
        assert_eq!(Err(expected), scan(text));
    }

    #[rstest]
    #[case("  1.0  ")]
    #[case("\t1.0\n")]
    #[case("V1.0")]
    #[case("1.0RC1")]
    #[case("1.0-ALPHA")]
    #[case("1.0+Local.Label")]
    fn test_parse_ok(#[case] text: &str) {
        assert!(parse(text).is_ok());
    }

    #[test]
    fn test_parse_error_keeps_input() {
        let err = parse("  not-a-version ").unwrap_err();
        assert_eq!("  not-a-version ", err.version);
        assert_eq!(ParseErrorKind::MissingRelease, err.kind);

        let err = parse("   ").unwrap_err();
        assert_eq!(ParseErrorKind::Empty, err.kind);
    }
}
