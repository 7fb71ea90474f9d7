//! Turns the raw text captured by the scanner into canonical values.

use crate::{
    error::ParseErrorKind,
    parse::{RawQualifier, RawVersion},
    version::{LocalSegment, Pre, PreKind, Version},
};

/// Maps each accepted pre-release spelling to its kind.
static PRE_SPELLINGS: &[(&str, PreKind)] = &[
    ("a", PreKind::Alpha),
    ("alpha", PreKind::Alpha),
    ("b", PreKind::Beta),
    ("beta", PreKind::Beta),
    ("c", PreKind::Rc),
    ("pre", PreKind::Rc),
    ("preview", PreKind::Rc),
    ("rc", PreKind::Rc),
];

static POST_SPELLINGS: &[&str] = &["post", "rev", "r"];

static DEV_SPELLINGS: &[&str] = &["dev"];

impl PreKind {
    /// Looks up a (lowercase) pre-release spelling, like `preview`.
    pub(crate) fn from_spelling(spelling: &str) -> Option<Self> {
        PRE_SPELLINGS
            .iter()
            .find(|(known, _)| *known == spelling)
            .map(|(_, kind)| *kind)
    }
}

fn number(digits: &str) -> Result<u64, ParseErrorKind> {
    // `u64::from_str` already accepts leading zeros, so `007` is 7
    digits
        .parse()
        .map_err(|_| ParseErrorKind::NumberTooLarge {
            digits: digits.to_owned(),
        })
}

fn number_or_zero(digits: Option<&str>) -> Result<u64, ParseErrorKind> {
    digits.map_or(Ok(0), number)
}

fn unrecognized(spelling: &str) -> ParseErrorKind {
    ParseErrorKind::UnrecognizedQualifier {
        qualifier: spelling.to_owned(),
    }
}

/// Checks that a keyword spelling is one of `known`, then reads its number. An absent spelling
/// (the implicit `-N` post-release) is always accepted.
fn keyword_number(raw: RawQualifier<'_>, known: &[&str]) -> Result<u64, ParseErrorKind> {
    if let Some(spelling) = raw.spelling {
        if !known.contains(&spelling) {
            return Err(unrecognized(spelling));
        }
    }
    number_or_zero(raw.number)
}

fn pre(raw: RawQualifier<'_>) -> Result<Pre, ParseErrorKind> {
    let spelling = raw.spelling.unwrap_or_default();
    let kind = PreKind::from_spelling(spelling).ok_or_else(|| unrecognized(spelling))?;
    Ok(Pre::new(kind, number_or_zero(raw.number)?))
}

/// Splits a local label on `.`, `-` and `_`; all-digit segments become numbers.
fn local_segments(label: &str) -> Result<Vec<LocalSegment>, ParseErrorKind> {
    label
        .split(['.', '-', '_'])
        .map(|segment| {
            if segment.bytes().all(|b| b.is_ascii_digit()) {
                number(segment).map(LocalSegment::Number)
            } else {
                Ok(LocalSegment::Token(segment.to_ascii_lowercase()))
            }
        })
        .collect()
}

pub(crate) fn normalize(raw: RawVersion<'_>) -> Result<Version, ParseErrorKind> {
    Ok(Version {
        epoch: raw.epoch.map(number).transpose()?,
        release: raw
            .release
            .into_iter()
            .map(number)
            .collect::<Result<_, _>>()?,
        pre: raw.pre.map(pre).transpose()?,
        post: raw
            .post
            .map(|post| keyword_number(post, POST_SPELLINGS))
            .transpose()?,
        dev: raw
            .dev
            .map(|dev| keyword_number(dev, DEV_SPELLINGS))
            .transpose()?,
        local: raw.local.map(local_segments).transpose()?,
    })
}
