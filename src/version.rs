use crate::{
    error::{InvalidVersion, ParseError},
    parse,
};
use core::{
    borrow::Borrow,
    fmt::{self, Display},
    str::FromStr,
};

/// The kind of a pre-release: alpha, beta or release candidate.
///
/// Kinds are ordered `Alpha < Beta < Rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreKind {
    /// `a`, also spelled `alpha`
    Alpha,
    /// `b`, also spelled `beta`
    Beta,
    /// `rc`, also spelled `c`, `pre` or `preview`
    Rc,
}

impl PreKind {
    /// The canonical spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreKind::Alpha => "a",
            PreKind::Beta => "b",
            PreKind::Rc => "rc",
        }
    }
}

impl Display for PreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pre-release segment, like the `rc2` of `1.0rc2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pre {
    /// Alpha, beta or release candidate.
    pub kind: PreKind,
    /// The number following the kind, `0` when none was written.
    pub number: u64,
}

impl Pre {
    /// Returns a new pre-release segment.
    pub fn new(kind: PreKind, number: u64) -> Self {
        Self { kind, number }
    }
}

impl Display for Pre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}

/// One `.`-separated part of a local version label, like the `ubuntu` or `1` of `+ubuntu.1`.
///
/// A segment made only of digits is a number, anything else is a lowercase token. When compared,
/// numbers always rank above tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocalSegment {
    /// An all-digit segment.
    Number(u64),
    /// A lowercase alphanumeric segment with at least one letter.
    Token(String),
}

impl LocalSegment {
    /// Checks the invariants of a segment built by hand.
    pub(crate) fn validate(&self) -> Result<(), InvalidVersion> {
        match self {
            LocalSegment::Number(_) => Ok(()),
            LocalSegment::Token(token) => {
                let well_formed = !token.is_empty()
                    && token
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
                    && !token.bytes().all(|b| b.is_ascii_digit());
                if well_formed {
                    Ok(())
                } else {
                    Err(InvalidVersion::InvalidLocalSegment {
                        segment: token.clone(),
                    })
                }
            }
        }
    }
}

impl From<u64> for LocalSegment {
    fn from(number: u64) -> Self {
        LocalSegment::Number(number)
    }
}

impl Display for LocalSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSegment::Number(number) => write!(f, "{number}"),
            LocalSegment::Token(token) => f.write_str(token),
        }
    }
}

/// The parts of a [`Version`], most significant first. Returned by [`Version::different_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The `N!` epoch.
    Epoch,
    /// A position of the release, `0` being major.
    Release(usize),
    /// The pre-release segment.
    Pre,
    /// The post-release segment.
    Post,
    /// The dev-release segment.
    Dev,
    /// The local version label.
    Local,
}

/// A PEP 440 version, such as `1.2.3`, `2!1.0rc1` or `1.0.post2.dev3+ubuntu.1`.
///
/// Versions are immutable. They can be [parsed](Version::parse) from any spelling PEP 440 allows,
/// [displayed](Version::to_string) in their canonical form, [compared](Version::cmp), and
/// [updated](Version::update) into new versions.
///
/// # Examples
///
/// ```
/// use pepver::prelude::*;
///
/// let version = Version::parse("v1.0-Alpha.2_r3").unwrap();
/// assert_eq!("1.0a2.post3", version.to_string());
/// assert_eq!(Some(Pre::new(PreKind::Alpha, 2)), version.pre());
///
/// // trailing zeros don't matter when comparing
/// assert_eq!(Version::parse("1.0").unwrap(), Version::parse("1.0.0").unwrap());
/// ```
///
/// Or, build one from its fields:
///
/// ```
/// use pepver::prelude::*;
///
/// let version = Version::new([1, 2])
///     .unwrap()
///     .with_pre(Some(Pre::new(PreKind::Rc, 1)))
///     .with_dev(Some(0));
/// assert_eq!("1.2rc1.dev0", version.to_string());
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    /// `None` when no epoch was written. A written `0!` is kept so that it renders back.
    pub(crate) epoch: Option<u64>,
    pub(crate) release: Vec<u64>,
    pub(crate) pre: Option<Pre>,
    pub(crate) post: Option<u64>,
    pub(crate) dev: Option<u64>,
    pub(crate) local: Option<Vec<LocalSegment>>,
}

impl Version {
    /// Returns a new final version with the given release numbers and no epoch.
    ///
    /// # Errors
    ///
    /// - Returns [`InvalidVersion::EmptyRelease`] if `release` has no numbers.
    pub fn new<I, R>(release: I) -> Result<Self, InvalidVersion>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<u64>,
    {
        let release: Vec<u64> = release.into_iter().map(|number| *number.borrow()).collect();
        if release.is_empty() {
            return Err(InvalidVersion::EmptyRelease);
        }
        Ok(Self {
            epoch: None,
            release,
            pre: None,
            post: None,
            dev: None,
            local: None,
        })
    }

    /// Parses a version string, accepting every spelling PEP 440 allows.
    ///
    /// Parsing is case-insensitive, ignores surrounding whitespace and a leading `v`, and
    /// normalizes alternate spellings: `alpha` becomes `a`, `preview` becomes `rc`, `1.0-3`
    /// becomes `1.0.post3`, `+Ubuntu-1` becomes `+ubuntu.1`, and so on.
    ///
    /// # Errors
    ///
    /// - Returns a [`ParseError`] describing the offending input if it isn't a PEP 440 version.
    pub fn parse(version: &str) -> Result<Self, ParseError> {
        parse::parse(version)
    }

    /// Returns this version with the given epoch. An explicit epoch is always rendered, even `0`.
    pub fn with_epoch(self, epoch: u64) -> Self {
        Self {
            epoch: Some(epoch),
            ..self
        }
    }

    /// Returns this version with the given pre-release segment.
    pub fn with_pre(self, pre: Option<Pre>) -> Self {
        Self { pre, ..self }
    }

    /// Returns this version with the given post-release segment.
    pub fn with_post(self, post: Option<u64>) -> Self {
        Self { post, ..self }
    }

    /// Returns this version with the given dev-release segment.
    pub fn with_dev(self, dev: Option<u64>) -> Self {
        Self { dev, ..self }
    }

    /// Returns this version with the given local version label.
    ///
    /// # Errors
    ///
    /// - Returns [`InvalidVersion::EmptyLocal`] if `local` is `Some` but has no segments.
    /// - Returns [`InvalidVersion::InvalidLocalSegment`] if a [`LocalSegment::Token`] is empty,
    ///   contains anything other than lowercase ASCII letters and digits, or is only digits.
    pub fn with_local(self, local: Option<Vec<LocalSegment>>) -> Result<Self, InvalidVersion> {
        if let Some(segments) = &local {
            if segments.is_empty() {
                return Err(InvalidVersion::EmptyLocal);
            }
            segments.iter().try_for_each(LocalSegment::validate)?;
        }
        Ok(Self { local, ..self })
    }

    /// The epoch, `0` when none was written.
    pub fn epoch(&self) -> u64 {
        self.epoch.unwrap_or(0)
    }

    /// The release numbers, never empty.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// The first release number.
    pub fn major(&self) -> u64 {
        self.release[0]
    }

    /// The second release number, if present.
    pub fn minor(&self) -> Option<u64> {
        self.release.get(1).copied()
    }

    /// The third release number, if present.
    pub fn micro(&self) -> Option<u64> {
        self.release.get(2).copied()
    }

    /// The pre-release segment, if any.
    pub fn pre(&self) -> Option<Pre> {
        self.pre
    }

    /// The post-release number, if any.
    pub fn post(&self) -> Option<u64> {
        self.post
    }

    /// The dev-release number, if any.
    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// The local version label segments, if any.
    pub fn local(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// Whether this is a pre-release (`1.0a1`).
    pub fn is_pre(&self) -> bool {
        self.pre.is_some()
    }

    /// Whether this is a post-release (`1.0.post1`).
    pub fn is_post(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a dev-release (`1.0.dev1`).
    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this version has a local version label (`1.0+ubuntu`).
    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// Whether this version is final: neither a pre-release nor a dev-release. Post-releases
    /// and local labels don't prevent finality.
    ///
    /// ```
    /// use pepver::Version;
    ///
    /// assert!(Version::parse("1.0.post1+local").unwrap().is_final());
    /// assert!(!Version::parse("1.0rc1").unwrap().is_final());
    /// ```
    pub fn is_final(&self) -> bool {
        self.pre.is_none() && self.dev.is_none()
    }

    /// Returns the public version: this version without its local version label.
    pub fn without_local(&self) -> Self {
        Self {
            local: None,
            ..self.clone()
        }
    }

    /// Returns a version with only the epoch and release of this one.
    pub fn to_final(&self) -> Self {
        Self {
            epoch: self.epoch,
            release: self.release.clone(),
            pre: None,
            post: None,
            dev: None,
            local: None,
        }
    }

    /// Returns this version with trailing zeros removed from its release, keeping at least
    /// `keep` release numbers (and always at least one).
    ///
    /// ```
    /// use pepver::Version;
    ///
    /// let version = Version::parse("1.0.0.0").unwrap();
    /// assert_eq!("1", version.strip_release(0).to_string());
    /// assert_eq!("1.0", version.strip_release(2).to_string());
    /// ```
    pub fn strip_release(&self, keep: usize) -> Self {
        let keep = keep.max(1);
        let significant = self
            .release
            .iter()
            .rposition(|&number| number != 0)
            .map_or(0, |index| index + 1);
        let len = significant.max(keep).min(self.release.len());
        Self {
            release: self.release[..len].to_vec(),
            ..self.clone()
        }
    }

    /// Returns this version with its release cut down to at most `keep` numbers (and always at
    /// least one).
    pub fn truncate_release(&self, keep: usize) -> Self {
        let len = keep.max(1).min(self.release.len());
        Self {
            release: self.release[..len].to_vec(),
            ..self.clone()
        }
    }

    /// Returns the most significant part whose stored value differs between the two versions,
    /// or `None` if they are written identically.
    ///
    /// Unlike comparisons, this looks at what is stored: `1.0` and `1.0.0` compare equal but
    /// differ at [`Part::Release(2)`](Part::Release), and `0!1.0` differs from `1.0` at
    /// [`Part::Epoch`].
    pub fn different_at(&self, other: &Self) -> Option<Part> {
        if self.epoch != other.epoch {
            return Some(Part::Epoch);
        }
        let release_len = self.release.len().max(other.release.len());
        if let Some(index) =
            (0..release_len).find(|&i| self.release.get(i) != other.release.get(i))
        {
            return Some(Part::Release(index));
        }
        if self.pre != other.pre {
            Some(Part::Pre)
        } else if self.post != other.post {
            Some(Part::Post)
        } else if self.dev != other.dev {
            Some(Part::Dev)
        } else if self.local != other.local {
            Some(Part::Local)
        } else {
            None
        }
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Version {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Display for Version {
    /// Renders the canonical form of this version.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(epoch) = self.epoch {
            write!(f, "{epoch}!")?;
        }
        write_joined(f, &self.release)?;
        if let Some(pre) = &self.pre {
            write!(f, "{pre}")?;
        }
        if let Some(post) = self.post {
            write!(f, ".post{post}")?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{dev}")?;
        }
        if let Some(local) = &self.local {
            f.write_str("+")?;
            write_joined(f, local)?;
        }
        Ok(())
    }
}

fn write_joined<T: Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(".")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
