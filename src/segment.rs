use crate::{
    error::UpdateError,
    version::{Pre, Version},
};
use core::{
    fmt::{self, Display},
    iter,
    str::FromStr,
};
use tracing::{debug, trace};

/// A segment of a [`Version`] that can be [updated](Version::update).
///
/// Segments parse from their names (`major`, `minor`, `micro`, `release`, `pre`, `post`, `dev`)
/// or from a release index (`0` is `major`, `3` is the position after `micro`, ...).
///
/// ```
/// use pepver::Segment;
///
/// assert_eq!(Segment::MINOR, "minor".parse().unwrap());
/// assert_eq!(Segment::Position(4), "4".parse().unwrap());
/// assert_eq!(Segment::Post, "post".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A release position, `0` being major.
    Position(usize),
    /// The last position currently present in the release.
    Release,
    /// The number of the pre-release.
    Pre,
    /// The post-release number.
    Post,
    /// The dev-release number.
    Dev,
}

impl Segment {
    /// The first release position.
    pub const MAJOR: Segment = Segment::Position(0);
    /// The second release position.
    pub const MINOR: Segment = Segment::Position(1);
    /// The third release position.
    pub const MICRO: Segment = Segment::Position(2);
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Position(0) => f.write_str("major"),
            Segment::Position(1) => f.write_str("minor"),
            Segment::Position(2) => f.write_str("micro"),
            Segment::Position(index) => write!(f, "{index}"),
            Segment::Release => f.write_str("release"),
            Segment::Pre => f.write_str("pre"),
            Segment::Post => f.write_str("post"),
            Segment::Dev => f.write_str("dev"),
        }
    }
}

impl FromStr for Segment {
    type Err = UpdateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segment = match s.trim().to_ascii_lowercase().as_str() {
            "major" => Segment::MAJOR,
            "minor" => Segment::MINOR,
            "micro" => Segment::MICRO,
            "release" => Segment::Release,
            "pre" => Segment::Pre,
            "post" => Segment::Post,
            "dev" => Segment::Dev,
            other => other
                .parse()
                .map(Segment::Position)
                .map_err(|_| UpdateError::UnknownSegment { name: s.to_owned() })?,
        };
        Ok(segment)
    }
}

/// How many zero positions an update may pad onto the end of a release.
const MAX_PADDING: usize = 64;

/// Applies a signed delta to a segment's current value.
fn next_value(segment: Segment, current: u64, delta: i64) -> Result<u64, UpdateError> {
    let value = i128::from(current) + i128::from(delta);
    if value < 0 {
        return Err(UpdateError::Negative { segment, value });
    }
    u64::try_from(value).map_err(|_| UpdateError::Overflow { segment })
}

impl Version {
    /// Returns a new version with `segment` moved by `delta`, and every less significant segment
    /// cleared. This version is left untouched.
    ///
    /// - [`Segment::Position`]: the release is cut (or zero-padded) to end at that position,
    ///   which is moved. Pre, post, dev and local are cleared.
    /// - [`Segment::Release`]: the last release position is moved. Pre, post, dev and local are
    ///   cleared.
    /// - [`Segment::Pre`]: the pre-release number is moved. Post, dev and local are cleared.
    /// - [`Segment::Post`]: the post-release number is moved, counting from `0` if absent. Dev
    ///   and local are cleared.
    /// - [`Segment::Dev`]: the dev-release number is moved, counting from `0` if absent. Local is
    ///   cleared.
    ///
    /// The epoch is never changed.
    ///
    /// # Example
    ///
    /// ```
    /// use pepver::prelude::*;
    ///
    /// let version = Version::parse("1.2.3.4a5.post6.dev7+8.9").unwrap();
    /// assert_eq!("1.3", version.update(Segment::MINOR, 1).unwrap().to_string());
    /// assert_eq!("1.2.3.5", version.update(Segment::Release, 1).unwrap().to_string());
    /// assert_eq!("1.2.3.4a5.post4", version.update(Segment::Post, -2).unwrap().to_string());
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns [`UpdateError::MissingPre`] when updating [`Segment::Pre`] on a version that
    ///   isn't a pre-release.
    /// - Returns [`UpdateError::Negative`] if the updated value would be below zero.
    /// - Returns [`UpdateError::Overflow`] if the updated value would not fit in a `u64`.
    /// - Returns [`UpdateError::PositionTooLarge`] if a [`Segment::Position`] lies more than 64
    ///   positions past the end of the release.
    pub fn update(&self, segment: Segment, delta: i64) -> Result<Self, UpdateError> {
        let result = self.updated(segment, delta);
        match &result {
            Ok(next) => trace!(version = %self, %segment, delta, %next, "updated version"),
            Err(err) => debug!(version = %self, %segment, delta, error = %err, "could not update version"),
        }
        result
    }

    /// [Self::update] by one.
    pub fn bump(&self, segment: Segment) -> Result<Self, UpdateError> {
        self.update(segment, 1)
    }

    fn updated(&self, segment: Segment, delta: i64) -> Result<Self, UpdateError> {
        let next = match segment {
            Segment::Position(index) => {
                if index > self.release.len().saturating_add(MAX_PADDING) {
                    return Err(UpdateError::PositionTooLarge { index });
                }
                let current = self.release.get(index).copied().unwrap_or(0);
                let mut release: Vec<u64> = self
                    .release
                    .iter()
                    .copied()
                    .chain(iter::repeat(0))
                    .take(index)
                    .collect();
                release.push(next_value(segment, current, delta)?);
                Self {
                    epoch: self.epoch,
                    release,
                    pre: None,
                    post: None,
                    dev: None,
                    local: None,
                }
            }
            Segment::Release => {
                let mut release = self.release.clone();
                if let Some(last) = release.last_mut() {
                    *last = next_value(segment, *last, delta)?;
                }
                Self {
                    epoch: self.epoch,
                    release,
                    pre: None,
                    post: None,
                    dev: None,
                    local: None,
                }
            }
            Segment::Pre => {
                let pre = self.pre.ok_or(UpdateError::MissingPre)?;
                Self {
                    pre: Some(Pre::new(pre.kind, next_value(segment, pre.number, delta)?)),
                    post: None,
                    dev: None,
                    local: None,
                    ..self.clone()
                }
            }
            Segment::Post => Self {
                post: Some(next_value(segment, self.post.unwrap_or(0), delta)?),
                dev: None,
                local: None,
                ..self.clone()
            },
            Segment::Dev => Self {
                dev: Some(next_value(segment, self.dev.unwrap_or(0), delta)?),
                local: None,
                ..self.clone()
            },
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::PreKind;
    use rstest::*;

    #[fixture]
    fn full() -> Version {
        Version::parse("1.2.3.4a5.post6.dev7+8.9").unwrap()
    }

    #[rstest]
    #[case(Segment::MAJOR, 1, "2")]
    #[case(Segment::MINOR, 1, "1.3")]
    #[case(Segment::MICRO, 1, "1.2.4")]
    #[case(Segment::Position(3), 1, "1.2.3.5")]
    #[case(Segment::Position(5), 1, "1.2.3.4.0.1")]
    #[case(Segment::Release, 1, "1.2.3.5")]
    #[case(Segment::Pre, 1, "1.2.3.4a6")]
    #[case(Segment::Post, -2, "1.2.3.4a5.post4")]
    #[case(Segment::Dev, 3, "1.2.3.4a5.post6.dev10")]
    #[case(Segment::MINOR, -2, "1.0")]
    fn test_update_full(
        full: Version,
        #[case] segment: Segment,
        #[case] delta: i64,
        #[case] expected: &str,
    ) {
        let next = full.update(segment, delta).unwrap();
        assert_eq!(expected, next.to_string());
        assert_eq!(Version::parse(expected).unwrap(), next);
    }

    #[rstest]
    #[case("0", Segment::MAJOR, 1, "1")]
    #[case("0", Segment::MINOR, 1, "0.1")]
    #[case("0", Segment::MICRO, 1, "0.0.1")]
    #[case("0.1", Segment::Release, 1, "0.2")]
    #[case("0.1.2.3", Segment::Release, 1, "0.1.2.4")]
    #[case("1.2.3", Segment::MINOR, 1, "1.3")]
    #[case("1.2.3", Segment::MICRO, -1, "1.2.2")]
    #[case("1.2.3", Segment::MICRO, 2, "1.2.5")]
    #[case("1.2.3", Segment::MAJOR, 2, "3")]
    #[case("0.1.2.3.4", Segment::Position(3), 11, "0.1.2.14")]
    #[case("1.2.3", Segment::Dev, 1, "1.2.3.dev1")]
    #[case("1.2.3", Segment::Post, 1, "1.2.3.post1")]
    #[case("1.2.3", Segment::Post, 0, "1.2.3.post0")]
    #[case("1.2.3b4", Segment::Pre, 1, "1.2.3b5")]
    #[case("1.2.3b4.post5", Segment::Post, 1, "1.2.3b4.post6")]
    #[case("1.2.3b4.post5.dev6", Segment::Post, 1, "1.2.3b4.post6")]
    #[case("1.2.3b4.post5", Segment::Dev, 1, "1.2.3b4.post5.dev1")]
    #[case("1.2rc3.dev4", Segment::Pre, 1, "1.2rc4")]
    #[case("3!1.2+local", Segment::MAJOR, 1, "3!2")]
    #[case("1.0+local", Segment::Dev, 0, "1.0.dev0")]
    fn test_update(
        #[case] version: &str,
        #[case] segment: Segment,
        #[case] delta: i64,
        #[case] expected: &str,
    ) {
        let version = Version::parse(version).unwrap();
        assert_eq!(expected, version.update(segment, delta).unwrap().to_string());
    }

    #[test]
    fn test_update_keeps_pre_kind() {
        let next = Version::parse("1.0c1").unwrap().bump(Segment::Pre).unwrap();
        assert_eq!(Some(Pre::new(PreKind::Rc, 2)), next.pre());
    }

    #[test]
    fn test_update_pads_up_to_limit() {
        let version = Version::parse("1.0").unwrap();
        let next = version.update(Segment::Position(66), 1).unwrap();
        assert_eq!(67, next.release().len());
        assert_eq!(&[1, 0], &next.release()[..2]);
        assert_eq!(Some(&1), next.release().last());
        assert!(next.release()[2..66].iter().all(|&n| n == 0));
    }

    #[test]
    fn test_update_does_not_touch_original() {
        let version = Version::parse("1.2.3rc1").unwrap();
        let _ = version.bump(Segment::MINOR).unwrap();
        assert_eq!("1.2.3rc1", version.to_string());
    }

    #[rstest]
    #[case("1.0", Segment::Pre, 1, UpdateError::MissingPre)]
    #[case("1.0.post1", Segment::Pre, 1, UpdateError::MissingPre)]
    #[case("1.0", Segment::MINOR, -1, UpdateError::Negative { segment: Segment::MINOR, value: -1 })]
    #[case("1.0", Segment::Post, -1, UpdateError::Negative { segment: Segment::Post, value: -1 })]
    #[case("1.0.dev1", Segment::Dev, -2, UpdateError::Negative { segment: Segment::Dev, value: -1 })]
    #[case("1.0a0", Segment::Pre, -1, UpdateError::Negative { segment: Segment::Pre, value: -1 })]
    #[case("1.2", Segment::Release, -3, UpdateError::Negative { segment: Segment::Release, value: -1 })]
    #[case("18446744073709551615", Segment::MAJOR, 1, UpdateError::Overflow { segment: Segment::MAJOR })]
    #[case("1.0", Segment::Position(67), 1, UpdateError::PositionTooLarge { index: 67 })]
    #[case("1.0", Segment::Position(usize::MAX), 1, UpdateError::PositionTooLarge { index: usize::MAX })]
    #[case("1.0", Segment::Position(1_000_000_000), 0, UpdateError::PositionTooLarge { index: 1_000_000_000 })]
    fn test_update_errors(
        #[case] version: &str,
        #[case] segment: Segment,
        #[case] delta: i64,
        #[case] expected: UpdateError,
    ) {
        let version = Version::parse(version).unwrap();
        assert_eq!(Err(expected), version.update(segment, delta));
    }

    #[rstest]
    #[case("major", Segment::MAJOR)]
    #[case("Minor", Segment::MINOR)]
    #[case("micro", Segment::MICRO)]
    #[case("2", Segment::MICRO)]
    #[case("7", Segment::Position(7))]
    #[case("release", Segment::Release)]
    #[case("pre", Segment::Pre)]
    #[case("post", Segment::Post)]
    #[case("dev", Segment::Dev)]
    fn test_segment_from_str(#[case] name: &str, #[case] expected: Segment) {
        assert_eq!(Ok(expected), name.parse());
        // names round-trip through display
        assert_eq!(Ok(expected), expected.to_string().parse());
    }

    #[rstest]
    #[case("patch")]
    #[case("-1")]
    #[case("")]
    fn test_segment_from_str_unknown(#[case] name: &str) {
        assert_eq!(
            Err(UpdateError::UnknownSegment {
                name: name.to_owned()
            }),
            name.parse::<Segment>()
        );
    }
}
