use crate::version::{LocalSegment, PreKind, Version};
use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// Where a possibly-absent field ranks relative to every present value of that field.
///
/// Variants are declared in ascending order, so the derived ordering puts `BelowAll` under any
/// `Explicit` value and `AboveAll` over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank<T> {
    /// Ranks below every explicit value.
    BelowAll,
    /// A present value, ranked by its own ordering.
    Explicit(T),
    /// Ranks above every explicit value.
    AboveAll,
}

/// The key that [`Version`]s are compared, checked for equality, and hashed by. Fields are
/// compared in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey<'a> {
    epoch: u64,
    /// Release without trailing zeros. Comparing these slices is the same as comparing the full
    /// releases zero-padded to equal length.
    release: &'a [u64],
    pre: Rank<(PreKind, u64)>,
    post: Rank<u64>,
    dev: Rank<u64>,
    local: Rank<&'a [LocalSegment]>,
}

impl Ord for LocalSegment {
    /// Numbers compare numerically and always rank above tokens, tokens compare
    /// lexicographically.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LocalSegment::Number(a), LocalSegment::Number(b)) => a.cmp(b),
            (LocalSegment::Token(a), LocalSegment::Token(b)) => a.cmp(b),
            (LocalSegment::Number(_), LocalSegment::Token(_)) => Ordering::Greater,
            (LocalSegment::Token(_), LocalSegment::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Version {
    /// Returns the key this version is ordered by.
    ///
    /// Pre-, post- and dev-release ranks follow
    /// `1.0.dev1 < 1.0a1 < 1.0a1.post1 < 1.0b1 < 1.0rc1.dev1 < 1.0rc1 < 1.0 < 1.0.post1.dev1 < 1.0.post1`,
    /// and a local label ranks above no local label.
    pub fn sort_key(&self) -> SortKey<'_> {
        let significant = self
            .release
            .iter()
            .rposition(|&number| number != 0)
            .map_or(0, |index| index + 1);

        let pre = match (self.pre, self.post, self.dev) {
            (Some(pre), _, _) => Rank::Explicit((pre.kind, pre.number)),
            // a bare dev snapshot comes before even the first alpha
            (None, None, Some(_)) => Rank::BelowAll,
            (None, _, _) => Rank::AboveAll,
        };

        SortKey {
            epoch: self.epoch.unwrap_or(0),
            release: &self.release[..significant],
            pre,
            post: self.post.map_or(Rank::BelowAll, Rank::Explicit),
            dev: self.dev.map_or(Rank::AboveAll, Rank::Explicit),
            local: self
                .local
                .as_deref()
                .map_or(Rank::BelowAll, Rank::Explicit),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Version {}

impl Hash for Version {
    /// Hashes the sort key, so that versions equal despite trailing zeros hash alike.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
