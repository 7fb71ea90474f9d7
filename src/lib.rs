//! # pepver
//!
//! A library for parsing, comparing and updating [PEP 440](https://peps.python.org/pep-0440/)
//! versions.
//!
//! PEP 440 allows many spellings of the same version: `1.0-Alpha_2`, `v1.0.a.2` and `1.0a2` are
//! all the same pre-release. This library accepts all of them, stores them as a structured
//! [`Version`], renders them back in their single canonical form, and orders them the way PEP 440
//! says they should be ordered.
//!
//! ## Examples
//!
//! Parse and normalize a version:
//!
//! ```
//! use pepver::prelude::*;
//!
//! let version = Version::parse("00!1.a-5-11dev.1").unwrap();
//! assert_eq!("0!1a5.post11.dev1", version.to_string());
//! ```
//!
//! Compare versions:
//!
//! ```
//! use pepver::prelude::*;
//!
//! let parse = |s| Version::parse(s).unwrap();
//! assert!(parse("1.0.dev1") < parse("1.0a1"));
//! assert!(parse("1.0rc1") < parse("1.0"));
//! assert!(parse("1.0") < parse("1.0.post1"));
//! assert_eq!(parse("1.0"), parse("1.0.0"));
//! ```
//!
//! Get a next version:
//!
//! ```
//! use pepver::prelude::*;
//!
//! let version = Version::parse("1.2.3rc1").unwrap();
//! assert_eq!("1.3", version.bump(Segment::MINOR).unwrap().to_string());
//! assert_eq!("1.2.3rc2", version.bump(Segment::Pre).unwrap().to_string());
//! assert!(Version::parse("1.0").unwrap().bump(Segment::Pre).is_err());
//! ```
//!
//! ## Important Terms
//!
//! - **Epoch**: A leading `N!` marking a reset of the version numbering. `1!0.1` is newer than
//!   `2024.1`.
//! - **Release**: The dotted numbers forming the main identity of a version, like `1.2.3`.
//! - **Pre-release**: An `a`, `b` or `rc` qualifier marking a version that comes before its
//!   release, like `1.0rc1`.
//! - **Post-release**: A `.postN` qualifier marking a revision published after a release.
//! - **Dev-release**: A `.devN` qualifier marking a development snapshot.
//! - **Local version label**: Build metadata after a `+`, like `1.0+ubuntu.1`. It only breaks ties
//!   when comparing.
//!
//! ## Ordering
//!
//! For the same release, versions sort as:
//!
//! `1.0.dev0 < 1.0a1.dev0 < 1.0a1 < 1.0a1.post1 < 1.0b1 < 1.0rc1 < 1.0 < 1.0+local < 1.0.post1.dev0 < 1.0.post1`
//!
//! Trailing zeros in the release are ignored, so `1.0 == 1.0.0`, even though they display
//! differently.
//!
//! ## Prelude
//!
//! pepver provides a prelude module for convenience. It contains everything needed to interact
//! with the library.
//!
//! Use it with:
//!
//! ```
//! use pepver::prelude::*;
//! ```
#![warn(missing_docs)]

mod error;
mod normalize;
mod ordering;
mod parse;
mod segment;
mod version;

pub use crate::error::{Error, InvalidVersion, ParseError, ParseErrorKind, UpdateError};
pub use crate::ordering::{Rank, SortKey};
pub use crate::segment::Segment;
pub use crate::version::{LocalSegment, Part, Pre, PreKind, Version};

/// A convenience module appropriate for glob imports (`use pepver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::Error;
    #[doc(no_inline)]
    pub use crate::InvalidVersion;
    #[doc(no_inline)]
    pub use crate::LocalSegment;
    #[doc(no_inline)]
    pub use crate::ParseError;
    #[doc(no_inline)]
    pub use crate::Part;
    #[doc(no_inline)]
    pub use crate::Pre;
    #[doc(no_inline)]
    pub use crate::PreKind;
    #[doc(no_inline)]
    pub use crate::Segment;
    #[doc(no_inline)]
    pub use crate::UpdateError;
    #[doc(no_inline)]
    pub use crate::Version;
}
