//! The build variant a generation pass runs for.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Selects which body the generators emit.
///
/// The mode is an explicit input of every generation call: it comes from a
/// `#[package_id(debug = ...)]` marker, the builder, or cargo's `PROFILE`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GenerationMode {
    /// Field values are rendered: `Account(id = 7, email = a@b.com)`.
    Debug,
    /// Only the type name and the identity hash are rendered: `Account@1a2b3c`.
    Release,
}

impl GenerationMode {
    /// Maps the marker's `debug` flag to a mode.
    pub const fn from_debug_flag(is_debug: bool) -> Self {
        if is_debug {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// The header comment written at the top of generated files.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Maps a cargo `PROFILE` value to a mode.
    ///
    /// Cargo reports `debug` for `dev`/`test` profiles and `release` for
    /// `release`/`bench` (custom profiles report the profile they inherit from).
    pub fn from_profile(profile: &str) -> Option<Self> {
        match profile {
            "debug" => Some(Self::Debug),
            "release" => Some(Self::Release),
            _ => None,
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Returned when a string names neither `debug` nor `release`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown generation mode `{0}`; expected `debug` or `release`")]
pub struct ParseModeError(String);

impl FromStr for GenerationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("release") {
            Ok(Self::Release)
        } else {
            Err(ParseModeError(s.to_string()))
        }
    }
}
