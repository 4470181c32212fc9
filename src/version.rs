use crate::error::ReleaseError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const TAG_PREFIX: &str = "v";

// Anchored at the start only: trailing build metadata such as `+4` is accepted.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v\d+\.\d+\.\d+").unwrap());

/// A release tag as it will be handed to the release command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    raw: String,
}

impl ReleaseTag {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Builds the tag for a version read from a version file. A missing
    /// version yields the bare prefix, which then fails validation.
    pub fn from_file_version(version: Option<&str>) -> Self {
        Self::new(format!("{TAG_PREFIX}{}", version.unwrap_or_default()))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_valid(&self) -> bool {
        TAG_REGEX.is_match(&self.raw)
    }

    pub fn validate(&self) -> Result<(), ReleaseError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ReleaseError::InvalidVersionFormat(self.raw.clone()))
        }
    }
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
