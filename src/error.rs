use thiserror::Error;

pub const USAGE: &str = "Usage: ghrel create <version>";
pub const INVALID_VERSION_MESSAGE: &str = "Invalid version format. Use \"vX.X.X\"";

/// Failures ghrel recognizes by kind. Everything else travels as `anyhow::Error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    #[error("{}", USAGE)]
    MissingArgument,

    #[error("{}", INVALID_VERSION_MESSAGE)]
    InvalidVersionFormat(String),
}
