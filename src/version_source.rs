use crate::error::ReleaseError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_VERSION_FILE: &str = "pubspec.yaml";
pub const DEFAULT_VERSION_KEY: &str = "version";

/// Reads the version from a YAML-like file.
///
/// The first line containing `key` wins. Its value is the text between the
/// first colon and the next one, trimmed. `Ok(None)` means no line mentioned
/// the key at all.
pub fn read_version(path: &Path, key: &str) -> Result<Option<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read version file `{}`.", path.display()))?;
    Ok(extract_version(&contents, key))
}

pub fn extract_version(contents: &str, key: &str) -> Option<String> {
    let line = contents.lines().find(|line| line.contains(key))?;
    let value = line.split(':').nth(1).unwrap_or_default();
    Some(value.trim().to_string())
}

pub fn from_argument(argument: Option<String>) -> Result<String, ReleaseError> {
    argument.ok_or(ReleaseError::MissingArgument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_version_from_pubspec() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pubspec.yaml");
        fs::write(
            &path,
            "name: demo\ndescription: A demo app.\nversion: 1.4.0\n\nenvironment:\n  sdk: '>=3.0.0 <4.0.0'\n",
        )
        .unwrap();

        let version = read_version(&path, DEFAULT_VERSION_KEY).unwrap();
        assert_eq!(version.as_deref(), Some("1.4.0"));
    }

    #[test]
    fn first_matching_line_wins() {
        let contents = "# version history lives elsewhere: see docs\nversion: 2.0.0\n";
        assert_eq!(
            extract_version(contents, "version").as_deref(),
            Some("see docs")
        );
    }

    #[test]
    fn value_stops_at_second_colon() {
        assert_eq!(
            extract_version("version: 1.0.0:extra\n", "version").as_deref(),
            Some("1.0.0")
        );
    }

    #[test]
    fn keeps_flutter_build_number() {
        assert_eq!(
            extract_version("version:   1.2.3+45  \n", "version").as_deref(),
            Some("1.2.3+45")
        );
    }

    #[test]
    fn line_without_colon_yields_empty_value() {
        assert_eq!(extract_version("version\n", "version").as_deref(), Some(""));
    }

    #[test]
    fn missing_key_is_none() {
        assert!(extract_version("name: demo\n", "version").is_none());
        assert!(extract_version("", "version").is_none());
    }

    #[test]
    fn custom_key_is_honored() {
        assert_eq!(
            extract_version("version: 1.0.0\napp_version: 3.1.4\n", "app_version").as_deref(),
            Some("3.1.4")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let err = read_version(&temp_dir.path().join("pubspec.yaml"), "version").unwrap_err();
        assert!(err.to_string().contains("Failed to read version file"));
    }

    #[test]
    fn argument_is_taken_verbatim() {
        assert_eq!(
            from_argument(Some(" v2.0.0".to_string())),
            Ok(" v2.0.0".to_string())
        );
        assert_eq!(from_argument(None), Err(ReleaseError::MissingArgument));
    }
}
