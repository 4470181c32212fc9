use crate::template::{self, DEFAULT_COMMAND_TEMPLATE};
use crate::version_source::{DEFAULT_VERSION_FILE, DEFAULT_VERSION_KEY};
use anyhow::{Context, Result, bail};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_CANDIDATES: [&str; 2] = ["ghrel.toml", ".ghrel.toml"];

#[derive(Debug, Clone)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Discovered(PathBuf),
    Defaulted,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Discovered(path) => Some(path.as_path()),
            Self::Defaulted => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub version_file: String,
    pub version_key: String,
    pub command_template: String,
    pub strict: bool,
    pub source: ConfigSource,
    pub warnings: Vec<String>,
}

impl ResolvedConfig {
    fn defaulted() -> Self {
        Self {
            version_file: DEFAULT_VERSION_FILE.to_string(),
            version_key: DEFAULT_VERSION_KEY.to_string(),
            command_template: DEFAULT_COMMAND_TEMPLATE.to_string(),
            strict: false,
            source: ConfigSource::Defaulted,
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, facet::Facet)]
struct RawConfig {
    version_file: Option<String>,
    version_key: Option<String>,
    command_template: Option<String>,
    strict: Option<bool>,
}

pub fn load(explicit_path: Option<&Path>, cwd: &Path) -> Result<ResolvedConfig> {
    let (source, path) = match resolve_config_location(explicit_path, cwd)? {
        Some((path, true)) => (ConfigSource::Explicit(path.clone()), path),
        Some((path, false)) => (ConfigSource::Discovered(path.clone()), path),
        None => return Ok(ResolvedConfig::defaulted()),
    };

    let raw_contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file `{}`.", path.display()))?;
    let parsed_toml = raw_contents
        .parse::<toml::Value>()
        .with_context(|| format!("Config file `{}` is not valid TOML.", path.display()))?;
    let warnings = collect_warnings(&parsed_toml);

    let raw: RawConfig = facet_toml::from_str(&raw_contents).with_context(|| {
        format!(
            "Config file `{}` has unsupported value types.",
            path.display()
        )
    })?;

    let version_file = normalize_repo_relative_path(
        raw.version_file.as_deref().unwrap_or(DEFAULT_VERSION_FILE),
        "`version_file` path",
    )?;

    let version_key = raw
        .version_key
        .unwrap_or_else(|| DEFAULT_VERSION_KEY.to_string())
        .trim()
        .to_string();
    if version_key.is_empty() {
        bail!("`version_key` cannot be empty.");
    }

    let command_template = raw
        .command_template
        .unwrap_or_else(|| DEFAULT_COMMAND_TEMPLATE.to_string());
    if command_template.trim().is_empty() {
        bail!("`command_template` cannot be empty.");
    }
    template::validate_command_template(&command_template)
        .context("Invalid `command_template`.")?;

    Ok(ResolvedConfig {
        version_file,
        version_key,
        command_template,
        strict: raw.strict.unwrap_or(false),
        source,
        warnings,
    })
}

fn normalize_repo_relative_path(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{label} cannot be empty.");
    }

    let path = Path::new(trimmed);
    if path.is_absolute() {
        bail!("{label} `{trimmed}` must be repository-relative.");
    }

    for component in path.components() {
        match component {
            Component::CurDir | Component::Normal(_) => {}
            Component::ParentDir => {
                bail!("{label} `{trimmed}` cannot contain `..`.");
            }
            Component::RootDir | Component::Prefix(_) => {
                bail!("{label} `{trimmed}` must be repository-relative.");
            }
        }
    }

    Ok(trimmed.to_string())
}

fn collect_warnings(parsed: &toml::Value) -> Vec<String> {
    let Some(root) = parsed.as_table() else {
        return Vec::new();
    };

    let allowed_root: BTreeSet<&str> = BTreeSet::from([
        "version_file",
        "version_key",
        "command_template",
        "strict",
    ]);
    root.keys()
        .filter(|key| !allowed_root.contains(key.as_str()))
        .map(|key| format!("Unknown config key `{key}` was ignored."))
        .collect()
}

fn resolve_config_location(
    explicit_path: Option<&Path>,
    cwd: &Path,
) -> Result<Option<(PathBuf, bool)>> {
    if let Some(explicit) = explicit_path {
        if !explicit.exists() {
            bail!(
                "Config file `{}` was not found. Pass a valid path with `--config`.",
                explicit.display()
            );
        }
        return Ok(Some((explicit.to_path_buf(), true)));
    }

    for candidate in CONFIG_CANDIDATES {
        let path = cwd.join(candidate);
        if path.exists() {
            return Ok(Some((path, false)));
        }
    }

    Ok(None)
}
