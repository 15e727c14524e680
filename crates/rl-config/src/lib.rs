//! Configuration management for RL.
//!
//! Parses `rl.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.output_dir`
//! - `metadata.suffix`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the default list limit.
    pub default_limit: Option<i32>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rl.toml";

/// Default suffix of sidecar metadata files.
const DEFAULT_META_SUFFIX: &str = ".meta.yaml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Sidecar metadata configuration.
    pub metadata: MetadataConfig,
    /// List directive configuration.
    pub lists: ListsConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Directory receiving expanded documents.
    pub output_dir: PathBuf,
    /// Project directory for rl data (.rl/).
    pub project_dir: PathBuf,
}

/// Sidecar metadata configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Suffix appended to a document's file stem to find its sidecar,
    /// e.g. `guide.meta.yaml` for `guide.md`.
    pub suffix: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_META_SUFFIX.to_owned(),
        }
    }
}

/// List directive configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Limit applied when a directive has no `limit` argument.
    /// Values `<= 0` disable truncation.
    pub default_limit: i32,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self { default_limit: 10 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rl.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(default_limit) = settings.default_limit {
            self.lists.default_limit = default_limit;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let project_dir = base.join(".rl");
        Self {
            docs: DocsConfigRaw::default(),
            metadata: MetadataConfig::default(),
            lists: ListsConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                output_dir: project_dir.join("build"),
                project_dir,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let suffix = &self.metadata.suffix;
        if suffix.is_empty() {
            return Err(ConfigError::Validation(
                "metadata.suffix cannot be empty".to_owned(),
            ));
        }
        if !suffix.contains('.') {
            return Err(ConfigError::Validation(format!(
                "metadata.suffix must contain a file extension, got '{suffix}'"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.output_dir {
            self.docs.output_dir = Some(expand::expand_env(dir, "docs.output_dir")?);
        }
        self.metadata.suffix = expand::expand_env(&self.metadata.suffix, "metadata.suffix")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let project_dir = config_dir.join(".rl");
        let output_dir = self
            .docs
            .output_dir
            .as_deref()
            .map_or_else(|| project_dir.join("build"), |dir| config_dir.join(dir));

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            output_dir,
            project_dir,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.project_dir, PathBuf::from("/test/.rl"));
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/test/.rl/build")
        );
        assert_eq!(config.metadata.suffix, ".meta.yaml");
        assert_eq!(config.lists.default_limit, 10);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.metadata.suffix, ".meta.yaml");
        assert_eq!(config.lists.default_limit, 10);
    }

    #[test]
    fn test_parse_lists_config() {
        let toml = r"
[lists]
default_limit = 25
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.lists.default_limit, 25);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "articles"
output_dir = "site"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/articles")
        );
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/site")
        );
        assert_eq!(
            config.docs_resolved.project_dir,
            PathBuf::from("/project/.rl")
        );
    }

    #[test]
    fn test_resolve_paths_default_output() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/project/.rl/build")
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            default_limit: Some(0),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.lists.default_limit, 0);
        assert_eq!(
            config.docs_resolved.output_dir,
            PathBuf::from("/test/.rl/build")
        );
    }

    #[test]
    fn test_validate_empty_suffix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.metadata.suffix = String::new();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("metadata.suffix"));
    }

    #[test]
    fn test_validate_suffix_without_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.metadata.suffix = "meta".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/rl.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rl.toml");
        std::fs::write(
            &path,
            "[docs]\nsource_dir = \"content\"\n\n[metadata]\nsuffix = \".props.yaml\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.metadata.suffix, ".props.yaml");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rl.toml");
        std::fs::write(&path, "[docs\nsource_dir = 1").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
