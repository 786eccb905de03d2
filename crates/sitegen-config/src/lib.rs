//! Configuration management for sitegen.
//!
//! Parses `sitegen.toml` configuration files with serde and provides
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
//! - `site.name`
//! - `server.host`
//!
//! ## Example
//!
//! ```toml
//! [site]
//! name = "Team notes"
//!
//! [build]
//! content_dir = "content"
//! output_dir = "public"
//! theme = "themes/dark.css"
//! grouping = "path"
//!
//! [server]
//! host = "${SITEGEN_HOST:-localhost}"
//! port = 8888
//! open_browser = false
//! ```

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitegen.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site name.
    pub name: Option<String>,
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override theme stylesheet.
    pub theme: Option<PathBuf>,
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override browser opening.
    pub open_browser: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Server configuration.
    pub server: ServerConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name shown in page titles and the navigation header.
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "My site".to_owned(),
        }
    }
}

/// How documents are grouped for index synthesis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Group by relative directory path.
    #[default]
    Path,
    /// Group by directory base name.
    Basename,
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    content_dir: Option<String>,
    output_dir: Option<String>,
    theme: Option<String>,
    grouping: Option<GroupingMode>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Content directory (`None` until given on the command line or in the
    /// config file).
    pub content_dir: Option<PathBuf>,
    /// Output directory.
    pub output_dir: PathBuf,
    /// Theme stylesheet (`None` selects the built-in theme).
    pub theme: Option<PathBuf>,
    /// Grouping strategy.
    pub grouping: GroupingMode,
}

/// Preview server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Open the site in the default browser once serving.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 8888,
            open_browser: true,
        }
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
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`SITEGEN_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitegen.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The merged result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the merged configuration is invalid.
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

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(name) = &settings.name {
            self.site.name.clone_from(name);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.build_resolved.content_dir = Some(content_dir.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(theme) = &settings.theme {
            self.build_resolved.theme = Some(theme.clone());
        }
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(open_browser) = settings.open_browser {
            self.server.open_browser = open_browser;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            build: BuildConfigRaw::default(),
            server: ServerConfig::default(),
            build_resolved: BuildConfig {
                content_dir: None,
                output_dir: base.join("output"),
                theme: None,
                grouping: GroupingMode::default(),
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

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.name, "site.name")?;
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.name = expand::expand_env(&self.site.name, "site.name")?;
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: &str| config_dir.join(path);

        self.build_resolved = BuildConfig {
            content_dir: self.build.content_dir.as_deref().map(resolve),
            output_dir: resolve(self.build.output_dir.as_deref().unwrap_or("output")),
            theme: self.build.theme.as_deref().map(resolve),
            grouping: self.build.grouping.unwrap_or_default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.site.name, "My site");
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8888);
        assert!(config.server.open_browser);
        assert_eq!(
            config.build_resolved,
            BuildConfig {
                content_dir: None,
                output_dir: PathBuf::from("/test/output"),
                theme: None,
                grouping: GroupingMode::Path,
            }
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.site.name, "My site");
        assert_eq!(config.server.port, 8888);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
name = "Team notes"

[build]
content_dir = "content"
output_dir = "public"
theme = "styles/dark.css"
grouping = "basename"

[server]
host = "0.0.0.0"
port = 9000
open_browser = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.name, "Team notes");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(!config.server.open_browser);
        assert_eq!(
            config.build_resolved,
            BuildConfig {
                content_dir: Some(PathBuf::from("/project/content")),
                output_dir: PathBuf::from("/project/public"),
                theme: Some(PathBuf::from("/project/styles/dark.css")),
                grouping: GroupingMode::Basename,
            }
        );
    }

    #[test]
    fn test_parse_invalid_grouping() {
        let result: Result<Config, _> = toml::from_str("[build]\ngrouping = \"flat\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.build_resolved.content_dir, None);
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/project/output")
        );
    }

    #[test]
    fn test_resolve_paths_keeps_absolute() {
        let mut config: Config = toml::from_str("[build]\noutput_dir = \"/srv/site\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/srv/site"));
    }

    #[test]
    fn test_apply_cli_settings_overrides() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            name: Some("Demo".to_owned()),
            content_dir: Some(PathBuf::from("/docs")),
            port: Some(9000),
            open_browser: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.name, "Demo");
        assert_eq!(
            config.build_resolved.content_dir,
            Some(PathBuf::from("/docs"))
        );
        assert_eq!(config.server.port, 9000);
        assert!(!config.server.open_browser);
        assert_eq!(config.server.host, "localhost"); // Unchanged
        assert_eq!(
            config.build_resolved.output_dir,
            PathBuf::from("/test/output")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_theme_and_output() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/out")),
            theme: Some(PathBuf::from("/styles/dark.css")),
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(
            config.build_resolved.theme,
            Some(PathBuf::from("/styles/dark.css"))
        );
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.name = "  ".to_owned();

        let err = config.validate().unwrap_err();

        assert_eq!(err.to_string(), "Configuration error: site.name cannot be empty");
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("server.host")
        ));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("server.port")
        ));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/sitegen.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitegen.toml");
        std::fs::write(
            &path,
            "[site]\nname = \"Handbook\"\n\n[build]\ncontent_dir = \"docs\"\n",
        )
        .unwrap();
        let overrides = CliSettings {
            port: Some(9001),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.site.name, "Handbook");
        assert_eq!(config.server.port, 9001);
        assert_eq!(
            config.build_resolved.content_dir,
            Some(dir.path().join("docs"))
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitegen.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            port: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitegen.toml");
        std::fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_env_vars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitegen.toml");
        std::fs::write(
            &path,
            "[site]\nname = \"${SITEGEN_TEST_LOAD_NAME:-Fallback}\"\n",
        )
        .unwrap();
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SITEGEN_TEST_LOAD_NAME");
        }

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.name, "Fallback");
    }

    #[test]
    fn test_discover_from_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("sitegen.toml"), "").unwrap();

        let found = Config::discover_from(&nested).unwrap();

        assert_eq!(found, dir.path().join("sitegen.toml"));
    }
}
