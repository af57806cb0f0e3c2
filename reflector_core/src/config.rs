use crate::error::{ReflectError, Result};
use crate::extract::ExtractStrategy;
use regex::Regex;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

/// Name of the configuration file searched for in the current directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = "reflector.toml";

/// How two declarations that share an enumeration name are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The later declaration replaces the earlier artifact.
    #[default]
    Overwrite,
    /// The later declaration is rejected and the run reports failure.
    Fail,
    /// Enumerator lists are unioned in first-seen order.
    Merge,
}

/// What the generated artifact includes to get the enum definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IncludeStyle {
    /// The originating header, relative to the source root.
    #[default]
    Source,
    /// `<EnumName>.h`.
    EnumName,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the tree scanned for declarations.
    pub source_root: PathBuf,
    /// Directory receiving the generated artifacts.
    pub output_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            output_root: PathBuf::from("Meta"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) that are read.
    pub extensions: Vec<String>,
    pub strategy: ExtractStrategy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["h".to_string(), "cpp".to_string()],
            strategy: ExtractStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Extension of generated artifacts, without the dot.
    pub artifact_extension: String,
    pub include: IncludeStyle,
    pub on_duplicate: DuplicatePolicy,
    /// Delete artifacts in the output root that this run did not produce.
    pub prune_stale: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            artifact_extension: "cpp".to_string(),
            include: IncludeStyle::default(),
            on_duplicate: DuplicatePolicy::default(),
            prune_stale: false,
        }
    }
}

/// Configuration for one Reflector run.
///
/// Built once at startup and passed down explicitly; nothing else reads
/// paths from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReflectorConfig {
    pub paths: PathsConfig,
    pub scan: ScanConfig,
    pub generate: GenerateConfig,
}

impl ReflectorConfig {
    /// Loads configuration from `explicit` if given, otherwise from the first
    /// `reflector.toml` found from the current directory upward. Falls back to
    /// defaults when no file exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_toml_path(path);
        }

        let current_dir = env::current_dir()?;
        match Self::find_config_file(&current_dir) {
            Some(path) => Self::from_toml_path(&path),
            None => {
                debug!(
                    "No {} found from {:?}, using defaults",
                    CONFIG_FILE_NAME, current_dir
                );
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file. Relative paths in the file
    /// are resolved against the file's directory.
    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file: {}", e);
            ReflectError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&contents, base_dir)
    }

    /// Parses TOML content, substituting environment variables and resolving
    /// relative paths against `base_dir`.
    pub fn from_toml_str(contents: &str, base_dir: &Path) -> Result<Self> {
        let mut config: ReflectorConfig = toml::from_str(contents).map_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
            ReflectError::config(e.to_string())
        })?;

        config.paths.source_root = resolve_path(&config.paths.source_root, base_dir)?;
        config.paths.output_root = resolve_path(&config.paths.output_root, base_dir)?;

        if config.generate.artifact_extension.trim().is_empty() {
            return Err(ReflectError::config("artifact_extension must not be empty"));
        }

        debug!(
            "Configuration: source_root={:?}, output_root={:?}, strategy={:?}, on_duplicate={:?}",
            config.paths.source_root,
            config.paths.output_root,
            config.scan.strategy,
            config.generate.on_duplicate
        );

        Ok(config)
    }

    /// Searches for `reflector.toml` starting from `start_dir` and walking up
    /// to the filesystem root.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        debug!("Starting config file search from: {:?}", start_dir);
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", candidate);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }

    /// Creates a builder for programmatic configuration.
    pub fn builder() -> ReflectorConfigBuilder {
        ReflectorConfigBuilder::new()
    }

    /// Substitute environment variables in config strings.
    /// Supports `${VAR_NAME}` and `${VAR_NAME:-default}`.
    pub fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;
        let mut result = value.to_string();

        for cap in re.captures_iter(value) {
            let var_name = &cap[1];
            let replacement = match env::var(var_name) {
                Ok(val) => val,
                Err(_) => match cap.get(2) {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name,
                            default.as_str()
                        );
                        default.as_str().to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(ReflectError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };
            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}

fn resolve_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
    let substituted = PathBuf::from(ReflectorConfig::substitute_env_vars(
        &path.to_string_lossy(),
    )?);
    if substituted.is_absolute() {
        Ok(substituted)
    } else {
        Ok(base_dir.join(substituted))
    }
}

/// Builder for creating a `ReflectorConfig` programmatically.
#[derive(Debug, Clone, Default)]
pub struct ReflectorConfigBuilder {
    config: ReflectorConfig,
}

impl ReflectorConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ReflectorConfig::default(),
        }
    }

    pub fn source_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.paths.source_root = path.into();
        self
    }

    pub fn output_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.paths.output_root = path.into();
        self
    }

    /// Replaces the list of scanned file extensions.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.scan.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn strategy(mut self, strategy: ExtractStrategy) -> Self {
        self.config.scan.strategy = strategy;
        self
    }

    pub fn artifact_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.generate.artifact_extension = extension.into();
        self
    }

    pub fn include(mut self, include: IncludeStyle) -> Self {
        self.config.generate.include = include;
        self
    }

    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.config.generate.on_duplicate = policy;
        self
    }

    pub fn prune_stale(mut self, prune: bool) -> Self {
        self.config.generate.prune_stale = prune;
        self
    }

    pub fn build(self) -> ReflectorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ReflectorConfig::default();
        assert_eq!(config.paths.source_root, PathBuf::from("."));
        assert_eq!(config.paths.output_root, PathBuf::from("Meta"));
        assert_eq!(config.scan.extensions, vec!["h", "cpp"]);
        assert_eq!(config.scan.strategy, ExtractStrategy::Tokens);
        assert_eq!(config.generate.artifact_extension, "cpp");
        assert_eq!(config.generate.include, IncludeStyle::Source);
        assert_eq!(config.generate.on_duplicate, DuplicatePolicy::Overwrite);
        assert!(!config.generate.prune_stale);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ReflectorConfig::builder()
            .source_root("/src")
            .output_root("/out")
            .extensions(["hpp"])
            .strategy(ExtractStrategy::Pattern)
            .on_duplicate(DuplicatePolicy::Merge)
            .include(IncludeStyle::EnumName)
            .prune_stale(true)
            .build();

        assert_eq!(config.paths.source_root, PathBuf::from("/src"));
        assert_eq!(config.paths.output_root, PathBuf::from("/out"));
        assert_eq!(config.scan.extensions, vec!["hpp"]);
        assert_eq!(config.scan.strategy, ExtractStrategy::Pattern);
        assert_eq!(config.generate.on_duplicate, DuplicatePolicy::Merge);
        assert_eq!(config.generate.include, IncludeStyle::EnumName);
        assert!(config.generate.prune_stale);
    }

    #[test]
    fn test_parse_empty_toml_uses_defaults() {
        let config = ReflectorConfig::from_toml_str("", Path::new("/project")).unwrap();
        assert_eq!(config.paths.source_root, PathBuf::from("/project/."));
        assert_eq!(config.paths.output_root, PathBuf::from("/project/Meta"));
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_content = r#"
[paths]
source_root = "../"
output_root = "/abs/Meta/"

[scan]
extensions = ["h", "hpp", "cpp"]
strategy = "pattern"

[generate]
artifact_extension = "cc"
include = "enum-name"
on_duplicate = "fail"
prune_stale = true
"#;
        let config = ReflectorConfig::from_toml_str(toml_content, Path::new("/project/tools"))
            .expect("Should parse successfully");

        assert_eq!(config.paths.source_root, PathBuf::from("/project/tools/../"));
        assert_eq!(config.paths.output_root, PathBuf::from("/abs/Meta/"));
        assert_eq!(config.scan.extensions, vec!["h", "hpp", "cpp"]);
        assert_eq!(config.scan.strategy, ExtractStrategy::Pattern);
        assert_eq!(config.generate.artifact_extension, "cc");
        assert_eq!(config.generate.include, IncludeStyle::EnumName);
        assert_eq!(config.generate.on_duplicate, DuplicatePolicy::Fail);
        assert!(config.generate.prune_stale);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let result = ReflectorConfig::from_toml_str(
            "[generate]\non_duplicate = \"ignore\"\n",
            Path::new("."),
        );
        assert!(matches!(result, Err(ReflectError::Config(_))));
    }

    #[test]
    fn test_parse_rejects_empty_artifact_extension() {
        let result = ReflectorConfig::from_toml_str(
            "[generate]\nartifact_extension = \"\"\n",
            Path::new("."),
        );
        assert!(matches!(result, Err(ReflectError::Config(_))));
    }

    #[test]
    fn test_paths_substitute_env_vars() {
        temp_env::with_var("REFLECTOR_TEST_OUT", Some("/generated"), || {
            let config = ReflectorConfig::from_toml_str(
                "[paths]\noutput_root = \"${REFLECTOR_TEST_OUT}/Meta\"\n",
                Path::new("/project"),
            )
            .unwrap();
            assert_eq!(config.paths.output_root, PathBuf::from("/generated/Meta"));
        });
    }

    #[test]
    fn test_substitute_env_vars_with_default() {
        temp_env::with_var_unset("REFLECTOR_TEST_UNSET", || {
            let result =
                ReflectorConfig::substitute_env_vars("${REFLECTOR_TEST_UNSET:-fallback}/x").unwrap();
            assert_eq!(result, "fallback/x");
        });
    }

    #[test]
    fn test_substitute_env_vars_missing_returns_error() {
        temp_env::with_var_unset("REFLECTOR_TEST_MISSING", || {
            let result = ReflectorConfig::substitute_env_vars("${REFLECTOR_TEST_MISSING}");
            assert!(matches!(result, Err(ReflectError::EnvVarNotSet(name)) if name == "REFLECTOR_TEST_MISSING"));
        });
    }

    #[test]
    fn test_substitute_env_vars_no_match() {
        let result = ReflectorConfig::substitute_env_vars("no variables here").unwrap();
        assert_eq!(result, "no variables here");
    }

    #[test]
    fn test_find_config_file_in_grandparent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let grandchild_dir = temp_dir.path().join("child").join("grandchild");
        fs::create_dir_all(&grandchild_dir).unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "# test config").unwrap();

        let found = ReflectorConfig::find_config_file(&grandchild_dir).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_from_toml_path_resolves_against_file_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            "[paths]\nsource_root = \"src\"\noutput_root = \"gen\"\n",
        )
        .unwrap();

        let config = ReflectorConfig::from_toml_path(&config_path).unwrap();
        assert_eq!(config.paths.source_root, temp_dir.path().join("src"));
        assert_eq!(config.paths.output_root, temp_dir.path().join("gen"));
    }

    #[test]
    fn test_load_explicit_missing_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ReflectorConfig::load(Some(&temp_dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ReflectError::Config(_))));
    }
}
