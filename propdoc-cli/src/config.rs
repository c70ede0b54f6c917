//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `propdoc.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use propdoc::render::MarkdownOptions;
use propdoc::{TemplateExtractor, DEFAULT_MAX_DEPTH};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "propdoc.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the component sources live.
    pub source: SourceConfig,

    /// The document receiving the generated section.
    pub target: TargetConfig,

    /// Shape of the generated section.
    pub output: OutputConfig,

    /// Type resolution settings.
    pub resolver: ResolverConfig,
}

/// Component source configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory holding one component per file.
    pub dir: PathBuf,

    /// File extensions to consider, without the dot.
    pub extensions: Vec<String>,

    /// Whether to descend into subdirectories.
    pub recursive: bool,

    /// Suffix appended to the component name to find its props interface.
    pub props_suffix: String,
}

/// Target document configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Path to the document to update.
    pub file: PathBuf,

    /// Comment line opening the managed region.
    pub start_marker: String,

    /// Comment line closing the managed region.
    pub end_marker: String,

    /// Heading of the hand-written section replaced on the first run.
    pub legacy_heading: String,
}

/// Generated section configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Title of the count heading (`## <heading> (N)`).
    pub heading: String,

    /// Info string of the fenced example blocks.
    pub fence_lang: String,

    /// Whether to emit each template's description line.
    pub include_descriptions: bool,
}

/// Resolver configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Recursion cap for interface references.
    pub max_depth: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/components/templates"),
            extensions: vec!["tsx".to_string(), "ts".to_string()],
            recursive: false,
            props_suffix: "Props".to_string(),
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("docs/agent-prompt.md"),
            start_marker: "<!-- TEMPLATE_SCHEMAS:START -->".to_string(),
            end_marker: "<!-- TEMPLATE_SCHEMAS:END -->".to_string(),
            legacy_heading: "## Available Templates".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            heading: "Available Templates".to_string(),
            fence_lang: "json".to_string(),
            include_descriptions: true,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Extractor configured from the source and resolver sections.
    pub fn extractor(&self) -> TemplateExtractor {
        TemplateExtractor::new()
            .with_props_suffix(&self.source.props_suffix)
            .with_max_depth(self.resolver.max_depth)
    }

    /// Markdown options from the output section.
    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            fence_lang: self.output.fence_lang.clone(),
            include_descriptions: self.output.include_descriptions,
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Reject configurations the splicer cannot work with.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let target = &config.target;
        if target.start_marker.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "target.start_marker",
                "must not be empty",
            ));
        }
        if target.end_marker.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "target.end_marker",
                "must not be empty",
            ));
        }
        if target.start_marker == target.end_marker {
            return Err(ConfigError::invalid_value(
                "target.end_marker",
                "must differ from target.start_marker",
            ));
        }
        if !target.legacy_heading.starts_with('#') {
            return Err(ConfigError::invalid_value(
                "target.legacy_heading",
                "must be a markdown heading starting with '#'",
            ));
        }
        if config.output.fence_lang.contains('`') {
            return Err(ConfigError::invalid_value(
                "output.fence_lang",
                "must not contain backticks",
            ));
        }
        Ok(())
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref input) = args.input {
            config.source.dir = input.clone();
        }

        if let Some(ref target) = args.target {
            config.target.file = target.clone();
        }

        if let Some(max_depth) = args.max_depth {
            config.resolver.max_depth = max_depth;
        }

        if let Some(recursive) = args.recursive {
            config.source.recursive = recursive;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r###"# propdoc configuration file

[source]
# Directory containing one template component per file
dir = "src/components/templates"

# File extensions to scan
extensions = ["tsx", "ts"]

# Whether to scan subdirectories
recursive = false

# The props interface of component `Card` is `Card` + this suffix
props_suffix = "Props"

[target]
# Document receiving the generated schemas
file = "docs/agent-prompt.md"

# Markers delimiting the region propdoc owns
start_marker = "<!-- TEMPLATE_SCHEMAS:START -->"
end_marker = "<!-- TEMPLATE_SCHEMAS:END -->"

# Hand-written section converted into the marked region on the first run
legacy_heading = "## Available Templates"

[output]
# Count heading of the generated section
heading = "Available Templates"

# Language of the fenced example blocks
fence_lang = "json"

# Whether to include each template's JSDoc summary line
include_descriptions = true

[resolver]
# How deep to follow references between interfaces
max_depth = 2
"###
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Source directory override.
    pub input: Option<PathBuf>,

    /// Target document override.
    pub target: Option<PathBuf>,

    /// Depth cap override.
    pub max_depth: Option<usize>,

    /// Recursive scan override.
    pub recursive: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.dir, PathBuf::from("src/components/templates"));
        assert_eq!(config.source.extensions, vec!["tsx", "ts"]);
        assert!(!config.source.recursive);
        assert_eq!(config.source.props_suffix, "Props");
        assert_eq!(config.target.file, PathBuf::from("docs/agent-prompt.md"));
        assert_eq!(config.target.legacy_heading, "## Available Templates");
        assert_eq!(config.output.fence_lang, "json");
        assert!(config.output.include_descriptions);
        assert_eq!(config.resolver.max_depth, 2);
        assert!(ConfigManager::validate(&config).is_ok());
    }

    #[test]
    fn test_default_config_content_matches_defaults() {
        let parsed: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.source.dir, defaults.source.dir);
        assert_eq!(parsed.source.extensions, defaults.source.extensions);
        assert_eq!(parsed.target.start_marker, defaults.target.start_marker);
        assert_eq!(parsed.target.end_marker, defaults.target.end_marker);
        assert_eq!(parsed.output.heading, defaults.output.heading);
        assert_eq!(parsed.resolver.max_depth, defaults.resolver.max_depth);
    }

    #[test]
    fn test_merge_cli_args() {
        let config = Config::default();
        let args = CliArgs {
            input: Some(PathBuf::from("./components")),
            target: Some(PathBuf::from("PROMPT.md")),
            max_depth: Some(4),
            recursive: Some(true),
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.source.dir, PathBuf::from("./components"));
        assert_eq!(merged.target.file, PathBuf::from("PROMPT.md"));
        assert_eq!(merged.resolver.max_depth, 4);
        assert!(merged.source.recursive);
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let merged = ConfigManager::merge_cli_args(config.clone(), &CliArgs::default());

        assert_eq!(merged.source.dir, config.source.dir);
        assert_eq!(merged.target.file, config.target.file);
        assert_eq!(merged.resolver.max_depth, config.resolver.max_depth);
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
[target]
file = "AGENTS.md"

[resolver]
max_depth = 3
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.target.file, PathBuf::from("AGENTS.md"));
        assert_eq!(config.resolver.max_depth, 3);
        assert_eq!(config.target.start_marker, "<!-- TEMPLATE_SCHEMAS:START -->");
        assert_eq!(config.source.props_suffix, "Props");
    }

    #[test]
    fn test_validate_rejects_bad_markers() {
        let mut config = Config::default();
        config.target.end_marker = config.target.start_marker.clone();
        assert!(matches!(
            ConfigManager::validate(&config),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = Config::default();
        config.target.legacy_heading = "Available Templates".to_string();
        assert!(ConfigManager::validate(&config).is_err());

        let mut config = Config::default();
        config.target.start_marker = "  ".to_string();
        assert!(ConfigManager::validate(&config).is_err());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = ConfigManager::load(Some(Path::new("/nonexistent/propdoc.toml"))).unwrap();
        assert_eq!(config.resolver.max_depth, DEFAULT_MAX_DEPTH);
    }
}
