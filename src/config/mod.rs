//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository root to analyze.
    pub repo_root: PathBuf,
    /// Source subtree under the repository root.
    pub src_dir: String,
    /// Extension of enumerated source files (without the dot).
    pub src_extension: String,
    /// Directory report artifacts are written to.
    pub reports_dir: PathBuf,
    /// Exclude patterns (glob) applied on top of the built-in markers.
    #[serde(rename = "exclude")]
    pub exclude_patterns: Vec<String>,
    /// Duplicate-code detector configuration.
    pub cpd: CpdConfig,
    /// Complexity analyzer configuration.
    pub radon: RadonConfig,
    /// Churn report configuration.
    pub churn: ChurnConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            src_dir: "src".to_string(),
            src_extension: "py".to_string(),
            reports_dir: PathBuf::from("reports"),
            exclude_patterns: Vec::new(),
            cpd: CpdConfig::default(),
            radon: RadonConfig::default(),
            churn: ChurnConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Use this for explicit `--config` flags.
    /// Env vars with `VITALS_` prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::core::Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed("VITALS_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration from directory, looking for vitals.toml or .vitals/vitals.toml.
    ///
    /// Missing files are silently skipped (defaults are used).
    /// Env vars with `VITALS_` prefix override file/default values.
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.join("vitals.toml")))
            .merge(Toml::file(dir.join(".vitals/vitals.toml")))
            .merge(Env::prefixed("VITALS_").split("__"))
            .extract()
            .map_err(|e| crate::core::Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Create default config file content.
    pub fn default_toml() -> &'static str {
        include_str!("default_config.toml")
    }
}

/// PMD CPD (duplicate-code detector) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CpdConfig {
    /// Binary to invoke.
    pub binary: String,
    /// Language passed to `--language`.
    pub language: String,
    /// Minimum duplicate size passed to `--minimum-tokens`.
    pub min_tokens: usize,
}

impl Default for CpdConfig {
    fn default() -> Self {
        Self {
            binary: "pmd".to_string(),
            language: "python".to_string(),
            min_tokens: 50,
        }
    }
}

/// radon (complexity/maintainability/Halstead analyzer) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadonConfig {
    /// Binary to invoke.
    pub binary: String,
    /// Directory names passed to `--ignore`.
    pub ignore: Vec<String>,
}

impl Default for RadonConfig {
    fn default() -> Self {
        Self {
            binary: "radon".to_string(),
            ignore: vec!["tests".to_string()],
        }
    }
}

/// Churn report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChurnConfig {
    /// Only stat lines whose path starts with this prefix qualify.
    pub include_prefix: String,
    /// Stat lines whose path contains any of these markers are excluded.
    pub exclude_markers: Vec<String>,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            include_prefix: "src/".to_string(),
            exclude_markers: vec![
                "tests/".to_string(),
                "test_".to_string(),
                "_test.py".to_string(),
                "migrations/".to_string(),
                "_migration.py".to_string(),
                "_migration".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.src_extension, "py");
        assert_eq!(config.cpd.min_tokens, 50);
        assert_eq!(config.cpd.language, "python");
        assert_eq!(config.radon.ignore, vec!["tests"]);
        assert_eq!(config.churn.include_prefix, "src/");
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file("/no/such/vitals.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_overrides() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("vitals.toml");
        std::fs::write(
            &path,
            "src_dir = \"lib\"\n\n[cpd]\nmin_tokens = 80\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.src_dir, "lib");
        assert_eq!(config.cpd.min_tokens, 80);
        // Untouched sections keep defaults
        assert_eq!(config.radon.binary, "radon");
    }

    #[test]
    fn test_load_default_without_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_default(temp.path()).unwrap();
        assert_eq!(config.cpd.min_tokens, 50);
    }

    #[test]
    fn test_default_toml_parses() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("vitals.toml");
        std::fs::write(&path, Config::default_toml()).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.cpd.min_tokens, 50);
    }
}
