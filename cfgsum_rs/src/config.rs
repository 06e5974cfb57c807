//! Configuration file support for cfgsum.
//!
//! Loads optional `.cfgsum/config.toml` from the working directory (or an
//! explicit `--config` path). Every field has a default, so an empty or
//! partial file is fine.

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use crate::types::DefaultLiteral;

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CfgsumConfig {
    pub parser: ParserConfig,
    pub native: NativeConfig,
    pub report: ReportConfig,
}

/// Rules of the bracketed-section dialect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Line prefixes that mark a comment.
    pub comment_markers: Vec<String>,
    /// Token marking a namespace-qualified section header (`[Foo::Bar]`).
    pub namespace_separator: String,
    /// Section names (case-insensitive) that never describe a calculator.
    pub ignored_sections: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            comment_markers: vec!["#".to_string()],
            namespace_separator: "::".to_string(),
            ignored_sections: vec!["analytics".to_string()],
        }
    }
}

/// Native source mining knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Member holding the configuration tag prefix in settings accessor calls.
    pub tag_variable: String,
    /// Suffix stripped from implementation file stems (`FooCalculator.cpp` -> `foo`).
    pub implementation_suffix: String,
    /// Case-insensitive file-name fragment selecting registration sources.
    pub register_file_marker: String,
    pub default_literal: DefaultLiteral,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            tag_variable: "m_cfgTag".to_string(),
            implementation_suffix: "Calculator".to_string(),
            register_file_marker: "register".to_string(),
            default_literal: DefaultLiteral::Verbatim,
        }
    }
}

/// Workbook layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Path fragment after which displayed cfg paths are cut (repository root).
    pub repo_root_marker: Option<String>,
    /// Cell value flagging that a row occurs in a given file.
    pub membership_marker: String,
    pub summary_sheet: String,
    pub sheet_name_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            repo_root_marker: None,
            membership_marker: "X".to_string(),
            summary_sheet: "calculator summary".to_string(),
            sheet_name_limit: 31,
        }
    }
}

impl CfgsumConfig {
    /// Load config from `.cfgsum/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".cfgsum").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CfgsumConfig::default();
        assert_eq!(config.parser.comment_markers, vec!["#".to_string()]);
        assert_eq!(config.parser.namespace_separator, "::");
        assert_eq!(config.native.tag_variable, "m_cfgTag");
        assert_eq!(config.native.default_literal, DefaultLiteral::Verbatim);
        assert_eq!(config.report.sheet_name_limit, 31);
        assert_eq!(config.report.summary_sheet, "calculator summary");
        assert!(config.report.repo_root_marker.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = CfgsumConfig::load(temp.path());
        assert_eq!(config.report.membership_marker, "X");
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join(".cfgsum");
        std::fs::create_dir_all(&dir).expect("create .cfgsum");

        let mut file = std::fs::File::create(dir.join("config.toml")).expect("create config");
        writeln!(
            file,
            r##"
[parser]
comment_markers = ["#", ";"]

[native]
default_literal = "zero-as-absent"

[report]
repo_root_marker = "repo/"
membership_marker = "yes"
"##
        )
        .expect("write config");

        let config = CfgsumConfig::load(temp.path());
        assert_eq!(config.parser.comment_markers.len(), 2);
        assert_eq!(config.parser.namespace_separator, "::");
        assert_eq!(config.native.default_literal, DefaultLiteral::ZeroAsAbsent);
        assert_eq!(config.native.implementation_suffix, "Calculator");
        assert_eq!(config.report.repo_root_marker.as_deref(), Some("repo/"));
        assert_eq!(config.report.membership_marker, "yes");
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "[report\nmembership_marker = ").expect("write config");

        let config = CfgsumConfig::load_from_path(&path);
        assert_eq!(config.report.membership_marker, "X");
    }
}
