//! Run configuration
//!
//! Field names follow the build plugin's inputs (`buildDir`, `exclude`,
//! `policies`, `setAllPolicies`) so its JSON loads unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sitecsp_security::{PolicyOverrides, PolicySet};

use crate::{EngineError, WriteMode, HEADERS_FILE};

/// Header generation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root directory of the generated site
    #[serde(default)]
    pub build_dir: PathBuf,
    /// Globs of pages to leave out; a leading `!` is optional
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Static sources per directive
    #[serde(default)]
    pub policies: PolicyOverrides,
    /// Emit every directive, even ones with nothing configured
    #[serde(default)]
    pub set_all_policies: bool,
    /// Also hash inline `<style>` elements into `style-src`
    #[serde(default)]
    pub hash_styles: bool,
    /// Output path; defaults to `<buildDir>/_headers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_file: Option<PathBuf>,
    /// Replace or extend an existing headers file
    #[serde(default)]
    pub write_mode: WriteMode,
}

impl Config {
    /// Configuration with defaults for everything but the build directory
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| EngineError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check required fields
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.build_dir.as_os_str().is_empty() {
            return Err(EngineError::MissingBuildDir);
        }
        Ok(())
    }

    /// Resolved output path
    pub fn headers_path(&self) -> PathBuf {
        self.headers_file
            .clone()
            .unwrap_or_else(|| self.build_dir.join(HEADERS_FILE))
    }

    /// Defaults merged with the configured policies
    pub fn policy_set(&self) -> PolicySet {
        PolicySet::merged(&self.policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecsp_security::Directive;

    #[test]
    fn test_plugin_inputs_deserialize() {
        let json = r#"{
            "buildDir": "public",
            "exclude": ["!public/admin/*.html"],
            "policies": { "defaultSrc": "'self'" },
            "setAllPolicies": true
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.build_dir, PathBuf::from("public"));
        assert_eq!(config.exclude, vec!["!public/admin/*.html"]);
        assert!(config.set_all_policies);
        assert!(!config.hash_styles);
        assert_eq!(config.write_mode, WriteMode::Truncate);
        assert_eq!(config.policy_set().get(Directive::DefaultSrc), "'self'");
        assert_eq!(config.policy_set().get(Directive::ScriptSrc), "");
    }

    #[test]
    fn test_defaults() {
        let config: Config = serde_json::from_str(r#"{ "buildDir": "dist" }"#).unwrap();

        assert!(config.exclude.is_empty());
        assert!(!config.set_all_policies);
        assert_eq!(config.policy_set(), PolicySet::default());
        assert_eq!(config.headers_path(), PathBuf::from("dist").join("_headers"));
    }

    #[test]
    fn test_headers_file_override() {
        let json = r#"{ "buildDir": "dist", "headersFile": "out/_headers", "writeMode": "append" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.headers_path(), PathBuf::from("out/_headers"));
        assert_eq!(config.write_mode, WriteMode::Append);
    }

    #[test]
    fn test_validate_requires_build_dir() {
        assert!(matches!(Config::default().validate(), Err(EngineError::MissingBuildDir)));
        assert!(Config::new("site").validate().is_ok());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let json = r#"{ "buildDir": "dist", "policies": { "sandbox": "allow-forms" } }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }
}
