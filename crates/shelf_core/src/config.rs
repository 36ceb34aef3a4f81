use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::{ModelChoice, OptimizationGoal};
use crate::error::{PlannerError, Result};

/// Client configuration, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the recommendation service, e.g. `http://localhost:5000`
    pub base_url: String,
    /// Connect timeout in seconds for the blocking HTTP client
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub model: ModelChoice,
    #[serde(default)]
    pub goal: OptimizationGoal,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:5000".to_string(),
                connect_timeout_secs: default_timeout_secs(),
            },
            defaults: DefaultsConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: PlannerConfig = toml::from_str(&content).map_err(|e| {
            PlannerError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(PlannerError::Config(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PlannerError::Config(format!(
                "backend.base_url must start with http:// or https://, got '{}'",
                url
            )));
        }
        if self.backend.connect_timeout_secs == 0 {
            return Err(PlannerError::Config(
                "backend.connect_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed, so endpoint paths can be
    /// appended directly.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.backend.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            r#"
[backend]
base_url = "http://192.168.1.20:5000/"
connect_timeout_secs = 5

[defaults]
model = "decision_tree"
goal = "minimize"
"#
        )
        .unwrap();

        let config = PlannerConfig::load_from_file(tmp.path()).unwrap();
        assert_eq!(config.backend.base_url, "http://192.168.1.20:5000/");
        assert_eq!(config.backend.connect_timeout_secs, 5);
        assert_eq!(config.defaults.model, ModelChoice::DecisionTree);
        assert_eq!(config.defaults.goal, OptimizationGoal::Minimize);
        assert_eq!(
            config.endpoint("/predict"),
            "http://192.168.1.20:5000/predict"
        );
    }

    #[test]
    fn test_defaults_section_optional() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[backend]\nbase_url = \"http://localhost:5000\"").unwrap();

        let config = PlannerConfig::load_from_file(tmp.path()).unwrap();
        assert_eq!(config.backend.connect_timeout_secs, 10);
        assert_eq!(config.defaults.model, ModelChoice::NaiveBayes);
        assert_eq!(config.defaults.goal, OptimizationGoal::Maximize);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = PlannerConfig::default();
        config.backend.base_url = "localhost:5000".to_string();
        assert!(matches!(
            config.validate(),
            Err(PlannerError::Config(msg)) if msg.contains("http")
        ));

        config.backend.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = PlannerConfig::load_from_file("/nonexistent/planner.toml");
        assert!(matches!(result, Err(PlannerError::Config(_))));
    }
}
