use std::path::Path;

use serde::Deserialize;

use crate::domain::experiment::{DuplicatePolicy, ExperimentDefinition, SeedingStrategy};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub assignment: AssignmentConfig,
    /// Experiments in registration order
    pub experiments: Vec<ExperimentConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AssignmentConfig {
    pub seeding: SeedingStrategy,
    pub duplicates: DuplicatePolicy,
}

/// One experiment entry; variations are plain labels
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExperimentConfig {
    #[serde(rename = "type")]
    pub experiment_type: String,
    pub variations: Vec<String>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

impl ExperimentConfig {
    /// Build the (not yet validated) experiment definition
    pub fn to_definition(&self) -> ExperimentDefinition<String> {
        let definition =
            ExperimentDefinition::new(self.experiment_type.clone(), self.variations.clone());

        match &self.weights {
            Some(weights) => definition.with_weights(weights.clone()),
            None => definition,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load from the default locations and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load from the default locations, an optional explicit file, and the
    /// environment (`APP__SECTION__KEY`), later sources overriding earlier ones
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Parse a TOML document, without consulting files or the environment
    pub fn from_toml_str(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Experiment definitions in registration order
    pub fn definitions(&self) -> Vec<ExperimentDefinition<String>> {
        self.experiments
            .iter()
            .map(ExperimentConfig::to_definition)
            .collect()
    }
}
