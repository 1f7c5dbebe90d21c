use crate::{relation::RelationBuilder, types::SourceType};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("publish namespace must not be empty")]
    EmptyNamespace,

    #[error("invalid publish configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// PublishConfig
///
/// Settings the writer needs from its caller: the namespace stamped on
/// every relation, a fallback endpoint source type, and whether each write
/// is flushed straight away.
///
/// ```toml
/// namespace = "nav"
/// default-source-type = "SDK"
/// autocommit = true
/// ```
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PublishConfig {
    pub namespace: String,

    #[serde(default, alias = "default_source_type")]
    pub default_source_type: Option<SourceType>,

    #[serde(default)]
    pub autocommit: bool,
}

impl PublishConfig {
    pub fn new(namespace: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            namespace: namespace.into(),
            default_source_type: None,
            autocommit: false,
        };
        config.validate()?;

        Ok(config)
    }

    #[must_use]
    pub fn with_default_source_type(mut self, source_type: SourceType) -> Self {
        self.default_source_type = Some(source_type);
        self
    }

    #[must_use]
    pub fn with_autocommit(mut self, autocommit: bool) -> Self {
        self.autocommit = autocommit;
        self
    }

    /// Parse from TOML text. Reading the file is left to the caller.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }

        Ok(())
    }

    /// Relation builder stamping this config's namespace and fallback.
    #[must_use]
    pub fn relation_builder(&self) -> RelationBuilder<'_> {
        RelationBuilder::new(&self.namespace).with_default_source_type(self.default_source_type)
    }
}

///
/// TESTS
///
