use std::path::Path;

use thiserror::Error;

use super::Config;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SourceType {
    #[default]
    Json,
    Yml,
}

const JSON_EXT: &str = "json";
const YML_EXT: &str = "yml";
const YAML_EXT: &str = "yaml";

#[derive(Debug, Error, PartialEq)]
#[error("Unsupported config extension: {0}")]
pub struct UnsupportedConfigFormat(pub String);

impl std::str::FromStr for SourceType {
    type Err = UnsupportedConfigFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            JSON_EXT => Ok(SourceType::Json),
            YML_EXT | YAML_EXT => Ok(SourceType::Yml),
            _ => Err(UnsupportedConfigFormat(s.to_string())),
        }
    }
}

impl SourceType {
    /// Get the file extension for the given format
    pub fn ext(&self) -> &'static str {
        match self {
            SourceType::Json => JSON_EXT,
            SourceType::Yml => YML_EXT,
        }
    }

    /// Detect the config format from the file name
    pub fn detect(name: &str) -> Result<SourceType, UnsupportedConfigFormat> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| UnsupportedConfigFormat(name.to_string()))?
            .parse()
            .map_err(|_| UnsupportedConfigFormat(name.to_string()))
    }

    /// Decode the config from the given data
    pub fn decode(&self, data: &str) -> Result<Config, super::Error> {
        match self {
            SourceType::Json => Ok(Config::from_json(data)?),
            SourceType::Yml => Ok(Config::from_yaml(data)?),
        }
    }

    /// Encode the config to the given format
    pub fn encode(&self, config: &Config) -> Result<String, super::Error> {
        match self {
            SourceType::Json => Ok(config.to_json(true)?),
            SourceType::Yml => Ok(config.to_yaml()?),
        }
    }
}
