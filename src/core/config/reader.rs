use std::path::Path;

use super::{Config, Result, SourceType};

/// Reads the loader configuration from a JSON or YAML file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigReader;

impl ConfigReader {
    /// Reads a single file, the format is detected from its extension.
    pub async fn read(&self, path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let source = SourceType::detect(&path.to_string_lossy())?;
        let content = tokio::fs::read_to_string(path).await?;
        let config = source.decode(&content)?;

        tracing::debug!(path = %path.display(), "loader config read");
        Ok(config)
    }

    /// Reads the file at `path` if it exists, otherwise returns the default
    /// configuration.
    pub async fn read_or_default(&self, path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if tokio::fs::try_exists(path).await? {
            self.read(path).await
        } else {
            tracing::debug!(path = %path.display(), "no loader config, using defaults");
            Ok(Config::default())
        }
    }
}
