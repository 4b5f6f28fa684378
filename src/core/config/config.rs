use std::collections::BTreeMap;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use super::Batch;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default, Setters)]
#[serde(rename_all = "camelCase", default)]
/// Batching settings of all data loaders of a request.
pub struct Config {
    /// Settings used by every loader without an entry in `loaders`.
    pub batch: Batch,

    /// Per loader overrides, keyed by loader name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub loaders: BTreeMap<String, Batch>,
}

impl Config {
    /// Settings of the loader called `name`.
    pub fn batch_for(&self, name: &str) -> &Batch {
        self.loaders.get(name).unwrap_or(&self.batch)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_yaml(yaml: &str) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_json("{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.batch, Batch { delay: 1, max_size: 100 });
    }

    #[test]
    fn test_batch_for() {
        let json = r#"{
            "batch": { "delay": 5 },
            "loaders": { "skillById": { "maxSize": 10 } }
        }"#;
        let config = Config::from_json(json).unwrap();

        assert_eq!(config.batch_for("groupsByContractId"), &Batch { delay: 5, max_size: 100 });
        assert_eq!(config.batch_for("skillById"), &Batch { delay: 1, max_size: 10 });
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = Config::default()
            .batch(Batch::default().delay(2))
            .loaders(BTreeMap::from([(
                "studentByUsername".to_string(),
                Batch::default().max_size(0),
            )]));

        let actual = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();

        assert_eq!(actual, config);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::default().loaders(BTreeMap::from([(
            "skillById".to_string(),
            Batch::default().delay(0).max_size(25),
        )]));

        let compact = config.to_json(false).unwrap();
        assert_eq!(
            compact,
            concat!(
                r#"{"batch":{"delay":1,"maxSize":100},"#,
                r#""loaders":{"skillById":{"delay":0,"maxSize":25}}}"#
            )
        );
        assert_eq!(Config::from_json(&compact).unwrap(), config);

        let pretty = config.to_json(true).unwrap();
        assert_eq!(Config::from_json(&pretty).unwrap(), config);
    }
}
