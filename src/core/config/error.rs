use derive_more::From;

use super::UnsupportedConfigFormat;

#[derive(From, thiserror::Error, Debug)]
pub enum Error {
    #[error("Std IO Error: {}", _0)]
    StdIO(std::io::Error),

    #[error("Serde Json Error: {}", _0)]
    SerdeJson(serde_json::Error),

    #[error("Serde Yaml Error: {}", _0)]
    SerdeYaml(serde_yaml::Error),

    #[error("Unsupported Config Format: {}", _0)]
    UnsupportedConfigFormat(UnsupportedConfigFormat),
}

pub type Result<A> = std::result::Result<A, Error>;
