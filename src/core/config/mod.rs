mod batch;
#[allow(clippy::module_inception)]
mod config;
mod error;
mod reader;
mod source;

pub use batch::Batch;
pub use config::Config;
pub use error::{Error, Result};
pub use reader::ConfigReader;
pub use source::{SourceType, UnsupportedConfigFormat};
