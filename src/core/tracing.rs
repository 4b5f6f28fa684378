use std::env;
use std::str::FromStr;

use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

const LONG_ENV_FILTER_VAR_NAME: &str = "KONTRAKT_LOG_LEVEL";
const SHORT_ENV_FILTER_VAR_NAME: &str = "KT_LOG_LEVEL";

/// Log level from the environment, `INFO` if unset or invalid.
pub fn log_level() -> tracing::Level {
    env::var(LONG_ENV_FILTER_VAR_NAME)
        .or(env::var(SHORT_ENV_FILTER_VAR_NAME))
        .ok()
        .and_then(|v| tracing::Level::from_str(&v).ok())
        .unwrap_or(tracing::Level::INFO)
}

pub fn default_tracing() -> impl Subscriber + Send + Sync {
    default_tracing_with_level(log_level())
}

pub fn default_tracing_with_level(level: tracing::Level) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .with(default_filter_target())
}

pub fn default_filter_target<S: Subscriber>() -> impl Layer<S> {
    filter_fn(|metadata| metadata.target().starts_with("kontrakt_dataloader"))
}
