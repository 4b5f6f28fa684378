pub mod app_context;
pub mod config;
pub mod data_loader;
pub mod request_context;
pub mod tracing;

pub use app_context::{AppContext, LoaderSet};
pub use request_context::RequestContext;
