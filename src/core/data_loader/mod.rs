mod align;
mod batch;
mod cache;
#[allow(clippy::module_inception)]
mod data_loader;
mod error;
mod factory;
mod loader;
mod storage;
mod thunk;

pub use align::{align_by_key, group_by_key};
pub use cache::{HashMapCache, NoCache};
pub use data_loader::{DataLoader, DEFAULT_DELAY, DEFAULT_MAX_BATCH_SIZE};
pub use error::Error;
pub use factory::CacheFactory;
pub use loader::{load_fn, BatchResult, LoadFn, Loader};
pub use storage::CacheStorage;
pub use thunk::Thunk;
