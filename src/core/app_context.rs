use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::config::Config;
use crate::core::request_context::RequestContext;

/// The data loaders of a single request.
///
/// Implementations are plain structs with one [DataLoader] per relation,
/// built empty for every request so that nothing cached leaks from one
/// request into another.
///
/// [DataLoader]: crate::core::data_loader::DataLoader
pub trait LoaderSet: Send + Sync + Sized + 'static {
    /// What the loaders read from, typically a database client.
    type Source: Send + Sync + 'static;

    /// Builds a fresh set of loaders.
    fn build(source: &Arc<Self::Source>, config: &Config) -> Self;
}

/// State shared by all requests. Hands out one [RequestContext] per request.
pub struct AppContext<S: LoaderSet> {
    pub source: Arc<S::Source>,
    pub config: Config,
    next_request: AtomicU64,
}

impl<S: LoaderSet> AppContext<S> {
    pub fn new(source: S::Source, config: Config) -> Self {
        Self { source: Arc::new(source), config, next_request: AtomicU64::new(0) }
    }

    /// Builds the context of a new request with its own loaders.
    pub fn request_context(&self) -> RequestContext<S> {
        let id = self.next_request.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(request.id = id, "building request loaders");
        RequestContext::new(id, S::build(&self.source, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::data_loader::{load_fn, BatchResult, DataLoader, LoadFn, Loader};

    type Fetch = fn(Vec<u64>) -> futures_util::future::Ready<BatchResult<u64, String>>;

    struct Squares {
        built_with: Mutex<Vec<usize>>,
    }

    struct Loaders {
        squares: DataLoader<u64, LoadFn<u64, Fetch>>,
    }

    fn squares(keys: Vec<u64>) -> futures_util::future::Ready<BatchResult<u64, String>> {
        futures_util::future::ready(Ok(keys.into_iter().map(|key| Ok(key * key)).collect()))
    }

    impl LoaderSet for Loaders {
        type Source = Squares;

        fn build(source: &Arc<Squares>, config: &Config) -> Self {
            let batch = config.batch_for("squares");
            source.built_with.lock().unwrap().push(batch.max_size);
            let fetch: LoadFn<u64, Fetch> = load_fn(squares as Fetch);
            Loaders { squares: fetch.into_data_loader(batch) }
        }
    }

    #[tokio::test]
    async fn test_request_contexts_are_isolated() {
        let app = AppContext::<Loaders>::new(
            Squares { built_with: Mutex::new(vec![]) },
            Config::default(),
        );

        let first = app.request_context();
        let second = app.request_context();
        assert_eq!((first.id(), second.id()), (0, 1));

        assert_eq!(first.loaders().squares.load(3).await, Ok(9));
        assert_eq!(first.clone().loaders().squares.get_cached_values().len(), 1);
        assert!(second.loaders().squares.get_cached_values().is_empty());
        assert_eq!(*app.source.built_with.lock().unwrap(), vec![100, 100]);
    }
}
