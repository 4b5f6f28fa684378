use std::sync::Arc;

/// Everything resolvers need while serving one request.
///
/// Cloning is cheap and every clone shares the same loaders, so a request
/// context can be handed to each resolver task of the request.
pub struct RequestContext<S> {
    id: u64,
    loaders: Arc<S>,
}

impl<S> RequestContext<S> {
    pub fn new(id: u64, loaders: S) -> Self {
        Self { id, loaders: Arc::new(loaders) }
    }

    /// Identifies the request in logs.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn loaders(&self) -> &S {
        &self.loaders
    }
}

impl<S> Clone for RequestContext<S> {
    fn clone(&self) -> Self {
        Self { id: self.id, loaders: self.loaders.clone() }
    }
}
