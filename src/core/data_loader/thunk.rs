use std::future::IntoFuture;

use futures_util::future::BoxFuture;
use tokio::sync::broadcast;

use super::batch::Outcome;
use super::Error;

/// A pending [DataLoader](super::DataLoader) lookup.
///
/// The key is already registered with its batch when the thunk is created;
/// awaiting the thunk only waits for the batch to complete. This lets a
/// caller queue keys on several loaders before suspending on any of them.
pub struct Thunk<V, E> {
    state: State<V, E>,
}

enum State<V, E> {
    Ready(Result<V, Error<E>>),
    Pending {
        position: usize,
        rx: broadcast::Receiver<Outcome<V, E>>,
    },
}

impl<V, E> Thunk<V, E>
where
    V: Clone,
    E: Clone,
{
    pub(crate) fn ready(value: V) -> Self {
        Self { state: State::Ready(Ok(value)) }
    }

    pub(crate) fn pending(position: usize, rx: broadcast::Receiver<Outcome<V, E>>) -> Self {
        Self { state: State::Pending { position, rx } }
    }

    /// Waits for the batch and picks this key's outcome.
    pub async fn resolve(self) -> Result<V, Error<E>> {
        match self.state {
            State::Ready(result) => result,
            State::Pending { position, mut rx } => match rx.recv().await {
                Ok(outcome) => pick(&outcome, position),
                Err(_) => Err(Error::Dropped),
            },
        }
    }
}

impl<V, E> IntoFuture for Thunk<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    type Output = Result<V, Error<E>>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.resolve())
    }
}

/// Reads the outcome at `position`. A shared error wins over per-key
/// outcomes.
fn pick<V: Clone, E: Clone>(outcome: &Outcome<V, E>, position: usize) -> Result<V, Error<E>> {
    match outcome.as_ref() {
        Err(err) => Err(Error::Batch(err.clone())),
        Ok(values) => match values.get(position) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(err)) => Err(Error::Key(err.clone())),
            None => Err(Error::Missing { position, returned: values.len() }),
        },
    }
}
