/// Outcome of a failed [DataLoader](super::DataLoader) lookup.
///
/// `E` is the error type of the [Loader](super::Loader). It has to be
/// `Clone` because a single fetch error is handed to every waiter of a
/// batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error<E> {
    /// The loader failed the whole batch.
    #[error("Batch Error: {0}")]
    Batch(E),

    /// The loader failed this key only.
    #[error("Key Error: {0}")]
    Key(E),

    /// The loader returned fewer outcomes than it was given keys.
    #[error("Loader returned {returned} outcomes, none for key at position {position}")]
    Missing { position: usize, returned: usize },

    /// The batch was dropped before it completed, e.g. the loader panicked.
    #[error("Batch was dropped before it completed")]
    Dropped,
}

impl<E> Error<E> {
    /// The loader error behind this failure, if the loader reported one.
    pub fn loader_error(&self) -> Option<&E> {
        match self {
            Error::Batch(err) | Error::Key(err) => Some(err),
            Error::Missing { .. } | Error::Dropped => None,
        }
    }
}
