//! # Fetch State
//!
//! The triple a view observes while a request runs:
//!
//! ```text
//! FetchState
//! ├── data: Option<T>        // decoded payload, None until resolved
//! ├── pending: bool          // true from dispatch until settle
//! └── error: Option<String>  // human-readable, failures only
//! ```

/// Observable state of one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub pending: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    /// State at the start of every cycle: nothing known yet, request in flight.
    pub fn started() -> Self {
        Self {
            data: None,
            pending: true,
            error: None,
        }
    }

    pub fn resolved(data: T) -> Self {
        Self {
            data: Some(data),
            pending: false,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            pending: false,
            error: Some(message.into()),
        }
    }

    /// Collapses the triple into the branch a view renders.
    pub fn status(&self) -> FetchStatus<'_, T> {
        if self.pending {
            return FetchStatus::Pending;
        }
        match (&self.error, &self.data) {
            (Some(message), _) => FetchStatus::Failed(message),
            (None, Some(data)) => FetchStatus::Ready(data),
            (None, None) => FetchStatus::Idle,
        }
    }
}

impl<T> Default for FetchState<T> {
    /// A hook that has not dispatched anything yet still reads as loading.
    fn default() -> Self {
        Self::started()
    }
}

/// What a view should show: spinner, error, content, or nothing.
#[derive(Debug, PartialEq)]
pub enum FetchStatus<'a, T> {
    Pending,
    Failed(&'a str),
    Ready(&'a T),
    /// Settled without data or error (the request was aborted).
    Idle,
}
