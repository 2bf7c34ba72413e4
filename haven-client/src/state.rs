//! View state for listing pages

use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ClientError;
use crate::sequencer::RequestSequencer;

/// What a listing view renders from
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> FetchState<T> {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a finished fetch; a failure clears any previous data
    pub fn resolve(&mut self, result: Result<T, ClientError>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                self.data = None;
                self.error = Some(e.display_message());
            }
        }
    }
}

/// Fetch state guarded by a [`RequestSequencer`]
///
/// Each [`ListingView::load`] takes a ticket when it is called. Its result is
/// applied only if no later `load` has been started by then; otherwise it is
/// dropped and the state is left to the newer fetch.
#[derive(Debug, Clone)]
pub struct ListingView<T> {
    sequencer: RequestSequencer,
    state: Arc<RwLock<FetchState<T>>>,
}

impl<T> Default for ListingView<T> {
    fn default() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            state: Arc::new(RwLock::new(FetchState::default())),
        }
    }
}

impl<T: Send + Sync> ListingView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fetch` and apply its result if it is still the latest
    ///
    /// Returns whether the result was applied.
    pub fn load<'a, F>(&'a self, fetch: F) -> impl Future<Output = bool> + Send + 'a
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'a,
    {
        let ticket = self.sequencer.begin();
        async move {
            {
                let mut state = self.state.write().await;
                if self.sequencer.is_current(ticket) {
                    state.start();
                }
            }
            let result = fetch.await;

            let mut state = self.state.write().await;
            if self.sequencer.is_current(ticket) {
                state.resolve(result);
                true
            } else {
                debug!(ticket = ticket.value(), "Discarding stale listing response");
                false
            }
        }
    }

    pub async fn snapshot(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.state.read().await.clone()
    }
}
