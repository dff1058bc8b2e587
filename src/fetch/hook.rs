//! # UseFetch
//!
//! A request-state hook: one resource locator in, a live
//! `FetchState<T>` out.
//!
//! ## Lifecycle
//!
//! ```text
//! fetch(loc) ──▶ pending ──┬──▶ resolved   (2xx, body decoded)
//!                          ├──▶ failed     (non-2xx, transport, decode)
//!                          └──▶ aborted    (cancelled; no error surfaced)
//! teardown() ──▶ no further transitions
//! ```
//!
//! ## Stale results
//!
//! Every cycle takes a generation ticket. A settled request is applied only
//! if its ticket still equals the hook's generation, so once the locator
//! changes (or the view tears the hook down) the old request can never
//! overwrite newer state. The old request is also cancelled, which usually
//! stops it before it reaches the network at all.
//!
//! Bumping the generation and applying a result both run inside the watch
//! channel's write lock, which totally orders them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::client::{HttpClient, HttpRequest, fetch_json};
use super::error::FetchError;
use super::state::FetchState;

/// Pause before a request goes out. Gives a backend that is still starting
/// a moment to come up; it is not a retry.
pub const DEFAULT_DISPATCH_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub dispatch_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            dispatch_delay: DEFAULT_DISPATCH_DELAY,
        }
    }
}

pub struct UseFetch<T> {
    client: Arc<dyn HttpClient>,
    options: FetchOptions,
    state: Arc<watch::Sender<FetchState<T>>>,
    observer: watch::Receiver<FetchState<T>>,
    generation: Arc<AtomicU64>,
    locator: Option<String>,
    /// Cancels the current cycle's request. `None` once torn down.
    cancel: Option<CancellationToken>,
}

impl<T> UseFetch<T> {
    pub fn new(client: Arc<dyn HttpClient>, options: FetchOptions) -> Self {
        let (state, observer) = watch::channel(FetchState::started());
        Self {
            client,
            options,
            state: Arc::new(state),
            observer,
            generation: Arc::new(AtomicU64::new(0)),
            locator: None,
            cancel: None,
        }
    }

    /// A live view of the state. Each receiver sees every transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Borrows the current state. Hold the guard briefly: settling requests
    /// wait on it.
    pub fn borrow(&self) -> watch::Ref<'_, FetchState<T>> {
        self.observer.borrow()
    }

    /// True once per transition since the last call.
    pub fn has_changed(&mut self) -> bool {
        match self.observer.has_changed() {
            Ok(true) => {
                let _ = self.observer.borrow_and_update();
                true
            }
            _ => false,
        }
    }

    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    /// True between a `fetch` and the next `teardown`.
    pub fn is_mounted(&self) -> bool {
        self.cancel.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cancels the in-flight request but keeps it current, so it settles as
    /// aborted: `pending` drops to false and no error is set.
    pub fn abort(&self) {
        if let Some(token) = &self.cancel {
            debug!("aborting fetch #{}", self.generation());
            token.cancel();
        }
    }

    /// Unmount: cancels the request and invalidates its generation. Nothing
    /// the old request produces is applied afterwards.
    pub fn teardown(&mut self) {
        self.invalidate();
        if self.cancel_in_flight() {
            debug!(
                "torn down fetch for {}",
                self.locator.as_deref().unwrap_or("<none>")
            );
        }
        self.locator = None;
    }

    /// Bumps the generation under the watch lock without touching the state.
    fn invalidate(&self) {
        let generation = &self.generation;
        self.state.send_if_modified(|_| {
            generation.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    fn cancel_in_flight(&mut self) -> bool {
        match self.cancel.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> UseFetch<T> {
    pub fn state(&self) -> FetchState<T> {
        self.observer.borrow().clone()
    }
}

impl<T> UseFetch<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Starts a new cycle for `locator` unconditionally (mount or refresh).
    ///
    /// The state is reset to pending before this returns; the request itself
    /// runs on a spawned task whose handle is returned.
    pub fn fetch(&mut self, locator: impl Into<String>) -> JoinHandle<()> {
        let locator = locator.into();

        // The old ticket must be stale before its token fires.
        let mut ticket = 0;
        let generation = &self.generation;
        self.state.send_modify(|state| {
            ticket = generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FetchState::started();
        });
        self.cancel_in_flight();

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.locator = Some(locator.clone());
        info!("fetch #{} {} via {}", ticket, locator, self.client.name());

        let client = self.client.clone();
        let state = self.state.clone();
        let generation = self.generation.clone();
        let delay = self.options.dispatch_delay;

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => Err(FetchError::Cancelled),
                outcome = dispatch::<T>(&*client, &locator, delay) => outcome,
            };
            settle(&state, &generation, ticket, &locator, outcome);
        })
    }

    /// Starts a cycle only if `locator` differs from the current one, or if
    /// the hook was torn down.
    pub fn set_locator(&mut self, locator: impl Into<String>) -> Option<JoinHandle<()>> {
        let locator = locator.into();
        if self.is_mounted() && self.locator.as_deref() == Some(locator.as_str()) {
            return None;
        }
        Some(self.fetch(locator))
    }

    /// Re-runs the current locator. `None` when nothing is mounted.
    pub fn refetch(&mut self) -> Option<JoinHandle<()>> {
        let locator = self.locator.clone()?;
        Some(self.fetch(locator))
    }
}

impl<T> Drop for UseFetch<T> {
    fn drop(&mut self) {
        self.invalidate();
        self.cancel_in_flight();
    }
}

async fn dispatch<T: DeserializeOwned>(
    client: &dyn HttpClient,
    locator: &str,
    delay: Duration,
) -> Result<T, FetchError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    fetch_json(client, HttpRequest::get(locator)).await
}

fn settle<T>(
    state: &watch::Sender<FetchState<T>>,
    generation: &AtomicU64,
    ticket: u64,
    locator: &str,
    outcome: Result<T, FetchError>,
) {
    state.send_if_modified(|current| {
        if generation.load(Ordering::SeqCst) != ticket {
            debug!("discarding stale result for {} (#{})", locator, ticket);
            return false;
        }
        match outcome {
            Ok(data) => {
                debug!("fetch #{} resolved: {}", ticket, locator);
                current.error = None;
                current.data = Some(data);
            }
            Err(e) if e.is_cancelled() => {
                info!("fetch aborted: {}", locator);
            }
            Err(e) => {
                warn!("fetch #{} failed: {} ({:?})", ticket, locator, e);
                current.error = Some(e.to_string());
                current.data = None;
            }
        }
        current.pending = false;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchStatus, Method, STATUS_FAILURE_MESSAGE};
    use crate::test_support::{MockClient, instant};
    use serde::Deserialize;
    use serde_json::{Value, json};
    use tokio_test::{assert_pending, assert_ready_ok};

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    struct Post {
        id: u32,
        title: String,
    }

    fn hook<T>(client: &Arc<MockClient>) -> UseFetch<T> {
        UseFetch::new(client.clone(), instant())
    }

    #[tokio::test]
    async fn test_fetch_resets_state_before_dispatch() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "Hello"}));
        let gate = client.gate(Method::Get, "/posts/1");

        let mut posts: UseFetch<Post> = hook(&client);
        let handle = posts.fetch("/posts/1");

        assert_eq!(posts.state(), FetchState::started());
        assert_eq!(posts.locator(), Some("/posts/1"));

        gate.notify_one();
        handle.await.unwrap();
        assert!(!posts.state().pending);
    }

    #[tokio::test]
    async fn test_success_decodes_body() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "Hello"}));

        let mut posts: UseFetch<Value> = hook(&client);
        posts.fetch("/posts/1").await.unwrap();

        let state = posts.state();
        assert_eq!(state.data, Some(json!({"id": 1, "title": "Hello"})));
        assert!(!state.pending);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_success_decodes_into_typed_payload() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "Hello"}));

        let mut posts: UseFetch<Post> = hook(&client);
        posts.fetch("/posts/1").await.unwrap();

        assert_eq!(
            posts.state(),
            FetchState::resolved(Post {
                id: 1,
                title: "Hello".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_non_success_status_sets_fixed_message() {
        let client = Arc::new(MockClient::new());
        client.respond(Method::Get, "/posts/999", 404, r#"{"detail":"nope"}"#);

        let mut posts: UseFetch<Value> = hook(&client);
        posts.fetch("/posts/999").await.unwrap();

        let state = posts.state();
        assert_eq!(state.data, None);
        assert!(!state.pending);
        assert_eq!(state.error.as_deref(), Some(STATUS_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_network_failure_surfaces_transport_message() {
        let client = Arc::new(MockClient::new());
        client.fail(
            Method::Get,
            "/posts/1",
            FetchError::Network("connection refused".to_string()),
        );

        let mut posts: UseFetch<Value> = hook(&client);
        posts.fetch("/posts/1").await.unwrap();

        assert_eq!(posts.state(), FetchState::failed("connection refused"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_failure() {
        let client = Arc::new(MockClient::new());
        client.respond(Method::Get, "/posts/1", 200, "<html>not json</html>");

        let mut posts: UseFetch<Post> = hook(&client);
        posts.fetch("/posts/1").await.unwrap();

        let state = posts.state();
        assert!(!state.pending);
        assert!(state.data.is_none());
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_transport_cancellation_is_swallowed() {
        let client = Arc::new(MockClient::new());
        client.fail(Method::Get, "/posts/1", FetchError::Cancelled);

        let mut posts: UseFetch<Value> = hook(&client);
        posts.fetch("/posts/1").await.unwrap();

        let state = posts.state();
        assert!(!state.pending);
        assert_eq!(state.error, None);
        assert_eq!(state.status(), FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_abort_settles_without_error() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "Hello"}));
        let gate = client.gate(Method::Get, "/posts/1");

        let mut posts: UseFetch<Value> = hook(&client);
        let handle = posts.fetch("/posts/1");
        posts.abort();
        handle.await.unwrap();

        let state = posts.state();
        assert!(!state.pending);
        assert_eq!(state.error, None);
        assert_eq!(state.data, None);

        // Releasing the held reply afterwards changes nothing.
        gate.notify_one();
        tokio::task::yield_now().await;
        assert_eq!(posts.state(), state);
    }

    #[tokio::test]
    async fn test_locator_change_discards_superseded_result() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "First"}));
        client.respond_json("/posts/2", 200, json!({"id": 2, "title": "Second"}));
        let first_gate = client.gate(Method::Get, "/posts/1");

        let mut posts: UseFetch<Post> = hook(&client);
        let first = posts.fetch("/posts/1");
        let second = posts.set_locator("/posts/2").expect("locator changed");

        second.await.unwrap();
        first_gate.notify_one();
        first.await.unwrap();

        assert_eq!(
            posts.state(),
            FetchState::resolved(Post {
                id: 2,
                title: "Second".to_string()
            })
        );
        assert_eq!(posts.locator(), Some("/posts/2"));
    }

    #[tokio::test]
    async fn test_slow_new_locator_is_not_overtaken_by_old_one() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "First"}));
        client.respond_json("/posts/2", 200, json!({"id": 2, "title": "Second"}));
        let second_gate = client.gate(Method::Get, "/posts/2");

        let mut posts: UseFetch<Post> = hook(&client);
        let first = posts.fetch("/posts/1");
        let second = posts.set_locator("/posts/2").expect("locator changed");

        first.await.unwrap();
        // The old request finished first; the new cycle must still be pending.
        assert_eq!(posts.state(), FetchState::started());

        second_gate.notify_one();
        second.await.unwrap();
        assert_eq!(posts.state().data.map(|p| p.id), Some(2));
    }

    #[tokio::test]
    async fn test_teardown_accepts_no_further_transitions() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "Hello"}));
        let gate = client.gate(Method::Get, "/posts/1");

        let mut posts: UseFetch<Value> = hook(&client);
        let handle = posts.fetch("/posts/1");
        let before = posts.generation();
        posts.teardown();

        gate.notify_one();
        handle.await.unwrap();

        assert!(posts.generation() > before);
        assert!(!posts.is_mounted());
        assert_eq!(posts.locator(), None);
        assert_eq!(posts.state(), FetchState::started());
    }

    #[tokio::test]
    async fn test_set_locator_skips_unchanged_locator() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts", 200, json!([]));

        let mut posts: UseFetch<Value> = hook(&client);
        posts.set_locator("/posts").unwrap().await.unwrap();
        assert!(posts.set_locator("/posts").is_none());

        // After teardown the same locator mounts again.
        posts.teardown();
        posts.set_locator("/posts").unwrap().await.unwrap();
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_refetch_repeats_current_locator() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts", 200, json!([1, 2]));

        let mut posts: UseFetch<Vec<u32>> = hook(&client);
        assert!(posts.refetch().is_none());

        posts.fetch("/posts").await.unwrap();
        posts.refetch().unwrap().await.unwrap();

        assert_eq!(posts.state().data, Some(vec![1, 2]));
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_delay_still_settles() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts", 200, json!([3]));

        let options = FetchOptions {
            dispatch_delay: Duration::from_millis(5),
        };
        let mut posts: UseFetch<Vec<u32>> = UseFetch::new(client.clone(), options);
        posts.fetch("/posts").await.unwrap();

        assert_eq!(posts.state().data, Some(vec![3]));
    }

    #[tokio::test]
    async fn test_subscribers_are_woken_on_settle() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts/1", 200, json!({"id": 1, "title": "Hello"}));
        let gate = client.gate(Method::Get, "/posts/1");

        let mut posts: UseFetch<Post> = hook(&client);
        let handle = posts.fetch("/posts/1");

        let mut rx = posts.subscribe();
        let mut changed = tokio_test::task::spawn(rx.changed());
        assert_pending!(changed.poll());

        gate.notify_one();
        handle.await.unwrap();

        assert!(changed.is_woken());
        assert_ready_ok!(changed.poll());
    }

    #[tokio::test]
    async fn test_has_changed_reports_once_per_transition() {
        let client = Arc::new(MockClient::new());
        client.respond_json("/posts", 200, json!([]));

        let mut posts: UseFetch<Value> = hook(&client);
        let handle = posts.fetch("/posts");
        assert!(posts.has_changed());
        assert!(!posts.has_changed());

        handle.await.unwrap();
        assert!(posts.has_changed());
        assert!(!posts.has_changed());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_superseded_cycle_never_settles_new_state() {
        for _ in 0..50 {
            let client = Arc::new(MockClient::new());
            client.respond_json("/posts/1", 200, json!({"id": 1, "title": "One"}));
            client.respond_json("/posts/2", 200, json!({"id": 2, "title": "Two"}));
            let _first_gate = client.gate(Method::Get, "/posts/1");
            let _second_gate = client.gate(Method::Get, "/posts/2");

            let mut posts: UseFetch<Post> = hook(&client);
            let first = posts.fetch("/posts/1");
            tokio::time::sleep(Duration::from_millis(1)).await;
            let _second = posts.fetch("/posts/2");
            assert!(posts.has_changed());

            // The first task has run its settle once its handle resolves.
            first.await.unwrap();
            assert_eq!(posts.state(), FetchState::started());
            assert!(!posts.has_changed());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_teardown_freezes_state_across_threads() {
        for _ in 0..50 {
            let client = Arc::new(MockClient::new());
            client.respond_json("/posts/1", 200, json!({"id": 1, "title": "One"}));
            let _gate = client.gate(Method::Get, "/posts/1");

            let mut posts: UseFetch<Post> = hook(&client);
            let handle = posts.fetch("/posts/1");
            assert!(posts.has_changed());
            tokio::time::sleep(Duration::from_millis(1)).await;
            posts.teardown();

            handle.await.unwrap();
            assert_eq!(posts.state(), FetchState::started());
            assert!(!posts.has_changed());
        }
    }
}
