//! # Fetch
//!
//! The request-state layer. A view hands [`UseFetch`] a resource locator and
//! gets back a live `{data, pending, error}` triple that follows the request
//! as it settles.
//!
//! ```text
//!   view mounts / locator changes
//!               │
//!               ▼
//!   ┌───────────────────────┐     dispatch delay     ┌────────────┐
//!   │ UseFetch::fetch(loc)  │ ──────────────────────▶│ HttpClient │
//!   │  generation += 1      │                        └─────┬──────┘
//!   │  cancel previous      │                              │
//!   │  state = pending      │◀──── settle (if generation ──┘
//!   └───────────────────────┘       still matches)
//! ```
//!
//! ## Modules
//!
//! - [`client`]: the `HttpClient` capability and its reqwest implementation
//! - [`error`]: `FetchError`, the failure taxonomy
//! - [`state`]: `FetchState`, the observable triple
//! - [`hook`]: `UseFetch`, the lifecycle around a single request

pub mod client;
pub mod error;
pub mod hook;
pub mod state;

pub use client::{
    HttpClient, HttpRequest, HttpResponse, Method, ReqwestClient, expect_success, fetch_json,
};
pub use error::{FetchError, STATUS_FAILURE_MESSAGE};
pub use hook::{FetchOptions, UseFetch};
pub use state::{FetchState, FetchStatus};
