//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::core::state::App;
use crate::fetch::{FetchError, FetchOptions, HttpClient, HttpRequest, HttpResponse, Method};

struct Scripted {
    gate: Option<Arc<Notify>>,
    reply: Result<HttpResponse, FetchError>,
}

/// Scripted `HttpClient`: replies are registered per (method, locator) and
/// can be held back behind a gate until the test releases them.
#[derive(Default)]
pub struct MockClient {
    routes: Mutex<HashMap<(Method, String), Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, locator: &str, status: u16, body: &str) {
        self.script(method, locator, Ok(HttpResponse::new(status, body.as_bytes())));
    }

    pub fn respond_json(&self, locator: &str, status: u16, body: serde_json::Value) {
        self.respond(Method::Get, locator, status, &body.to_string());
    }

    pub fn fail(&self, method: Method, locator: &str, error: FetchError) {
        self.script(method, locator, Err(error));
    }

    /// Holds the scripted reply for (method, locator) until the returned
    /// `Notify` is signalled with `notify_one`.
    pub fn gate(&self, method: Method, locator: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        let mut routes = self.routes.lock().unwrap();
        let scripted = routes
            .get_mut(&(method, locator.to_string()))
            .expect("gate() needs a scripted reply first");
        scripted.gate = Some(gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn script(&self, method: Method, locator: &str, reply: Result<HttpResponse, FetchError>) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, locator.to_string()), Scripted { gate: None, reply });
    }
}

#[async_trait]
impl HttpClient for MockClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(request.clone());

        let (gate, reply) = {
            let routes = self.routes.lock().unwrap();
            match routes.get(&(request.method, request.locator.clone())) {
                Some(scripted) => (scripted.gate.clone(), scripted.reply.clone()),
                None => {
                    return Err(FetchError::Network(format!(
                        "no reply scripted for {} {}",
                        request.method.as_str(),
                        request.locator
                    )));
                }
            }
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }
        reply
    }
}

/// Hook options for tests: no dispatch delay.
pub fn instant() -> FetchOptions {
    FetchOptions {
        dispatch_delay: Duration::ZERO,
    }
}

/// Creates a test App backed by a fresh MockClient.
pub fn test_app() -> (App, Arc<MockClient>) {
    let client = Arc::new(MockClient::new());
    let app = App::new(client.clone(), instant(), default_authors());
    (app, client)
}

pub fn default_authors() -> Vec<String> {
    vec!["mario".to_string(), "yoshi".to_string()]
}
