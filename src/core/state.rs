//! # Application State
//!
//! Core state for the blog browser. No TUI types live here; presentation
//! state (selection, form buffers, scroll) belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── client: Arc<dyn HttpClient>   // injected transport
//! ├── router: Router<Page>          // path → page table
//! ├── location: Location            // current page + params
//! ├── history: Vec<String>          // previous paths, for Back
//! ├── blogs: UseFetch<Vec<Blog>>    // Home's request state
//! ├── blog: UseFetch<Blog>          // BlogDetails' request state
//! ├── authors: Vec<String>          // choices offered by the create form
//! ├── status_message: String        // navbar status text
//! ├── is_submitting: bool           // create/delete in flight
//! └── submit_error: Option<String>  // last mutation failure
//! ```
//!
//! State changes happen through `update(app, action)` in action.rs.
//! `mount()` is the one place that starts or stops requests.

use std::sync::Arc;

use log::debug;

use crate::api::{BLOGS_LOCATOR, Blog, blog_locator};
use crate::core::config::ResolvedConfig;
use crate::core::page::{Location, Page, app_router};
use crate::core::router::Router;
use crate::fetch::{FetchOptions, HttpClient, UseFetch};

pub struct App {
    pub client: Arc<dyn HttpClient>,
    pub router: Router<Page>,
    pub location: Location,
    pub history: Vec<String>,
    pub blogs: UseFetch<Vec<Blog>>,
    pub blog: UseFetch<Blog>,
    pub authors: Vec<String>,
    pub status_message: String,
    pub is_submitting: bool,
    pub submit_error: Option<String>,
}

impl App {
    pub fn new(client: Arc<dyn HttpClient>, options: FetchOptions, authors: Vec<String>) -> Self {
        let router = app_router();
        let location = Location::resolve(&router, "/");
        Self {
            blogs: UseFetch::new(client.clone(), options),
            blog: UseFetch::new(client.clone(), options),
            client,
            router,
            location,
            history: Vec::new(),
            authors,
            status_message: String::new(),
            is_submitting: false,
            submit_error: None,
        }
    }

    pub fn from_config(client: Arc<dyn HttpClient>, config: &ResolvedConfig) -> Self {
        let options = FetchOptions {
            dispatch_delay: config.dispatch_delay,
        };
        let mut app = Self::new(client, options, config.authors.clone());
        app.location = Location::resolve(&app.router, &config.start_path);
        app
    }

    pub fn page(&self) -> Page {
        self.location.page
    }

    /// True while any request this app owns is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_submitting
            || (self.blogs.is_mounted() && self.blogs.borrow().pending)
            || (self.blog.is_mounted() && self.blog.borrow().pending)
    }

    /// Applies the current location to the hooks: the visible page's hook
    /// starts a fresh cycle, hooks of hidden pages are torn down.
    ///
    /// Must run inside a Tokio runtime; fetches are spawned.
    pub fn mount(&mut self) {
        debug!("mounting {:?} at {}", self.location.page, self.location.path);
        match self.location.page {
            Page::Home => {
                self.blog.teardown();
                self.blogs.fetch(BLOGS_LOCATOR);
            }
            Page::BlogDetails => {
                self.blogs.teardown();
                match self.location.blog_id() {
                    Some(id) => {
                        self.blog.fetch(blog_locator(id));
                    }
                    None => self.blog.teardown(),
                }
            }
            Page::Create | Page::NotFound => {
                self.blogs.teardown();
                self.blog.teardown();
            }
        }
    }

    /// Tears everything down (app exit).
    pub fn unmount(&mut self) {
        self.blogs.teardown();
        self.blog.teardown();
    }

    /// True once per hook transition; the event loop redraws on it.
    pub fn fetch_state_changed(&mut self) -> bool {
        // Both must be polled so neither keeps reporting a stale change.
        let blogs = self.blogs.has_changed();
        let blog = self.blog.has_changed();
        blogs || blog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DojoConfig, resolve};
    use crate::fetch::FetchState;
    use crate::test_support::{MockClient, test_app};
    use serde_json::json;

    #[test]
    fn test_app_new_defaults() {
        let (app, _client) = test_app();
        assert_eq!(app.page(), Page::Home);
        assert_eq!(app.location.path, "/");
        assert!(app.history.is_empty());
        assert!(!app.is_submitting);
        assert!(!app.blogs.is_mounted());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_from_config_uses_start_path() {
        let mut config = resolve(&DojoConfig::default(), &Default::default());
        config.start_path = "/blogs/5".to_string();
        let app = App::from_config(Arc::new(MockClient::new()), &config);
        assert_eq!(app.page(), Page::BlogDetails);
        assert_eq!(app.location.blog_id(), Some("5"));
    }

    #[tokio::test]
    async fn test_mount_home_fetches_list() {
        let (mut app, client) = test_app();
        client.respond_json(
            "/blogs",
            200,
            json!([{"id": 1, "title": "One", "body": "b", "author": "mario"}]),
        );

        app.mount();
        assert!(app.is_busy());
        assert_eq!(app.blogs.locator(), Some("/blogs"));

        let mut rx = app.blogs.subscribe();
        rx.wait_for(|s| !s.pending).await.unwrap();
        let blogs = app.blogs.state().data.unwrap();
        assert_eq!(blogs[0].title, "One");
        assert!(!app.blog.is_mounted());
        assert!(!app.is_busy());
    }

    #[tokio::test]
    async fn test_mount_details_tears_down_list() {
        let (mut app, client) = test_app();
        client.respond_json("/blogs", 200, json!([]));
        client.respond_json(
            "/blogs/2",
            200,
            json!({"id": 2, "title": "Two", "body": "b", "author": "yoshi"}),
        );

        app.mount();
        app.location = Location::resolve(&app.router, "/blogs/2");
        app.mount();

        assert!(!app.blogs.is_mounted());
        assert_eq!(app.blog.locator(), Some("/blogs/2"));

        let mut rx = app.blog.subscribe();
        rx.wait_for(|s| !s.pending).await.unwrap();
        assert_eq!(app.blog.state().data.map(|b| b.id), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_mount_create_unmounts_everything() {
        let (mut app, client) = test_app();
        client.respond_json("/blogs", 200, json!([]));

        app.mount();
        app.location = Location::resolve(&app.router, "/create");
        app.mount();

        assert!(!app.blogs.is_mounted());
        assert!(!app.blog.is_mounted());
        // The list request was torn down before it could settle.
        assert_eq!(app.blogs.state(), FetchState::started());
    }

    #[tokio::test]
    async fn test_fetch_state_changed_drains_both_hooks() {
        let (mut app, client) = test_app();
        client.respond_json("/blogs", 200, json!([]));

        app.mount();
        assert!(app.fetch_state_changed());
        assert!(!app.fetch_state_changed());
    }
}
