//! # Pages
//!
//! The application's routing table and the resolved `Location` the rest of
//! the app switches on.

use log::debug;

use super::router::{Params, Router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Create,
    BlogDetails,
    NotFound,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Create => "New Blog",
            Page::BlogDetails => "Blog",
            Page::NotFound => "Not Found",
        }
    }
}

/// `/` (exact) → Home, `/create` → Create, `/blogs/:id` → BlogDetails,
/// anything else → NotFound. Only the root is exact; the other routes also
/// match deeper paths.
pub fn app_router() -> Router<Page> {
    Router::new(Page::NotFound)
        .route_exact("/", Page::Home)
        .route("/create", Page::Create)
        .route("/blogs/:id", Page::BlogDetails)
}

/// Where the app currently is: the path as entered plus what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub page: Page,
    pub params: Params,
}

impl Location {
    pub fn resolve(router: &Router<Page>, path: &str) -> Self {
        let path = normalize(path);
        let matched = router.resolve(&path);
        if matched.is_fallback() {
            debug!("no route for {}, showing {:?}", path, matched.handler);
        }
        Self {
            page: *matched.handler,
            params: matched.params,
            path,
        }
    }

    /// The `:id` of a detail page.
    pub fn blog_id(&self) -> Option<&str> {
        match self.page {
            Page::BlogDetails => self.params.get("id"),
            _ => None,
        }
    }
}

/// Trims whitespace and makes the path absolute.
fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
