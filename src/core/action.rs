//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User opens a blog? That's `Action::Navigate("/blogs/1")`.
//! The server stored a new post? That's `Action::BlogCreated(Ok(blog))`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{info, warn};

use crate::api::{Blog, NewBlog};
use crate::core::page::{Location, Page};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(String),
    Back,
    Refresh,
    SubmitBlog(NewBlog),
    BlogCreated(Result<Blog, String>),
    DeleteBlog(String),
    BlogDeleted { id: String, result: Result<(), String> },
    Quit,
}

/// I/O requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// The location changed (or should reload): call `App::mount`.
    Mount,
    CreateBlog(NewBlog),
    DeleteBlog(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(path) => navigate(app, &path),
        Action::Back => match app.history.pop() {
            Some(path) => {
                app.location = Location::resolve(&app.router, &path);
                app.status_message.clear();
                Effect::Mount
            }
            None => Effect::None,
        },
        Action::Refresh => match app.page() {
            Page::Home | Page::BlogDetails => Effect::Mount,
            Page::Create | Page::NotFound => Effect::None,
        },
        Action::SubmitBlog(blog) => {
            if app.is_submitting {
                return Effect::None;
            }
            if !blog.is_complete() {
                app.submit_error = Some("Title and body are required".to_string());
                return Effect::None;
            }
            app.is_submitting = true;
            app.submit_error = None;
            Effect::CreateBlog(blog)
        }
        Action::BlogCreated(result) => {
            app.is_submitting = false;
            match result {
                Ok(blog) => {
                    info!("Blog created: {}", blog.id);
                    let effect = navigate(app, "/");
                    app.status_message = format!("Added \"{}\"", blog.title);
                    effect
                }
                Err(e) => {
                    warn!("Create failed: {}", e);
                    app.submit_error = Some(e);
                    Effect::None
                }
            }
        }
        Action::DeleteBlog(id) => {
            if app.is_submitting {
                return Effect::None;
            }
            app.is_submitting = true;
            app.submit_error = None;
            Effect::DeleteBlog(id)
        }
        Action::BlogDeleted { id, result } => {
            app.is_submitting = false;
            match result {
                Ok(()) => {
                    info!("Blog deleted: {}", id);
                    let effect = navigate(app, "/");
                    app.status_message = "Blog deleted".to_string();
                    effect
                }
                Err(e) => {
                    warn!("Delete of {} failed: {}", id, e);
                    app.status_message = format!("Delete failed: {e}");
                    Effect::None
                }
            }
        }
        Action::Quit => Effect::Quit,
    }
}

/// Moves to `path`, recording the current path for `Back`. Navigating to
/// the current path is a no-op.
fn navigate(app: &mut App, path: &str) -> Effect {
    let next = Location::resolve(&app.router, path);
    if next.path == app.location.path {
        return Effect::None;
    }
    let previous = std::mem::replace(&mut app.location, next);
    app.history.push(previous.path);
    app.status_message.clear();
    app.submit_error = None;
    Effect::Mount
}
