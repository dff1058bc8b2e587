//! # Blog API
//!
//! The blog resource as the backing JSON server exposes it: types for the
//! wire shapes, locators for the list and detail views, and the two
//! mutations the UI performs (create and delete).

pub mod blogs;
pub mod types;

pub use blogs::{BLOGS_LOCATOR, blog_locator, create_blog, delete_blog};
pub use types::{Blog, NewBlog};
