use log::info;

use super::types::{Blog, NewBlog};
use crate::fetch::{FetchError, HttpClient, HttpRequest, expect_success, fetch_json};

/// Collection locator, used by the list view and for creation.
pub const BLOGS_LOCATOR: &str = "/blogs";

/// Locator of a single blog. The id is passed through as-is.
pub fn blog_locator(id: &str) -> String {
    format!("{}/{}", BLOGS_LOCATOR, id)
}

/// POSTs a new blog and returns the record the server stored.
pub async fn create_blog(client: &dyn HttpClient, blog: &NewBlog) -> Result<Blog, FetchError> {
    let request = HttpRequest::post_json(BLOGS_LOCATOR, blog)?;
    let created: Blog = fetch_json(client, request).await?;
    info!("new blog added: {} ({})", created.title, created.id);
    Ok(created)
}

/// DELETEs a blog. Any 2xx counts; the body is ignored.
pub async fn delete_blog(client: &dyn HttpClient, id: &str) -> Result<(), FetchError> {
    expect_success(client, HttpRequest::delete(blog_locator(id))).await?;
    info!("blog deleted: {}", id);
    Ok(())
}
