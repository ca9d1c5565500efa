//! Remote posts API contract.

use async_trait::async_trait;

use crate::blog::{Post, PostDraft};

use super::error::ApiError;

/// Trait for the four remote CRUD operations on posts.
///
/// Implementations include the reqwest-based [`HttpPostsApi`](super::HttpPostsApi)
/// and in-memory mocks for testing. Cancellation is expressed by dropping the
/// returned future; implementations must not have side effects on the caller
/// after that.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Fetch the whole collection.
    async fn fetch_all(&self) -> Result<Vec<Post>, ApiError>;

    /// Create a post. The server assigns the id.
    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError>;

    /// Replace the post stored under `post_id`.
    async fn update(&self, post_id: &str, post: &Post) -> Result<Post, ApiError>;

    /// Delete a post, returning the deleted record.
    async fn delete(&self, post_id: &str) -> Result<Post, ApiError>;
}
