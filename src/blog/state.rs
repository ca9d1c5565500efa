use crate::mvi::Snapshot;
use crate::request::RequestId;

use super::post::Post;

/// Snapshot of the blog collection.
///
/// `loading` is not stored separately: the collection is loading exactly
/// when an in-flight token is held.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlogState {
    /// Display order is insertion order.
    pub items: Vec<Post>,
    /// Id of the post being edited. Re-resolved against `items` on read and
    /// left in place when that post is deleted.
    pub editing: Option<String>,
    pub in_flight: Option<RequestId>,
}

impl Snapshot for BlogState {}

impl BlogState {
    pub fn with_posts(items: Vec<Post>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.items.iter().find(|post| post.id == post_id)
    }

    /// The post being edited, or `None` if nothing is being edited or the
    /// edited post no longer exists.
    pub fn editing_post(&self) -> Option<&Post> {
        self.editing.as_deref().and_then(|id| self.post(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
