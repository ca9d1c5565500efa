//! Post records as exchanged with the remote API.

use serde::{Deserialize, Serialize};

/// A published (or draft) blog post.
///
/// `id` is fixed at creation time and unique within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub published: bool,
}

/// A post that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub featured_image: String,
    #[serde(default)]
    pub published: bool,
}

impl PostDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Attach an explicit id.
    pub fn into_post(self, id: impl Into<String>) -> Post {
        Post {
            id: id.into(),
            title: self.title,
            description: self.description,
            publish_date: self.publish_date,
            featured_image: self.featured_image,
            published: self.published,
        }
    }

    /// Attach a freshly minted client-side id.
    pub fn into_post_with_new_id(self) -> Post {
        self.into_post(new_post_id())
    }
}

impl From<Post> for PostDraft {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            description: post.description,
            publish_date: post.publish_date,
            featured_image: post.featured_image,
            published: post.published,
        }
    }
}

/// Mint a unique client-side post id.
pub fn new_post_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
