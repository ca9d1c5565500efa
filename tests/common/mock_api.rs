//! In-memory `PostsApi` with scriptable failures and gates.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use postboard::api::{ApiError, PostsApi};
use postboard::blog::{Post, PostDraft};
use tokio::sync::Notify;

#[derive(Default)]
struct MockState {
    posts: Vec<Post>,
    failures: HashMap<String, ApiError>,
    gates: HashMap<String, Arc<Notify>>,
    next_id: u64,
    calls: Vec<String>,
}

/// Calls are keyed as `fetch`, `create:<title>`, `update:<id>`, `delete:<id>`.
#[derive(Default)]
pub struct MockPostsApi {
    state: Mutex<MockState>,
}

impl MockPostsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        let api = Self::default();
        api.state.lock().posts = posts;
        api
    }

    /// Make the next call with `key` fail with `error`.
    pub fn fail_next(&self, key: &str, error: ApiError) {
        self.state.lock().failures.insert(key.to_string(), error);
    }

    /// Block calls with `key` until the returned gate is notified.
    pub fn hold(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .gates
            .insert(key.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().calls.clone()
    }

    pub fn stored(&self) -> Vec<Post> {
        self.state.lock().posts.clone()
    }

    async fn enter(&self, key: String) -> Result<(), ApiError> {
        let gate = {
            let mut state = self.state.lock();
            state.calls.push(key.clone());
            state.gates.get(&key).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.state.lock().failures.remove(&key) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PostsApi for MockPostsApi {
    async fn fetch_all(&self) -> Result<Vec<Post>, ApiError> {
        self.enter("fetch".to_string()).await?;
        Ok(self.state.lock().posts.clone())
    }

    async fn create(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.enter(format!("create:{}", draft.title)).await?;
        let mut state = self.state.lock();
        state.next_id += 1;
        let post = draft.clone().into_post(format!("srv-{}", state.next_id));
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, post_id: &str, post: &Post) -> Result<Post, ApiError> {
        self.enter(format!("update:{}", post_id)).await?;
        let mut state = self.state.lock();
        match state.posts.iter_mut().find(|p| p.id == post_id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(post.clone())
            }
            None => Err(not_found()),
        }
    }

    async fn delete(&self, post_id: &str) -> Result<Post, ApiError> {
        self.enter(format!("delete:{}", post_id)).await?;
        let mut state = self.state.lock();
        match state.posts.iter().position(|p| p.id == post_id) {
            Some(index) => Ok(state.posts.remove(index)),
            None => Err(not_found()),
        }
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: "Not Found".to_string(),
    }
}
