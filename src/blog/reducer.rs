use crate::mvi::{Action, Reducer};
use crate::request::{Operation, Payload, RequestMeta};

use super::action::BlogAction;
use super::matcher::{apply_matchers, Matcher, STANDARD_MATCHERS};
use super::post::Post;
use super::state::BlogState;

/// Reducer for the blog collection.
///
/// Dispatch order for every action:
/// 1. the exact handler for its kind, if it has one
/// 2. every matcher whose pattern accepts it, in registration order
/// 3. the default case, only when step 1 found no handler
pub struct BlogReducer;

impl Reducer for BlogReducer {
    type State = BlogState;
    type Action = BlogAction;

    fn reduce(state: Self::State, action: &Self::Action) -> Self::State {
        Self::reduce_with(state, action, STANDARD_MATCHERS)
    }
}

impl BlogReducer {
    /// Reduce with a caller-supplied matcher list instead of the standard one.
    pub fn reduce_with(state: BlogState, action: &BlogAction, matchers: &[Matcher]) -> BlogState {
        let (state, handled) = Self::apply_exact(state, action);
        let state = apply_matchers(matchers, state, action);
        if !handled {
            tracing::trace!(
                action = action.type_name(),
                items = state.len(),
                loading = state.is_loading(),
                "No case handler for action"
            );
        }
        state
    }

    /// Returns the next state and whether an exact handler fired.
    fn apply_exact(mut state: BlogState, action: &BlogAction) -> (BlogState, bool) {
        match action {
            BlogAction::AddPost(post) => {
                append_unique(&mut state.items, post.clone());
            }
            BlogAction::DeletePost(post_id) => {
                remove_by_id(&mut state.items, post_id);
            }
            BlogAction::StartEditingPost(post_id) => {
                state.editing = state.post(post_id).map(|post| post.id.clone());
            }
            BlogAction::CancelEditingPost => {
                state.editing = None;
            }
            BlogAction::FinishEditingPost(post) => {
                replace_by_id(&mut state.items, post.clone());
                state.editing = None;
            }
            BlogAction::RequestSucceeded { request, payload } => {
                apply_success(&mut state.items, request, payload);
            }
            // Loading bookkeeping for these lives in the matchers.
            BlogAction::RequestStarted(_) | BlogAction::RequestFailed { .. } => {
                return (state, false);
            }
        }
        (state, true)
    }
}

fn apply_success(items: &mut Vec<Post>, request: &RequestMeta, payload: &Payload) {
    match (&request.operation, payload) {
        (Operation::FetchAll, Payload::Posts(posts)) => {
            *items = posts.clone();
        }
        (Operation::Create(_), Payload::Post(post)) => {
            append_unique(items, post.clone());
        }
        (Operation::Update { .. }, Payload::Post(post)) => {
            replace_by_id(items, post.clone());
        }
        // Remove by the id we asked to delete, not whatever the server echoed.
        (Operation::Delete { post_id }, _) => {
            remove_by_id(items, post_id);
        }
        (operation, payload) => {
            tracing::warn!(
                request_id = %request.request_id,
                kind = operation.kind().as_str(),
                payload = ?payload,
                "Success payload does not fit the operation, ignoring"
            );
        }
    }
}

fn append_unique(items: &mut Vec<Post>, post: Post) {
    if items.iter().any(|existing| existing.id == post.id) {
        tracing::warn!(post_id = %post.id, "Post id already present, not appending");
        return;
    }
    items.push(post);
}

fn replace_by_id(items: &mut [Post], post: Post) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id == post.id) {
        *slot = post;
    }
}

fn remove_by_id(items: &mut Vec<Post>, post_id: &str) {
    if let Some(index) = items.iter().position(|post| post.id == post_id) {
        items.remove(index);
    }
}
