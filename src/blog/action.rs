use crate::mvi::Action;
use crate::request::{Payload, RequestFailure, RequestKind, RequestMeta};

use super::post::{Post, PostDraft};

/// Everything that can happen to the blog collection.
#[derive(Debug, Clone, PartialEq)]
pub enum BlogAction {
    /// Append a post. The id is minted when the action is built via
    /// [`BlogAction::add_post`], which keeps the reducer deterministic.
    AddPost(Post),
    DeletePost(String),
    StartEditingPost(String),
    CancelEditingPost,
    FinishEditingPost(Post),
    RequestStarted(RequestMeta),
    RequestSucceeded {
        request: RequestMeta,
        payload: Payload,
    },
    RequestFailed {
        request: RequestMeta,
        error: RequestFailure,
    },
}

/// Field-less discriminant of [`BlogAction`], used by matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    AddPost,
    DeletePost,
    StartEditingPost,
    CancelEditingPost,
    FinishEditingPost,
    RequestStarted(RequestKind),
    RequestSucceeded(RequestKind),
    RequestFailed(RequestKind),
}

impl ActionKind {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ActionKind::CancelEditingPost)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ActionKind::RequestStarted(_))
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, ActionKind::RequestSucceeded(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ActionKind::RequestFailed(_))
    }

    pub fn request_kind(&self) -> Option<RequestKind> {
        match self {
            ActionKind::RequestStarted(kind)
            | ActionKind::RequestSucceeded(kind)
            | ActionKind::RequestFailed(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl BlogAction {
    /// Build an `AddPost` action, minting a fresh id for the draft.
    pub fn add_post(draft: PostDraft) -> Self {
        BlogAction::AddPost(draft.into_post_with_new_id())
    }

    pub fn delete_post(post_id: impl Into<String>) -> Self {
        BlogAction::DeletePost(post_id.into())
    }

    pub fn start_editing_post(post_id: impl Into<String>) -> Self {
        BlogAction::StartEditingPost(post_id.into())
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            BlogAction::AddPost(_) => ActionKind::AddPost,
            BlogAction::DeletePost(_) => ActionKind::DeletePost,
            BlogAction::StartEditingPost(_) => ActionKind::StartEditingPost,
            BlogAction::CancelEditingPost => ActionKind::CancelEditingPost,
            BlogAction::FinishEditingPost(_) => ActionKind::FinishEditingPost,
            BlogAction::RequestStarted(request) => ActionKind::RequestStarted(request.kind()),
            BlogAction::RequestSucceeded { request, .. } => {
                ActionKind::RequestSucceeded(request.kind())
            }
            BlogAction::RequestFailed { request, .. } => ActionKind::RequestFailed(request.kind()),
        }
    }

    /// Request metadata for lifecycle actions.
    pub fn request(&self) -> Option<&RequestMeta> {
        match self {
            BlogAction::RequestStarted(request)
            | BlogAction::RequestSucceeded { request, .. }
            | BlogAction::RequestFailed { request, .. } => Some(request),
            _ => None,
        }
    }
}

impl Action for BlogAction {
    fn type_name(&self) -> &'static str {
        match self.kind() {
            ActionKind::AddPost => "blog/addPost",
            ActionKind::DeletePost => "blog/deletePost",
            ActionKind::StartEditingPost => "blog/startEditingPost",
            ActionKind::CancelEditingPost => "blog/cancelEditingPost",
            ActionKind::FinishEditingPost => "blog/finishEditingPost",
            ActionKind::RequestStarted(kind) => match kind {
                RequestKind::FetchAll => "blog/getPostList/pending",
                RequestKind::Create => "blog/addPost/pending",
                RequestKind::Update => "blog/updatePost/pending",
                RequestKind::Delete => "blog/deletePost/pending",
            },
            ActionKind::RequestSucceeded(kind) => match kind {
                RequestKind::FetchAll => "blog/getPostList/fulfilled",
                RequestKind::Create => "blog/addPost/fulfilled",
                RequestKind::Update => "blog/updatePost/fulfilled",
                RequestKind::Delete => "blog/deletePost/fulfilled",
            },
            ActionKind::RequestFailed(kind) => match kind {
                RequestKind::FetchAll => "blog/getPostList/rejected",
                RequestKind::Create => "blog/addPost/rejected",
                RequestKind::Update => "blog/updatePost/rejected",
                RequestKind::Delete => "blog/deletePost/rejected",
            },
        }
    }
}
