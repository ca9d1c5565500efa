//! Remote operations and the data their lifecycle events carry.

use crate::api::ValidationErrors;
use crate::blog::{Post, PostDraft};

use super::id::RequestId;

/// The four remote operations on the posts collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    FetchAll,
    Create,
    Update,
    Delete,
}

impl RequestKind {
    /// Short operation name used in action type names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::FetchAll => "getPostList",
            RequestKind::Create => "addPost",
            RequestKind::Update => "updatePost",
            RequestKind::Delete => "deletePost",
        }
    }

    /// Whether a remote validation failure is reported as a value instead of a fault.
    pub fn accepts_validation_failure(&self) -> bool {
        matches!(self, RequestKind::Create | RequestKind::Update)
    }
}

/// A remote operation together with the arguments it was invoked with.
///
/// The arguments travel with every lifecycle event so the reducer can use
/// them on success (Delete removes by the id it was asked to delete).
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    FetchAll,
    Create(PostDraft),
    Update { post_id: String, post: Post },
    Delete { post_id: String },
}

impl Operation {
    pub fn kind(&self) -> RequestKind {
        match self {
            Operation::FetchAll => RequestKind::FetchAll,
            Operation::Create(_) => RequestKind::Create,
            Operation::Update { .. } => RequestKind::Update,
            Operation::Delete { .. } => RequestKind::Delete,
        }
    }
}

/// Identity of one request invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMeta {
    pub request_id: RequestId,
    pub operation: Operation,
}

impl RequestMeta {
    pub fn new(operation: Operation) -> Self {
        Self {
            request_id: RequestId::new(),
            operation,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.operation.kind()
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Posts(Vec<Post>),
    Post(Post),
}

/// Failure carried by a `RequestFailed` action.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestFailure {
    /// Recoverable; the caller should re-prompt the user.
    Validation(ValidationErrors),
    /// Unrecoverable from the store's point of view. The coordinator also
    /// propagates the underlying error to its caller.
    Transport { message: String },
}
