//! Runs remote calls and announces their lifecycle as actions.
//!
//! Each invocation gets a fresh [`RequestId`]. `RequestStarted` is emitted
//! before the call suspends; exactly one of `RequestSucceeded` /
//! `RequestFailed` follows unless the call is cancelled first, in which case
//! nothing follows.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::api::{ApiError, PostsApi, ValidationErrors};
use crate::blog::{BlogAction, Post, PostDraft};
use crate::mvi::Dispatch;

use super::cancel::CancelSignal;
use super::id::RequestId;
use super::operation::{Operation, Payload, RequestFailure, RequestKind, RequestMeta};

/// How a request ended, when it did not fault.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Fulfilled(Payload),
    /// Create/Update rejected by server-side validation.
    Rejected(ValidationErrors),
    /// Cancelled before settling; no terminal action was emitted.
    Cancelled,
}

/// Faults that escape the coordinator to its caller.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("{} request {request_id} failed: {source}", .kind.as_str())]
    Api {
        kind: RequestKind,
        request_id: RequestId,
        #[source]
        source: ApiError,
    },

    #[error("Request task ended abnormally: {0}")]
    TaskFailed(String),
}

/// Wraps [`PostsApi`] calls into started/succeeded/failed actions.
#[derive(Clone)]
pub struct RequestCoordinator {
    api: Arc<dyn PostsApi>,
    sink: Arc<dyn Dispatch<BlogAction>>,
}

impl RequestCoordinator {
    pub fn new(api: Arc<dyn PostsApi>, sink: Arc<dyn Dispatch<BlogAction>>) -> Self {
        Self { api, sink }
    }

    /// Run `operation` on the current task until it settles or `cancel` fires.
    ///
    /// # Errors
    /// Returns [`CoordinatorError::Api`] for transport faults, and for
    /// validation failures on operations that do not accept them. The store
    /// still receives a `RequestFailed` action in that case.
    pub async fn run(
        &self,
        operation: Operation,
        cancel: &CancelSignal,
    ) -> Result<Settled, CoordinatorError> {
        let request = self.begin(operation);
        self.execute(request, cancel).await
    }

    /// Start `operation` on a background task.
    ///
    /// `RequestStarted` has been dispatched by the time this returns.
    /// Must be called from within a tokio runtime.
    pub fn spawn(&self, operation: Operation) -> InFlightRequest {
        let request = self.begin(operation);
        let request_id = request.request_id;
        let cancel = CancelSignal::new();

        let coordinator = self.clone();
        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move { coordinator.execute(request, &task_cancel).await });

        InFlightRequest {
            request_id,
            cancel,
            task,
        }
    }

    pub fn fetch_posts(&self) -> InFlightRequest {
        self.spawn(Operation::FetchAll)
    }

    pub fn create_post(&self, draft: PostDraft) -> InFlightRequest {
        self.spawn(Operation::Create(draft))
    }

    pub fn update_post(&self, post_id: impl Into<String>, post: Post) -> InFlightRequest {
        self.spawn(Operation::Update {
            post_id: post_id.into(),
            post,
        })
    }

    pub fn delete_post(&self, post_id: impl Into<String>) -> InFlightRequest {
        self.spawn(Operation::Delete {
            post_id: post_id.into(),
        })
    }

    fn begin(&self, operation: Operation) -> RequestMeta {
        let request = RequestMeta::new(operation);
        tracing::debug!(
            request_id = %request.request_id,
            kind = request.kind().as_str(),
            "Request started"
        );
        self.sink
            .dispatch(BlogAction::RequestStarted(request.clone()));
        request
    }

    async fn execute(
        &self,
        request: RequestMeta,
        cancel: &CancelSignal,
    ) -> Result<Settled, CoordinatorError> {
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(
                    request_id = %request.request_id,
                    kind = request.kind().as_str(),
                    "Request cancelled"
                );
                return Ok(Settled::Cancelled);
            }
            outcome = self.call(&request.operation) => outcome,
        };
        self.settle(request, outcome)
    }

    async fn call(&self, operation: &Operation) -> Result<Payload, ApiError> {
        match operation {
            Operation::FetchAll => self.api.fetch_all().await.map(Payload::Posts),
            Operation::Create(draft) => self.api.create(draft).await.map(Payload::Post),
            Operation::Update { post_id, post } => {
                self.api.update(post_id, post).await.map(Payload::Post)
            }
            Operation::Delete { post_id } => self.api.delete(post_id).await.map(Payload::Post),
        }
    }

    fn settle(
        &self,
        request: RequestMeta,
        outcome: Result<Payload, ApiError>,
    ) -> Result<Settled, CoordinatorError> {
        let kind = request.kind();
        let request_id = request.request_id;

        match outcome {
            Ok(payload) => {
                tracing::info!(request_id = %request_id, kind = kind.as_str(), "Request fulfilled");
                self.sink.dispatch(BlogAction::RequestSucceeded {
                    request,
                    payload: payload.clone(),
                });
                Ok(Settled::Fulfilled(payload))
            }
            Err(ApiError::Validation(details)) if kind.accepts_validation_failure() => {
                tracing::info!(
                    request_id = %request_id,
                    kind = kind.as_str(),
                    fields = details.error.len(),
                    "Request rejected by validation"
                );
                self.sink.dispatch(BlogAction::RequestFailed {
                    request,
                    error: RequestFailure::Validation(details.clone()),
                });
                Ok(Settled::Rejected(details))
            }
            Err(source) => {
                tracing::warn!(
                    request_id = %request_id,
                    kind = kind.as_str(),
                    error_type = source.error_type(),
                    error = %source,
                    "Request failed"
                );
                self.sink.dispatch(BlogAction::RequestFailed {
                    request,
                    error: RequestFailure::Transport {
                        message: source.to_string(),
                    },
                });
                Err(CoordinatorError::Api {
                    kind,
                    request_id,
                    source,
                })
            }
        }
    }
}

/// Handle to a request running on a background task.
///
/// Dropping the handle detaches the task; it still settles normally.
pub struct InFlightRequest {
    request_id: RequestId,
    cancel: CancelSignal,
    task: JoinHandle<Result<Settled, CoordinatorError>>,
}

impl InFlightRequest {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Stop the request from emitting its terminal action.
    ///
    /// No-op if it already settled or was already cancelled.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Wait for the request to settle.
    pub async fn wait(self) -> Result<Settled, CoordinatorError> {
        self.task
            .await
            .map_err(|e| CoordinatorError::TaskFailed(e.to_string()))?
    }
}
