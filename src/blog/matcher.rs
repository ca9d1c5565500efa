//! Pattern matchers: handlers that run for every action whose kind satisfies
//! a predicate, independently of the exact-kind handlers.

use std::fmt;

use crate::mvi::Action;

use super::action::{ActionKind, BlogAction};
use super::state::BlogState;

/// Predicate over an action's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPattern {
    Any,
    /// User gave up on something (currently only `CancelEditingPost`).
    Cancellation,
    /// A remote request has started.
    Pending,
    /// A remote request succeeded.
    Fulfilled,
    /// A remote request failed.
    Rejected,
    /// A remote request reached a terminal state, successfully or not.
    Settled,
    Exact(ActionKind),
}

impl ActionPattern {
    pub fn matches(&self, kind: ActionKind) -> bool {
        match self {
            ActionPattern::Any => true,
            ActionPattern::Cancellation => kind.is_cancellation(),
            ActionPattern::Pending => kind.is_pending(),
            ActionPattern::Fulfilled => kind.is_fulfilled(),
            ActionPattern::Rejected => kind.is_rejected(),
            ActionPattern::Settled => {
                ActionPattern::Fulfilled.matches(kind) || ActionPattern::Rejected.matches(kind)
            }
            ActionPattern::Exact(expected) => *expected == kind,
        }
    }
}

pub type MatchHandler = fn(BlogState, &BlogAction) -> BlogState;

/// A named `(pattern, handler)` pair.
#[derive(Clone, Copy)]
pub struct Matcher {
    pub name: &'static str,
    pub pattern: ActionPattern,
    pub handler: MatchHandler,
}

impl Matcher {
    pub const fn new(name: &'static str, pattern: ActionPattern, handler: MatchHandler) -> Self {
        Self {
            name,
            pattern,
            handler,
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Matchers applied by [`BlogReducer`](super::BlogReducer), in order.
pub const STANDARD_MATCHERS: &[Matcher] = &[
    Matcher::new("log-cancellation", ActionPattern::Cancellation, log_snapshot),
    Matcher::new("mark-pending", ActionPattern::Pending, mark_pending),
    Matcher::new("release-settled", ActionPattern::Settled, release_settled),
];

/// Run every matching handler in registration order.
pub fn apply_matchers(matchers: &[Matcher], state: BlogState, action: &BlogAction) -> BlogState {
    let kind = action.kind();
    matchers
        .iter()
        .filter(|matcher| matcher.pattern.matches(kind))
        .fold(state, |state, matcher| (matcher.handler)(state, action))
}

fn log_snapshot(state: BlogState, action: &BlogAction) -> BlogState {
    tracing::debug!(
        action = action.type_name(),
        items = state.len(),
        editing = ?state.editing,
        loading = state.is_loading(),
        "Cancellation observed"
    );
    state
}

fn mark_pending(mut state: BlogState, action: &BlogAction) -> BlogState {
    if let Some(request) = action.request() {
        state.in_flight = Some(request.request_id);
    }
    state
}

/// Release the loading slot, but only for the request currently holding it.
fn release_settled(mut state: BlogState, action: &BlogAction) -> BlogState {
    let Some(request) = action.request() else {
        return state;
    };

    if state.in_flight == Some(request.request_id) {
        state.in_flight = None;
    } else {
        tracing::debug!(
            action = action.type_name(),
            request_id = %request.request_id,
            "Ignoring settle from superseded request"
        );
    }
    state
}
