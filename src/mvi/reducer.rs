//! Reducer trait.

use super::action::Action;
use super::state::Snapshot;

/// Reducer transforms a snapshot based on an action.
///
/// The reducer is the only place where state transitions happen.
/// It must be a total, pure function: (State, Action) -> State
pub trait Reducer {
    /// The snapshot type this reducer operates on.
    type State: Snapshot;

    /// The action type this reducer handles.
    type Action: Action;

    /// Fold an action into the snapshot and return the next one.
    ///
    /// Never fails: unknown or inapplicable actions return `state` unchanged.
    fn reduce(state: Self::State, action: &Self::Action) -> Self::State;
}
