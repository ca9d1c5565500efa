//! Base trait for actions consumed by reducers.

/// Marker trait for action objects.
///
/// Actions represent:
/// - User intents (add, delete, start editing)
/// - Request lifecycle milestones (started, succeeded, failed)
///
/// `type_name` is a stable, human-readable label used in diagnostics only.
/// Reducers match on the action value itself, never on this string.
pub trait Action: Send + 'static {
    fn type_name(&self) -> &'static str;
}
