//! Base trait for state snapshots.

/// Marker trait for snapshot objects.
///
/// Snapshots should be:
/// - Immutable (Clone to derive the next snapshot)
/// - Self-contained (everything a reader needs)
/// - Comparable (PartialEq for detecting changes)
pub trait Snapshot: Clone + PartialEq + Default + Send + Sync + 'static {}
