//! Action sinks.

/// Something that accepts actions, one at a time, in delivery order.
pub trait Dispatch<A>: Send + Sync {
    fn dispatch(&self, action: A);
}
