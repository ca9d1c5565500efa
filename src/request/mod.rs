//! Remote request lifecycle: tokens, operations, cancellation and the
//! coordinator that turns calls into actions.

mod cancel;
mod coordinator;
mod id;
mod operation;

pub use cancel::CancelSignal;
pub use coordinator::{CoordinatorError, InFlightRequest, RequestCoordinator, Settled};
pub use id::RequestId;
pub use operation::{Operation, Payload, RequestFailure, RequestKind, RequestMeta};
