//! Model-View-Intent primitives shared by every state container.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ Snapshot ──→ Subscribers
//!    ↑                                   │
//!    └───────────────────────────────────┘
//! ```
//!
//! - **Snapshot**: immutable value describing the whole state at one instant
//! - **Action**: something that happened (user intent or request milestone)
//! - **Reducer**: pure function folding an action into a new snapshot
//! - **Dispatch**: anything that accepts actions (a store, a test recorder)

mod action;
mod dispatch;
mod reducer;
mod state;

pub use action::Action;
pub use dispatch::Dispatch;
pub use reducer::Reducer;
pub use state::Snapshot;
