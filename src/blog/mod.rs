//! The blog post collection: records, actions, matchers and the reducer.

mod action;
mod matcher;
mod post;
mod reducer;
mod state;

pub use action::{ActionKind, BlogAction};
pub use matcher::{apply_matchers, ActionPattern, MatchHandler, Matcher, STANDARD_MATCHERS};
pub use post::{new_post_id, Post, PostDraft};
pub use reducer::BlogReducer;
pub use state::BlogState;
