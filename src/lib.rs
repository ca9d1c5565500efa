//! Client-side state container for a remote collection of blog posts.
//!
//! - [`blog`]: post records, actions and the pure [`blog::BlogReducer`]
//! - [`request`]: request tokens and the [`request::RequestCoordinator`]
//! - [`store`]: the [`store::Store`] that owns the current snapshot
//! - [`api`]: the remote contract and its HTTP implementation

pub mod api;
pub mod blog;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod request;
pub mod store;

pub use blog::{BlogAction, BlogReducer, BlogState, Post, PostDraft};
pub use store::Store;

/// Store specialised to the blog collection.
pub type BlogStore = Store<BlogReducer>;
