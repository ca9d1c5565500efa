//! Remote posts API: the contract, its errors and the HTTP implementation.

mod client;
mod error;
mod http;

pub use client::PostsApi;
pub use error::{ApiError, ValidationErrors};
pub use http::HttpPostsApi;
