//! HTTP surface of the service.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{SuggestRequest, router};
