//! Shared request and response types for the HTTP layer.

mod response;
mod search;

pub use response::{Created, MessageResponse, NoContent};
pub use search::SearchParams;
