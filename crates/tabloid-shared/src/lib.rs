//! # Tabloid Shared
//!
//! Wire types shared between the API server and its clients.
//! Every payload uses camelCase keys.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
