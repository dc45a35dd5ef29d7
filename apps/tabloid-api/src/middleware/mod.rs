//! Middleware modules.

pub mod auth;
pub mod error;

pub use auth::{CurrentUser, Identity};
pub use error::{AppError, AppResult};
