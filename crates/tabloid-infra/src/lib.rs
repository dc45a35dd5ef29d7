//! # Tabloid Infrastructure
//!
//! Concrete implementations of the ports defined in `tabloid-core`:
//! repositories (in-memory and PostgreSQL) and bearer token validation.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - No external database, in-memory store only

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryStore, Repositories};

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
