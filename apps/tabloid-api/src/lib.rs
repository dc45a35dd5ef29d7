//! # Tabloid API
//!
//! Actix-web application for the Tabloid blogging backend. The binary in
//! `main.rs` wires configuration and telemetry around [`handlers::configure_routes`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
