//! # Tabloid Core
//!
//! The domain layer of Tabloid.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, the rules that decide who may see or change them, and the ports
//! that infrastructure must implement.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;

pub use error::DomainError;
