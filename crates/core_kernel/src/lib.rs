//! Core Kernel - Foundational types shared across the claims triage workspace
//!
//! This crate provides the building blocks used by the domain and adapter crates:
//! - Money types with precise decimal arithmetic and free-text amount parsing
//! - Port infrastructure (error type, marker traits, operation metadata)

pub mod money;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use ports::{PortError, DomainPort, AdapterType, OperationMetadata};
