//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims triage test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built field sets for common claim forms
//! - `builders`: Builder patterns for raw field sets
//! - `assertions`: Assertion helpers for triage reports
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
