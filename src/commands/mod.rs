//! Command implementations
//!
//! One file per user-facing operation, each extending `Repository` with
//! the porcelain for that workflow.

pub mod porcelain;
