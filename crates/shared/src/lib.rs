//! tenantgate Shared Types and Utilities
//!
//! Tenant and user records, store errors, and database helpers shared by the
//! tenantgate crates.

pub mod db;
pub mod error;
pub mod types;

pub use db::*;
pub use error::*;
pub use types::*;
