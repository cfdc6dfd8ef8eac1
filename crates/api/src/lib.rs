//! tenantgate API Library
//!
//! Request-entry layer of a multi-tenant service: resolves each request's
//! tenant from its host and gates access before application handlers run.

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
pub mod routing;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{GateError, GateResult};
pub use gate::{Pipeline, RequestContext, Stage};
pub use routing::{HostMatch, TenantCache};
pub use state::AppState;
pub use store::TenantStore;
