//! Request gate
//!
//! Maps each request to a tenant and applies the tenant's access rules before
//! any handler runs. Stages are evaluated in order by a [`Pipeline`]:
//! - [`MultiTenant`] / [`SingleTenant`]: attach the tenant
//! - [`OnlyActiveTenants`]: hide tenants that are not active
//! - [`CanonicalLinker`]: advertise the custom-domain URL
//! - [`CheckTenantPrivacy`]: require sign-in for private tenants
//! - [`HostChecker`]: pin a route group to one host

mod access;
mod canonical;
pub(crate) mod context;
mod host_checker;
mod middleware;
mod pipeline;
mod tenant;

pub use access::{CheckTenantPrivacy, OnlyActiveTenants};
pub use canonical::CanonicalLinker;
pub use context::{ContextParts, RequestContext};
pub use host_checker::HostChecker;
pub use middleware::gate_middleware;
pub use pipeline::{Pipeline, Stage};
pub use tenant::{MultiTenant, SingleTenant};
