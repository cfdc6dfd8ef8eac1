//! Tenant lookup backends
//!
//! The gate only reads tenants. Any backend implementing [`TenantStore`] can
//! serve it:
//! - [`PgTenantStore`]: the `tenants` table
//! - [`InMemoryTenantStore`]: fixed tenant list, used by tests and demos
//! - [`CachedTenantStore`]: caches which tenant a host maps to

mod cached;
mod memory;
mod postgres;

pub use cached::CachedTenantStore;
pub use memory::InMemoryTenantStore;
pub use postgres::PgTenantStore;

use async_trait::async_trait;
use tenantgate_shared::{StoreError, Tenant, TenantId};

/// Read-only tenant lookups
///
/// `Ok(None)` means no such tenant; `Err` is reserved for backend failures.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Tenant whose subdomain equals `subdomain` (case-insensitive)
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, StoreError>;

    /// Tenant whose custom domain equals `host` (case-insensitive)
    async fn find_by_custom_domain(&self, host: &str) -> Result<Option<Tenant>, StoreError>;

    /// Tenant by primary key
    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError>;

    /// Oldest tenant by creation time
    async fn first_tenant(&self) -> Result<Option<Tenant>, StoreError>;

    /// Backend health for readiness probes
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
