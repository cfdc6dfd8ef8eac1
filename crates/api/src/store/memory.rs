use async_trait::async_trait;
use std::sync::RwLock;
use tenantgate_shared::{StoreError, Tenant, TenantId};

use super::TenantStore;

/// Tenants held in process memory
#[derive(Default)]
pub struct InMemoryTenantStore {
    tenants: RwLock<Vec<Tenant>>,
}

impl InMemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        Self {
            tenants: RwLock::new(tenants.into_iter().collect()),
        }
    }

    /// Inserts the tenant, or replaces the stored tenant with the same id
    pub fn save(&self, tenant: Tenant) -> Result<(), StoreError> {
        let mut tenants = self
            .tenants
            .write()
            .map_err(|_| StoreError::Unavailable("tenant list lock poisoned".to_string()))?;
        match tenants.iter_mut().find(|t| t.id == tenant.id) {
            Some(existing) => *existing = tenant,
            None => tenants.push(tenant),
        }
        Ok(())
    }

    fn find(&self, predicate: impl Fn(&Tenant) -> bool) -> Result<Option<Tenant>, StoreError> {
        let tenants = self
            .tenants
            .read()
            .map_err(|_| StoreError::Unavailable("tenant list lock poisoned".to_string()))?;
        Ok(tenants.iter().find(|t| predicate(t)).cloned())
    }
}

#[async_trait]
impl TenantStore for InMemoryTenantStore {
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, StoreError> {
        self.find(|t| t.subdomain.eq_ignore_ascii_case(subdomain))
    }

    async fn find_by_custom_domain(&self, host: &str) -> Result<Option<Tenant>, StoreError> {
        self.find(|t| {
            t.custom_domain()
                .is_some_and(|domain| domain.eq_ignore_ascii_case(host))
        })
    }

    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError> {
        self.find(|t| t.id == id)
    }

    async fn first_tenant(&self) -> Result<Option<Tenant>, StoreError> {
        let tenants = self
            .tenants
            .read()
            .map_err(|_| StoreError::Unavailable("tenant list lock poisoned".to_string()))?;
        // min_by_key keeps insertion order among equal timestamps
        Ok(tenants.iter().min_by_key(|t| t.created_at).cloned())
    }
}
