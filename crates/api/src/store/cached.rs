use async_trait::async_trait;
use std::sync::Arc;
use tenantgate_shared::{StoreError, Tenant, TenantId};

use super::TenantStore;
use crate::routing::{CachedLookup, TenantCache};

/// Remembers which tenant a subdomain or custom domain maps to.
///
/// A cached hit is re-read from the inner store by id, so the returned
/// record is always current. If the record is gone or no longer answers to
/// the key, the slot is dropped and the full lookup runs again. Misses are
/// cached too, so a newly created tenant can stay invisible on its host for
/// up to one TTL.
///
/// `first_tenant` always reaches the inner store so that a single-tenant
/// deployment notices its first tenant immediately.
pub struct CachedTenantStore {
    inner: Arc<dyn TenantStore>,
    cache: Arc<TenantCache>,
}

impl CachedTenantStore {
    pub fn new(inner: Arc<dyn TenantStore>, cache: Arc<TenantCache>) -> Self {
        Self { inner, cache }
    }

    /// Answers from the cache when it can. `None` means the lookup must go
    /// to the inner store.
    async fn cached(
        &self,
        key: &str,
        answers_to_key: impl Fn(&Tenant) -> bool + Send,
    ) -> Result<Option<Option<Tenant>>, StoreError> {
        let id = match self.cache.lookup(key) {
            None => return Ok(None),
            Some(CachedLookup::Missing) => return Ok(Some(None)),
            Some(CachedLookup::Tenant(id)) => id,
        };

        match self.inner.find_by_id(id).await? {
            Some(tenant) if answers_to_key(&tenant) => Ok(Some(Some(tenant))),
            _ => {
                tracing::debug!(key, tenant_id = %id.0, "Cached tenant moved, looking up again");
                self.cache.forget(key);
                Ok(None)
            }
        }
    }
}

fn subdomain_key(subdomain: &str) -> String {
    format!("subdomain:{}", subdomain.to_ascii_lowercase())
}

fn domain_key(host: &str) -> String {
    format!("domain:{}", host.to_ascii_lowercase())
}

#[async_trait]
impl TenantStore for CachedTenantStore {
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, StoreError> {
        let key = subdomain_key(subdomain);
        let answers = |t: &Tenant| t.subdomain.eq_ignore_ascii_case(subdomain);
        if let Some(found) = self.cached(&key, answers).await? {
            return Ok(found);
        }

        let tenant = self.inner.find_by_subdomain(subdomain).await?;
        self.cache.remember(&key, CachedLookup::from(tenant.as_ref()));
        Ok(tenant)
    }

    async fn find_by_custom_domain(&self, host: &str) -> Result<Option<Tenant>, StoreError> {
        let key = domain_key(host);
        let answers = |t: &Tenant| {
            t.custom_domain()
                .is_some_and(|domain| domain.eq_ignore_ascii_case(host))
        };
        if let Some(found) = self.cached(&key, answers).await? {
            return Ok(found);
        }

        let tenant = self.inner.find_by_custom_domain(host).await?;
        self.cache.remember(&key, CachedLookup::from(tenant.as_ref()));
        Ok(tenant)
    }

    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn first_tenant(&self) -> Result<Option<Tenant>, StoreError> {
        self.inner.first_tenant().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTenantStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tenantgate_shared::TenantStatus;

    /// Counts how often host lookups reach the backend
    struct CountingStore {
        inner: InMemoryTenantStore,
        host_lookups: AtomicUsize,
    }

    impl CountingStore {
        fn host_lookups(&self) -> usize {
            self.host_lookups.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TenantStore for CountingStore {
        async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, StoreError> {
            self.host_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_subdomain(subdomain).await
        }

        async fn find_by_custom_domain(&self, host: &str) -> Result<Option<Tenant>, StoreError> {
            self.host_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_custom_domain(host).await
        }

        async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn first_tenant(&self) -> Result<Option<Tenant>, StoreError> {
            self.host_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.first_tenant().await
        }
    }

    fn avengers() -> Tenant {
        Tenant::new("Avengers", "avengers").with_custom_domain("ideas.theavengers.com")
    }

    fn cached_over(tenants: Vec<Tenant>) -> (Arc<CountingStore>, CachedTenantStore) {
        let backend = Arc::new(CountingStore {
            inner: InMemoryTenantStore::with_tenants(tenants),
            host_lookups: AtomicUsize::new(0),
        });
        let cache = Arc::new(TenantCache::new(Duration::from_secs(300)));
        let store = CachedTenantStore::new(backend.clone(), cache);
        (backend, store)
    }

    #[tokio::test]
    async fn test_hits_and_misses_are_cached() {
        let (backend, store) = cached_over(vec![avengers()]);

        for _ in 0..3 {
            assert!(store.find_by_subdomain("avengers").await.unwrap().is_some());
            assert!(store.find_by_custom_domain("somedomain.com").await.unwrap().is_none());
        }
        assert_eq!(backend.host_lookups(), 2);

        // keys ignore case
        assert!(store.find_by_subdomain("AVENGERS").await.unwrap().is_some());
        assert_eq!(backend.host_lookups(), 2);
    }

    #[tokio::test]
    async fn test_status_change_is_seen_on_next_lookup() {
        let tenant = avengers();
        let (backend, store) = cached_over(vec![tenant.clone()]);

        let found = store.find_by_subdomain("avengers").await.unwrap().unwrap();
        assert_eq!(found.status, TenantStatus::Active);

        backend
            .inner
            .save(tenant.with_status(TenantStatus::Inactive).with_privacy(true))
            .unwrap();

        let found = store.find_by_subdomain("avengers").await.unwrap().unwrap();
        assert_eq!(found.status, TenantStatus::Inactive);
        assert!(found.is_private);
        assert_eq!(backend.host_lookups(), 1);
    }

    #[tokio::test]
    async fn test_moved_custom_domain_is_looked_up_again() {
        let tenant = avengers();
        let (backend, store) = cached_over(vec![tenant.clone()]);

        assert!(store
            .find_by_custom_domain("ideas.theavengers.com")
            .await
            .unwrap()
            .is_some());

        backend
            .inner
            .save(tenant.with_custom_domain("feedback.theavengers.com"))
            .unwrap();

        assert!(store
            .find_by_custom_domain("ideas.theavengers.com")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_custom_domain("feedback.theavengers.com")
            .await
            .unwrap()
            .is_some());
        assert_eq!(backend.host_lookups(), 3);
    }

    #[tokio::test]
    async fn test_first_tenant_is_not_cached() {
        let (backend, store) = cached_over(vec![avengers()]);

        store.first_tenant().await.unwrap();
        store.first_tenant().await.unwrap();
        assert_eq!(backend.host_lookups(), 2);
    }
}
