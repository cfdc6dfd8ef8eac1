use async_trait::async_trait;
use sqlx::PgPool;
use tenantgate_shared::{StoreError, Tenant, TenantId};

use super::TenantStore;

/// Tenant lookups against the `tenants` table
#[derive(Clone)]
pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn find_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, subdomain, custom_domain, status, is_private, created_at
            FROM tenants
            WHERE LOWER(subdomain) = LOWER($1)
            "#,
        )
        .bind(subdomain)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn find_by_custom_domain(&self, host: &str) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, subdomain, custom_domain, status, is_private, created_at
            FROM tenants
            WHERE custom_domain <> ''
              AND LOWER(custom_domain) = LOWER($1)
            "#,
        )
        .bind(host)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn find_by_id(&self, id: TenantId) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, subdomain, custom_domain, status, is_private, created_at
            FROM tenants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn first_tenant(&self) -> Result<Option<Tenant>, StoreError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT id, name, subdomain, custom_domain, status, is_private, created_at
            FROM tenants
            ORDER BY created_at, id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
