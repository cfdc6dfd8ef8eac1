//! Tenant resolution stages

use std::sync::Arc;

use crate::{
    error::{GateError, GateResult},
    routing::{normalize_host, parse_host, HostMatch},
    store::TenantStore,
};

use super::RequestContext;

/// Resolves the tenant from the request host.
///
/// `<subdomain>.<base domain>` is looked up by subdomain; any other host is
/// looked up as a custom domain. Nothing found ends the request with 404.
#[derive(Clone)]
pub struct MultiTenant {
    store: Arc<dyn TenantStore>,
    base_domain: String,
}

impl MultiTenant {
    pub fn new(store: Arc<dyn TenantStore>, base_domain: impl Into<String>) -> Self {
        Self {
            store,
            base_domain: base_domain.into(),
        }
    }

    pub async fn evaluate(&self, ctx: &mut RequestContext) -> GateResult<()> {
        let raw_host = ctx.host().unwrap_or_default().to_string();

        let found = match parse_host(&raw_host, &self.base_domain) {
            HostMatch::Subdomain(subdomain) => self.store.find_by_subdomain(&subdomain).await,
            HostMatch::NoSubdomain => {
                self.store
                    .find_by_custom_domain(&normalize_host(&raw_host))
                    .await
            }
        };

        match found {
            Ok(Some(tenant)) => ctx.attach_tenant(tenant),
            Ok(None) => {
                tracing::debug!(host = %raw_host, "Tenant not found for host");
                Err(GateError::TenantNotFound)
            }
            Err(e) => {
                tracing::warn!(host = %raw_host, error = %e, "Tenant lookup failed");
                Err(e.into())
            }
        }
    }
}

/// Attaches the oldest tenant to every request, whatever the host.
///
/// With no tenant provisioned yet, every request is sent to the signup page.
/// The signup route itself must be mounted outside this stage.
#[derive(Clone)]
pub struct SingleTenant {
    store: Arc<dyn TenantStore>,
}

impl SingleTenant {
    pub fn new(store: Arc<dyn TenantStore>) -> Self {
        Self { store }
    }

    pub async fn evaluate(&self, ctx: &mut RequestContext) -> GateResult<()> {
        match self.store.first_tenant().await {
            Ok(Some(tenant)) => ctx.attach_tenant(tenant),
            Ok(None) => {
                tracing::debug!("No tenant provisioned, redirecting to signup");
                Err(GateError::NoTenantsProvisioned)
            }
            Err(e) => {
                tracing::warn!(error = %e, "First tenant lookup failed");
                Err(e.into())
            }
        }
    }
}
