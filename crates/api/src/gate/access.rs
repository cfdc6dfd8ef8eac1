//! Post-resolution access gates

use std::sync::Arc;

use crate::{
    auth::Authenticator,
    error::{GateError, GateResult},
};

use super::RequestContext;

/// Lets requests through only for active tenants.
///
/// Inactive tenants and tenants pending removal answer exactly like unknown
/// ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnlyActiveTenants;

impl OnlyActiveTenants {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, ctx: &RequestContext) -> GateResult<()> {
        match ctx.tenant() {
            Some(tenant) if tenant.is_active() => Ok(()),
            Some(tenant) => {
                tracing::debug!(
                    tenant_id = %tenant.id.0,
                    status = tenant.status.as_str(),
                    "Rejecting request for tenant that is not active"
                );
                Err(GateError::TenantNotFound)
            }
            None => Err(GateError::TenantNotFound),
        }
    }
}

/// Sends anonymous visitors of private tenants to the sign-in page.
#[derive(Clone)]
pub struct CheckTenantPrivacy {
    authenticator: Arc<dyn Authenticator>,
}

impl CheckTenantPrivacy {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    pub async fn evaluate(&self, ctx: &mut RequestContext) -> GateResult<()> {
        let is_private = match ctx.tenant() {
            Some(tenant) => tenant.is_private,
            None => return Err(GateError::TenantNotFound),
        };
        if !is_private {
            return Ok(());
        }

        if ctx.user().is_none() {
            let user = self.authenticator.current_user(ctx).await;
            ctx.set_user(user);
        }

        if ctx.user().is_some() {
            Ok(())
        } else {
            Err(GateError::AuthenticationRequired)
        }
    }
}
