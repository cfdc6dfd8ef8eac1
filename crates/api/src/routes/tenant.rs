//! Current tenant endpoint

use axum::{Extension, Json};
use serde::Serialize;
use tenantgate_shared::{Tenant, TenantId, TenantStatus, User};

#[derive(Debug, Serialize)]
pub struct TenantResponse {
    pub id: TenantId,
    pub name: String,
    pub subdomain: String,
    pub custom_domain: Option<String>,
    pub status: TenantStatus,
    pub is_private: bool,
    pub user: Option<String>,
}

/// The tenant resolved for this request
pub async fn current_tenant(
    Extension(tenant): Extension<Tenant>,
    user: Option<Extension<User>>,
) -> Json<TenantResponse> {
    Json(TenantResponse {
        id: tenant.id,
        custom_domain: tenant.custom_domain().map(str::to_string),
        name: tenant.name,
        subdomain: tenant.subdomain,
        status: tenant.status,
        is_private: tenant.is_private,
        user: user.map(|Extension(user)| user.name),
    })
}
