//! Gate error types and handling
//!
//! Every failure detected by a pipeline stage ends here and becomes a terminal
//! response. Missing, inactive and unresolvable tenants share one 404 so that
//! callers cannot probe which workspaces exist.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tenantgate_shared::StoreError;

/// Where single-tenant deployments send visitors before any tenant exists
pub const SIGNUP_PATH: &str = "/signup";

/// Where private tenants send anonymous visitors
pub const SIGNIN_PATH: &str = "/signin";

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Tenant not found")]
    TenantNotFound,
    #[error("Invalid host")]
    HostMismatch,
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("No tenants provisioned")]
    NoTenantsProvisioned,
    #[error("Tenant already attached to request")]
    TenantAlreadyAttached,
    #[error("Tenant store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            GateError::NoTenantsProvisioned => {
                return Redirect::temporary(SIGNUP_PATH).into_response()
            }
            GateError::AuthenticationRequired => {
                return Redirect::temporary(SIGNIN_PATH).into_response()
            }
            GateError::TenantNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "Not found".to_string()),
            GateError::HostMismatch => (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string()),
            GateError::TenantAlreadyAttached | GateError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for pipeline stages
pub type GateResult<T> = Result<T, GateError>;
