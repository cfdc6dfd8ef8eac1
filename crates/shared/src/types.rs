//! Common types used across tenantgate

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// ID Wrappers
// =============================================================================

/// Tenant ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TenantId(pub Uuid);

impl TenantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TenantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// User ID wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

// =============================================================================
// Enums
// =============================================================================

/// Lifecycle state of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Active,
    Inactive,
    PendingRemoval,
}

impl Default for TenantStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::PendingRemoval => "pending_removal",
        }
    }
}

// =============================================================================
// Tenant
// =============================================================================

/// A customer workspace, addressed by subdomain or by its custom domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    /// Unique slug matched against `<subdomain>.<base domain>`
    pub subdomain: String,
    /// Public hostname, e.g. `ideas.theavengers.com`
    pub custom_domain: Option<String>,
    pub status: TenantStatus,
    pub is_private: bool,
    pub created_at: OffsetDateTime,
}

impl Tenant {
    /// New active, public tenant without a custom domain
    pub fn new(name: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            id: TenantId::new(),
            name: name.into(),
            subdomain: subdomain.into(),
            custom_domain: None,
            status: TenantStatus::Active,
            is_private: false,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_custom_domain(mut self, domain: impl Into<String>) -> Self {
        self.custom_domain = Some(domain.into());
        self
    }

    pub fn with_status(mut self, status: TenantStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_privacy(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    pub fn with_created_at(mut self, created_at: OffsetDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }

    /// Configured custom domain, ignoring blank values
    pub fn custom_domain(&self) -> Option<&str> {
        self.custom_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
    }
}

// =============================================================================
// User
// =============================================================================

/// An authenticated user, as reported by the authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_custom_domain_is_ignored() {
        let tenant = Tenant::new("Avengers", "avengers").with_custom_domain("  ");
        assert_eq!(tenant.custom_domain(), None);

        let tenant = tenant.with_custom_domain("ideas.theavengers.com");
        assert_eq!(tenant.custom_domain(), Some("ideas.theavengers.com"));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TenantStatus::PendingRemoval).unwrap(),
            "\"pending_removal\""
        );
        assert_eq!(TenantStatus::Inactive.as_str(), "inactive");
        assert_eq!(TenantStatus::default(), TenantStatus::Active);
    }

    #[test]
    fn test_new_tenant_is_active_and_public() {
        let tenant = Tenant::new("Demonstration", "demo");
        assert!(tenant.is_active());
        assert!(!tenant.is_private);
        assert!(!tenant.with_status(TenantStatus::Inactive).is_active());
    }
}
