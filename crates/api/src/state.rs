//! Shared application state

use std::sync::Arc;

use crate::{
    auth::Authenticator,
    config::{Config, HostMode},
    gate::{
        CanonicalLinker, CheckTenantPrivacy, HostChecker, MultiTenant, OnlyActiveTenants,
        Pipeline, SingleTenant,
    },
    store::TenantStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn TenantStore>,
    /// Gate for tenant-scoped routes
    pub tenant_pipeline: Arc<Pipeline>,
    /// Gate for routes served only on the login host
    pub login_pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn TenantStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let tenant_pipeline = tenant_pipeline(&config, store.clone(), authenticator);
        let login_pipeline = Pipeline::new().with(HostChecker::new(config.login_host.clone()));

        Self {
            config: Arc::new(config),
            store,
            tenant_pipeline: Arc::new(tenant_pipeline),
            login_pipeline: Arc::new(login_pipeline),
        }
    }
}

/// Resolve the tenant for the configured host mode, then apply the status
/// gate, canonical link and privacy gate in that order
pub fn tenant_pipeline(
    config: &Config,
    store: Arc<dyn TenantStore>,
    authenticator: Arc<dyn Authenticator>,
) -> Pipeline {
    let pipeline = match config.host_mode {
        HostMode::Multi => Pipeline::new().with(MultiTenant::new(store, config.base_domain.clone())),
        HostMode::Single => Pipeline::new().with(SingleTenant::new(store)),
    };

    pipeline
        .with(OnlyActiveTenants::new())
        .with(CanonicalLinker::new())
        .with(CheckTenantPrivacy::new(authenticator))
}
