//! API routes

pub mod health;
pub mod tenant;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{gate::gate_middleware, state::AppState};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (no tenant, for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    // Tenant-scoped routes - resolved, status-checked, canonical-linked, privacy-gated
    let tenant_routes = Router::new()
        .route("/api/v1/tenant", get(tenant::current_tenant))
        .route_layer(middleware::from_fn_with_state(
            state.tenant_pipeline.clone(),
            gate_middleware,
        ));

    // Routes pinned to the login host
    let login_routes = Router::new()
        .route("/login/health", get(health::liveness))
        .route_layer(middleware::from_fn_with_state(
            state.login_pipeline.clone(),
            gate_middleware,
        ));

    Router::new()
        .merge(health_routes)
        .merge(tenant_routes)
        .merge(login_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::ExtensionAuthenticator,
        config::{Config, HostMode, LogFormat},
        routing::TenantCache,
        store::{CachedTenantStore, InMemoryTenantStore},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header::HOST, Request, StatusCode},
    };
    use std::{sync::Arc, time::Duration};
    use tenantgate_shared::{Tenant, TenantStatus};
    use tower::ServiceExt;

    fn config(host_mode: HostMode) -> Config {
        Config {
            bind_address: "127.0.0.1:0".to_string(),
            log_format: LogFormat::Pretty,
            host_mode,
            base_domain: "test.fider.io".to_string(),
            login_host: "login.test.fider.io".to_string(),
            database_url: "postgres://unused".to_string(),
            database_max_connections: 1,
            tenant_cache_ttl: Duration::ZERO,
        }
    }

    fn app(host_mode: HostMode, tenants: Vec<Tenant>) -> Router {
        let store = Arc::new(InMemoryTenantStore::with_tenants(tenants));
        create_router(AppState::new(
            config(host_mode),
            store,
            Arc::new(ExtensionAuthenticator),
        ))
    }

    fn get(host: &str, path: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header(HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_needs_no_tenant() {
        let response = app(HostMode::Multi, vec![])
            .oneshot(get("somedomain.com", "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_current_tenant() {
        let tenants = vec![Tenant::new("Avengers", "avengers").with_custom_domain("ideas.theavengers.com")];
        let response = app(HostMode::Multi, tenants)
            .oneshot(get("avengers.test.fider.io:3000", "/api/v1/tenant?x=1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("link").unwrap(),
            "<http://ideas.theavengers.com/api/v1/tenant?x=1>; rel=\"canonical\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["name"], "Avengers");
        assert_eq!(body["status"], "active");
        assert!(body["user"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_host_is_not_found() {
        let response = app(HostMode::Multi, vec![Tenant::new("Demonstration", "demo")])
            .oneshot(get("demo.demo.test.fider.io", "/api/v1/tenant"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_single_mode_redirects_to_signup() {
        let response = app(HostMode::Single, vec![])
            .oneshot(get("somedomain.com", "/api/v1/tenant"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/signup");
    }

    #[tokio::test]
    async fn test_deactivated_tenant_is_not_served_from_cache() {
        let tenant = Tenant::new("Demonstration", "demo");
        let backend = Arc::new(InMemoryTenantStore::with_tenants([tenant.clone()]));
        let mut config = config(HostMode::Multi);
        config.tenant_cache_ttl = Duration::from_secs(300);
        let store = CachedTenantStore::new(
            backend.clone(),
            Arc::new(TenantCache::new(config.tenant_cache_ttl)),
        );
        let app = create_router(AppState::new(
            config,
            Arc::new(store),
            Arc::new(ExtensionAuthenticator),
        ));

        let response = app
            .clone()
            .oneshot(get("demo.test.fider.io", "/api/v1/tenant"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        backend
            .save(tenant.with_status(TenantStatus::Inactive))
            .unwrap();

        let response = app
            .oneshot(get("demo.test.fider.io", "/api/v1/tenant"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_private_tenant_redirects_to_signin() {
        let tenants = vec![Tenant::new("Demonstration", "demo").with_privacy(true)];
        let response = app(HostMode::Multi, tenants)
            .oneshot(get("demo.test.fider.io", "/api/v1/tenant"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/signin");
    }

    #[tokio::test]
    async fn test_login_routes_are_host_locked() {
        let response = app(HostMode::Multi, vec![])
            .oneshot(get("login.test.fider.io", "/login/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app(HostMode::Multi, vec![])
            .oneshot(get("avengers.test.fider.io", "/login/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
