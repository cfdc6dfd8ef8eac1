//! Canonical `Link` header for tenants served on a custom domain

use axum::http::{header::LINK, HeaderValue};

use crate::{error::GateResult, routing::normalize_host};

use super::RequestContext;

/// Points browsers and crawlers at the tenant's custom domain:
/// `Link: <http://ideas.theavengers.com/ideas?q=1>; rel="canonical"`
///
/// Skipped for AJAX requests, for tenants without a custom domain, and for
/// requests already on that domain. Never stops the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalLinker;

impl CanonicalLinker {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, ctx: &mut RequestContext) -> GateResult<()> {
        if let Some(link) = canonical_link(ctx) {
            match HeaderValue::from_str(&link) {
                Ok(value) => ctx.insert_response_header(LINK, value),
                Err(_) => tracing::debug!(link = %link, "Skipping unencodable canonical link"),
            }
        }
        Ok(())
    }
}

fn canonical_link(ctx: &RequestContext) -> Option<String> {
    if ctx.is_ajax() {
        return None;
    }

    let domain = ctx.tenant()?.custom_domain()?;
    let host = normalize_host(ctx.host().unwrap_or_default());
    if host.eq_ignore_ascii_case(domain) {
        return None;
    }

    Some(format!(
        "<{}://{}{}>; rel=\"canonical\"",
        ctx.scheme(),
        domain,
        ctx.path_and_query()
    ))
}
