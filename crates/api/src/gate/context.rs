//! Per-request state carried through the pipeline

use axum::{
    extract::OriginalUri,
    http::{
        header::{ACCEPT, HOST},
        request::Parts,
        Extensions, HeaderMap, HeaderName, HeaderValue, Uri,
    },
};
use tenantgate_shared::{Tenant, User};

use crate::error::{GateError, GateResult};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Request head plus whatever the stages have learned about it.
///
/// The tenant is write-once: later stages read it, none replace it.
pub struct RequestContext {
    parts: Parts,
    tenant: Option<Tenant>,
    user: Option<User>,
    response_headers: HeaderMap,
}

impl RequestContext {
    pub fn new(parts: Parts) -> Self {
        Self {
            parts,
            tenant: None,
            user: None,
            response_headers: HeaderMap::new(),
        }
    }

    /// Host header, or the URI authority for HTTP/2 requests
    pub fn host(&self) -> Option<&str> {
        self.parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| self.uri().authority().map(|a| a.as_str()))
    }

    /// URI as received, before any router prefix stripping
    pub fn uri(&self) -> &Uri {
        self.parts
            .extensions
            .get::<OriginalUri>()
            .map(|original| &original.0)
            .unwrap_or(&self.parts.uri)
    }

    pub fn path(&self) -> &str {
        self.uri().path()
    }

    /// Path plus `?query` when a query is present
    pub fn path_and_query(&self) -> String {
        let uri = self.uri();
        match uri.query() {
            Some(query) => format!("{}?{}", uri.path(), query),
            None => uri.path().to_string(),
        }
    }

    /// `X-Forwarded-Proto` from a fronting proxy, else the URI scheme, else http
    pub fn scheme(&self) -> &str {
        self.parts
            .headers
            .get(FORWARDED_PROTO)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| self.uri().scheme_str())
            .unwrap_or("http")
    }

    /// Programmatic callers ask for JSON
    pub fn is_ajax(&self) -> bool {
        self.parts
            .headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|accept| accept.contains("application/json"))
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn extensions(&self) -> &Extensions {
        &self.parts.extensions
    }

    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    pub fn attach_tenant(&mut self, tenant: Tenant) -> GateResult<()> {
        if self.tenant.is_some() {
            return Err(GateError::TenantAlreadyAttached);
        }
        self.tenant = Some(tenant);
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Header to add to whatever response ends this request
    pub fn insert_response_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.response_headers.insert(name, value);
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    pub fn into_parts(self) -> ContextParts {
        ContextParts {
            request: self.parts,
            tenant: self.tenant,
            user: self.user,
            response_headers: self.response_headers,
        }
    }
}

/// A finished context, split back into its pieces
pub struct ContextParts {
    pub request: Parts,
    pub tenant: Option<Tenant>,
    pub user: Option<User>,
    pub response_headers: HeaderMap,
}

#[cfg(test)]
pub(crate) fn context_for(url: &str) -> RequestContext {
    context_with(url, &[])
}

/// Builds a context the way a browser would address `url`
#[cfg(test)]
pub(crate) fn context_with(url: &str, headers: &[(&str, &str)]) -> RequestContext {
    let uri: Uri = url.parse().unwrap();
    let mut builder = axum::http::Request::builder().uri(uri.clone());
    if let Some(authority) = uri.authority() {
        builder = builder.header(HOST, authority.as_str());
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();
    RequestContext::new(parts)
}
