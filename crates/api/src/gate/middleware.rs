//! Axum adapter for the gate pipeline

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{ContextParts, Pipeline, RequestContext};

/// Runs `pipeline` in front of the wrapped routes.
///
/// On success the resolved [`Tenant`](tenantgate_shared::Tenant) and
/// [`User`](tenantgate_shared::User) are placed in the request extensions for
/// handlers (`Extension<Tenant>`). Headers queued by the stages are appended
/// to the final response, including terminal ones, next to any the handler set.
pub async fn gate_middleware(
    State(pipeline): State<Arc<Pipeline>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let mut ctx = RequestContext::new(parts);

    let outcome = pipeline.run(&mut ctx).await;

    let ContextParts {
        request: mut parts,
        tenant,
        user,
        response_headers,
    } = ctx.into_parts();

    let mut response = match outcome {
        Ok(()) => {
            if let Some(tenant) = tenant {
                parts.extensions.insert(tenant);
            }
            if let Some(user) = user {
                parts.extensions.insert(user);
            }
            next.run(Request::<Body>::from_parts(parts, body)).await
        }
        Err(e) => e.into_response(),
    };

    let headers = response.headers_mut();
    for (name, value) in &response_headers {
        headers.append(name.clone(), value.clone());
    }
    response
}
