//! Authentication seam
//!
//! tenantgate does not authenticate anyone itself. The privacy gate asks an
//! [`Authenticator`] who the caller is.

use async_trait::async_trait;
use tenantgate_shared::User;

use crate::gate::RequestContext;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The authenticated user for this request, if any
    async fn current_user(&self, ctx: &RequestContext) -> Option<User>;
}

/// Reads the [`User`] an upstream authentication layer stored in the request
/// extensions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionAuthenticator;

#[async_trait]
impl Authenticator for ExtensionAuthenticator {
    async fn current_user(&self, ctx: &RequestContext) -> Option<User> {
        ctx.extensions().get::<User>().cloned()
    }
}
