use crate::error::{GateError, GateResult};

use super::RequestContext;

/// Locks a route group to one exact Host value.
///
/// The comparison is verbatim, port included, so `login.test.fider.io` and
/// `login.test.fider.io:3000` are different hosts.
#[derive(Debug, Clone)]
pub struct HostChecker {
    expected_host: String,
}

impl HostChecker {
    pub fn new(expected_host: impl Into<String>) -> Self {
        Self {
            expected_host: expected_host.into(),
        }
    }

    pub fn evaluate(&self, ctx: &mut RequestContext) -> GateResult<()> {
        match ctx.host() {
            Some(host) if host == self.expected_host => Ok(()),
            host => {
                tracing::debug!(
                    expected = %self.expected_host,
                    host = host.unwrap_or_default(),
                    "Host mismatch"
                );
                Err(GateError::HostMismatch)
            }
        }
    }
}
