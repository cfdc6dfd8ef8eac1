use crate::error::GateResult;

use super::{
    CanonicalLinker, CheckTenantPrivacy, HostChecker, MultiTenant, OnlyActiveTenants,
    RequestContext, SingleTenant,
};

/// One step of the request gate
#[derive(Clone)]
pub enum Stage {
    MultiTenant(MultiTenant),
    SingleTenant(SingleTenant),
    HostChecker(HostChecker),
    CanonicalLink(CanonicalLinker),
    OnlyActiveTenants(OnlyActiveTenants),
    CheckTenantPrivacy(CheckTenantPrivacy),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::MultiTenant(_) => "multi_tenant",
            Stage::SingleTenant(_) => "single_tenant",
            Stage::HostChecker(_) => "host_checker",
            Stage::CanonicalLink(_) => "canonical_link",
            Stage::OnlyActiveTenants(_) => "only_active_tenants",
            Stage::CheckTenantPrivacy(_) => "check_tenant_privacy",
        }
    }

    /// `Ok` continues with the next stage, `Err` ends the request
    pub async fn evaluate(&self, ctx: &mut RequestContext) -> GateResult<()> {
        match self {
            Stage::MultiTenant(stage) => stage.evaluate(ctx).await,
            Stage::SingleTenant(stage) => stage.evaluate(ctx).await,
            Stage::HostChecker(stage) => stage.evaluate(ctx),
            Stage::CanonicalLink(stage) => stage.evaluate(ctx),
            Stage::OnlyActiveTenants(stage) => stage.evaluate(ctx),
            Stage::CheckTenantPrivacy(stage) => stage.evaluate(ctx).await,
        }
    }
}

impl From<MultiTenant> for Stage {
    fn from(stage: MultiTenant) -> Self {
        Stage::MultiTenant(stage)
    }
}

impl From<SingleTenant> for Stage {
    fn from(stage: SingleTenant) -> Self {
        Stage::SingleTenant(stage)
    }
}

impl From<HostChecker> for Stage {
    fn from(stage: HostChecker) -> Self {
        Stage::HostChecker(stage)
    }
}

impl From<CanonicalLinker> for Stage {
    fn from(stage: CanonicalLinker) -> Self {
        Stage::CanonicalLink(stage)
    }
}

impl From<OnlyActiveTenants> for Stage {
    fn from(stage: OnlyActiveTenants) -> Self {
        Stage::OnlyActiveTenants(stage)
    }
}

impl From<CheckTenantPrivacy> for Stage {
    fn from(stage: CheckTenantPrivacy) -> Self {
        Stage::CheckTenantPrivacy(stage)
    }
}

/// Ordered list of stages, evaluated until one fails
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn with(mut self, stage: impl Into<Stage>) -> Self {
        self.stages.push(stage.into());
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub async fn run(&self, ctx: &mut RequestContext) -> GateResult<()> {
        for stage in &self.stages {
            if let Err(e) = stage.evaluate(ctx).await {
                tracing::debug!(stage = stage.name(), error = %e, "Request stopped by gate");
                return Err(e);
            }
        }
        Ok(())
    }
}
