//! Provisioning engine interface

use crate::resources::{ResourceId, ResourceSpec};
use anyhow::Result;
use vpc_stack_common::ResourceKind;

/// Trait for the provisioning engine the stack registers resources with.
///
/// Implemented by [`crate::aws::Ec2Client`] for real AWS and by
/// [`crate::plan::PlanProvisioner`] for dry runs; mocked in unit tests.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait Provisioner: Send + Sync {
    /// Register one resource and return the identifier the engine assigned
    async fn register(
        &self,
        kind: ResourceKind,
        name: &str,
        spec: &ResourceSpec,
    ) -> Result<ResourceId>;

    /// Export a named output value
    async fn export(&self, name: &str, value: &ResourceId) -> Result<()>;
}
