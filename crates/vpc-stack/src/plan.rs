//! In-memory provisioner for dry runs
//!
//! Assigns deterministic placeholder identifiers and records every call, so
//! the stack can be previewed (and tested) without touching AWS.

use crate::provisioner::Provisioner;
use crate::resources::{ResourceId, ResourceSpec};
use anyhow::{Result, bail};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;
use vpc_stack_common::ResourceKind;

/// One recorded registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub kind: ResourceKind,
    pub name: String,
    pub id: ResourceId,
    pub spec: ResourceSpec,
}

#[derive(Debug, Default)]
struct PlanState {
    registrations: Vec<Registration>,
    exports: Vec<(String, ResourceId)>,
    issued: HashSet<ResourceId>,
}

/// Provisioner that plans instead of provisioning
#[derive(Debug, Default)]
pub struct PlanProvisioner {
    state: Mutex<PlanState>,
    fail_at: Option<ResourceKind>,
}

impl PlanProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the registration of `kind` fail, as an engine rejection would
    pub fn failing_at(kind: ResourceKind) -> Self {
        Self {
            fail_at: Some(kind),
            ..Self::default()
        }
    }

    /// Registrations so far, in call order
    pub fn registrations(&self) -> Vec<Registration> {
        self.state.lock().unwrap().registrations.clone()
    }

    /// Exports so far, in call order
    pub fn exports(&self) -> Vec<(String, ResourceId)> {
        self.state.lock().unwrap().exports.clone()
    }
}

impl Provisioner for PlanProvisioner {
    async fn register(
        &self,
        kind: ResourceKind,
        name: &str,
        spec: &ResourceSpec,
    ) -> Result<ResourceId> {
        if self.fail_at == Some(kind) {
            bail!("Registration of {kind} '{name}' rejected");
        }

        let mut state = self.state.lock().unwrap();
        if let Some(unknown) = spec
            .referenced_ids()
            .into_iter()
            .find(|id| !state.issued.contains(*id))
        {
            bail!("{kind} '{name}' references unknown identifier {unknown}");
        }

        let id = ResourceId::new(format!(
            "{}-plan-{:04}",
            kind.id_prefix(),
            state.registrations.len() + 1
        ));
        debug!(kind = %kind, name = %name, id = %id, "Planned resource");

        state.issued.insert(id.clone());
        state.registrations.push(Registration {
            kind,
            name: name.to_string(),
            id: id.clone(),
            spec: spec.clone(),
        });
        Ok(id)
    }

    async fn export(&self, name: &str, value: &ResourceId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.issued.contains(value) {
            bail!("Output '{name}' references unknown identifier {value}");
        }
        state.exports.push((name.to_string(), value.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{InternetGatewaySpec, VpcSpec};
    use vpc_stack_common::Ipv4Cidr;

    fn vpc_spec() -> ResourceSpec {
        ResourceSpec::Vpc(VpcSpec {
            name: "test".to_string(),
            cidr_block: "10.0.0.0/16".parse::<Ipv4Cidr>().unwrap(),
            enable_dns_support: true,
            enable_dns_hostnames: true,
        })
    }

    #[tokio::test]
    async fn test_assigns_sequential_ids() {
        let plan = PlanProvisioner::new();
        let vpc = plan
            .register(ResourceKind::Vpc, "test", &vpc_spec())
            .await
            .unwrap();
        assert_eq!(vpc.as_str(), "vpc-plan-0001");

        let igw = plan
            .register(
                ResourceKind::InternetGateway,
                "internet-gateway",
                &ResourceSpec::InternetGateway(InternetGatewaySpec { vpc_id: vpc }),
            )
            .await
            .unwrap();
        assert_eq!(igw.as_str(), "igw-plan-0002");
        assert_eq!(plan.registrations().len(), 2);
    }

    #[tokio::test]
    async fn test_rejects_unknown_reference() {
        let plan = PlanProvisioner::new();
        let err = plan
            .register(
                ResourceKind::InternetGateway,
                "internet-gateway",
                &ResourceSpec::InternetGateway(InternetGatewaySpec {
                    vpc_id: "vpc-elsewhere".into(),
                }),
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("vpc-elsewhere"));
        assert!(plan.registrations().is_empty());
    }

    #[tokio::test]
    async fn test_failing_at() {
        let plan = PlanProvisioner::failing_at(ResourceKind::Vpc);
        assert!(
            plan.register(ResourceKind::Vpc, "test", &vpc_spec())
                .await
                .is_err()
        );
        assert!(plan.registrations().is_empty());
    }

    #[tokio::test]
    async fn test_export_requires_issued_id() {
        let plan = PlanProvisioner::new();
        assert!(plan.export("vpcId", &"vpc-1".into()).await.is_err());

        let vpc = plan
            .register(ResourceKind::Vpc, "test", &vpc_spec())
            .await
            .unwrap();
        plan.export("vpcId", &vpc).await.unwrap();
        assert_eq!(plan.exports(), vec![("vpcId".to_string(), vpc)]);
    }
}
