//! Security group management

use super::Ec2Client;
use crate::aws::error::classify_anyhow_error;
use crate::aws::tags;
use crate::resources::{ResourceId, SecurityGroupSpec, SecurityRule};
use anyhow::{Context, Result};
use aws_sdk_ec2::types::{IpPermission, IpRange, ResourceType};
use tracing::{debug, info};

/// EC2 permission for one rule
fn ip_permission(rule: &SecurityRule) -> IpPermission {
    let mut builder = IpPermission::builder()
        .ip_protocol(rule.protocol.as_aws_str())
        .from_port(rule.from_port)
        .to_port(rule.to_port);
    for cidr in &rule.cidr_blocks {
        builder = builder.ip_ranges(IpRange::builder().cidr_ip(cidr.to_string()).build());
    }
    builder.build()
}

/// Treat an "already exists" failure as success, returning `None` for it
fn ignore_duplicate<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if classify_anyhow_error(&e).is_already_exists() => Ok(None),
        Err(e) => Err(e),
    }
}

impl Ec2Client {
    /// Create a security group with its ingress and egress rules
    ///
    /// # Returns
    /// The security group ID
    pub async fn create_security_group(
        &self,
        name: &str,
        spec: &SecurityGroupSpec,
    ) -> Result<ResourceId> {
        info!(name = %name, vpc_id = %spec.vpc_id, "Creating security group");

        let create_response = self
            .client
            .create_security_group()
            .group_name(name)
            .description(&spec.description)
            .vpc_id(spec.vpc_id.as_str())
            .tag_specifications(tags::ec2_tag_spec(
                ResourceType::SecurityGroup,
                self.stack(),
                name,
                name,
            ))
            .send()
            .await
            .context("Failed to create security group")?;

        let sg_id = create_response
            .group_id()
            .context("No security group ID in response")?
            .to_string();

        info!(sg_id = %sg_id, "Created security group, adding rules");

        if !spec.ingress.is_empty() {
            self.client
                .authorize_security_group_ingress()
                .group_id(&sg_id)
                .set_ip_permissions(Some(spec.ingress.iter().map(ip_permission).collect()))
                .send()
                .await
                .context("Failed to add ingress rules to security group")?;
        }

        if !spec.egress.is_empty() {
            // New groups already carry an allow-all egress rule, which EC2
            // reports as a duplicate when it is requested again
            let result = self
                .client
                .authorize_security_group_egress()
                .group_id(&sg_id)
                .set_ip_permissions(Some(spec.egress.iter().map(ip_permission).collect()))
                .send()
                .await
                .context("Failed to add egress rules to security group");
            if ignore_duplicate(result)?.is_none() {
                debug!(sg_id = %sg_id, "Egress rules already present");
            }
        }

        info!(
            sg_id = %sg_id,
            ingress = spec.ingress.len(),
            egress = spec.egress.len(),
            "Security group created"
        );

        Ok(ResourceId::new(sg_id))
    }
}
