//! VPC, subnet and internet gateway creation

use super::Ec2Client;
use crate::aws::tags;
use crate::resources::{InternetGatewaySpec, ResourceId, SubnetSpec, VpcSpec};
use anyhow::{Context, Result};
use aws_sdk_ec2::types::{AttributeBooleanValue, ResourceType};
use tracing::{debug, info};

fn bool_attribute(value: bool) -> AttributeBooleanValue {
    AttributeBooleanValue::builder().value(value).build()
}

impl Ec2Client {
    /// Create a VPC and set its DNS attributes
    pub async fn create_vpc(&self, name: &str, spec: &VpcSpec) -> Result<ResourceId> {
        info!(name = %spec.name, cidr = %spec.cidr_block, "Creating VPC");

        let response = self
            .client
            .create_vpc()
            .cidr_block(spec.cidr_block.to_string())
            .tag_specifications(tags::ec2_tag_spec(
                ResourceType::Vpc,
                self.stack(),
                name,
                &spec.name,
            ))
            .send()
            .await
            .context("Failed to create VPC")?;

        let vpc_id = response
            .vpc()
            .and_then(|v| v.vpc_id())
            .context("No VPC ID in response")?
            .to_string();

        // ModifyVpcAttribute accepts one attribute per call
        self.client
            .modify_vpc_attribute()
            .vpc_id(&vpc_id)
            .enable_dns_support(bool_attribute(spec.enable_dns_support))
            .send()
            .await
            .context("Failed to set DNS support on VPC")?;
        self.client
            .modify_vpc_attribute()
            .vpc_id(&vpc_id)
            .enable_dns_hostnames(bool_attribute(spec.enable_dns_hostnames))
            .send()
            .await
            .context("Failed to set DNS hostnames on VPC")?;

        info!(vpc_id = %vpc_id, "Created VPC");
        Ok(ResourceId::new(vpc_id))
    }

    /// Create a subnet, enabling public IP assignment if requested
    pub async fn create_subnet(&self, name: &str, spec: &SubnetSpec) -> Result<ResourceId> {
        info!(
            name = %name,
            vpc_id = %spec.vpc_id,
            cidr = %spec.cidr_block,
            az = %spec.availability_zone,
            "Creating subnet"
        );

        let response = self
            .client
            .create_subnet()
            .vpc_id(spec.vpc_id.as_str())
            .cidr_block(spec.cidr_block.to_string())
            .availability_zone(&spec.availability_zone)
            .tag_specifications(tags::ec2_tag_spec(
                ResourceType::Subnet,
                self.stack(),
                name,
                name,
            ))
            .send()
            .await
            .with_context(|| format!("Failed to create subnet {name}"))?;

        let subnet_id = response
            .subnet()
            .and_then(|s| s.subnet_id())
            .context("No subnet ID in response")?
            .to_string();

        // New subnets never map public IPs, so only the public one needs a call
        if spec.map_public_ip_on_launch {
            self.client
                .modify_subnet_attribute()
                .subnet_id(&subnet_id)
                .map_public_ip_on_launch(bool_attribute(true))
                .send()
                .await
                .context("Failed to enable public IP assignment on subnet")?;
            debug!(subnet_id = %subnet_id, "Enabled public IP assignment");
        }

        info!(subnet_id = %subnet_id, "Created subnet");
        Ok(ResourceId::new(subnet_id))
    }

    /// Create an internet gateway and attach it to its VPC
    pub async fn create_internet_gateway(
        &self,
        name: &str,
        spec: &InternetGatewaySpec,
    ) -> Result<ResourceId> {
        info!(name = %name, vpc_id = %spec.vpc_id, "Creating internet gateway");

        let response = self
            .client
            .create_internet_gateway()
            .tag_specifications(tags::ec2_tag_spec(
                ResourceType::InternetGateway,
                self.stack(),
                name,
                name,
            ))
            .send()
            .await
            .context("Failed to create internet gateway")?;

        let igw_id = response
            .internet_gateway()
            .and_then(|g| g.internet_gateway_id())
            .context("No internet gateway ID in response")?
            .to_string();

        self.client
            .attach_internet_gateway()
            .internet_gateway_id(&igw_id)
            .vpc_id(spec.vpc_id.as_str())
            .send()
            .await
            .context("Failed to attach internet gateway to VPC")?;

        info!(igw_id = %igw_id, vpc_id = %spec.vpc_id, "Created and attached internet gateway");
        Ok(ResourceId::new(igw_id))
    }
}
