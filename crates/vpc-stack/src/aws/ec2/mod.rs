//! EC2 provisioner
//!
//! Maps each resource description onto the EC2 API calls that create it.

mod network;
mod routing;
mod security_group;

use crate::aws::context::AwsContext;
use crate::provisioner::Provisioner;
use crate::resources::{ResourceId, ResourceSpec};
use anyhow::Result;
use aws_sdk_ec2::Client;
use tracing::info;
use vpc_stack_common::ResourceKind;

/// EC2 client that provisions the stack's resources
pub struct Ec2Client {
    pub(crate) client: Client,
    /// Stack name, written to the `vpc-stack:stack` tag
    stack: String,
}

impl Ec2Client {
    /// Create an EC2 client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext, stack: impl Into<String>) -> Self {
        Self {
            client: ctx.ec2_client(),
            stack: stack.into(),
        }
    }

    /// Stack name used for tagging
    pub fn stack(&self) -> &str {
        &self.stack
    }
}

impl Provisioner for Ec2Client {
    async fn register(
        &self,
        kind: ResourceKind,
        name: &str,
        spec: &ResourceSpec,
    ) -> Result<ResourceId> {
        info!(kind = %kind, name = %name, "Creating resource");
        match spec {
            ResourceSpec::Vpc(vpc) => self.create_vpc(name, vpc).await,
            ResourceSpec::Subnet(subnet) => self.create_subnet(name, subnet).await,
            ResourceSpec::InternetGateway(igw) => self.create_internet_gateway(name, igw).await,
            ResourceSpec::RouteTable(table) => self.create_route_table(name, table).await,
            ResourceSpec::RouteTableAssociation(assoc) => {
                self.associate_route_table(name, assoc).await
            }
            ResourceSpec::SecurityGroup(sg) => self.create_security_group(name, sg).await,
        }
    }

    async fn export(&self, name: &str, value: &ResourceId) -> Result<()> {
        info!(output = %name, value = %value, "Exported stack output");
        Ok(())
    }
}
