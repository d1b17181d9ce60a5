//! Route table creation and subnet association

use super::Ec2Client;
use crate::aws::tags;
use crate::resources::{ResourceId, RouteTableAssociationSpec, RouteTableSpec};
use anyhow::{Context, Result};
use aws_sdk_ec2::types::ResourceType;
use tracing::{debug, info};

impl Ec2Client {
    /// Create a route table and add its routes in order
    pub async fn create_route_table(&self, name: &str, spec: &RouteTableSpec) -> Result<ResourceId> {
        info!(name = %name, vpc_id = %spec.vpc_id, routes = spec.routes.len(), "Creating route table");

        let response = self
            .client
            .create_route_table()
            .vpc_id(spec.vpc_id.as_str())
            .tag_specifications(tags::ec2_tag_spec(
                ResourceType::RouteTable,
                self.stack(),
                name,
                name,
            ))
            .send()
            .await
            .context("Failed to create route table")?;

        let rtb_id = response
            .route_table()
            .and_then(|r| r.route_table_id())
            .context("No route table ID in response")?
            .to_string();

        for route in &spec.routes {
            self.client
                .create_route()
                .route_table_id(&rtb_id)
                .destination_cidr_block(route.destination.to_string())
                .gateway_id(route.gateway_id.as_str())
                .send()
                .await
                .with_context(|| {
                    format!(
                        "Failed to add route {} -> {} to route table",
                        route.destination, route.gateway_id
                    )
                })?;
            debug!(rtb_id = %rtb_id, destination = %route.destination, gateway_id = %route.gateway_id, "Added route");
        }

        info!(rtb_id = %rtb_id, "Created route table");
        Ok(ResourceId::new(rtb_id))
    }

    /// Associate a subnet with a route table
    pub async fn associate_route_table(
        &self,
        name: &str,
        spec: &RouteTableAssociationSpec,
    ) -> Result<ResourceId> {
        info!(
            name = %name,
            subnet_id = %spec.subnet_id,
            rtb_id = %spec.route_table_id,
            "Associating route table"
        );

        let response = self
            .client
            .associate_route_table()
            .route_table_id(spec.route_table_id.as_str())
            .subnet_id(spec.subnet_id.as_str())
            .send()
            .await
            .context("Failed to associate route table with subnet")?;

        let association_id = response
            .association_id()
            .context("No association ID in response")?
            .to_string();

        info!(association_id = %association_id, "Associated route table");
        Ok(ResourceId::new(association_id))
    }
}
