//! Resource graph builder
//!
//! Walks the dependency graph in topological order, describes each resource
//! from the configuration and the identifiers resolved so far, and registers
//! it. The first failure aborts the build: nothing after it is registered and
//! no output is exported. There is no retry and no rollback; re-applying is
//! the provisioning engine's business.

use crate::config::StackConfig;
use crate::error::StackError;
use crate::graph::DependencyGraph;
use crate::outputs::StackOutputs;
use crate::provisioner::Provisioner;
use crate::resources::{
    InternetGatewaySpec, ResourceId, ResourceSpec, Route, RouteTableAssociationSpec,
    RouteTableSpec, SecurityGroupSpec, SecurityRule, SubnetSpec, VpcSpec,
};
use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use vpc_stack_common::defaults::{SECURITY_GROUP_DESCRIPTION, SSH_PORT};
use vpc_stack_common::{Ipv4Cidr, ResourceKind};

/// Identifiers registered so far, looked up on behalf of one node
struct Resolved<'a> {
    kind: ResourceKind,
    graph: &'a DependencyGraph,
    ids: &'a HashMap<ResourceKind, ResourceId>,
}

impl Resolved<'_> {
    fn get(&self, dependency: ResourceKind) -> Result<ResourceId, StackError> {
        if !self.graph.dependencies(self.kind).contains(&dependency) {
            return Err(StackError::UnknownDependency {
                kind: self.kind,
                dependency,
            });
        }
        self.ids
            .get(&dependency)
            .cloned()
            .ok_or(StackError::Unresolved {
                kind: self.kind,
                dependency,
            })
    }
}

/// Name a resource is registered under
pub fn logical_name(kind: ResourceKind, config: &StackConfig) -> &str {
    match kind {
        ResourceKind::Vpc => &config.vpc_name,
        other => other.logical_name(),
    }
}

/// Build the description of `kind` from config and resolved parent ids
fn describe(
    kind: ResourceKind,
    config: &StackConfig,
    resolved: &Resolved<'_>,
) -> Result<ResourceSpec, StackError> {
    let spec = match kind {
        ResourceKind::Vpc => ResourceSpec::Vpc(VpcSpec {
            name: config.vpc_name.clone(),
            cidr_block: config.vpc_cidr,
            enable_dns_support: true,
            enable_dns_hostnames: true,
        }),
        ResourceKind::PublicSubnet => ResourceSpec::Subnet(SubnetSpec {
            vpc_id: resolved.get(ResourceKind::Vpc)?,
            cidr_block: config.public_subnet_cidr,
            availability_zone: config.availability_zone.clone(),
            map_public_ip_on_launch: true,
        }),
        ResourceKind::PrivateSubnet => ResourceSpec::Subnet(SubnetSpec {
            vpc_id: resolved.get(ResourceKind::Vpc)?,
            cidr_block: config.private_subnet_cidr,
            availability_zone: config.availability_zone.clone(),
            map_public_ip_on_launch: false,
        }),
        ResourceKind::InternetGateway => ResourceSpec::InternetGateway(InternetGatewaySpec {
            vpc_id: resolved.get(ResourceKind::Vpc)?,
        }),
        ResourceKind::RouteTable => ResourceSpec::RouteTable(RouteTableSpec {
            vpc_id: resolved.get(ResourceKind::Vpc)?,
            routes: vec![Route {
                destination: Ipv4Cidr::ANYWHERE,
                gateway_id: resolved.get(ResourceKind::InternetGateway)?,
            }],
        }),
        // Only the public subnet is associated; the private subnet keeps the
        // VPC's main route table.
        ResourceKind::RouteTableAssociation => {
            ResourceSpec::RouteTableAssociation(RouteTableAssociationSpec {
                subnet_id: resolved.get(ResourceKind::PublicSubnet)?,
                route_table_id: resolved.get(ResourceKind::RouteTable)?,
            })
        }
        ResourceKind::SecurityGroup => ResourceSpec::SecurityGroup(SecurityGroupSpec {
            vpc_id: resolved.get(ResourceKind::Vpc)?,
            description: SECURITY_GROUP_DESCRIPTION.to_string(),
            ingress: vec![SecurityRule::tcp_port(SSH_PORT, Ipv4Cidr::ANYWHERE)],
            egress: vec![SecurityRule::all_traffic(Ipv4Cidr::ANYWHERE)],
        }),
    };
    Ok(spec)
}

/// Declare the whole stack against `provisioner` and export its outputs.
///
/// Provisioner errors are returned exactly as the provisioner produced them.
#[instrument(skip_all, fields(vpc = %config.vpc_name, region = %config.region))]
pub async fn build_stack<P: Provisioner>(
    config: &StackConfig,
    provisioner: &P,
) -> Result<StackOutputs> {
    config.validate()?;

    let graph = DependencyGraph::stack();
    let order = graph.topological_order()?;
    let mut ids: HashMap<ResourceKind, ResourceId> = HashMap::new();

    for (step, kind) in order.into_iter().enumerate() {
        let spec = describe(
            kind,
            config,
            &Resolved {
                kind,
                graph: &graph,
                ids: &ids,
            },
        )?;
        let name = logical_name(kind, config);
        debug!(step = step + 1, kind = %kind, name = %name, "Registering resource");

        let id = provisioner.register(kind, name, &spec).await?;
        info!(kind = %kind, name = %name, id = %id, "Registered resource");
        ids.insert(kind, id);
    }

    let mut take = |kind: ResourceKind| ids.remove(&kind).ok_or(StackError::MissingOutput(kind));
    let outputs = StackOutputs {
        vpc_id: take(ResourceKind::Vpc)?,
        public_subnet_id: take(ResourceKind::PublicSubnet)?,
        private_subnet_id: take(ResourceKind::PrivateSubnet)?,
        security_group_id: take(ResourceKind::SecurityGroup)?,
    };

    for (key, value) in outputs.entries() {
        provisioner.export(key, value).await?;
    }
    info!(vpc_id = %outputs.vpc_id, "Stack complete");

    Ok(outputs)
}
