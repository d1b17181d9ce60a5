//! Resource descriptions handed to a provisioner
//!
//! Descriptions are built from already-resolved identifiers only: a subnet
//! description holds the VPC's [`ResourceId`], not a reference to the VPC
//! description, so it cannot exist before the VPC was registered.

use serde::Serialize;
use std::fmt;
use vpc_stack_common::Ipv4Cidr;

/// Opaque identifier assigned by the provisioning engine (e.g. `vpc-0abc...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// VPC description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpcSpec {
    /// Value of the `Name` tag
    pub name: String,
    pub cidr_block: Ipv4Cidr,
    pub enable_dns_support: bool,
    pub enable_dns_hostnames: bool,
}

/// Subnet description (public and private subnets share the shape)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetSpec {
    pub vpc_id: ResourceId,
    pub cidr_block: Ipv4Cidr,
    pub availability_zone: String,
    /// Assign a public IPv4 address to instances launched in the subnet
    pub map_public_ip_on_launch: bool,
}

/// Internet gateway description; the provisioner attaches it to the VPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternetGatewaySpec {
    pub vpc_id: ResourceId,
}

/// A single route: traffic for `destination` goes through `gateway_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub destination: Ipv4Cidr,
    pub gateway_id: ResourceId,
}

/// Route table description with its routes, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTableSpec {
    pub vpc_id: ResourceId,
    pub routes: Vec<Route>,
}

/// Links one subnet to one route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTableAssociationSpec {
    pub subnet_id: ResourceId,
    pub route_table_id: ResourceId,
}

/// IP protocol of a security group rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    /// Every protocol (`-1` in the EC2 API)
    All,
}

impl Protocol {
    /// Protocol string as the EC2 API expects it
    pub fn as_aws_str(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::All => "-1",
        }
    }
}

/// Ingress or egress rule of a security group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRule {
    pub protocol: Protocol,
    pub from_port: i32,
    pub to_port: i32,
    pub cidr_blocks: Vec<Ipv4Cidr>,
}

impl SecurityRule {
    /// TCP traffic on a single port from `source`
    pub fn tcp_port(port: i32, source: Ipv4Cidr) -> Self {
        Self {
            protocol: Protocol::Tcp,
            from_port: port,
            to_port: port,
            cidr_blocks: vec![source],
        }
    }

    /// All protocols and ports to/from `cidr`.
    ///
    /// Ports are 0-0; EC2 ignores port ranges when the protocol is `-1`.
    pub fn all_traffic(cidr: Ipv4Cidr) -> Self {
        Self {
            protocol: Protocol::All,
            from_port: 0,
            to_port: 0,
            cidr_blocks: vec![cidr],
        }
    }
}

/// Security group description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityGroupSpec {
    pub vpc_id: ResourceId,
    pub description: String,
    pub ingress: Vec<SecurityRule>,
    pub egress: Vec<SecurityRule>,
}

/// Any resource description the stack registers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ResourceSpec {
    Vpc(VpcSpec),
    Subnet(SubnetSpec),
    InternetGateway(InternetGatewaySpec),
    RouteTable(RouteTableSpec),
    RouteTableAssociation(RouteTableAssociationSpec),
    SecurityGroup(SecurityGroupSpec),
}

impl ResourceSpec {
    /// Identifiers of other resources this description references
    pub fn referenced_ids(&self) -> Vec<&ResourceId> {
        match self {
            ResourceSpec::Vpc(_) => vec![],
            ResourceSpec::Subnet(s) => vec![&s.vpc_id],
            ResourceSpec::InternetGateway(g) => vec![&g.vpc_id],
            ResourceSpec::RouteTable(r) => std::iter::once(&r.vpc_id)
                .chain(r.routes.iter().map(|route| &route.gateway_id))
                .collect(),
            ResourceSpec::RouteTableAssociation(a) => vec![&a.subnet_id, &a.route_table_id],
            ResourceSpec::SecurityGroup(sg) => vec![&sg.vpc_id],
        }
    }
}
