//! Resource kinds and dependency edges
//!
//! The stack is a fixed graph of seven nodes. Every edge points from a
//! resource to a resource whose identifier it needs, so a kind may only be
//! registered after all of its dependencies have been.

use serde::Serialize;
use std::fmt;

/// Resources declared by the stack, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// The VPC (every other resource depends on it)
    Vpc,
    /// Subnet with public IP assignment on launch
    PublicSubnet,
    /// Subnet without public IP assignment
    PrivateSubnet,
    /// Internet gateway attached to the VPC
    InternetGateway,
    /// Route table holding the default route through the gateway
    RouteTable,
    /// Association of the public subnet with the route table
    RouteTableAssociation,
    /// Security group allowing inbound SSH
    SecurityGroup,
}

impl ResourceKind {
    /// Every kind, in declaration order
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Vpc,
        ResourceKind::PublicSubnet,
        ResourceKind::PrivateSubnet,
        ResourceKind::InternetGateway,
        ResourceKind::RouteTable,
        ResourceKind::RouteTableAssociation,
        ResourceKind::SecurityGroup,
    ];

    /// Kinds whose identifiers this kind consumes
    pub fn dependencies(self) -> &'static [ResourceKind] {
        match self {
            ResourceKind::Vpc => &[],
            ResourceKind::PublicSubnet
            | ResourceKind::PrivateSubnet
            | ResourceKind::InternetGateway
            | ResourceKind::SecurityGroup => &[ResourceKind::Vpc],
            ResourceKind::RouteTable => &[ResourceKind::Vpc, ResourceKind::InternetGateway],
            ResourceKind::RouteTableAssociation => {
                &[ResourceKind::PublicSubnet, ResourceKind::RouteTable]
            }
        }
    }

    /// Logical name the resource is registered under.
    ///
    /// The VPC is registered under the configured VPC name instead; `"vpc"`
    /// is only its fallback.
    pub fn logical_name(self) -> &'static str {
        match self {
            ResourceKind::Vpc => "vpc",
            ResourceKind::PublicSubnet => "public-subnet",
            ResourceKind::PrivateSubnet => "private-subnet",
            ResourceKind::InternetGateway => "internet-gateway",
            ResourceKind::RouteTable => "public-route-table",
            ResourceKind::RouteTableAssociation => "public-route-table-association",
            ResourceKind::SecurityGroup => "security-group",
        }
    }

    /// EC2 identifier prefix for this kind (`vpc-`, `subnet-`, ...)
    pub fn id_prefix(self) -> &'static str {
        match self {
            ResourceKind::Vpc => "vpc",
            ResourceKind::PublicSubnet | ResourceKind::PrivateSubnet => "subnet",
            ResourceKind::InternetGateway => "igw",
            ResourceKind::RouteTable => "rtb",
            ResourceKind::RouteTableAssociation => "rtbassoc",
            ResourceKind::SecurityGroup => "sg",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Vpc => "VPC",
            ResourceKind::PublicSubnet => "public subnet",
            ResourceKind::PrivateSubnet => "private subnet",
            ResourceKind::InternetGateway => "internet gateway",
            ResourceKind::RouteTable => "route table",
            ResourceKind::RouteTableAssociation => "route table association",
            ResourceKind::SecurityGroup => "security group",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vpc_has_no_dependencies() {
        assert!(ResourceKind::Vpc.dependencies().is_empty());
    }

    #[test]
    fn test_everything_else_reaches_vpc() {
        fn reaches_vpc(kind: ResourceKind) -> bool {
            kind == ResourceKind::Vpc || kind.dependencies().iter().any(|d| reaches_vpc(*d))
        }
        for kind in ResourceKind::ALL {
            assert!(reaches_vpc(kind), "{kind} does not depend on the VPC");
        }
    }

    #[test]
    fn test_dependencies_declared_earlier() {
        for kind in ResourceKind::ALL {
            for dep in kind.dependencies() {
                assert!(
                    *dep < kind,
                    "{kind} depends on {dep}, which is declared after it"
                );
            }
        }
    }

    #[test]
    fn test_route_table_needs_gateway() {
        assert!(
            ResourceKind::RouteTable
                .dependencies()
                .contains(&ResourceKind::InternetGateway)
        );
    }

    #[test]
    fn test_private_subnet_is_not_associated() {
        for kind in ResourceKind::ALL {
            assert!(!kind.dependencies().contains(&ResourceKind::PrivateSubnet));
        }
    }
}
