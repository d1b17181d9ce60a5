//! Configuration types for the stack

use thiserror::Error;
use vpc_stack_common::defaults::{
    DEFAULT_AVAILABILITY_ZONE, DEFAULT_PRIVATE_SUBNET_CIDR, DEFAULT_PUBLIC_SUBNET_CIDR,
    DEFAULT_REGION, DEFAULT_VPC_CIDR, DEFAULT_VPC_NAME,
};
use vpc_stack_common::{Ipv4Cidr, ResourceKind};

/// Validation failures, reported before anything is registered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("VPC name must not be empty")]
    EmptyVpcName,

    #[error("{kind} CIDR {subnet} is outside the VPC CIDR {vpc}")]
    SubnetOutsideVpc {
        kind: ResourceKind,
        subnet: Ipv4Cidr,
        vpc: Ipv4Cidr,
    },

    #[error("Public subnet {public} overlaps private subnet {private}")]
    SubnetsOverlap { public: Ipv4Cidr, private: Ipv4Cidr },

    #[error("Availability zone '{zone}' is not in region '{region}'")]
    ZoneOutsideRegion { zone: String, region: String },
}

/// Everything the builder needs to know about the stack.
///
/// Passed into [`crate::stack::build_stack`] at call time; there is no
/// global configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    /// AWS region
    pub region: String,
    /// Availability zone for both subnets
    pub availability_zone: String,
    /// VPC name: logical name, `Name` tag and stack tag of the VPC
    pub vpc_name: String,
    pub vpc_cidr: Ipv4Cidr,
    pub public_subnet_cidr: Ipv4Cidr,
    pub private_subnet_cidr: Ipv4Cidr,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            availability_zone: DEFAULT_AVAILABILITY_ZONE.to_string(),
            vpc_name: DEFAULT_VPC_NAME.to_string(),
            vpc_cidr: parse_default(DEFAULT_VPC_CIDR),
            public_subnet_cidr: parse_default(DEFAULT_PUBLIC_SUBNET_CIDR),
            private_subnet_cidr: parse_default(DEFAULT_PRIVATE_SUBNET_CIDR),
        }
    }
}

fn parse_default(cidr: &str) -> Ipv4Cidr {
    cidr.parse()
        .unwrap_or_else(|e| panic!("default CIDR {cidr} is invalid: {e}"))
}

impl StackConfig {
    /// Check the layout is one EC2 will accept
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vpc_name.trim().is_empty() {
            return Err(ConfigError::EmptyVpcName);
        }

        for (kind, subnet) in [
            (ResourceKind::PublicSubnet, self.public_subnet_cidr),
            (ResourceKind::PrivateSubnet, self.private_subnet_cidr),
        ] {
            if !self.vpc_cidr.contains(&subnet) {
                return Err(ConfigError::SubnetOutsideVpc {
                    kind,
                    subnet,
                    vpc: self.vpc_cidr,
                });
            }
        }

        if self.public_subnet_cidr.overlaps(&self.private_subnet_cidr) {
            return Err(ConfigError::SubnetsOverlap {
                public: self.public_subnet_cidr,
                private: self.private_subnet_cidr,
            });
        }

        // Zones are the region name plus a letter or a local-zone suffix:
        // ap-southeast-1b, us-west-2-lax-1a. `us-east-10a` is not in us-east-1.
        let in_region = self
            .availability_zone
            .strip_prefix(self.region.as_str())
            .and_then(|suffix| suffix.chars().next())
            .is_some_and(|c| c.is_ascii_lowercase() || c == '-');
        if !in_region {
            return Err(ConfigError::ZoneOutsideRegion {
                zone: self.availability_zone.clone(),
                region: self.region.clone(),
            });
        }

        Ok(())
    }
}
