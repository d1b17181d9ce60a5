//! Default configuration values for the stack
//!
//! These reproduce the network layout the stack has always been deployed
//! with; every value can be overridden from the command line.

/// Default AWS region
pub const DEFAULT_REGION: &str = "ap-southeast-1";

/// Default availability zone for both subnets
pub const DEFAULT_AVAILABILITY_ZONE: &str = "ap-southeast-1b";

/// Default VPC name (also the VPC's logical name and `Name` tag)
pub const DEFAULT_VPC_NAME: &str = "my-vpc-asad";

/// Default VPC CIDR block
pub const DEFAULT_VPC_CIDR: &str = "10.0.0.0/16";

/// Default public subnet CIDR block
pub const DEFAULT_PUBLIC_SUBNET_CIDR: &str = "10.0.1.0/24";

/// Default private subnet CIDR block
pub const DEFAULT_PRIVATE_SUBNET_CIDR: &str = "10.0.2.0/24";

/// Destination of the default route and source of the SSH rule
pub const ANYWHERE_CIDR: &str = "0.0.0.0/0";

/// Port opened for inbound SSH
pub const SSH_PORT: i32 = 22;

/// Security group description
pub const SECURITY_GROUP_DESCRIPTION: &str = "Allow SSH";
