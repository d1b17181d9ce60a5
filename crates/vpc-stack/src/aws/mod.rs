//! AWS client modules
//!
//! This module provides wrappers around AWS SDK clients for:
//! - EC2: VPC, subnet, gateway, routing and security group creation
//! - context: shared SDK configuration
//! - error: EC2 error classification for user-facing reports

pub mod context;
pub mod ec2;
pub mod error;
pub mod tags;

pub use context::AwsContext;
pub use ec2::Ec2Client;
pub use error::{AwsError, classify_anyhow_error, classify_aws_error};
