//! vpc-stack - declares a small AWS network stack
//!
//! Builds a VPC with one public and one private subnet, an internet
//! gateway, a public route table and an SSH security group, registering
//! each resource with a [`Provisioner`] in dependency order and exporting
//! the identifiers downstream stacks consume.

pub mod aws;
pub mod config;
pub mod error;
pub mod graph;
pub mod outputs;
pub mod plan;
pub mod provisioner;
pub mod resources;
pub mod stack;

pub use config::{ConfigError, StackConfig};
pub use error::StackError;
pub use outputs::StackOutputs;
pub use plan::PlanProvisioner;
pub use provisioner::Provisioner;
pub use stack::build_stack;
