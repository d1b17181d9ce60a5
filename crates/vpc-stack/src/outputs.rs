//! Named outputs exported at the end of a successful build

use crate::resources::ResourceId;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Output key for the VPC id
pub const VPC_ID: &str = "vpcId";
/// Output key for the public subnet id
pub const PUBLIC_SUBNET_ID: &str = "publicSubnetId";
/// Output key for the private subnet id
pub const PRIVATE_SUBNET_ID: &str = "privateSubnetId";
/// Output key for the security group id
pub const SECURITY_GROUP_ID: &str = "securityGroupId";

/// The four identifiers downstream consumers rely on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackOutputs {
    pub vpc_id: ResourceId,
    pub public_subnet_id: ResourceId,
    pub private_subnet_id: ResourceId,
    pub security_group_id: ResourceId,
}

impl StackOutputs {
    /// `(key, value)` pairs in export order
    pub fn entries(&self) -> [(&'static str, &ResourceId); 4] {
        [
            (VPC_ID, &self.vpc_id),
            (PUBLIC_SUBNET_ID, &self.public_subnet_id),
            (PRIVATE_SUBNET_ID, &self.private_subnet_id),
            (SECURITY_GROUP_ID, &self.security_group_id),
        ]
    }

    /// Write the outputs as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write outputs to {}", path.display()))
    }
}
