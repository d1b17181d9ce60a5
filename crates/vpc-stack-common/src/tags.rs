//! AWS resource tag constants for vpc-stack
//!
//! All taggable resources created by the stack carry these tags so they can
//! be found again from the console or the CLI.
//!
//! ## Tag Schema
//!
//! | Tag Key | Description |
//! |---------|-------------|
//! | `Name` | Console display name (VPC name or logical name) |
//! | `vpc-stack:tool` | Static identifier ("vpc-stack") |
//! | `vpc-stack:stack` | Stack the resource belongs to (the VPC name) |
//! | `vpc-stack:logical-name` | Logical name of the resource within the stack |
//! | `vpc-stack:created-at` | RFC 3339 creation timestamp |

/// Console display name tag
pub const TAG_NAME: &str = "Name";

/// Tag key for tool identification - all vpc-stack resources have this
pub const TAG_TOOL: &str = "vpc-stack:tool";

/// Tag value for tool identification
pub const TAG_TOOL_VALUE: &str = "vpc-stack";

/// Tag key for the owning stack
pub const TAG_STACK: &str = "vpc-stack:stack";

/// Tag key for the resource's logical name
pub const TAG_LOGICAL_NAME: &str = "vpc-stack:logical-name";

/// Tag key for creation timestamp (RFC 3339 format)
pub const TAG_CREATED_AT: &str = "vpc-stack:created-at";

/// Helper to format creation timestamp for tags
pub fn format_created_at(time: chrono::DateTime<chrono::Utc>) -> String {
    time.to_rfc3339()
}
