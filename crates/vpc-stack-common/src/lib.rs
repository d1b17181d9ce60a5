//! vpc-stack-common - Shared types and utilities
//!
//! This crate provides the types shared by the stack builder and its
//! provisioners, without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`cidr`]: IPv4 CIDR block parsing and containment checks
//! - [`defaults`]: Default configuration values
//! - [`resource_kind`]: Resource kinds and their dependency edges
//! - [`tags`]: AWS resource tag constants for discovery

pub mod cidr;
pub mod defaults;
pub mod resource_kind;
pub mod tags;

// Re-export commonly used types
pub use cidr::{CidrError, Ipv4Cidr};
pub use resource_kind::ResourceKind;
