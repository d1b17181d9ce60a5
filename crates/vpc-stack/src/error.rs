//! Errors raised by the stack itself
//!
//! Provisioner failures are not wrapped in these types; they are propagated
//! as the `anyhow::Error` the provisioner returned.

use thiserror::Error;
use vpc_stack_common::ResourceKind;

/// Internal errors of the dependency graph and builder
#[derive(Debug, Error)]
pub enum StackError {
    /// The graph has a cycle through the listed kinds
    #[error("Dependency cycle between: {}", format_kinds(.0))]
    Cycle(Vec<ResourceKind>),

    /// A node depends on a kind that is not part of the graph
    #[error("{kind} depends on {dependency}, which is not part of the graph")]
    UnknownDependency {
        kind: ResourceKind,
        dependency: ResourceKind,
    },

    /// A dependency had not been registered when its dependent was built
    #[error("{kind} requires the {dependency} identifier, but it has not been registered")]
    Unresolved {
        kind: ResourceKind,
        dependency: ResourceKind,
    },

    /// The graph finished without registering an exported resource
    #[error("No identifier registered for {0}")]
    MissingOutput(ResourceKind),
}

fn format_kinds(kinds: &[ResourceKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
