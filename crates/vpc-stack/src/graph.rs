//! Dependency graph over the stack's resources
//!
//! Construction order is a topological sort of the graph. Kahn's algorithm is
//! used with ties broken by declaration order, so for the stack graph the
//! order is exactly VPC, public subnet, private subnet, internet gateway,
//! route table, association, security group.

use crate::error::StackError;
use std::collections::HashMap;
use vpc_stack_common::ResourceKind;

/// Directed graph from each resource kind to the kinds it depends on
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Nodes in declaration order, each with its dependencies
    nodes: Vec<(ResourceKind, Vec<ResourceKind>)>,
}

impl DependencyGraph {
    /// Build a graph from `(kind, dependencies)` pairs in declaration order
    pub fn new(nodes: impl IntoIterator<Item = (ResourceKind, Vec<ResourceKind>)>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// The fixed graph of the VPC stack
    pub fn stack() -> Self {
        Self::new(
            ResourceKind::ALL
                .iter()
                .map(|kind| (*kind, kind.dependencies().to_vec())),
        )
    }

    /// Dependencies of `kind`, or an empty slice if it is not in the graph
    pub fn dependencies(&self, kind: ResourceKind) -> &[ResourceKind] {
        self.nodes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, deps)| deps.as_slice())
            .unwrap_or_default()
    }

    /// Topological order: every kind appears after all of its dependencies
    pub fn topological_order(&self) -> Result<Vec<ResourceKind>, StackError> {
        let index: HashMap<ResourceKind, usize> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, (kind, _))| (*kind, i))
            .collect();

        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for (i, (kind, deps)) in self.nodes.iter().enumerate() {
            for dep in deps {
                let d = *index.get(dep).ok_or(StackError::UnknownDependency {
                    kind: *kind,
                    dependency: *dep,
                })?;
                in_degree[i] += 1;
                dependents[d].push(i);
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut done = vec![false; self.nodes.len()];
        // Lowest ready index first keeps declaration order among independent nodes
        while let Some(next) = (0..self.nodes.len()).find(|i| !done[*i] && in_degree[*i] == 0) {
            done[next] = true;
            order.push(self.nodes[next].0);
            for dependent in &dependents[next] {
                in_degree[*dependent] -= 1;
            }
        }

        if order.len() < self.nodes.len() {
            let stuck = self
                .nodes
                .iter()
                .enumerate()
                .filter(|(i, _)| !done[*i])
                .map(|(_, (kind, _))| *kind)
                .collect();
            return Err(StackError::Cycle(stuck));
        }

        Ok(order)
    }
}
