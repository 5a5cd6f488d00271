// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cycle detection over node dependencies.
//!
//! Uses depth-first search with a recursion stack: a dependency edge that reaches a
//! node still on the stack closes a cycle, and the stack slice from that node onward
//! is the cycle path. O(V + E).

use crate::graph::Node;
use std::collections::{BTreeMap, HashSet};

/// The first cycle found, as `[a, b, a]`, or `None` for an acyclic graph.
///
/// Roots are visited in ascending id order, so the reported cycle is stable.
pub(crate) fn find_cycle(nodes: &BTreeMap<String, Node>) -> Option<Vec<String>> {
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node_id in nodes.keys() {
        if !visited.contains(node_id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(node_id, nodes, &mut visited, &mut rec_stack, &mut path) {
                return Some(cycle);
            }
        }
    }

    None
}

fn dfs_cycle_detection<'a>(
    node_id: &'a str,
    nodes: &'a BTreeMap<String, Node>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node_id);
    rec_stack.insert(node_id);
    path.push(node_id);

    if let Some(node) = nodes.get(node_id) {
        for (_, dependency) in node.dependencies() {
            let dependency = dependency.as_str();
            if !visited.contains(dependency) {
                if let Some(cycle) = dfs_cycle_detection(dependency, nodes, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(dependency) {
                let cycle_start = path.iter().position(|id| *id == dependency).unwrap_or(0);
                let mut cycle: Vec<String> = path[cycle_start..].iter().map(|id| id.to_string()).collect();
                cycle.push(dependency.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node_id);
    path.pop();
    None
}
