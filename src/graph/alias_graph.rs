use std::collections::{HashMap, HashSet};

use petgraph::algo::{is_cyclic_directed, kosaraju_scc};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::models::EntryTable;

/// A link table viewed as a functional graph: every record points at most
/// one hop onward. An edge exists only when the target is itself a key of
/// the table; a chain that leaves the table ends there, which is valid (it
/// reached a zone or an unresolved name).
pub struct AliasGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl AliasGraph {
    pub fn new(table: &EntryTable) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for name in table.keys() {
            let node = graph.add_node(name.clone());
            node_map.insert(name.clone(), node);
        }

        for (name, entry) in table {
            if let Some(target) = &entry.target {
                if let Some(&target_node) = node_map.get(target) {
                    graph.add_edge(node_map[name], target_node, ());
                }
            }
        }

        Self { graph, node_map }
    }

    /// Whether any alias chain in the table cycles.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Whether following `target` hops from `start` revisits an identifier.
    /// A chain whose tail leads into a cycle counts as cyclic.
    pub fn has_cycle(&self, start: &str) -> bool {
        let Some(&node) = self.node_map.get(start) else {
            return false;
        };
        let mut visited = HashSet::from([node]);
        let mut current = node;
        while let Some(next) = self.graph.neighbors(current).next() {
            if !visited.insert(next) {
                return true;
            }
            current = next;
        }
        false
    }

    /// All cycles, as lists of member identifiers.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();

        for scc in kosaraju_scc(&self.graph) {
            if scc.len() > 1 {
                let cycle: Vec<String> = scc.into_iter().map(|n| self.graph[n].clone()).collect();
                cycles.push(cycle);
            } else if self.graph.contains_edge(scc[0], scc[0]) {
                cycles.push(vec![self.graph[scc[0]].clone()]);
            }
        }

        cycles
    }

    /// The lexicographically first identifier whose chain cycles, together
    /// with its immediate target. Drives the cycle diagnostic; sorted so
    /// the report is reproducible across runs.
    pub fn first_cycle(&self) -> Option<(String, String)> {
        if !self.has_cycles() {
            return None;
        }
        let mut names: Vec<&String> = self.node_map.keys().collect();
        names.sort();
        for name in names {
            if self.has_cycle(name) {
                let node = self.node_map[name.as_str()];
                let target = self
                    .graph
                    .neighbors(node)
                    .next()
                    .map(|n| self.graph[n].clone())?;
                return Some((name.clone(), target));
            }
        }
        None
    }
}
