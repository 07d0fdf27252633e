// Copyright contributors to the Pauli Grouping project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeSet;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::CoverError;

/// Undirected graph whose edges join simultaneously measurable nodes.
///
/// Node `i` is the `i`-th node given at construction, so node indices are stable and can be used
/// to address nodes in cover results.
#[derive(Debug, Clone)]
pub struct CompatibilityGraph<N> {
    graph: UnGraph<N, ()>,
}

impl<N> CompatibilityGraph<N> {
    /// Build the graph by testing every unordered pair of nodes with `compatible`.
    pub fn new(nodes: impl IntoIterator<Item = N>, compatible: impl Fn(&N, &N) -> bool) -> Self {
        let mut graph = UnGraph::new_undirected();
        let indices: Vec<NodeIndex> = nodes.into_iter().map(|n| graph.add_node(n)).collect();
        for (i, &a) in indices.iter().enumerate() {
            for &b in &indices[i + 1..] {
                if compatible(&graph[a], &graph[b]) {
                    graph.add_edge(a, b, ());
                }
            }
        }
        Self { graph }
    }

    /// Build the graph from explicit edges between node indices.
    pub fn from_edges(
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, CoverError> {
        let mut graph = UnGraph::new_undirected();
        for n in nodes {
            graph.add_node(n);
        }
        let count = graph.node_count();
        for (a, b) in edges {
            if a == b || a >= count || b >= count {
                return Err(CoverError::InvalidEdge(a, b, count));
            }
            let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
            if !graph.contains_edge(a, b) {
                graph.add_edge(a, b, ());
            }
        }
        Ok(Self { graph })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, i: usize) -> Option<&N> {
        self.graph.node_weight(NodeIndex::new(i))
    }

    /// Nodes in index order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_indices().map(|i| &self.graph[i])
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.graph.contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(NodeIndex::new(i)).map(|n| n.index())
    }

    /// Check that `groups` is a clique partition: every node appears in exactly one group and
    /// every two members of a group are adjacent.
    pub fn is_clique_cover(&self, groups: &[Vec<usize>]) -> bool {
        let mut seen = vec![false; self.node_count()];
        for group in groups {
            for (i, &a) in group.iter().enumerate() {
                match seen.get_mut(a) {
                    Some(s) if !*s => *s = true,
                    _ => return false,
                }
                if group[i + 1..].iter().any(|&b| !self.is_adjacent(a, b)) {
                    return false;
                }
            }
        }
        seen.into_iter().all(|s| s)
    }
}

/// An owned, shrinkable copy of a [`CompatibilityGraph`]'s adjacency.
///
/// Strategies remove nodes from this copy; removing a node also drops it from every
/// neighbour set, so neighbour sets only ever hold live nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorkingGraph {
    neighbors: Vec<BTreeSet<usize>>,
    alive: BTreeSet<usize>,
}

impl WorkingGraph {
    pub fn from_graph<N>(graph: &CompatibilityGraph<N>) -> Self {
        let neighbors = (0..graph.node_count())
            .map(|i| graph.neighbors(i).filter(|&j| j != i).collect())
            .collect();
        Self {
            neighbors,
            alive: (0..graph.node_count()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Live nodes in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive.iter().copied()
    }

    pub fn node_set(&self) -> &BTreeSet<usize> {
        &self.alive
    }

    pub fn neighbor_set(&self, v: usize) -> &BTreeSet<usize> {
        &self.neighbors[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].contains(&b)
    }

    pub fn remove_node(&mut self, v: usize) {
        if !self.alive.remove(&v) {
            return;
        }
        for u in std::mem::take(&mut self.neighbors[v]) {
            self.neighbors[u].remove(&v);
        }
    }

    pub fn remove_nodes<'a>(&mut self, nodes: impl IntoIterator<Item = &'a usize>) {
        for &v in nodes {
            self.remove_node(v);
        }
    }

    /// The graph on the same live nodes with edges exactly where this graph has none.
    pub fn complement(&self) -> Self {
        let mut neighbors = vec![BTreeSet::new(); self.neighbors.len()];
        for &u in &self.alive {
            neighbors[u] = self
                .alive
                .iter()
                .copied()
                .filter(|&v| v != u && !self.neighbors[u].contains(&v))
                .collect();
        }
        Self {
            neighbors,
            alive: self.alive.clone(),
        }
    }
}
