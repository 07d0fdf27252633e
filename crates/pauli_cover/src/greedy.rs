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

//! Greedy clique builders: random sequential scanning and Ramsey-style approximate
//! maximum-clique removal.

use std::collections::BTreeSet;

use log::trace;
use rand::{Rng, seq::SliceRandom};

use crate::graph::WorkingGraph;

/// Build one clique per round by scanning the remaining nodes in random order, keeping every
/// node adjacent to all nodes kept so far. Costs O(|V|^2) per round.
pub(crate) fn random_sequential<R: Rng + ?Sized>(
    mut graph: WorkingGraph,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut cliques = vec![];
    while !graph.is_empty() {
        let mut order: Vec<usize> = graph.nodes().collect();
        order.shuffle(rng);

        let mut clique: Vec<usize> = vec![];
        for node in order {
            if clique.iter().all(|&member| graph.is_adjacent(member, node)) {
                clique.push(node);
            }
        }
        trace!("Random sequential clique: {:?}", clique);
        graph.remove_nodes(&clique);
        cliques.push(clique);
    }
    cliques
}

/// Repeatedly remove the clique found by [`ramsey_clique`] until the graph is empty.
pub(crate) fn approx_find_greedy_eliminate(mut graph: WorkingGraph) -> Vec<Vec<usize>> {
    let mut cliques = vec![];
    while !graph.is_empty() {
        let clique = ramsey_clique(&graph, graph.node_set());
        trace!("Ramsey clique: {:?}", clique);
        graph.remove_nodes(&clique);
        cliques.push(clique.into_iter().collect());
    }
    cliques
}

/// Boppana–Halldórsson recursion: split the candidates on the first candidate's neighbourhood
/// and keep the larger of the clique through that node and the clique avoiding it.
///
/// The avoiding branch is walked as a loop, so recursion depth is bounded by the clique size
/// rather than the candidate count. Ties go to the earliest node. Never returns an empty clique
/// for a non-empty candidate set.
pub(crate) fn ramsey_clique(graph: &WorkingGraph, candidates: &BTreeSet<usize>) -> BTreeSet<usize> {
    let mut remaining = candidates.clone();
    let mut best = BTreeSet::new();
    while let Some(node) = remaining.pop_first() {
        let neighbors: BTreeSet<usize> = remaining
            .intersection(graph.neighbor_set(node))
            .copied()
            .collect();
        for v in &neighbors {
            remaining.remove(v);
        }

        let mut through_node = ramsey_clique(graph, &neighbors);
        through_node.insert(node);
        if through_node.len() > best.len() {
            best = through_node;
        }
    }
    best
}
