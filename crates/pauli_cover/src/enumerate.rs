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

//! Clique covers built from exhaustive maximal-clique enumeration.

use std::{cmp::Reverse, collections::BTreeSet};

use log::{debug, trace};

use crate::graph::WorkingGraph;

/// Enumerate every maximal clique of the live graph (Bron–Kerbosch with Tomita pivoting).
/// Each clique is sorted ascending.
pub(crate) fn maximal_cliques(graph: &WorkingGraph) -> Vec<Vec<usize>> {
    let mut cliques = vec![];
    let mut current = vec![];
    expand(
        graph,
        &mut current,
        graph.node_set().clone(),
        BTreeSet::new(),
        &mut cliques,
    );
    cliques
}

fn expand(
    graph: &WorkingGraph,
    current: &mut Vec<usize>,
    mut candidates: BTreeSet<usize>,
    mut excluded: BTreeSet<usize>,
    cliques: &mut Vec<Vec<usize>>,
) {
    if candidates.is_empty() {
        if excluded.is_empty() && !current.is_empty() {
            let mut clique = current.clone();
            clique.sort_unstable();
            cliques.push(clique);
        }
        return;
    }

    // Branch only on candidates outside the pivot's neighbourhood.
    let Some(pivot) = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| graph.neighbor_set(u).intersection(&candidates).count())
    else {
        return;
    };
    let branches: Vec<usize> = candidates
        .difference(graph.neighbor_set(pivot))
        .copied()
        .collect();

    for v in branches {
        let adjacent = graph.neighbor_set(v);
        current.push(v);
        expand(
            graph,
            current,
            candidates.intersection(adjacent).copied().collect(),
            excluded.intersection(adjacent).copied().collect(),
            cliques,
        );
        current.pop();
        candidates.remove(&v);
        excluded.insert(v);
    }
}

/// Remove a maximum clique per round, enumerating all maximal cliques of the shrinking graph
/// every round.
pub(crate) fn exact_find_greedy_eliminate(mut graph: WorkingGraph) -> Vec<Vec<usize>> {
    let mut cover = vec![];
    while !graph.is_empty() {
        let mut largest: Vec<usize> = vec![];
        for clique in maximal_cliques(&graph) {
            if clique.len() > largest.len() {
                largest = clique;
            }
        }
        trace!("Maximum clique: {:?}", largest);
        graph.remove_nodes(&largest);
        cover.push(largest);
    }
    cover
}

/// Enumerate the maximal cliques of the original graph once, then repeatedly claim the largest
/// remaining set and subtract its nodes from all others.
///
/// After subtraction a remaining set need not be maximal in the shrunken graph, so this is a
/// fast approximation rather than an exact minimum cover.
pub(crate) fn exact_find_once_greedy_eliminate(graph: WorkingGraph) -> Vec<Vec<usize>> {
    let mut remaining: Vec<BTreeSet<usize>> = maximal_cliques(&graph)
        .into_iter()
        .map(|clique| clique.into_iter().collect())
        .collect();
    debug!("Enumerated {} maximal cliques", remaining.len());
    remaining.sort_by_key(|clique| Reverse(clique.len()));

    let mut cover = vec![];
    while remaining.first().is_some_and(|clique| !clique.is_empty()) {
        let claimed = remaining[0].clone();
        for clique in remaining.iter_mut() {
            clique.retain(|v| !claimed.contains(v));
        }
        remaining.sort_by_key(|clique| Reverse(clique.len()));
        trace!("Claimed clique: {:?}", claimed);
        cover.push(claimed.into_iter().collect());
    }
    cover
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompatibilityGraph;

    fn graph(n: usize, edges: &[(usize, usize)]) -> CompatibilityGraph<usize> {
        CompatibilityGraph::from_edges(0..n, edges.iter().copied()).unwrap()
    }

    #[test]
    fn enumerate_maximal_cliques() {
        // Triangle 0-1-2 with a pendant 2-3 and an isolated node 4.
        let g = graph(5, &[(0, 1), (0, 2), (1, 2), (2, 3)]);
        let mut cliques = maximal_cliques(&WorkingGraph::from_graph(&g));
        cliques.sort();
        assert_eq!(vec![vec![0, 1, 2], vec![2, 3], vec![4]], cliques);
    }

    #[test]
    fn enumerate_on_empty_graph() {
        let g = graph(0, &[]);
        assert!(maximal_cliques(&WorkingGraph::from_graph(&g)).is_empty());
        assert!(exact_find_greedy_eliminate(WorkingGraph::from_graph(&g)).is_empty());
        assert!(exact_find_once_greedy_eliminate(WorkingGraph::from_graph(&g)).is_empty());
    }

    #[test]
    fn complete_graph_is_one_clique() {
        let edges: Vec<_> = (0..5)
            .flat_map(|a| ((a + 1)..5).map(move |b| (a, b)))
            .collect();
        let g = graph(5, &edges);
        assert_eq!(
            vec![vec![0, 1, 2, 3, 4]],
            maximal_cliques(&WorkingGraph::from_graph(&g))
        );
        assert_eq!(1, exact_find_greedy_eliminate(WorkingGraph::from_graph(&g)).len());
    }

    #[test]
    fn exact_strategies_cover() {
        let g = graph(5, &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)]);
        let exact = exact_find_greedy_eliminate(WorkingGraph::from_graph(&g));
        assert!(g.is_clique_cover(&exact));
        assert_eq!(vec![0, 1, 2], exact[0]);
        assert_eq!(2, exact.len());

        let once = exact_find_once_greedy_eliminate(WorkingGraph::from_graph(&g));
        assert!(g.is_clique_cover(&once));
        assert_eq!(2, once.len());
    }
}
