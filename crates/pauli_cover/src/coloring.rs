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

//! Clique covers from greedy coloring of the complement graph: nodes sharing a color are
//! pairwise compatible, so every color class is a clique of the original graph.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
};

use log::trace;
use rand::{Rng, seq::SliceRandom};

use crate::{ColoringOrder, graph::WorkingGraph};

pub(crate) fn coloring_cover<R: Rng + ?Sized>(
    graph: WorkingGraph,
    order: ColoringOrder,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let conflicts = graph.complement();
    let colors = match order {
        ColoringOrder::SaturationLargestFirst => saturation_largest_first(&conflicts),
        _ => {
            let nodes = node_order(&conflicts, order, rng);
            greedy_color(&conflicts, nodes)
        }
    };

    let mut classes: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (node, color) in colors {
        classes.entry(color).or_default().push(node);
    }
    trace!("Color classes: {:?}", classes);
    classes.into_values().collect()
}

/// The order in which [`greedy_color`] visits the nodes.
fn node_order<R: Rng + ?Sized>(
    graph: &WorkingGraph,
    order: ColoringOrder,
    rng: &mut R,
) -> Vec<usize> {
    match order {
        ColoringOrder::LargestFirst => {
            let mut nodes: Vec<usize> = graph.nodes().collect();
            nodes.sort_by_key(|&v| Reverse(graph.degree(v)));
            nodes
        }
        ColoringOrder::RandomSequential => {
            let mut nodes: Vec<usize> = graph.nodes().collect();
            nodes.shuffle(rng);
            nodes
        }
        ColoringOrder::SmallestLast => smallest_last(graph),
        ColoringOrder::IndependentSet => independent_sets(graph),
        ColoringOrder::ConnectedSequentialBfs => connected_sequential(graph, false),
        ColoringOrder::ConnectedSequentialDfs => connected_sequential(graph, true),
        // DSatur chooses its order while coloring.
        ColoringOrder::SaturationLargestFirst => graph.nodes().collect(),
    }
}

/// Repeatedly strip a node of minimum remaining degree; color in reverse stripping order.
fn smallest_last(graph: &WorkingGraph) -> Vec<usize> {
    let mut degrees: BTreeMap<usize, usize> = graph.nodes().map(|v| (v, graph.degree(v))).collect();
    let mut order = Vec::with_capacity(degrees.len());
    while let Some(v) = degrees
        .iter()
        .min_by_key(|&(_, &degree)| degree)
        .map(|(&v, _)| v)
    {
        degrees.remove(&v);
        for u in graph.neighbor_set(v) {
            if let Some(degree) = degrees.get_mut(u) {
                *degree -= 1;
            }
        }
        order.push(v);
    }
    order.reverse();
    order
}

/// Concatenate maximal independent sets, each grown from minimum-degree nodes of what is left.
fn independent_sets(graph: &WorkingGraph) -> Vec<usize> {
    let mut remaining = graph.node_set().clone();
    let mut order = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let mut candidates = remaining.clone();
        while let Some(v) = candidates
            .iter()
            .copied()
            .min_by_key(|&v| graph.neighbor_set(v).intersection(&candidates).count())
        {
            candidates.remove(&v);
            for u in graph.neighbor_set(v) {
                candidates.remove(u);
            }
            remaining.remove(&v);
            order.push(v);
        }
    }
    order
}

/// Visit each connected component from its lowest node in breadth- or depth-first order.
fn connected_sequential(graph: &WorkingGraph, depth_first: bool) -> Vec<usize> {
    let mut visited: BTreeSet<usize> = BTreeSet::new();
    let mut order = Vec::with_capacity(graph.len());
    for source in graph.nodes() {
        if !visited.insert(source) {
            continue;
        }
        order.push(source);
        if depth_first {
            let mut stack: Vec<(Vec<usize>, usize)> =
                vec![(graph.neighbor_set(source).iter().copied().collect(), 0)];
            while let Some((neighbors, next)) = stack.last_mut() {
                let Some(&w) = neighbors.get(*next) else {
                    stack.pop();
                    continue;
                };
                *next += 1;
                if visited.insert(w) {
                    order.push(w);
                    stack.push((graph.neighbor_set(w).iter().copied().collect(), 0));
                }
            }
        } else {
            let mut queue = VecDeque::from([source]);
            while let Some(v) = queue.pop_front() {
                for &w in graph.neighbor_set(v) {
                    if visited.insert(w) {
                        order.push(w);
                        queue.push_back(w);
                    }
                }
            }
        }
    }
    order
}

fn smallest_free_color(used: &BTreeSet<usize>) -> usize {
    let mut color = 0;
    while used.contains(&color) {
        color += 1;
    }
    color
}

/// First-fit coloring in the given order. Returns (node, color) in coloring order.
fn greedy_color(graph: &WorkingGraph, order: Vec<usize>) -> Vec<(usize, usize)> {
    let mut colors: HashMap<usize, usize> = HashMap::with_capacity(order.len());
    let mut assigned = Vec::with_capacity(order.len());
    for v in order {
        let used: BTreeSet<usize> = graph
            .neighbor_set(v)
            .iter()
            .filter_map(|u| colors.get(u).copied())
            .collect();
        let color = smallest_free_color(&used);
        colors.insert(v, color);
        assigned.push((v, color));
    }
    assigned
}

/// DSatur: always color the uncolored node seeing the most distinct colors, breaking ties by
/// degree and then by lowest index.
fn saturation_largest_first(graph: &WorkingGraph) -> Vec<(usize, usize)> {
    let mut uncolored = graph.node_set().clone();
    let mut seen: HashMap<usize, BTreeSet<usize>> = HashMap::new();
    let mut assigned = Vec::with_capacity(uncolored.len());
    while let Some(v) = uncolored.iter().copied().max_by_key(|&v| {
        (
            seen.get(&v).map_or(0, |colors| colors.len()),
            graph.degree(v),
            Reverse(v),
        )
    }) {
        let color = smallest_free_color(seen.get(&v).unwrap_or(&BTreeSet::new()));
        uncolored.remove(&v);
        for &u in graph.neighbor_set(v) {
            if uncolored.contains(&u) {
                seen.entry(u).or_default().insert(color);
            }
        }
        assigned.push((v, color));
    }
    assigned
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::CompatibilityGraph;

    const ORDERS: [ColoringOrder; 7] = [
        ColoringOrder::LargestFirst,
        ColoringOrder::SmallestLast,
        ColoringOrder::RandomSequential,
        ColoringOrder::IndependentSet,
        ColoringOrder::ConnectedSequentialBfs,
        ColoringOrder::ConnectedSequentialDfs,
        ColoringOrder::SaturationLargestFirst,
    ];

    /// 5-cycle plus an isolated node.
    fn cycle_graph() -> CompatibilityGraph<usize> {
        CompatibilityGraph::from_edges(0..6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap()
    }

    fn is_proper(graph: &WorkingGraph, colors: &[(usize, usize)]) -> bool {
        let lookup: HashMap<usize, usize> = colors.iter().copied().collect();
        colors.iter().all(|&(v, c)| {
            graph
                .neighbor_set(v)
                .iter()
                .all(|u| lookup.get(u) != Some(&c))
        })
    }

    #[test]
    fn every_order_visits_every_node_once() {
        let w = WorkingGraph::from_graph(&cycle_graph());
        let mut rng = StdRng::seed_from_u64(3);
        for order in ORDERS {
            let mut nodes = node_order(&w, order, &mut rng);
            nodes.sort();
            assert_eq!((0..6).collect::<Vec<_>>(), nodes, "{order:?}");
        }
    }

    #[test]
    fn colorings_are_proper() {
        let w = WorkingGraph::from_graph(&cycle_graph()).complement();
        let mut rng = StdRng::seed_from_u64(3);
        for order in ORDERS {
            let colors = match order {
                ColoringOrder::SaturationLargestFirst => saturation_largest_first(&w),
                _ => greedy_color(&w, node_order(&w, order, &mut rng)),
            };
            assert_eq!(6, colors.len());
            assert!(is_proper(&w, &colors), "{order:?}");
        }
    }

    #[test]
    fn color_classes_are_cliques() {
        let graph = cycle_graph();
        let mut rng = StdRng::seed_from_u64(5);
        for order in ORDERS {
            let cover = coloring_cover(WorkingGraph::from_graph(&graph), order, &mut rng);
            assert!(graph.is_clique_cover(&cover), "{order:?}: {cover:?}");
            // A 5-cycle needs three cliques, the isolated node one more.
            assert!(cover.len() >= 4);
        }
    }

    #[test]
    fn dsatur_is_optimal_on_bipartite_complements() {
        // Complement of two disjoint cliques is complete bipartite; DSatur two-colors it.
        let graph =
            CompatibilityGraph::from_edges(0..6, [(0, 1), (0, 2), (1, 2), (3, 4), (3, 5), (4, 5)])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let cover = coloring_cover(
            WorkingGraph::from_graph(&graph),
            ColoringOrder::SaturationLargestFirst,
            &mut rng,
        );
        assert_eq!(2, cover.len());
    }

    #[test]
    fn smallest_last_order_on_path() {
        let graph = CompatibilityGraph::from_edges(0..3, [(0, 1), (1, 2)]).unwrap();
        let order = smallest_last(&WorkingGraph::from_graph(&graph));
        // An endpoint is stripped first, so it is colored last.
        assert_eq!(3, order.len());
        assert_ne!(Some(&1), order.last());
    }
}
