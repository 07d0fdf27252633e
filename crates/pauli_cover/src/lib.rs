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

//! Minimum clique cover over compatibility graphs.
//!
//! A [`CompatibilityGraph`] joins nodes that can share one measurement setting. A clique cover
//! partitions its nodes into cliques, one measurement setting per clique. Every strategy
//! works on a private copy of the graph and returns a disjoint cover of all nodes.

mod coloring;
mod enumerate;
mod error;
mod graph;
mod greedy;
pub mod integer_programming;
mod strategy;

use std::time::Duration;

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

pub use error::CoverError;
pub use graph::CompatibilityGraph;
pub use integer_programming::{CliqueCoverModel, SolverStatus};
pub use strategy::{CliqueCoverStrategy, ColoringOrder};

use graph::WorkingGraph;

/// Default wall-clock budget of the integer programming strategy
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverOptions {
    /// Budget of [`CliqueCoverStrategy::IntegerProgramming`]
    pub time_limit: Duration,
    /// Seed for the randomized strategies. Seeded from the OS when `None`.
    pub seed: Option<u64>,
}

impl Default for CoverOptions {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            seed: None,
        }
    }
}

impl CoverOptions {
    pub fn with_time_limit(self, time_limit: Duration) -> Self {
        Self { time_limit, ..self }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Partition the nodes of `graph` into cliques using `strategy` and default options.
pub fn clique_cover<N: Clone>(
    graph: &CompatibilityGraph<N>,
    strategy: CliqueCoverStrategy,
) -> Result<Vec<Vec<N>>, CoverError> {
    clique_cover_with(graph, strategy, &CoverOptions::default())
}

/// Like [`clique_cover`], selecting the strategy by its name.
pub fn clique_cover_by_name<N: Clone>(
    graph: &CompatibilityGraph<N>,
    strategy: &str,
) -> Result<Vec<Vec<N>>, CoverError> {
    clique_cover(graph, strategy.parse()?)
}

pub fn clique_cover_with<N: Clone>(
    graph: &CompatibilityGraph<N>,
    strategy: CliqueCoverStrategy,
    options: &CoverOptions,
) -> Result<Vec<Vec<N>>, CoverError> {
    let cover = clique_cover_indices(graph, strategy, options)?;
    Ok(cover
        .into_iter()
        .map(|clique| {
            clique
                .into_iter()
                .filter_map(|i| graph.node(i).cloned())
                .collect()
        })
        .collect())
}

/// Clique cover as groups of node indices into `graph`.
pub fn clique_cover_indices<N>(
    graph: &CompatibilityGraph<N>,
    strategy: CliqueCoverStrategy,
    options: &CoverOptions,
) -> Result<Vec<Vec<usize>>, CoverError> {
    info!(
        "Covering {} nodes and {} edges with {}",
        graph.node_count(),
        graph.edge_count(),
        strategy
    );
    let working = WorkingGraph::from_graph(graph);

    let cover = match strategy {
        CliqueCoverStrategy::CliqueRandomSequential => {
            greedy::random_sequential(working, &mut options.rng())
        }
        CliqueCoverStrategy::CliqueApproxFindGreedyEliminate => {
            greedy::approx_find_greedy_eliminate(working)
        }
        CliqueCoverStrategy::CliqueExactFindGreedyEliminate => {
            enumerate::exact_find_greedy_eliminate(working)
        }
        CliqueCoverStrategy::CliqueExactFindOnceGreedyEliminate => {
            enumerate::exact_find_once_greedy_eliminate(working)
        }
        CliqueCoverStrategy::IntegerProgramming => {
            integer_programming::integer_programming(working, options.time_limit)?
        }
        CliqueCoverStrategy::ColoringLargestFirst => {
            color(working, ColoringOrder::LargestFirst, options)
        }
        CliqueCoverStrategy::ColoringSmallestLast => {
            color(working, ColoringOrder::SmallestLast, options)
        }
        CliqueCoverStrategy::ColoringRandomSequential => {
            color(working, ColoringOrder::RandomSequential, options)
        }
        CliqueCoverStrategy::ColoringIndependentSet => {
            color(working, ColoringOrder::IndependentSet, options)
        }
        CliqueCoverStrategy::ColoringConnectedSequentialBfs => {
            color(working, ColoringOrder::ConnectedSequentialBfs, options)
        }
        CliqueCoverStrategy::ColoringConnectedSequentialDfs => {
            color(working, ColoringOrder::ConnectedSequentialDfs, options)
        }
        CliqueCoverStrategy::ColoringSaturationLargestFirst => {
            color(working, ColoringOrder::SaturationLargestFirst, options)
        }
    };

    debug!("{} produced {} cliques", strategy, cover.len());
    debug_assert!(graph.is_clique_cover(&cover));
    Ok(cover)
}

fn color(graph: WorkingGraph, order: ColoringOrder, options: &CoverOptions) -> Vec<Vec<usize>> {
    coloring::coloring_cover(graph, order, &mut options.rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowtie() -> CompatibilityGraph<char> {
        // Triangles a-b-c and c-d-e sharing c.
        CompatibilityGraph::from_edges(
            ['a', 'b', 'c', 'd', 'e'],
            [(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)],
        )
        .unwrap()
    }

    #[test]
    fn every_strategy_partitions_the_nodes() {
        let graph = bowtie();
        let options = CoverOptions::default().with_seed(11);
        for strategy in CliqueCoverStrategy::ALL {
            let cover = clique_cover_indices(&graph, strategy, &options).unwrap();
            assert!(graph.is_clique_cover(&cover), "{strategy}: {cover:?}");
        }
    }

    #[test]
    fn covers_carry_node_values() {
        let graph = bowtie();
        let cover = clique_cover(&graph, CliqueCoverStrategy::IntegerProgramming).unwrap();
        assert_eq!(2, cover.len());
        let mut nodes: Vec<char> = cover.into_iter().flatten().collect();
        nodes.sort();
        assert_eq!(vec!['a', 'b', 'c', 'd', 'e'], nodes);
    }

    #[test]
    fn by_name() {
        let graph = bowtie();
        assert!(clique_cover_by_name(&graph, "coloring_largest_first").is_ok());
        let err = clique_cover_by_name(&graph, "not_a_strategy").unwrap_err();
        assert!(matches!(err, CoverError::UnknownStrategy { .. }));
        assert!(err.to_string().contains("integer_programming"));
    }

    #[test]
    fn seeded_runs_repeat() {
        let graph = bowtie();
        let options = CoverOptions::default().with_seed(42);
        let first = clique_cover_indices(&graph, CliqueCoverStrategy::CliqueRandomSequential, &options);
        let second = clique_cover_indices(&graph, CliqueCoverStrategy::CliqueRandomSequential, &options);
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn coloring_strategies_use_their_own_order() {
        let graph = bowtie();
        let options = CoverOptions::default().with_seed(5);
        for strategy in CliqueCoverStrategy::ALL {
            let Some(order) = strategy.coloring_order() else {
                continue;
            };
            let dispatched = clique_cover_indices(&graph, strategy, &options).unwrap();
            let direct =
                coloring::coloring_cover(WorkingGraph::from_graph(&graph), order, &mut options.rng());
            assert_eq!(direct, dispatched, "{strategy}");
        }
    }
}
