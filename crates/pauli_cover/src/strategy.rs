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

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::CoverError;

/// Vertex orderings for the greedy coloring of the complement graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColoringOrder {
    LargestFirst,
    SmallestLast,
    RandomSequential,
    IndependentSet,
    ConnectedSequentialBfs,
    ConnectedSequentialDfs,
    SaturationLargestFirst,
}

/// The available clique cover algorithms.
///
/// Only [`CliqueCoverStrategy::IntegerProgramming`] returns a minimum cover; all other
/// strategies are heuristics.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CliqueCoverStrategy {
    /// Build each clique from a shuffled scan of the remaining nodes.
    #[default]
    #[value(name = "clique_random_sequential")]
    CliqueRandomSequential,
    /// Repeatedly remove an approximately maximum (Ramsey) clique.
    #[value(name = "clique_approx_find_greedy_eliminate")]
    CliqueApproxFindGreedyEliminate,
    /// Repeatedly remove a maximum clique, re-enumerating maximal cliques every round.
    #[value(name = "clique_exact_find_greedy_eliminate")]
    CliqueExactFindGreedyEliminate,
    /// Enumerate maximal cliques once and greedily claim the largest remainder.
    /// Cliques shrink as nodes are claimed, so the cover is not minimum in general.
    #[value(name = "clique_exact_find_once_greedy_eliminate")]
    CliqueExactFindOnceGreedyEliminate,
    #[value(name = "coloring_largest_first")]
    ColoringLargestFirst,
    #[value(name = "coloring_smallest_last")]
    ColoringSmallestLast,
    #[value(name = "coloring_random_sequential")]
    ColoringRandomSequential,
    #[value(name = "coloring_independent_set")]
    ColoringIndependentSet,
    #[value(name = "coloring_connected_sequential_bfs")]
    ColoringConnectedSequentialBfs,
    #[value(name = "coloring_connected_sequential_dfs")]
    ColoringConnectedSequentialDfs,
    #[value(name = "coloring_saturation_largest_first")]
    ColoringSaturationLargestFirst,
    /// Exact binary program solved by time-boxed branch and bound.
    #[value(name = "integer_programming")]
    IntegerProgramming,
}

impl CliqueCoverStrategy {
    pub const ALL: [CliqueCoverStrategy; 12] = [
        Self::CliqueRandomSequential,
        Self::CliqueApproxFindGreedyEliminate,
        Self::CliqueExactFindGreedyEliminate,
        Self::CliqueExactFindOnceGreedyEliminate,
        Self::ColoringLargestFirst,
        Self::ColoringSmallestLast,
        Self::ColoringRandomSequential,
        Self::ColoringIndependentSet,
        Self::ColoringConnectedSequentialBfs,
        Self::ColoringConnectedSequentialDfs,
        Self::ColoringSaturationLargestFirst,
        Self::IntegerProgramming,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CliqueRandomSequential => "clique_random_sequential",
            Self::CliqueApproxFindGreedyEliminate => "clique_approx_find_greedy_eliminate",
            Self::CliqueExactFindGreedyEliminate => "clique_exact_find_greedy_eliminate",
            Self::CliqueExactFindOnceGreedyEliminate => "clique_exact_find_once_greedy_eliminate",
            Self::ColoringLargestFirst => "coloring_largest_first",
            Self::ColoringSmallestLast => "coloring_smallest_last",
            Self::ColoringRandomSequential => "coloring_random_sequential",
            Self::ColoringIndependentSet => "coloring_independent_set",
            Self::ColoringConnectedSequentialBfs => "coloring_connected_sequential_bfs",
            Self::ColoringConnectedSequentialDfs => "coloring_connected_sequential_dfs",
            Self::ColoringSaturationLargestFirst => "coloring_saturation_largest_first",
            Self::IntegerProgramming => "integer_programming",
        }
    }

    /// The vertex ordering of a coloring strategy
    pub fn coloring_order(&self) -> Option<ColoringOrder> {
        match self {
            Self::ColoringLargestFirst => Some(ColoringOrder::LargestFirst),
            Self::ColoringSmallestLast => Some(ColoringOrder::SmallestLast),
            Self::ColoringRandomSequential => Some(ColoringOrder::RandomSequential),
            Self::ColoringIndependentSet => Some(ColoringOrder::IndependentSet),
            Self::ColoringConnectedSequentialBfs => Some(ColoringOrder::ConnectedSequentialBfs),
            Self::ColoringConnectedSequentialDfs => Some(ColoringOrder::ConnectedSequentialDfs),
            Self::ColoringSaturationLargestFirst => Some(ColoringOrder::SaturationLargestFirst),
            _ => None,
        }
    }

    /// Whether the strategy guarantees a minimum cover when it succeeds.
    pub fn is_exact(&self) -> bool {
        *self == Self::IntegerProgramming
    }

    /// Comma-separated list of every strategy name
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CliqueCoverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CliqueCoverStrategy {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| CoverError::UnknownStrategy {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}
