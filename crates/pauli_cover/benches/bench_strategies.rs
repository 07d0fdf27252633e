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

//! Benchmarks for the clique cover strategies.
//!
//! Each strategy covers the compatibility graph of 40 random 4-qubit Pauli labels.
//!
//! Run with:
//!
//! ```sh
//! cargo bench --package pauli_cover --bench bench_strategies
//! ```

use std::{collections::BTreeSet, hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};
use pauli_common::{PauliLabel, simultaneously_measurable};
use pauli_cover::{CliqueCoverStrategy, CompatibilityGraph, CoverOptions, clique_cover_indices};
use rand::{SeedableRng, rngs::StdRng};

fn label_graph() -> CompatibilityGraph<PauliLabel> {
    let mut rng = StdRng::seed_from_u64(2025);
    let mut labels = BTreeSet::new();
    while labels.len() < 40 {
        labels.insert(PauliLabel::random(4, &mut rng));
    }
    CompatibilityGraph::new(labels, simultaneously_measurable)
}

fn bench_strategies(c: &mut Criterion) {
    let graph = label_graph();
    let options = CoverOptions::default()
        .with_seed(7)
        .with_time_limit(Duration::from_secs(1));

    let mut group = c.benchmark_group("clique_cover");
    for strategy in CliqueCoverStrategy::ALL {
        group.bench_function(strategy.name(), |b| {
            b.iter(|| {
                // A timed-out solve still costs the full budget, so errors are not fatal here.
                let cover = clique_cover_indices(black_box(&graph), strategy, &options);
                black_box(cover.map(|c| c.len()).unwrap_or(0))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
