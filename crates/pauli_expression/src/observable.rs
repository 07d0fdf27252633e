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

use std::collections::BTreeMap;

use log::{debug, info};
use nalgebra::DMatrix;
use num_complex::Complex64;
use pauli_common::{PauliLabel, basis, reduce_to_representative, simultaneously_measurable};
use pauli_cover::{CliqueCoverStrategy, CompatibilityGraph, CoverOptions, clique_cover_with};

use crate::GroupingError;
use crate::cliques::group_by_representative;
use crate::numeric::{ROUND_ERROR, qubits_of_labels, qubits_of_matrix, trace_of_product};

/// Pauli coefficients of an observable, keyed by label.
pub type Coefficients = BTreeMap<PauliLabel, f64>;

/// Measurement groups keyed by the representative label measured for the group.
pub type CliqueDict = BTreeMap<PauliLabel, Vec<PauliLabel>>;

/// A Hermitian observable `M = sum_P c_P P` given either as its matrix or as the coefficients `c_P`.
#[derive(Debug, Clone)]
pub struct PauliObservable {
    qubits: usize,
    observable: Option<DMatrix<Complex64>>,
    coefficients: Option<Coefficients>,
    graph: Option<CompatibilityGraph<PauliLabel>>,
    clique_dict: Option<CliqueDict>,
}

impl PauliObservable {
    /// Exactly one of `observable` and `coefficients` must be given.
    pub fn new(
        observable: Option<DMatrix<Complex64>>,
        coefficients: Option<Coefficients>,
    ) -> Result<Self, GroupingError> {
        match (observable, coefficients) {
            (Some(observable), None) => Self::from_matrix(observable),
            (None, Some(coefficients)) => Self::from_coefficients(coefficients),
            (Some(_), Some(_)) => Err(GroupingError::configuration(
                "give either an observable matrix or coefficients, not both",
            )),
            (None, None) => Err(GroupingError::configuration(
                "an observable matrix or coefficients are required",
            )),
        }
    }

    pub fn from_matrix(observable: DMatrix<Complex64>) -> Result<Self, GroupingError> {
        let qubits = qubits_of_matrix(&observable)?;
        Ok(Self {
            qubits,
            observable: Some(observable),
            coefficients: None,
            graph: None,
            clique_dict: None,
        })
    }

    pub fn from_coefficients(coefficients: Coefficients) -> Result<Self, GroupingError> {
        let qubits = qubits_of_labels(coefficients.keys())?;
        Ok(Self {
            qubits,
            observable: None,
            coefficients: Some(coefficients),
            graph: None,
            clique_dict: None,
        })
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Decompose the matrix into Pauli coefficients `tr(P M) / 2^n`, dropping
    /// those with magnitude at or below [`ROUND_ERROR`].
    ///
    /// Replaces any earlier coefficients and invalidates the cached graph and grouping.
    pub fn calculate(&mut self) -> Result<&Coefficients, GroupingError> {
        let observable = self.observable.as_ref().ok_or_else(|| {
            GroupingError::configuration("no observable matrix to decompose")
        })?;
        info!("Decomposing {}-qubit observable", self.qubits);
        let dimension = (1usize << self.qubits) as f64;
        let coefficients: Coefficients = basis(self.qubits)
            .into_iter()
            .filter_map(|(label, pauli)| {
                let value = trace_of_product(&pauli, observable).re / dimension;
                (value.abs() > ROUND_ERROR).then_some((label, value))
            })
            .collect();
        debug!("Kept {} nonzero coefficients", coefficients.len());

        self.graph = None;
        self.clique_dict = None;
        Ok(self.coefficients.insert(coefficients))
    }

    pub fn coefficients(&self) -> Result<&Coefficients, GroupingError> {
        self.coefficients
            .as_ref()
            .ok_or_else(GroupingError::not_calculated)
    }

    /// Coefficient of `label`, zero when absent from the decomposition.
    pub fn coefficient(&self, label: &PauliLabel) -> Result<f64, GroupingError> {
        Ok(self.coefficients()?.get(label).copied().unwrap_or(0.0))
    }

    /// Graph on the coefficient labels with an edge between simultaneously measurable labels.
    pub fn get_graph(&mut self) -> Result<&CompatibilityGraph<PauliLabel>, GroupingError> {
        if self.graph.is_none() {
            let graph =
                CompatibilityGraph::new(self.coefficients()?.keys().cloned(), simultaneously_measurable);
            debug!(
                "Built compatibility graph with {} nodes and {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            self.graph = Some(graph);
        }
        self.graph.as_ref().ok_or_else(GroupingError::not_calculated)
    }

    pub fn graph(&self) -> Option<&CompatibilityGraph<PauliLabel>> {
        self.graph.as_ref()
    }

    pub fn get_clique_dict(
        &mut self,
        strategy: CliqueCoverStrategy,
    ) -> Result<&CliqueDict, GroupingError> {
        self.get_clique_dict_with(strategy, &CoverOptions::default())
    }

    /// Group the coefficient labels into cliques and key each by its representative label.
    pub fn get_clique_dict_with(
        &mut self,
        strategy: CliqueCoverStrategy,
        options: &CoverOptions,
    ) -> Result<&CliqueDict, GroupingError> {
        let cover = clique_cover_with(self.get_graph()?, strategy, options)?;
        let groups = group_by_representative(cover, |clique| reduce_to_representative(clique))?;
        info!(
            "Grouped {} labels into {} measurement settings",
            self.coefficients()?.len(),
            groups.len()
        );
        Ok(self.clique_dict.insert(groups))
    }

    /// Grouping from the most recent [`get_clique_dict`](Self::get_clique_dict) call.
    pub fn clique_dict(&self) -> Option<&CliqueDict> {
        self.clique_dict.as_ref()
    }
}
