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
use std::ops::{Deref, DerefMut};

use log::{debug, info};
use nalgebra::DMatrix;
use num_complex::Complex64;
use pauli_common::{
    PauliLabel, basis, basis_labels, basis_len, commutes, reduce_to_representative,
    simultaneously_measurable,
};
use pauli_cover::{CliqueCoverStrategy, CompatibilityGraph, CoverOptions, clique_cover_with};
use serde::{Deserialize, Serialize};

use crate::GroupingError;
use crate::cliques::group_by_representative;
use crate::numeric::{ROUND_ERROR, qubits_of_labels, qubits_of_matrix, trace_of_product};

/// A (preparation, measurement) label pair indexing one transfer matrix entry.
pub type LabelPair = (PauliLabel, PauliLabel);

pub type TransferCoefficients = BTreeMap<LabelPair, f64>;

/// Measurement groups of label pairs keyed by their representative pair.
pub type TransferCliqueDict = BTreeMap<LabelPair, Vec<LabelPair>>;

/// One transfer matrix entry in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferCoefficient {
    pub prep: PauliLabel,
    pub meas: PauliLabel,
    pub value: f64,
}

impl From<(&LabelPair, &f64)> for TransferCoefficient {
    fn from(((prep, meas), value): (&LabelPair, &f64)) -> Self {
        Self {
            prep: prep.clone(),
            meas: meas.clone(),
            value: *value,
        }
    }
}

/// Pauli transfer matrix `R[Pm, Pp] = tr(Pm G Pp G^dagger) / 2^n` of a gate `G`,
/// stored sparsely by (preparation, measurement) label pair.
#[derive(Debug, Clone)]
pub struct PauliTransferMatrix {
    qubits: usize,
    gate: Option<DMatrix<Complex64>>,
    coefficients: Option<TransferCoefficients>,
    stabilizer_prep: Vec<PauliLabel>,
    stabilizer_meas: Vec<PauliLabel>,
    graph: Option<CompatibilityGraph<LabelPair>>,
    clique_dict: Option<TransferCliqueDict>,
}

impl PauliTransferMatrix {
    /// Exactly one of `gate` and `coefficients` must be given.
    pub fn new(
        gate: Option<DMatrix<Complex64>>,
        coefficients: Option<TransferCoefficients>,
    ) -> Result<Self, GroupingError> {
        match (gate, coefficients) {
            (Some(gate), None) => Self::from_gate(gate),
            (None, Some(coefficients)) => Self::from_coefficients(coefficients),
            (Some(_), Some(_)) => Err(GroupingError::configuration(
                "give either a gate matrix or transfer coefficients, not both",
            )),
            (None, None) => Err(GroupingError::configuration(
                "a gate matrix or transfer coefficients are required",
            )),
        }
    }

    pub fn from_gate(gate: DMatrix<Complex64>) -> Result<Self, GroupingError> {
        let qubits = qubits_of_matrix(&gate)?;
        Ok(Self::with_parts(qubits, Some(gate), None))
    }

    pub fn from_coefficients(coefficients: TransferCoefficients) -> Result<Self, GroupingError> {
        let qubits = qubits_of_labels(coefficients.keys().flat_map(|(p, m)| [p, m]))?;
        Ok(Self::with_parts(qubits, None, Some(coefficients)))
    }

    fn with_parts(
        qubits: usize,
        gate: Option<DMatrix<Complex64>>,
        coefficients: Option<TransferCoefficients>,
    ) -> Self {
        Self {
            qubits,
            gate,
            coefficients,
            stabilizer_prep: Vec::new(),
            stabilizer_meas: Vec::new(),
            graph: None,
            clique_dict: None,
        }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Compute every entry whose magnitude exceeds [`ROUND_ERROR`].
    ///
    /// When stabilizers are set, only preparation labels commuting with every
    /// preparation stabilizer and measurement labels commuting with every
    /// measurement stabilizer are evaluated.
    pub fn calculate(&mut self) -> Result<&TransferCoefficients, GroupingError> {
        let gate = self
            .gate
            .as_ref()
            .ok_or_else(|| GroupingError::configuration("no gate matrix to decompose"))?;
        info!("Computing transfer matrix of {}-qubit gate", self.qubits);

        let paulis = basis(self.qubits);
        let admitted = |stabilizers: &[PauliLabel]| {
            paulis
                .iter()
                .filter(|(label, _)| stabilizers.iter().all(|s| commutes(label, s)))
                .collect::<Vec<_>>()
        };
        let preps = admitted(&self.stabilizer_prep);
        let meas = admitted(&self.stabilizer_meas);
        debug!(
            "Evaluating {} preparation and {} measurement labels",
            preps.len(),
            meas.len()
        );

        let dimension = (1usize << self.qubits) as f64;
        let adjoint = gate.adjoint();
        let mut coefficients = TransferCoefficients::new();
        for (prep_label, prep) in preps {
            let evolved = gate * prep * &adjoint;
            for (meas_label, measured) in &meas {
                let value = trace_of_product(measured, &evolved).re / dimension;
                if value.abs() > ROUND_ERROR {
                    coefficients.insert((prep_label.clone(), meas_label.clone()), value);
                }
            }
        }
        debug!("Kept {} nonzero entries", coefficients.len());

        self.graph = None;
        self.clique_dict = None;
        Ok(self.coefficients.insert(coefficients))
    }

    pub fn coefficients(&self) -> Result<&TransferCoefficients, GroupingError> {
        self.coefficients
            .as_ref()
            .ok_or_else(GroupingError::not_calculated)
    }

    /// Dense `4^n x 4^n` matrix with rows indexed by preparation label and
    /// columns by measurement label. Entries not present are NaN.
    pub fn get_matrix(&self) -> Result<DMatrix<f64>, GroupingError> {
        let coefficients = self.coefficients()?;
        let len = basis_len(self.qubits);
        let mut matrix = DMatrix::from_element(len, len, f64::NAN);
        for ((prep, meas), value) in coefficients {
            matrix[(prep.index(), meas.index())] = *value;
        }
        Ok(matrix)
    }

    /// `(tr(R^T R) - 1) / (4^n - 1)` with absent entries counted as zero.
    pub fn get_unitarity(&self) -> Result<f64, GroupingError> {
        let matrix = self.get_matrix()?.map(|x| if x.is_nan() { 0.0 } else { x });
        let squared = (matrix.transpose() * &matrix).trace();
        Ok((squared - 1.0) / (basis_len(self.qubits) as f64 - 1.0))
    }

    /// Every basis pair, with `None` where no entry was retained.
    pub fn get_complemented_ptm(
        &self,
    ) -> Result<BTreeMap<LabelPair, Option<f64>>, GroupingError> {
        let coefficients = self.coefficients()?;
        let labels: Vec<PauliLabel> = basis_labels(self.qubits).collect();
        let mut complemented = BTreeMap::new();
        for prep in &labels {
            for meas in &labels {
                let key = (prep.clone(), meas.clone());
                let value = coefficients.get(&key).copied();
                complemented.insert(key, value);
            }
        }
        Ok(complemented)
    }

    /// Graph on the retained label pairs. Two pairs are adjacent when both their
    /// preparation labels and their measurement labels are simultaneously measurable.
    pub fn get_graph(&mut self) -> Result<&CompatibilityGraph<LabelPair>, GroupingError> {
        if self.graph.is_none() {
            let graph = CompatibilityGraph::new(
                self.coefficients()?.keys().cloned(),
                |(prep_a, meas_a), (prep_b, meas_b)| {
                    simultaneously_measurable(prep_a, prep_b)
                        && simultaneously_measurable(meas_a, meas_b)
                },
            );
            debug!(
                "Built compatibility graph with {} nodes and {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            self.graph = Some(graph);
        }
        self.graph.as_ref().ok_or_else(GroupingError::not_calculated)
    }

    pub fn graph(&self) -> Option<&CompatibilityGraph<LabelPair>> {
        self.graph.as_ref()
    }

    pub fn get_clique_dict(
        &mut self,
        strategy: CliqueCoverStrategy,
    ) -> Result<&TransferCliqueDict, GroupingError> {
        self.get_clique_dict_with(strategy, &CoverOptions::default())
    }

    /// Group the label pairs into cliques keyed by their (preparation, measurement)
    /// representative pair.
    pub fn get_clique_dict_with(
        &mut self,
        strategy: CliqueCoverStrategy,
        options: &CoverOptions,
    ) -> Result<&TransferCliqueDict, GroupingError> {
        let cover = clique_cover_with(self.get_graph()?, strategy, options)?;
        let groups = group_by_representative(cover, |clique| {
            let prep = reduce_to_representative(clique.iter().map(|(p, _)| p))?;
            let meas = reduce_to_representative(clique.iter().map(|(_, m)| m))?;
            Some((prep, meas))
        })?;
        info!(
            "Grouped {} entries into {} preparation and measurement settings",
            self.coefficients()?.len(),
            groups.len()
        );
        Ok(self.clique_dict.insert(groups))
    }

    pub fn clique_dict(&self) -> Option<&TransferCliqueDict> {
        self.clique_dict.as_ref()
    }
}

/// A [`PauliTransferMatrix`] restricted to preparations and measurements commuting
/// with given stabilizers.
#[derive(Debug, Clone)]
pub struct StabilizerPauliTransferMatrix(PauliTransferMatrix);

impl StabilizerPauliTransferMatrix {
    pub fn new(
        gate: Option<DMatrix<Complex64>>,
        coefficients: Option<TransferCoefficients>,
        stabilizer_prep: Vec<PauliLabel>,
        stabilizer_meas: Vec<PauliLabel>,
    ) -> Result<Self, GroupingError> {
        let mut inner = PauliTransferMatrix::new(gate, coefficients)?;
        let qubits = inner.qubits;
        if let Some(s) = stabilizer_prep
            .iter()
            .chain(&stabilizer_meas)
            .find(|s| s.len() != qubits)
        {
            return Err(GroupingError::configuration(format!(
                "stabilizer {s} does not act on {qubits} qubits"
            )));
        }
        inner.stabilizer_prep = stabilizer_prep;
        inner.stabilizer_meas = stabilizer_meas;
        Ok(Self(inner))
    }

    pub fn stabilizer_prep(&self) -> &[PauliLabel] {
        &self.0.stabilizer_prep
    }

    pub fn stabilizer_meas(&self) -> &[PauliLabel] {
        &self.0.stabilizer_meas
    }
}

impl Deref for StabilizerPauliTransferMatrix {
    type Target = PauliTransferMatrix;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StabilizerPauliTransferMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
