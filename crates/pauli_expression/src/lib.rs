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

//! Pauli decompositions of observables and transfer matrices, grouped into
//! simultaneously measurable cliques.

mod cliques;
mod error;
pub mod indicator;
mod numeric;
mod observable;
mod transfer_matrix;

pub use error::GroupingError;
pub use indicator::{
    average_gate_fidelity, energy, energy_from_histograms, expectation_from_histogram,
    single_qubit_fidelity_limit, two_qubit_fidelity_limit,
};
pub use numeric::ROUND_ERROR;
pub use observable::{CliqueDict, Coefficients, PauliObservable};
pub use transfer_matrix::{
    LabelPair, PauliTransferMatrix, StabilizerPauliTransferMatrix, TransferCliqueDict,
    TransferCoefficient, TransferCoefficients,
};
