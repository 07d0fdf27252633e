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

use nalgebra::DMatrix;
use num_complex::Complex64;
use pauli_common::PauliLabel;

use crate::GroupingError;

/// Coefficients with magnitude at or below this are dropped from decompositions.
pub const ROUND_ERROR: f64 = 1e-10;

/// Number of qubits a square 2^n x 2^n matrix acts on.
pub(crate) fn qubits_of_matrix(matrix: &DMatrix<Complex64>) -> Result<usize, GroupingError> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rows < 2 || !rows.is_power_of_two() {
        return Err(GroupingError::configuration(format!(
            "matrix must be 2^n x 2^n with n >= 1, got {rows} x {cols}"
        )));
    }
    Ok(rows.trailing_zeros() as usize)
}

/// Common length of a non-empty collection of labels.
pub(crate) fn qubits_of_labels<'a>(
    labels: impl IntoIterator<Item = &'a PauliLabel>,
) -> Result<usize, GroupingError> {
    let mut labels = labels.into_iter();
    let first = labels
        .next()
        .ok_or_else(|| GroupingError::configuration("coefficient map must not be empty"))?;
    if first.is_empty() {
        return Err(GroupingError::configuration("Pauli labels must not be empty"));
    }
    if let Some(other) = labels.find(|l| l.len() != first.len()) {
        return Err(GroupingError::configuration(format!(
            "Pauli labels {first} and {other} act on different numbers of qubits"
        )));
    }
    Ok(first.len())
}

/// `trace(lhs * rhs)` without forming the product.
pub(crate) fn trace_of_product(lhs: &DMatrix<Complex64>, rhs: &DMatrix<Complex64>) -> Complex64 {
    lhs.component_mul(&rhs.transpose()).sum()
}
