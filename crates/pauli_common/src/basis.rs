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

use crate::PauliLabel;

/// Number of Pauli operators on `qubits` qubits
pub fn basis_len(qubits: usize) -> usize {
    4_usize.pow(qubits as u32)
}

/// All `qubits`-qubit labels in basis order: lexicographic over I, X, Y, Z with the leftmost
/// qubit varying slowest.
pub fn basis_labels(qubits: usize) -> impl Iterator<Item = PauliLabel> {
    (0..basis_len(qubits)).map(move |i| PauliLabel::from_index(i, qubits))
}

/// All `qubits`-qubit Pauli operators with their labels, in the order of [`basis_labels`].
pub fn basis(qubits: usize) -> Vec<(PauliLabel, DMatrix<Complex64>)> {
    basis_labels(qubits)
        .map(|label| {
            let matrix = label.matrix();
            (label, matrix)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_order() {
        let labels: Vec<String> = basis_labels(1).map(|l| l.to_string()).collect();
        assert_eq!(vec!["I", "X", "Y", "Z"], labels);

        let labels: Vec<String> = basis_labels(2).map(|l| l.to_string()).collect();
        assert_eq!(16, labels.len());
        assert_eq!(["II", "IX", "IY", "IZ", "XI"], labels[..5]);
        assert_eq!("ZZ", labels[15]);
    }

    #[test]
    fn basis_is_orthogonal() {
        let paulis = basis(2);
        for (i, (_, a)) in paulis.iter().enumerate() {
            for (j, (_, b)) in paulis.iter().enumerate() {
                let overlap = (a.adjoint() * b).trace() / 4.0;
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((overlap.re - expected).abs() < 1e-12);
                assert!(overlap.im.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn tensor_order_puts_qubit_zero_first() {
        let (label, matrix) = &basis(2)[4];
        assert_eq!("XI", label.to_string());
        // X on the leftmost factor flips the most significant bit.
        assert_eq!(Complex64::new(1.0, 0.0), matrix[(2, 0)]);
        assert_eq!(Complex64::new(0.0, 0.0), matrix[(1, 0)]);
    }
}
