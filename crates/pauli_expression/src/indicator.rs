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

//! Figures of merit computed from decompositions and measurement results.

use std::collections::BTreeMap;

use log::debug;
use pauli_common::PauliLabel;

use crate::{GroupingError, PauliObservable, PauliTransferMatrix};

/// `sum_P c_P <P>` over labels of `observable` that also appear in `expected`,
/// where `expected` holds measured expectation values `<P>` as its coefficients.
pub fn energy(
    observable: &PauliObservable,
    expected: &PauliObservable,
) -> Result<f64, GroupingError> {
    let expected = expected.coefficients()?;
    Ok(observable
        .coefficients()?
        .iter()
        .filter_map(|(label, coefficient)| expected.get(label).map(|e| coefficient * e))
        .sum())
}

/// Average gate fidelity between a target transfer matrix and an ansatz.
///
/// Entries missing from the ansatz count as zero. The overlap is normalized by
/// the target's own squared norm before conversion to a fidelity.
pub fn average_gate_fidelity(
    target: &PauliTransferMatrix,
    ansatz: &PauliTransferMatrix,
) -> Result<f64, GroupingError> {
    if target.qubits() != ansatz.qubits() {
        return Err(GroupingError::DimensionMismatch {
            target: target.qubits(),
            ansatz: ansatz.qubits(),
        });
    }
    let target_entries = target.coefficients()?;
    let ansatz_entries = ansatz.coefficients()?;

    let norm: f64 = target_entries.values().map(|t| t * t).sum();
    if norm == 0.0 {
        return Err(GroupingError::configuration(
            "target transfer matrix has no nonzero entries",
        ));
    }
    let overlap: f64 = target_entries
        .iter()
        .filter_map(|(key, t)| ansatz_entries.get(key).map(|a| t * a))
        .sum();

    let dimension = (1usize << target.qubits()) as f64;
    let overlap = overlap * dimension * dimension / norm;
    let fidelity = (overlap / dimension + 1.0) / (1.0 + dimension);
    debug!("Average gate fidelity {fidelity}");
    Ok(fidelity)
}

/// Expectation value of `label` from a histogram of measured bitstrings.
///
/// Each bitstring contributes its weight with sign `(-1)^k`, where `k` counts the
/// `'1'` outcomes at the non-identity positions of `label`.
pub fn expectation_from_histogram(
    label: &PauliLabel,
    histogram: &BTreeMap<String, f64>,
) -> Result<f64, GroupingError> {
    let mut expectation = 0.0;
    for (bits, weight) in histogram {
        if bits.chars().count() != label.len() {
            return Err(GroupingError::configuration(format!(
                "bitstring {bits:?} does not match {}-qubit label {label}",
                label.len()
            )));
        }
        let ones = bits
            .chars()
            .zip(label.iter())
            .filter(|(bit, pauli)| *bit == '1' && !pauli.is_identity())
            .count();
        expectation += if ones % 2 == 0 { *weight } else { -*weight };
    }
    Ok(expectation)
}

/// Energy of `observable` from one histogram per measurement setting.
///
/// `histograms` is keyed like the observable's clique dictionary, and each member of
/// a clique is evaluated on its group's histogram.
pub fn energy_from_histograms(
    observable: &PauliObservable,
    histograms: &BTreeMap<PauliLabel, BTreeMap<String, f64>>,
) -> Result<f64, GroupingError> {
    let groups = observable.clique_dict().ok_or_else(|| {
        GroupingError::configuration("observable has not been grouped, call get_clique_dict() first")
    })?;
    let mut energy = 0.0;
    for (setting, members) in groups {
        let histogram = histograms.get(setting).ok_or_else(|| {
            GroupingError::configuration(format!("no histogram for measurement setting {setting}"))
        })?;
        for member in members {
            energy += observable.coefficient(member)? * expectation_from_histogram(member, histogram)?;
        }
    }
    Ok(energy)
}

/// Fidelity bound of a single-qubit gate of duration `gate_time` limited by relaxation
/// time `t1` and dephasing time `t2`.
pub fn single_qubit_fidelity_limit(gate_time: f64, t1: f64, t2: f64) -> f64 {
    0.5 + (-gate_time / t1).exp() / 6.0 + (-gate_time / t2).exp() / 3.0
}

/// Fidelity bound of a two-qubit gate from the single-qubit bounds of its qubits.
pub fn two_qubit_fidelity_limit(fidelity_1: f64, fidelity_2: f64) -> f64 {
    0.2 + 0.05 * (6.0 * fidelity_1 - 2.0) * (6.0 * fidelity_2 - 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pauli_cover::CliqueCoverStrategy;

    fn label(s: &str) -> PauliLabel {
        s.parse().unwrap()
    }

    fn observable(entries: &[(&str, f64)]) -> PauliObservable {
        PauliObservable::from_coefficients(entries.iter().map(|(l, v)| (label(l), *v)).collect())
            .unwrap()
    }

    #[test]
    fn energy_skips_unmeasured_labels() {
        let h = observable(&[("ZZ", 0.5), ("XX", 2.0), ("II", -1.0)]);
        let measured = observable(&[("ZZ", 0.8), ("II", 1.0)]);
        assert!((energy(&h, &measured).unwrap() - (0.4 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn histogram_parity() {
        let histogram = BTreeMap::from([
            ("00".to_string(), 0.5),
            ("01".to_string(), 0.25),
            ("11".to_string(), 0.25),
        ]);
        assert!((expectation_from_histogram(&label("ZZ"), &histogram).unwrap() - 0.5).abs() < 1e-12);
        assert!((expectation_from_histogram(&label("ZI"), &histogram).unwrap() - 0.5).abs() < 1e-12);
        assert!((expectation_from_histogram(&label("IZ"), &histogram).unwrap() - 0.0).abs() < 1e-12);
        assert!((expectation_from_histogram(&label("II"), &histogram).unwrap() - 1.0).abs() < 1e-12);
        assert!(expectation_from_histogram(&label("Z"), &histogram).is_err());
    }

    #[test]
    fn energy_from_grouped_histograms() {
        let mut h = observable(&[("ZI", 1.0), ("IZ", 2.0), ("XX", 3.0)]);
        let groups = h
            .get_clique_dict(CliqueCoverStrategy::IntegerProgramming)
            .unwrap()
            .clone();
        assert_eq!(2, groups.len());
        let histograms = BTreeMap::from([
            (label("ZZ"), BTreeMap::from([("10".to_string(), 1.0)])),
            (label("XX"), BTreeMap::from([("11".to_string(), 1.0)])),
        ]);
        // <ZI> = -1, <IZ> = 1, <XX> = 1
        let e = energy_from_histograms(&h, &histograms).unwrap();
        assert!((e - 4.0).abs() < 1e-12);
        assert!(energy_from_histograms(&h, &BTreeMap::new()).is_err());
    }

    #[test]
    fn fidelity_limits() {
        assert!((single_qubit_fidelity_limit(0.0, 1.0, 1.0) - 1.0).abs() < 1e-12);
        let f = single_qubit_fidelity_limit(20e-9, 100e-6, 80e-6);
        assert!(f < 1.0 && f > 0.999);
        assert!((two_qubit_fidelity_limit(1.0, 1.0) - 1.0).abs() < 1e-12);
    }
}
