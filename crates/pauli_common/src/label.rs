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

use std::{fmt, ops::Index, str::FromStr};

use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Pauli;

/// A tensor product of single-qubit Paulis, one letter per qubit.
///
/// Qubit 0 is the leftmost letter and the leftmost Kronecker factor.
/// Global phases are not tracked.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PauliLabel(Vec<Pauli>);

impl PauliLabel {
    pub fn new(paulis: Vec<Pauli>) -> Self {
        Self(paulis)
    }

    /// The label at position `index` of the `qubits`-qubit basis.
    /// The leftmost qubit varies slowest.
    pub fn from_index(mut index: usize, qubits: usize) -> Self {
        let mut paulis = vec![Pauli::I; qubits];
        for slot in paulis.iter_mut().rev() {
            *slot = Pauli::ALL[index % 4];
            index /= 4;
        }
        Self(paulis)
    }

    /// Inverse of [`PauliLabel::from_index`].
    pub fn index(&self) -> usize {
        self.0.iter().fold(0, |acc, p| acc * 4 + p.index())
    }

    pub fn random<R: Rng + ?Sized>(qubits: usize, rng: &mut R) -> Self {
        Self((0..qubits).map(|_| rng.random()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pauli> {
        self.0.iter()
    }

    /// Number of non-identity positions
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|p| !p.is_identity()).count()
    }

    pub fn simultaneously_measurable(&self, rhs: &PauliLabel) -> bool {
        simultaneously_measurable(self, rhs)
    }

    pub fn commutes_with(&self, rhs: &PauliLabel) -> bool {
        commutes(self, rhs)
    }

    /// Dense 2^n x 2^n matrix of the tensor product.
    pub fn matrix(&self) -> DMatrix<Complex64> {
        self.0.iter().fold(
            DMatrix::from_element(1, 1, Complex64::new(1.0, 0.0)),
            |acc, p| acc.kronecker(&p.matrix()),
        )
    }
}

/// Positions where both labels are non-identity and differ.
fn conflicts<'a>(
    lhs: &'a PauliLabel,
    rhs: &'a PauliLabel,
) -> impl Iterator<Item = (&'a Pauli, &'a Pauli)> {
    lhs.iter()
        .zip(rhs.iter())
        .filter(|(a, b)| !a.is_identity() && !b.is_identity() && a != b)
}

/// Whether the two labels can be measured in one setting: no qubit carries two different
/// non-identity letters. Positions past the end of the shorter label are ignored.
pub fn simultaneously_measurable(lhs: &PauliLabel, rhs: &PauliLabel) -> bool {
    conflicts(lhs, rhs).next().is_none()
}

/// Whether the two operators commute, i.e. they anticommute on an even number of qubits.
pub fn commutes(lhs: &PauliLabel, rhs: &PauliLabel) -> bool {
    conflicts(lhs, rhs).count() % 2 == 0
}

/// Collapse a group of pairwise simultaneously measurable labels into the single label that
/// measures all of them: at each qubit, the non-identity letter used by any member, or identity.
///
/// Returns `None` for an empty group, for labels of different lengths, or when two members
/// carry different non-identity letters on the same qubit.
pub fn reduce_to_representative<'a>(
    group: impl IntoIterator<Item = &'a PauliLabel>,
) -> Option<PauliLabel> {
    let mut group = group.into_iter();
    let mut representative = group.next()?.clone();
    for label in group {
        if label.len() != representative.len() {
            return None;
        }
        for (slot, p) in representative.0.iter_mut().zip(label.iter()) {
            if p.is_identity() {
                continue;
            }
            if slot.is_identity() {
                *slot = *p;
            } else if slot != p {
                return None;
            }
        }
    }
    Some(representative)
}

impl Index<usize> for PauliLabel {
    type Output = Pauli;

    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl From<Vec<Pauli>> for PauliLabel {
    fn from(value: Vec<Pauli>) -> Self {
        Self(value)
    }
}

impl FromStr for PauliLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let paulis: Result<Vec<Pauli>, String> = s.chars().map(Pauli::try_from).collect();
        Ok(Self(paulis.map_err(|e| format!("Invalid Pauli label {s:?}: {e}"))?))
    }
}

impl TryFrom<String> for PauliLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for PauliLabel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PauliLabel> for String {
    fn from(value: PauliLabel) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PauliLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for pauli in self.0.iter() {
            write!(f, "{}", pauli)?;
        }
        Ok(())
    }
}

impl fmt::Debug for PauliLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PauliLabel({})", self)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn label(s: &str) -> PauliLabel {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        let l = label("IXYZ");
        assert_eq!(4, l.len());
        assert_eq!(Pauli::Y, l[2]);
        assert_eq!("IXYZ", l.to_string());
        assert_eq!(2, label("XIIZ").weight());
        assert!("IXA".parse::<PauliLabel>().is_err());
    }

    #[test]
    fn index_round_trip_follows_basis_order() {
        assert_eq!(label("II"), PauliLabel::from_index(0, 2));
        assert_eq!(label("IX"), PauliLabel::from_index(1, 2));
        assert_eq!(label("XI"), PauliLabel::from_index(4, 2));
        assert_eq!(label("ZZ"), PauliLabel::from_index(15, 2));
        for i in 0..64 {
            assert_eq!(i, PauliLabel::from_index(i, 3).index());
        }
    }

    #[test]
    fn check_simultaneously_measurable() {
        assert!(simultaneously_measurable(&label("XI"), &label("IX")));
        assert!(simultaneously_measurable(&label("XZ"), &label("XI")));
        assert!(simultaneously_measurable(&label("II"), &label("YZ")));
        assert!(!simultaneously_measurable(&label("XI"), &label("ZI")));
        assert!(!simultaneously_measurable(&label("XX"), &label("YY")));
    }

    #[test]
    fn check_commutes() {
        assert!(commutes(&label("XX"), &label("ZZ")));
        assert!(commutes(&label("XX"), &label("YY")));
        assert!(!commutes(&label("XI"), &label("ZI")));
        assert!(!commutes(&label("XZ"), &label("ZZ")));
        assert!(commutes(&label("XI"), &label("IZ")));
    }

    #[test]
    fn measurable_implies_commuting() {
        let labels: Vec<_> = (0..16).map(|i| PauliLabel::from_index(i, 2)).collect();
        for (a, b) in labels.iter().tuple_combinations() {
            if a.simultaneously_measurable(b) {
                assert!(a.commutes_with(b), "{a} and {b}");
            }
        }
    }

    #[test]
    fn commutation_matches_matrices() {
        let labels: Vec<_> = (0..16).map(|i| PauliLabel::from_index(i, 2)).collect();
        for (a, b) in labels.iter().tuple_combinations() {
            let (ma, mb) = (a.matrix(), b.matrix());
            let commutator = &ma * &mb - &mb * &ma;
            let vanishes = commutator.iter().all(|c| c.norm() < 1e-12);
            assert_eq!(vanishes, commutes(a, b), "{a} and {b}");
        }
    }

    #[test]
    fn representative_of_pair_and_singleton() {
        assert_eq!(
            Some(label("XX")),
            reduce_to_representative([&label("XI"), &label("IX")])
        );
        assert_eq!(Some(label("ZZ")), reduce_to_representative([&label("ZZ")]));
        assert_eq!(None, reduce_to_representative(std::iter::empty()));
    }

    #[test]
    fn representative_rejects_conflicts() {
        assert_eq!(
            None,
            reduce_to_representative([&label("XI"), &label("IZ"), &label("ZI")])
        );
        assert_eq!(None, reduce_to_representative([&label("XI"), &label("X")]));
    }

    #[test]
    fn representative_measures_every_member_of_large_groups() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            // Greedily collect a pairwise measurable group of random 5-qubit labels.
            let mut group: Vec<PauliLabel> = vec![];
            for _ in 0..12 {
                let candidate = PauliLabel::random(5, &mut rng);
                if group.iter().all(|l| l.simultaneously_measurable(&candidate)) {
                    group.push(candidate);
                }
            }
            let rep = reduce_to_representative(&group).unwrap();
            for member in &group {
                assert!(rep.simultaneously_measurable(member));
                for (r, m) in rep.iter().zip(member.iter()) {
                    assert!(m.is_identity() || r == m);
                }
            }
            for (q, r) in rep.iter().enumerate() {
                let used = group.iter().any(|l| !l[q].is_identity());
                assert_eq!(used, !r.is_identity());
            }
        }
    }
}
