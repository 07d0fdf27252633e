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

use std::fmt::Display;

use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

/// A single-qubit Pauli operator.
///
/// The variant order is the order of the basis: `I < X < Y < Z`.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Pauli {
    #[default]
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    pub const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    pub fn is_identity(&self) -> bool {
        *self == Pauli::I
    }

    /// Position of this Pauli in the basis order.
    pub fn index(&self) -> usize {
        match self {
            Pauli::I => 0,
            Pauli::X => 1,
            Pauli::Y => 2,
            Pauli::Z => 3,
        }
    }

    /// The 2x2 complex matrix of this Pauli.
    pub fn matrix(&self) -> DMatrix<Complex64> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let entries = match self {
            Pauli::I => [one, zero, zero, one],
            Pauli::X => [zero, one, one, zero],
            Pauli::Y => [zero, -i, i, zero],
            Pauli::Z => [one, zero, zero, -one],
        };
        DMatrix::from_row_slice(2, 2, &entries)
    }
}

impl Display for Pauli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Distribution<Pauli> for StandardUniform {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Pauli {
        Pauli::ALL[rng.random_range(0..4)]
    }
}

impl TryFrom<char> for Pauli {
    type Error = String;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            c => Err(format!("Cannot convert {} to Pauli", c)),
        }
    }
}

impl TryFrom<usize> for Pauli {
    type Error = String;

    /// Convert an integer in [0,3] to a Pauli in basis order
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Pauli::ALL
            .get(value)
            .copied()
            .ok_or_else(|| format!("Cannot convert {} to Pauli", value))
    }
}
