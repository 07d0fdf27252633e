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

use pauli_cover::CoverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroupingError {
    /// Invalid construction input or use before `calculate()`
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dimension mismatch: target acts on {target} qubits but ansatz acts on {ansatz}")]
    DimensionMismatch { target: usize, ansatz: usize },

    /// A clique whose members cannot share one measurement setting
    #[error("Clique members cannot share a measurement setting: {0}")]
    IncompatibleGroup(String),

    #[error(transparent)]
    Cover(#[from] CoverError),
}

impl GroupingError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub(crate) fn not_calculated() -> Self {
        Self::configuration("coefficients have not been calculated, call calculate() first")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_message() {
        let msg = GroupingError::DimensionMismatch {
            target: 1,
            ansatz: 2,
        }
        .to_string();
        assert!(msg.contains("1 qubits"));
        assert!(msg.contains("ansatz acts on 2"));
    }

    #[test]
    fn cover_errors_pass_through() {
        let err: GroupingError = CoverError::UnknownStrategy {
            name: "nope".into(),
            valid: "clique_random_sequential".into(),
        }
        .into();
        assert!(err.to_string().starts_with("Unknown clique cover strategy"));
    }
}
