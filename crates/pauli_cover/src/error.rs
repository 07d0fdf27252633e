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

use std::time::Duration;

use thiserror::Error;

use crate::integer_programming::SolverStatus;

#[derive(Debug, Error)]
pub enum CoverError {
    /// The requested strategy name is not one of [`crate::CliqueCoverStrategy::ALL`].
    #[error("Unknown clique cover strategy {name:?}, choose from [{valid}]")]
    UnknownStrategy { name: String, valid: String },

    #[error("Edge ({0}, {1}) does not join two distinct nodes of a graph with {2} nodes")]
    InvalidEdge(usize, usize, usize),

    /// The integer program was not solved within its time budget.
    /// Retrying with a larger budget may succeed.
    #[error("Integer programming solver aborted with status {status} after {elapsed:?}")]
    SolverAborted {
        status: SolverStatus,
        elapsed: Duration,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_message_lists_choices() {
        let err = CoverError::UnknownStrategy {
            name: "not_a_strategy".into(),
            valid: "a, b".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("not_a_strategy"));
        assert!(msg.contains("a, b"));
    }

    #[test]
    fn solver_aborted_message_has_status() {
        let err = CoverError::SolverAborted {
            status: SolverStatus::NotSolved,
            elapsed: Duration::from_millis(3),
        };
        assert!(err.to_string().contains("Not Solved"));
    }
}
