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

//! Minimum clique partition as a binary integer program.
//!
//! With one slot per node, the program has a binary `Used { slot }` per slot and a binary
//! `Assign { slot, node }` per (slot, node) pair, and
//!
//! * minimizes the number of used slots,
//! * requires `Assign { slot, node } <= Used { slot }`,
//! * requires each node to be assigned to exactly one slot,
//! * forbids two non-adjacent nodes from sharing a slot.
//!
//! [`solve`] runs a depth-first branch and bound over this program on the calling thread,
//! stopping at a wall-clock deadline.

use std::{
    cmp::Reverse,
    collections::BTreeMap,
    fmt,
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use crate::{CompatibilityGraph, CoverError, graph::WorkingGraph};

/// A binary decision variable, addressed by slot and node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Used { slot: usize },
    Assign { slot: usize, node: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `Assign { slot, node } <= Used { slot }`
    UsesSlot { slot: usize, node: usize },
    /// `sum over slots of Assign { slot, node } == 1`
    AssignedOnce { node: usize },
    /// `Assign { slot, a } + Assign { slot, b } <= 1`
    Conflict { slot: usize, a: usize, b: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueCoverModel {
    nodes: usize,
    /// Non-adjacent node pairs `(a, b)` with `a < b`
    conflicts: Vec<(usize, usize)>,
}

impl CliqueCoverModel {
    pub fn new<N>(graph: &CompatibilityGraph<N>) -> Self {
        Self::from_working(&WorkingGraph::from_graph(graph))
    }

    /// Expects a working graph with no removed nodes.
    pub(crate) fn from_working(graph: &WorkingGraph) -> Self {
        let nodes: Vec<usize> = graph.nodes().collect();
        let mut conflicts = vec![];
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if !graph.is_adjacent(a, b) {
                    conflicts.push((a, b));
                }
            }
        }
        Self {
            nodes: nodes.len(),
            conflicts,
        }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn slots(&self) -> usize {
        self.nodes
    }

    pub fn conflicts(&self) -> &[(usize, usize)] {
        &self.conflicts
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        let (nodes, slots) = (self.nodes, self.slots());
        (0..slots)
            .map(|slot| Variable::Used { slot })
            .chain((0..slots).flat_map(move |slot| {
                (0..nodes).map(move |node| Variable::Assign { slot, node })
            }))
    }

    pub fn variable_count(&self) -> usize {
        self.slots() * (self.nodes + 1)
    }

    pub fn constraints(&self) -> impl Iterator<Item = Constraint> + '_ {
        let (nodes, slots) = (self.nodes, self.slots());
        let uses_slot = (0..slots).flat_map(move |slot| {
            (0..nodes).map(move |node| Constraint::UsesSlot { slot, node })
        });
        let assigned_once = (0..nodes).map(|node| Constraint::AssignedOnce { node });
        let conflicts = (0..slots).flat_map(move |slot| {
            self.conflicts
                .iter()
                .map(move |&(a, b)| Constraint::Conflict { slot, a, b })
        });
        uses_slot.chain(assigned_once).chain(conflicts)
    }

    pub fn constraint_count(&self) -> usize {
        self.slots() * (self.nodes + self.conflicts.len()) + self.nodes
    }

    /// Number of used slots
    pub fn objective(&self, solution: &Solution) -> f64 {
        (0..self.slots())
            .map(|slot| solution.value(Variable::Used { slot }))
            .sum()
    }

    pub fn is_satisfied(&self, constraint: Constraint, solution: &Solution) -> bool {
        match constraint {
            Constraint::UsesSlot { slot, node } => {
                solution.value(Variable::Assign { slot, node }) <= solution.value(Variable::Used { slot })
            }
            Constraint::AssignedOnce { node } => {
                let total: f64 = (0..self.slots())
                    .map(|slot| solution.value(Variable::Assign { slot, node }))
                    .sum();
                total == 1.0
            }
            Constraint::Conflict { slot, a, b } => {
                solution.value(Variable::Assign { slot, node: a })
                    + solution.value(Variable::Assign { slot, node: b })
                    <= 1.0
            }
        }
    }

    pub fn is_feasible(&self, solution: &Solution) -> bool {
        solution.slot_of.len() == self.nodes
            && solution.slot_of.iter().all(|&slot| slot < self.slots())
            && self.constraints().all(|c| self.is_satisfied(c, solution))
    }

    /// Group nodes by their assigned slot, in slot order.
    pub fn partition(&self, solution: &Solution) -> Vec<Vec<usize>> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for node in 0..self.nodes {
            if let Some(slot) = solution.slot_of(node) {
                groups.entry(slot).or_default().push(node);
            }
        }
        groups.into_values().collect()
    }
}

/// Values of every variable of a [`CliqueCoverModel`], stored as the slot of each node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    slot_of: Vec<usize>,
    used: Vec<bool>,
}

impl Solution {
    pub fn from_assignment(slot_of: Vec<usize>) -> Self {
        let mut used = vec![false; slot_of.len()];
        for &slot in &slot_of {
            if let Some(u) = used.get_mut(slot) {
                *u = true;
            }
        }
        Self { slot_of, used }
    }

    pub fn value(&self, variable: Variable) -> f64 {
        let set = match variable {
            Variable::Used { slot } => self.used.get(slot).copied().unwrap_or(false),
            Variable::Assign { slot, node } => self.slot_of.get(node) == Some(&slot),
        };
        if set { 1.0 } else { 0.0 }
    }

    pub fn slot_of(&self, node: usize) -> Option<usize> {
        self.slot_of.get(node).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// The search finished, or met the lower bound: the solution is a minimum.
    Optimal,
    /// The deadline passed after a solution was found; it may not be a minimum.
    Feasible,
    /// The deadline passed before any solution was found.
    NotSolved,
}

impl SolverStatus {
    /// Positive codes carry a solution.
    pub fn code(&self) -> i32 {
        match self {
            SolverStatus::Optimal => 1,
            SolverStatus::Feasible => 2,
            SolverStatus::NotSolved => 0,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.code() > 0
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverStatus::Optimal => "Optimal",
            SolverStatus::Feasible => "Feasible",
            SolverStatus::NotSolved => "Not Solved",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolverStatus,
    pub solution: Option<Solution>,
    /// Size of a set of pairwise non-adjacent nodes; no cover is smaller.
    pub lower_bound: usize,
    pub elapsed: Duration,
    pub explored: u64,
}

/// Where the search gives up and reports its incumbent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SearchLimits {
    pub deadline: Option<Instant>,
    /// Maximum number of search nodes to explore
    pub max_explored: Option<u64>,
}

impl SearchLimits {
    fn within(start: Instant, time_limit: Duration) -> Self {
        Self {
            deadline: start.checked_add(time_limit),
            max_explored: None,
        }
    }
}

pub fn solve(model: &CliqueCoverModel, time_limit: Duration) -> SolveOutcome {
    let start = Instant::now();
    solve_within(model, SearchLimits::within(start, time_limit), start)
}

/// Run the search under `limits`, reporting time elapsed since `start`.
pub(crate) fn solve_within(
    model: &CliqueCoverModel,
    limits: SearchLimits,
    start: Instant,
) -> SolveOutcome {
    let mut search = BranchAndBound::new(model, limits);
    search.run();

    let status = match &search.best {
        None => SolverStatus::NotSolved,
        Some(_) if search.timed_out && search.best_used > search.lower_bound => {
            SolverStatus::Feasible
        }
        Some(_) => SolverStatus::Optimal,
    };
    SolveOutcome {
        status,
        solution: search.best.map(Solution::from_assignment),
        lower_bound: search.lower_bound,
        elapsed: start.elapsed(),
        explored: search.explored,
    }
}

/// Depth-first search over slot assignments. A node may join any open slot it does not
/// conflict with, or open the next slot; opening slots in order removes slot permutations.
struct BranchAndBound {
    conflict: Vec<Vec<bool>>,
    /// Pinned nodes first, then the rest by decreasing conflict degree
    order: Vec<usize>,
    /// Leading nodes of `order` that pairwise conflict, pinned to slots 0, 1, ...
    pinned: usize,
    limits: SearchLimits,
    slot_of: Vec<usize>,
    members: Vec<Vec<usize>>,
    best: Option<Vec<usize>>,
    best_used: usize,
    lower_bound: usize,
    timed_out: bool,
    explored: u64,
}

impl BranchAndBound {
    fn new(model: &CliqueCoverModel, limits: SearchLimits) -> Self {
        let n = model.nodes();
        let mut conflict = vec![vec![false; n]; n];
        let mut degree = vec![0_usize; n];
        for &(a, b) in model.conflicts() {
            conflict[a][b] = true;
            conflict[b][a] = true;
            degree[a] += 1;
            degree[b] += 1;
        }

        let mut by_degree: Vec<usize> = (0..n).collect();
        by_degree.sort_by_key(|&v| Reverse(degree[v]));

        let mut is_pinned = vec![false; n];
        let mut order: Vec<usize> = vec![];
        for &v in &by_degree {
            if order.iter().all(|&u| conflict[u][v]) {
                order.push(v);
                is_pinned[v] = true;
            }
        }
        let pinned = order.len();
        order.extend(by_degree.into_iter().filter(|&v| !is_pinned[v]));

        Self {
            conflict,
            order,
            pinned,
            limits,
            slot_of: vec![usize::MAX; n],
            members: vec![vec![]; n],
            best: None,
            best_used: n + 1,
            lower_bound: pinned,
            timed_out: false,
            explored: 0,
        }
    }

    fn run(&mut self) {
        if self.order.is_empty() {
            self.best = Some(vec![]);
            self.best_used = 0;
            return;
        }
        for slot in 0..self.pinned {
            let node = self.order[slot];
            self.place(node, slot);
        }
        self.branch(self.pinned, self.pinned);
    }

    fn finished(&self) -> bool {
        self.timed_out || self.best_used == self.lower_bound
    }

    fn out_of_budget(&self) -> bool {
        self.limits
            .max_explored
            .is_some_and(|max| self.explored > max)
            || self
                .limits
                .deadline
                .is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn place(&mut self, node: usize, slot: usize) {
        self.slot_of[node] = slot;
        self.members[slot].push(node);
    }

    fn unplace(&mut self, node: usize, slot: usize) {
        self.slot_of[node] = usize::MAX;
        self.members[slot].pop();
    }

    fn branch(&mut self, position: usize, used: usize) {
        if self.finished() {
            return;
        }
        self.explored += 1;
        if self.out_of_budget() {
            self.timed_out = true;
            return;
        }
        if used >= self.best_used {
            return;
        }
        if position == self.order.len() {
            debug!("Found a cover with {} cliques", used);
            self.best = Some(self.slot_of.clone());
            self.best_used = used;
            return;
        }

        let node = self.order[position];
        for slot in 0..used {
            if self.members[slot].iter().all(|&m| !self.conflict[node][m]) {
                self.place(node, slot);
                self.branch(position + 1, used);
                self.unplace(node, slot);
                if self.finished() {
                    return;
                }
            }
        }
        if used + 1 < self.best_used {
            self.place(node, used);
            self.branch(position + 1, used + 1);
            self.unplace(node, used);
        }
    }
}

/// Solve the clique cover program of `graph`. The time limit covers building the model as
/// well as the search.
pub(crate) fn integer_programming(
    graph: WorkingGraph,
    time_limit: Duration,
) -> Result<Vec<Vec<usize>>, CoverError> {
    let start = Instant::now();
    integer_programming_within(graph, SearchLimits::within(start, time_limit), start)
}

pub(crate) fn integer_programming_within(
    graph: WorkingGraph,
    limits: SearchLimits,
    start: Instant,
) -> Result<Vec<Vec<usize>>, CoverError> {
    let model = CliqueCoverModel::from_working(&graph);
    info!(
        "Solving clique cover program with {} variables and {} constraints",
        model.variable_count(),
        model.constraint_count(),
    );

    let outcome = solve_within(&model, limits, start);
    debug!(
        "Solver finished with status {} after {:?} and {} nodes explored",
        outcome.status, outcome.elapsed, outcome.explored
    );
    let solution = match (outcome.status, outcome.solution) {
        (status, Some(solution)) if status.is_solved() => solution,
        (status, _) => {
            return Err(CoverError::SolverAborted {
                status,
                elapsed: outcome.elapsed,
            });
        }
    };
    if outcome.status == SolverStatus::Feasible {
        warn!(
            "Time limit reached: cover with {} cliques is not proven minimum (lower bound {})",
            model.objective(&solution),
            outcome.lower_bound
        );
    }
    Ok(model.partition(&solution))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> CompatibilityGraph<usize> {
        CompatibilityGraph::from_edges(0..n, edges.iter().copied()).unwrap()
    }

    fn five_cycle() -> CompatibilityGraph<usize> {
        graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])
    }

    #[test]
    fn model_dimensions() {
        let model = CliqueCoverModel::new(&five_cycle());
        assert_eq!(5, model.slots());
        assert_eq!(5, model.conflicts().len());
        assert_eq!(30, model.variable_count());
        assert_eq!(model.variable_count(), model.variables().count());
        assert_eq!(model.constraint_count(), model.constraints().count());
    }

    #[test]
    fn feasibility_check() {
        let model = CliqueCoverModel::new(&five_cycle());
        let good = Solution::from_assignment(vec![0, 0, 1, 1, 2]);
        assert!(model.is_feasible(&good));
        assert_eq!(3.0, model.objective(&good));
        // 0 and 2 are not adjacent
        let bad = Solution::from_assignment(vec![0, 0, 0, 1, 2]);
        assert!(!model.is_feasible(&bad));
        assert!(!model.is_feasible(&Solution::from_assignment(vec![0, 0])));
    }

    #[test]
    fn solves_five_cycle_optimally() {
        let model = CliqueCoverModel::new(&five_cycle());
        let outcome = solve(&model, Duration::from_secs(5));
        assert_eq!(SolverStatus::Optimal, outcome.status);
        let solution = outcome.solution.unwrap();
        assert!(model.is_feasible(&solution));
        assert_eq!(3.0, model.objective(&solution));
        assert_eq!(3, model.partition(&solution).len());
    }

    #[test]
    fn empty_graph_is_trivially_optimal() {
        let model = CliqueCoverModel::new(&graph(0, &[]));
        let outcome = solve(&model, Duration::ZERO);
        assert_eq!(SolverStatus::Optimal, outcome.status);
        assert!(model.partition(&outcome.solution.unwrap()).is_empty());
    }

    #[test]
    fn zero_budget_aborts() {
        let result = integer_programming(WorkingGraph::from_graph(&five_cycle()), Duration::ZERO);
        match result {
            Err(CoverError::SolverAborted { status, .. }) => {
                assert_eq!(SolverStatus::NotSolved, status);
                assert!(!status.is_solved());
            }
            other => panic!("Expected an aborted solve, got {other:?}"),
        }
    }

    #[test]
    fn beats_greedy_on_crown() {
        // Two triangles {0,1,2}, {3,4,5} plus a perfect matching 0-3, 1-4, 2-5 and a
        // path 6-7: the minimum cover is the two triangles and one edge.
        let g = graph(
            8,
            &[
                (0, 1),
                (0, 2),
                (1, 2),
                (3, 4),
                (3, 5),
                (4, 5),
                (0, 3),
                (1, 4),
                (2, 5),
                (6, 7),
            ],
        );
        let cover = integer_programming(WorkingGraph::from_graph(&g), Duration::from_secs(5))
            .unwrap();
        assert!(g.is_clique_cover(&cover));
        assert_eq!(3, cover.len());
    }

    #[test]
    fn partition_skips_unassigned_nodes() {
        let model = CliqueCoverModel::new(&five_cycle());
        let solution = Solution::from_assignment(vec![1, 1, 0]);
        assert_eq!(vec![vec![2], vec![0, 1]], model.partition(&solution));
    }

    #[test]
    fn search_budget_reports_feasible_incumbent() {
        // Order is [0, 2, 1, 3, 4] with 0 and 2 pinned. The fourth search node is the first
        // leaf, with three cliques; the fifth exceeds the budget.
        let graph = five_cycle();
        let limits = SearchLimits {
            deadline: None,
            max_explored: Some(4),
        };
        let model = CliqueCoverModel::new(&graph);
        let outcome = solve_within(&model, limits, Instant::now());
        assert_eq!(SolverStatus::Feasible, outcome.status);
        assert!(outcome.status.is_solved());
        assert_eq!(2, outcome.lower_bound);
        assert_eq!(5, outcome.explored);

        let cover =
            integer_programming_within(WorkingGraph::from_graph(&graph), limits, Instant::now())
                .unwrap();
        assert!(graph.is_clique_cover(&cover));
        assert_eq!(3, cover.len());
    }

    #[test]
    fn elapsed_time_counts_from_the_caller_clock() {
        let start = Instant::now();
        std::thread::sleep(Duration::from_millis(20));
        let model = CliqueCoverModel::new(&five_cycle());
        let outcome = solve_within(&model, SearchLimits::within(start, Duration::ZERO), start);
        assert_eq!(SolverStatus::NotSolved, outcome.status);
        assert!(outcome.elapsed >= Duration::from_millis(20));
    }
}
