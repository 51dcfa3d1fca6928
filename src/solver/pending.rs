//! Buffered solver instances
//!
//! Backends whose native API wants the whole problem at once implement
//! [`BatchSolver`]. Their instances are [`BufferedInstance`]s: the boundary
//! calls are validated and collected in a [`PendingModel`], each constraint is
//! reduced to `Σ (lhs_i - rhs_i) x_i  sense  rhs_constant - lhs_constant`, and
//! the native model is only built (and torn down again) inside `optimize`.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::OptimizeError;
use crate::marshal::SparseRow;
use crate::model::{ConstraintSense, ObjSense, VarKind};
use crate::scaling::ScaleMode;

use super::{SolverInstance, SolverResult, codes};

/// A variable as seen by a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub lower: f64,
    pub upper: f64,
    pub kind: VarKind,
}

/// A constraint with every variable moved to the left-hand side
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedRow {
    /// Net coefficient per variable index, ascending
    pub terms: BTreeMap<usize, f64>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

/// The objective as seen by a backend
#[derive(Debug, Clone, PartialEq)]
pub struct PendingObjective {
    pub terms: Vec<(usize, f64)>,
    pub constant: f64,
    pub sense: ObjSense,
}

impl PendingObjective {
    /// Objective value for the given variable values, constant included
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(idx, coeff)| coeff * values[idx])
            .sum::<f64>()
            + self.constant
    }
}

/// Everything handed to a solver instance before `optimize`
#[derive(Debug, Clone, Default)]
pub struct PendingModel {
    pub show_log: bool,
    pub time_limit: Option<f64>,
    pub scaling: Option<ScaleMode>,
    pub columns: Vec<Column>,
    pub rows: Vec<ReducedRow>,
    pub objective: Option<PendingObjective>,
    error: Option<OptimizeError>,
}

impl PendingModel {
    pub fn num_vars(&self) -> usize {
        self.columns.len()
    }

    /// Record an input error; only the first one is kept
    fn fail(&mut self, message: String) {
        if self.error.is_none() {
            self.error = Some(OptimizeError::new(codes::UNKNOWN_ERROR, message));
        }
    }

    /// First input error seen, if any
    pub fn error(&self) -> Option<&OptimizeError> {
        self.error.as_ref()
    }

    fn check_indices(&mut self, row: &SparseRow, what: &str) -> bool {
        let n = self.columns.len();
        match row.indices().iter().find(|&&idx| idx >= n) {
            Some(&idx) => {
                self.fail(format!(
                    "{} references variable {} but only {} variables were added",
                    what, idx, n
                ));
                false
            }
            None => true,
        }
    }

    pub fn add_vars(&mut self, lower: &[f64], upper: &[f64], kinds: &[u8]) {
        if lower.len() != upper.len() || lower.len() != kinds.len() {
            self.fail(format!(
                "misaligned variable arrays: {} lower bounds, {} upper bounds, {} kinds",
                lower.len(),
                upper.len(),
                kinds.len()
            ));
            return;
        }
        for ((&lower, &upper), &tag) in lower.iter().zip(upper).zip(kinds) {
            match VarKind::from_tag(tag) {
                Some(kind) => self.columns.push(Column { lower, upper, kind }),
                None => {
                    self.fail(format!("unsupported variable kind tag {:?}", tag as char));
                    return;
                }
            }
        }
    }

    pub fn add_constr(&mut self, lhs: &SparseRow, rhs: &SparseRow, sense: u8) {
        let Some(sense) = ConstraintSense::from_tag(sense) else {
            self.fail(format!("unsupported constraint sense tag {:?}", sense as char));
            return;
        };
        let what = format!("constraint {}", self.rows.len());
        if !self.check_indices(lhs, &what) || !self.check_indices(rhs, &what) {
            return;
        }

        let mut terms = BTreeMap::new();
        for (idx, coeff) in lhs.terms() {
            *terms.entry(idx).or_insert(0.0) += coeff;
        }
        for (idx, coeff) in rhs.terms() {
            *terms.entry(idx).or_insert(0.0) -= coeff;
        }
        terms.retain(|_, coeff| *coeff != 0.0);

        self.rows.push(ReducedRow {
            terms,
            sense,
            rhs: rhs.constant() - lhs.constant(),
        });
    }

    pub fn set_objective(&mut self, objective: &SparseRow, sense: i32) {
        let Some(sense) = ObjSense::from_tag(sense) else {
            self.fail(format!("unsupported objective sense {}", sense));
            return;
        };
        if !self.check_indices(objective, "objective") {
            return;
        }
        self.objective = Some(PendingObjective {
            terms: objective.terms().collect(),
            constant: objective.constant(),
            sense,
        });
    }
}

/// A backend that solves a complete [`PendingModel`] in one call
///
/// The native model must be created and released within `solve`.
pub trait BatchSolver {
    const NAME: &'static str;

    /// Solve a model that passed input validation
    fn solve(&self, model: &PendingModel) -> SolverResult;
}

/// [`SolverInstance`] that buffers every call for a [`BatchSolver`]
#[derive(Debug)]
pub struct BufferedInstance<B: BatchSolver> {
    model: PendingModel,
    backend: B,
}

impl<B: BatchSolver> BufferedInstance<B> {
    pub fn new(backend: B) -> Self {
        trace!(solver = B::NAME, "created solver instance");
        Self {
            model: PendingModel::default(),
            backend,
        }
    }
}

impl<B: BatchSolver> SolverInstance for BufferedInstance<B> {
    type Solution = SolverResult;

    fn show_log(&mut self, should_show: bool) {
        self.model.show_log = should_show;
    }

    fn set_time_limit(&mut self, seconds: f64) {
        self.model.time_limit = Some(seconds);
    }

    fn set_scaling(&mut self, mode: i32) {
        self.model.scaling = Some(ScaleMode::from_bits(mode));
    }

    fn add_vars(&mut self, lower: &[f64], upper: &[f64], kinds: &[u8]) {
        self.model.add_vars(lower, upper, kinds);
    }

    fn add_constr(&mut self, lhs: &SparseRow, rhs: &SparseRow, sense: u8) {
        self.model.add_constr(lhs, rhs, sense);
    }

    fn set_objective(&mut self, objective: &SparseRow, sense: i32) {
        self.model.set_objective(objective, sense);
    }

    fn optimize(&mut self) -> SolverResult {
        if let Some(err) = self.model.error() {
            return SolverResult::failed(err.code, err.message.clone(), self.model.num_vars());
        }
        self.backend.solve(&self.model)
    }
}

impl<B: BatchSolver> Drop for BufferedInstance<B> {
    fn drop(&mut self) {
        trace!(solver = B::NAME, "released solver instance");
    }
}
