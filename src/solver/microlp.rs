//! Pure-Rust backend via good_lp and microlp
//!
//! microlp runs in-process without native libraries, so this backend is always
//! available. It has neither a time limit nor scaling options; both are ignored
//! with a warning. The solver never prints, so the log flag has nothing to hide.

use good_lp::solvers::microlp::microlp;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, Variable,
    constraint, variable,
};
use tracing::{debug, warn};

use super::pending::{BatchSolver, BufferedInstance, PendingModel};
use super::{Solver, SolverResult, codes};
use crate::error::Result;
use crate::model::{ConstraintSense, ObjSense, VarKind};

/// Simplex with branch-and-bound for integer variables
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl Solver for MicrolpSolver {
    type Instance = BufferedInstance<MicrolpSolver>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create(&self) -> Result<Self::Instance> {
        Ok(BufferedInstance::new(*self))
    }
}

fn linear(cols: &[Variable], terms: impl Iterator<Item = (usize, f64)>) -> Expression {
    terms.map(|(idx, coeff)| coeff * cols[idx]).sum()
}

impl BatchSolver for MicrolpSolver {
    const NAME: &'static str = "microlp";

    fn solve(&self, pending: &PendingModel) -> SolverResult {
        if let Some(seconds) = pending.time_limit {
            warn!(seconds, "microlp has no time limit, ignoring it");
        }
        if let Some(mode) = pending.scaling {
            warn!(scaling = ?mode, "microlp does not support scaling, ignoring it");
        }

        let mut vars = ProblemVariables::new();
        let cols: Vec<Variable> = pending
            .columns
            .iter()
            .map(|column| {
                let def = match column.kind {
                    VarKind::Continuous => variable().min(column.lower).max(column.upper),
                    VarKind::Integer => variable()
                        .integer()
                        .min(column.lower)
                        .max(column.upper),
                    VarKind::Binary => variable().binary(),
                };
                vars.add(def)
            })
            .collect();

        let objective = match &pending.objective {
            Some(obj) => linear(&cols, obj.terms.iter().copied()),
            None => linear(&cols, std::iter::empty()),
        };
        let mut problem = match pending.objective.as_ref().map(|obj| obj.sense) {
            Some(ObjSense::Maximize) => vars.maximise(objective),
            _ => vars.minimise(objective),
        }
        .using(microlp);

        for reduced in &pending.rows {
            let lhs = linear(&cols, reduced.terms.iter().map(|(&k, &v)| (k, v)));
            let rhs = reduced.rhs;
            problem = match reduced.sense {
                ConstraintSense::LessEqual => problem.with(constraint!(lhs <= rhs)),
                ConstraintSense::GreaterEqual => problem.with(constraint!(lhs >= rhs)),
                ConstraintSense::Equal => problem.with(constraint!(lhs == rhs)),
            };
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = cols.iter().map(|&col| solution.value(col)).collect();
                let objective = pending
                    .objective
                    .as_ref()
                    .map_or(0.0, |obj| obj.evaluate(&values));
                debug!(objective, "microlp found an optimal solution");
                SolverResult::optimal(values, objective)
            }
            Err(err) => {
                let code = match err {
                    ResolutionError::Infeasible => codes::INFEASIBLE,
                    ResolutionError::Unbounded => codes::UNBOUNDED,
                    _ => codes::UNKNOWN_ERROR,
                };
                debug!(code, error = %err, "microlp failed");
                SolverResult::failed(code, format!("microlp: {}", err), pending.num_vars())
            }
        }
    }
}
