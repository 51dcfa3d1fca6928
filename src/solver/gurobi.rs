use ::gurobi::{ConstrSense, Env, LinExpr, Model, ModelSense, Status, VarType, attr, param};
use tracing::{debug, warn};

use super::output_suppression::QuietOutput;
use super::pending::{BatchSolver, BufferedInstance, PendingModel};
use super::{Solver, SolverResult, codes};
use crate::error::Result;
use crate::model::{ConstraintSense, ObjSense, VarKind};
use crate::scaling::ScaleMode;

/// Gurobi's ScaleFlag for an lp_solve scaling mode
fn scale_flag(mode: ScaleMode) -> i32 {
    if mode == ScaleMode::NONE {
        0
    } else if mode.algorithm() == ScaleMode::GEOMETRIC {
        2
    } else {
        1
    }
}

fn status_code(status: Status) -> i32 {
    match status {
        Status::Optimal => codes::OPTIMAL,
        Status::SubOptimal => codes::SUBOPTIMAL,
        Status::Infeasible => codes::INFEASIBLE,
        Status::Unbounded | Status::InfOrUnbd => codes::UNBOUNDED,
        Status::TimeLimit => codes::TIMEOUT,
        Status::Numeric => codes::NUM_FAILURE,
        _ => codes::UNKNOWN_ERROR,
    }
}

/// Gurobi commercial solver
#[derive(Debug, Clone, Copy, Default)]
pub struct GurobiSolver;

impl Solver for GurobiSolver {
    type Instance = BufferedInstance<GurobiSolver>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create(&self) -> Result<Self::Instance> {
        Ok(BufferedInstance::new(*self))
    }
}

impl BatchSolver for GurobiSolver {
    const NAME: &'static str = "gurobi";

    fn solve(&self, pending: &PendingModel) -> SolverResult {
        // License banners are printed on environment creation
        let _quiet = QuietOutput::unless(pending.show_log);
        solve_gurobi(pending).unwrap_or_else(|err| {
            warn!(error = %err, "Gurobi call failed");
            SolverResult::failed(codes::UNKNOWN_ERROR, err.to_string(), pending.num_vars())
        })
    }
}

fn solve_gurobi(pending: &PendingModel) -> ::gurobi::Result<SolverResult> {
    let mut env = Env::new("")?;
    env.set(param::OutputFlag, if pending.show_log { 1 } else { 0 })?;
    if let Some(seconds) = pending.time_limit {
        env.set(param::TimeLimit, seconds)?;
    }
    if let Some(mode) = pending.scaling {
        env.set(param::ScaleFlag, scale_flag(mode))?;
    }
    let mut model = Model::new("lpmodel", &env)?;

    let mut vars = Vec::with_capacity(pending.num_vars());
    for (idx, column) in pending.columns.iter().enumerate() {
        let vtype = match column.kind {
            VarKind::Continuous => VarType::Continuous,
            VarKind::Integer => VarType::Integer,
            VarKind::Binary => VarType::Binary,
        };
        vars.push(model.add_var(
            &format!("x{}", idx),
            vtype,
            0.0,
            column.lower,
            column.upper,
            &[],
            &[],
        )?);
    }
    model.update()?;

    for (idx, reduced) in pending.rows.iter().enumerate() {
        let expr = reduced
            .terms
            .iter()
            .fold(LinExpr::new(), |expr, (&var, &coeff)| {
                expr.add_term(coeff, vars[var].clone())
            });
        let sense = match reduced.sense {
            ConstraintSense::LessEqual => ConstrSense::Less,
            ConstraintSense::GreaterEqual => ConstrSense::Greater,
            ConstraintSense::Equal => ConstrSense::Equal,
        };
        model.add_constr(&format!("c{}", idx), expr, sense, reduced.rhs)?;
    }
    model.update()?;

    if let Some(objective) = &pending.objective {
        let expr = objective
            .terms
            .iter()
            .fold(LinExpr::new(), |expr, &(var, coeff)| {
                expr.add_term(coeff, vars[var].clone())
            })
            .add_constant(objective.constant);
        let sense = match objective.sense {
            ObjSense::Minimize => ModelSense::Minimize,
            ObjSense::Maximize => ModelSense::Maximize,
        };
        model.set_objective(expr, sense)?;
    }

    model.optimize()?;
    let status = model.status()?;
    let code = status_code(status);
    debug!(?status, code, "Gurobi finished");

    if code != codes::OPTIMAL {
        return Ok(SolverResult::failed(
            code,
            format!("Gurobi: {:?}", status),
            pending.num_vars(),
        ));
    }

    let values = vars
        .iter()
        .map(|var| var.get(&model, attr::X))
        .collect::<::gurobi::Result<Vec<f64>>>()?;
    let objective = if pending.objective.is_some() {
        model.get(attr::ObjVal)?
    } else {
        0.0
    };
    let is_mip = pending.columns.iter().any(|c| c.kind.is_integral());
    let gap = if is_mip {
        model.get(attr::MIPGap)?
    } else {
        0.0
    };

    Ok(SolverResult {
        gap,
        ..SolverResult::optimal(values, objective)
    })
}
