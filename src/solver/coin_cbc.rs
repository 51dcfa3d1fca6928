use ::coin_cbc::{Col, Model, Sense};
use tracing::{debug, warn};

use super::output_suppression::QuietOutput;
use super::pending::{BatchSolver, BufferedInstance, PendingModel};
use super::{Solver, SolverResult, codes};
use crate::error::Result;
use crate::model::{ConstraintSense, ObjSense, VarKind};
use crate::scaling::ScaleMode;

/// Round a floating-point number to a specified number of significant digits
/// This is an workaround to mask floating point errors in CBC.
fn round_to_sig_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(digits as i32 - magnitude - 1);
    (value * scale).round() / scale
}

/// CBC has no equivalent for most lp_solve scaling flags; map what it has
fn scaling_parameter(mode: ScaleMode) -> &'static str {
    if mode == ScaleMode::NONE {
        "off"
    } else if mode.contains(ScaleMode::DYN_UPDATE) {
        "dynamic"
    } else if mode.contains(ScaleMode::ROWS_ONLY) {
        "rowsonly"
    } else if mode.algorithm() == ScaleMode::GEOMETRIC {
        "geometric"
    } else if mode.algorithm() == ScaleMode::EXTREME {
        "equilibrium"
    } else {
        "automatic"
    }
}

/// COIN-OR CBC branch-and-cut solver
#[derive(Debug, Clone, Copy, Default)]
pub struct CbcSolver;

impl Solver for CbcSolver {
    type Instance = BufferedInstance<CbcSolver>;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn create(&self) -> Result<Self::Instance> {
        Ok(BufferedInstance::new(*self))
    }
}

impl BatchSolver for CbcSolver {
    const NAME: &'static str = "coin_cbc";

    fn solve(&self, pending: &PendingModel) -> SolverResult {
        // CBC prints straight to the process streams
        let _quiet = QuietOutput::unless(pending.show_log);
        let mut model = Model::default();

        model.set_parameter("log", if pending.show_log { "1" } else { "0" });
        if let Some(seconds) = pending.time_limit {
            model.set_parameter("sec", &seconds.to_string());
        }
        if let Some(mode) = pending.scaling {
            let parameter = scaling_parameter(mode);
            if mode.contains(ScaleMode::INTEGERS) || mode.contains(ScaleMode::POWER2) {
                warn!(scaling = ?mode, "CBC ignores scaling flags, using {}", parameter);
            }
            model.set_parameter("scaling", parameter);
        }

        let cols: Vec<Col> = pending
            .columns
            .iter()
            .map(|column| match column.kind {
                VarKind::Continuous => {
                    let col = model.add_col();
                    model.set_col_lower(col, column.lower);
                    model.set_col_upper(col, column.upper);
                    col
                }
                VarKind::Integer => {
                    let col = model.add_integer();
                    model.set_col_lower(col, column.lower);
                    model.set_col_upper(col, column.upper);
                    col
                }
                VarKind::Binary => model.add_binary(),
            })
            .collect();

        for reduced in &pending.rows {
            let row = model.add_row();
            for (&idx, &coeff) in &reduced.terms {
                model.set_weight(row, cols[idx], coeff);
            }
            match reduced.sense {
                ConstraintSense::LessEqual => model.set_row_upper(row, reduced.rhs),
                ConstraintSense::GreaterEqual => model.set_row_lower(row, reduced.rhs),
                ConstraintSense::Equal => model.set_row_equal(row, reduced.rhs),
            }
        }

        if let Some(objective) = &pending.objective {
            for &(idx, coeff) in &objective.terms {
                model.set_obj_coeff(cols[idx], coeff);
            }
            model.set_obj_sense(match objective.sense {
                ObjSense::Minimize => Sense::Minimize,
                ObjSense::Maximize => Sense::Maximize,
            });
        }

        let solution = model.solve();
        let raw = solution.raw();

        let code = if raw.is_proven_optimal() {
            codes::OPTIMAL
        } else if raw.is_proven_infeasible() {
            codes::INFEASIBLE
        } else if raw.is_continuous_unbounded() {
            codes::UNBOUNDED
        } else if raw.is_seconds_limit_reached() {
            codes::TIMEOUT
        } else if raw.is_abandoned() {
            codes::NUM_FAILURE
        } else {
            codes::UNKNOWN_ERROR
        };
        debug!(code, "CBC finished");

        let values: Vec<f64> = cols
            .iter()
            .map(|&col| round_to_sig_digits(solution.col(col), 8))
            .collect();

        if code != codes::OPTIMAL {
            let message = match code {
                codes::INFEASIBLE => "CBC: problem is infeasible",
                codes::UNBOUNDED => "CBC: problem is unbounded",
                codes::TIMEOUT => "CBC: time limit reached",
                codes::NUM_FAILURE => "CBC: search abandoned",
                _ => "CBC: unknown status",
            };
            return SolverResult {
                values,
                ..SolverResult::failed(code, message, 0)
            };
        }

        let objective = pending
            .objective
            .as_ref()
            .map_or(0.0, |obj| round_to_sig_digits(obj.evaluate(&values), 8));
        SolverResult::optimal(values, objective)
    }
}
