//! Flattening of a symbolic [`Model`] into the arrays a solver expects
//!
//! Variables become index-aligned `lower`/`upper`/`kinds` arrays (the index is
//! the variable id). Every expression becomes a [`SparseRow`]: parallel
//! coefficient and variable-index arrays in ascending id order plus the
//! constant. Constraints keep both sides separate; reducing `lhs - rhs` is the
//! solver's job.

use crate::error::{Error, Result};
use crate::model::{Expr, Model, SolverConfig};
use crate::solver::SolverInstance;

/// One expression in solver form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    coeffs: Vec<f64>,
    indices: Vec<usize>,
    constant: f64,
}

impl SparseRow {
    pub fn from_expr<Brand>(expr: &Expr<Brand>) -> Self {
        let (indices, coeffs): (Vec<usize>, Vec<f64>) = expr.ordered_terms().unzip();
        Self {
            coeffs,
            indices,
            constant: expr.constant(),
        }
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// Variable index of each coefficient
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// `(index, coefficient)` pairs
    pub fn terms(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.coeffs.iter().copied())
    }
}

/// A constraint in solver form
#[derive(Debug, Clone, PartialEq)]
pub struct MarshaledConstraint {
    pub lhs: SparseRow,
    pub rhs: SparseRow,
    pub sense: u8,
}

/// An objective in solver form
#[derive(Debug, Clone, PartialEq)]
pub struct MarshaledObjective {
    pub row: SparseRow,
    pub sense: i32,
}

/// A whole model in solver form
#[derive(Debug, Clone, PartialEq)]
pub struct MarshaledModel {
    lower: Vec<f64>,
    upper: Vec<f64>,
    kinds: Vec<u8>,
    constraints: Vec<MarshaledConstraint>,
    objective: Option<MarshaledObjective>,
}

impl MarshaledModel {
    /// Flatten `model`
    ///
    /// Fails with [`Error::InvalidModel`] if the model has no variables or an
    /// expression references a variable the model does not own.
    pub fn from_model<Brand>(model: &Model<Brand>) -> Result<Self> {
        let vars = model.vars();
        if vars.is_empty() {
            return Err(Error::InvalidModel("no variables in model".into()));
        }

        let n = vars.len();
        let mut lower = Vec::with_capacity(n);
        let mut upper = Vec::with_capacity(n);
        let mut kinds = Vec::with_capacity(n);
        for var in vars {
            lower.push(var.lower());
            upper.push(var.upper());
            kinds.push(var.kind().tag());
        }

        let check = |expr: &Expr<Brand>, what: &str| -> Result<()> {
            match expr.max_var_id() {
                Some(id) if id >= n => Err(Error::InvalidModel(format!(
                    "{} references variable {} but the model has {} variables",
                    what, id, n
                ))),
                _ => Ok(()),
            }
        };

        let mut constraints = Vec::with_capacity(model.constraints().len());
        for (idx, constr) in model.constraints().iter().enumerate() {
            let what = format!("constraint {}", idx);
            check(constr.lhs(), &what)?;
            check(constr.rhs(), &what)?;
            constraints.push(MarshaledConstraint {
                lhs: SparseRow::from_expr(constr.lhs()),
                rhs: SparseRow::from_expr(constr.rhs()),
                sense: constr.sense().tag(),
            });
        }

        let objective = match model.objective() {
            Some(obj) => {
                check(obj.expr(), "objective")?;
                Some(MarshaledObjective {
                    row: SparseRow::from_expr(obj.expr()),
                    sense: obj.sense().tag(),
                })
            }
            None => None,
        };

        Ok(Self {
            lower,
            upper,
            kinds,
            constraints,
            objective,
        })
    }

    pub fn num_vars(&self) -> usize {
        self.kinds.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// One kind tag per variable
    pub fn kinds(&self) -> &[u8] {
        &self.kinds
    }

    /// Constraints in registration order
    pub fn constraints(&self) -> &[MarshaledConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&MarshaledObjective> {
        self.objective.as_ref()
    }

    /// Configure `instance` and register every variable, constraint and the objective
    ///
    /// The log flag is set before the variables are registered; the time limit
    /// and scaling mode after the objective, and only when set. Without an
    /// objective the solver is left to solve a feasibility problem.
    pub fn load_into<I: SolverInstance>(&self, instance: &mut I, config: &SolverConfig) {
        instance.show_log(config.show_log);

        instance.add_vars(&self.lower, &self.upper, &self.kinds);
        for constr in &self.constraints {
            instance.add_constr(&constr.lhs, &constr.rhs, constr.sense);
        }
        if let Some(obj) = &self.objective {
            instance.set_objective(&obj.row, obj.sense);
        }

        if !config.time_limit.is_zero() {
            instance.set_time_limit(config.time_limit.as_secs_f64());
        }
        if let Some(mode) = config.scaling {
            instance.set_scaling(mode.bits());
        }
    }
}
