//! Modeling layer: variables, expressions, constraints and the [`Model`] that owns them
//!
//! # Type Safety with Branded Types
//!
//! All core types (`Var`, `Expr`, `Constraint`, `Objective`, `Model`, `Solution`)
//! use a generic `Brand` type parameter that provides compile-time guarantees:
//!
//! - Variables from one model cannot be accidentally used with another model
//! - Constraints are type-checked to ensure they only use variables from their model
//! - No runtime overhead - the brand is a zero-sized phantom type
//!
//! For simple cases, use the unit brand `()`:
//!
//! ```rust
//! use lpmodel::model::{Model, VarKind};
//!
//! let mut model: Model<()> = Model::new();
//! let x = model.add_var(0.0, 10.0, VarKind::Continuous);
//! ```
//!
//! Models sharing the unit brand can still exchange variables; such mix-ups are
//! caught at run time instead (marshaling rejects unknown ids, [`Solution::value`]
//! rejects out-of-range ids). Use the `lp_model!()` macro to get a brand that
//! is unique to one model:
//!
//! ```rust
//! use lpmodel::constraint;
//! use lpmodel::lp_model;
//! use lpmodel::model::VarKind;
//!
//! let mut model1 = lp_model!();
//! let mut model2 = lp_model!();
//!
//! let x = model1.add_var(0.0, 10.0, VarKind::Continuous);
//! let y = model2.add_var(0.0, 10.0, VarKind::Continuous);
//!
//! // This compiles:
//! model1.add_constr(constraint!((x) <= 5.0));
//!
//! // This would NOT compile (type error):
//! // model1.add_constr(constraint!((y) <= 5.0));
//! ```
//!
//! # Building Models
//!
//! ```rust,no_run
//! use lpmodel::constraint;
//! use lpmodel::lp_model;
//! use lpmodel::model::{ObjSense, VarKind};
//!
//! let mut model = lp_model!();
//! let x = model.add_var(0.0, 10.0, VarKind::Continuous);
//! let y = model.add_var(0.0, 10.0, VarKind::Continuous);
//!
//! model.add_constr(constraint!((x + y) <= 10.0));
//! model.add_constr(constraint!((x - y) >= 2.0));
//! model.set_objective(x + 2.0 * y, ObjSense::Maximize);
//!
//! let solution = model.optimize()?;
//! println!("x = {}", solution.value(x)?);
//! # Ok::<(), lpmodel::Error>(())
//! ```
//!
//! # Threading
//!
//! A `Model` is single-owner: mutation takes `&mut self`, so concurrent
//! `add_var`/`add_constr`/`set_objective` calls are rejected by the borrow
//! checker rather than left undefined. [`Model::optimize`] blocks the calling
//! thread until the solver returns.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::marshal::MarshaledModel;
use crate::scaling::ScaleMode;
use crate::solution::Solution;
use crate::solver::{self, Solver, SolverInstance};

pub mod builders;
mod constraint;
mod expr;
// Macros for convenient syntax
pub mod macros;
// Operator overloading for linear expressions
pub mod ops;

pub use builders::{dot, sum, sum_col, sum_row, sum_vars};
pub use constraint::{Constraint, ConstraintId, ConstraintSense, ObjSense, Objective};
pub use expr::Expr;

/// Kinds of decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Continuous variable (can take any real value within its bounds)
    Continuous,
    /// Integer variable (can only take integer values)
    Integer,
    /// Binary variable (can only take values 0 or 1)
    Binary,
}

impl VarKind {
    /// Tag passed across the solver boundary
    pub fn tag(self) -> u8 {
        match self {
            VarKind::Continuous => b'C',
            VarKind::Integer => b'I',
            VarKind::Binary => b'B',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'C' => Some(VarKind::Continuous),
            b'I' => Some(VarKind::Integer),
            b'B' => Some(VarKind::Binary),
            _ => None,
        }
    }

    /// True for kinds restricted to integral values
    pub fn is_integral(self) -> bool {
        matches!(self, VarKind::Integer | VarKind::Binary)
    }
}

/// A decision variable of a model
///
/// Variables are created by the `add_var*` methods of [`Model`] and are
/// immutable afterwards. The id is the variable's column index in every array
/// handed to a solver: ids start at 0 and follow creation order.
pub struct Var<Brand> {
    id: usize,
    lower: f64,
    upper: f64,
    kind: VarKind,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> Var<Brand> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }
}

// Manual trait implementations that don't require Brand to implement anything
impl<Brand> fmt::Debug for Var<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var")
            .field("id", &self.id)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<Brand> Clone for Var<Brand> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Brand> Copy for Var<Brand> {}

impl<Brand> PartialEq for Var<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Brand> Eq for Var<Brand> {}

impl<Brand> Hash for Var<Brand> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Solver options passed through unmodified by [`Model::optimize`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverConfig {
    /// Let the solver print its log.
    pub show_log: bool,
    /// Solver time limit. Zero means no limit.
    pub time_limit: Duration,
    /// Scaling mode, if one was requested.
    pub scaling: Option<ScaleMode>,
}

/// A linear / mixed-integer optimization model
///
/// The model exclusively owns its variables, constraints and objective.
/// Variables can only be created through a model.
pub struct Model<Brand> {
    vars: Vec<Var<Brand>>,
    constrs: Vec<Constraint<Brand>>,
    objective: Option<Objective<Brand>>,
    config: SolverConfig,
}

impl<Brand> Model<Brand> {
    /// Create an empty model that hides the solver log and has no time limit
    pub fn new() -> Self {
        Self {
            vars: Vec::new(),
            constrs: Vec::new(),
            objective: None,
            config: SolverConfig::default(),
        }
    }

    /// Instruct the solver to show its log or not
    pub fn show_log(&mut self, should_show: bool) -> &mut Self {
        self.config.show_log = should_show;
        self
    }

    /// Set the solver time limit; `Duration::ZERO` removes it
    pub fn set_time_limit(&mut self, limit: Duration) -> &mut Self {
        self.config.time_limit = limit;
        self
    }

    /// Set the scaling mode passed to the solver
    pub fn set_scaling(&mut self, mode: ScaleMode) -> &mut Self {
        self.config.scaling = Some(mode);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn push_var(&mut self, lower: f64, upper: f64, kind: VarKind) -> Var<Brand> {
        let (lower, upper) = match kind {
            VarKind::Binary => (0.0, 1.0),
            _ => (lower, upper),
        };
        let var = Var {
            id: self.vars.len(),
            lower,
            upper,
            kind,
            _brand: PhantomData,
        };
        self.vars.push(var);
        var
    }

    /// Add a variable with the given bounds and kind
    ///
    /// Binary variables always get bounds [0, 1], whatever is passed.
    pub fn add_var(&mut self, lower: f64, upper: f64, kind: VarKind) -> Var<Brand> {
        self.push_var(lower, upper, kind)
    }

    pub fn add_binary_var(&mut self) -> Var<Brand> {
        self.push_var(0.0, 1.0, VarKind::Binary)
    }

    /// Add `num` variables sharing bounds and kind, with consecutive ids
    pub fn add_var_vector(
        &mut self,
        num: usize,
        lower: f64,
        upper: f64,
        kind: VarKind,
    ) -> Vec<Var<Brand>> {
        self.vars.reserve(num);
        (0..num).map(|_| self.push_var(lower, upper, kind)).collect()
    }

    pub fn add_binary_var_vector(&mut self, num: usize) -> Vec<Var<Brand>> {
        self.add_var_vector(num, 0.0, 1.0, VarKind::Binary)
    }

    /// Add a `rows` x `cols` matrix of variables; ids are assigned row by row
    pub fn add_var_matrix(
        &mut self,
        rows: usize,
        cols: usize,
        lower: f64,
        upper: f64,
        kind: VarKind,
    ) -> Vec<Vec<Var<Brand>>> {
        (0..rows)
            .map(|_| self.add_var_vector(cols, lower, upper, kind))
            .collect()
    }

    pub fn add_binary_var_matrix(&mut self, rows: usize, cols: usize) -> Vec<Vec<Var<Brand>>> {
        self.add_var_matrix(rows, cols, 0.0, 1.0, VarKind::Binary)
    }

    /// Add a constraint to the model
    pub fn add_constr(&mut self, constraint: Constraint<Brand>) -> ConstraintId {
        let constr_id = ConstraintId(self.constrs.len());
        self.constrs.push(constraint);
        constr_id
    }

    /// Set the objective function, replacing any previous one
    pub fn set_objective(&mut self, expr: impl Into<Expr<Brand>>, sense: ObjSense) {
        self.objective = Some(Objective::new(expr, sense));
    }

    pub fn vars(&self) -> &[Var<Brand>] {
        &self.vars
    }

    pub fn constraints(&self) -> &[Constraint<Brand>] {
        &self.constrs
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint<Brand>> {
        self.constrs.get(id.0)
    }

    pub fn objective(&self) -> Option<&Objective<Brand>> {
        self.objective.as_ref()
    }

    /// Flatten the model into the arrays a solver expects
    pub fn marshal(&self) -> Result<MarshaledModel> {
        MarshaledModel::from_model(self)
    }

    /// Optimize the model with the backend selected by `LPMODEL_SOLVER`
    ///
    /// See [`solver::SolverBackend`] for the selection rules.
    pub fn optimize(&self) -> Result<Solution<Brand>> {
        let backend = solver::SolverBackend::from_env_or_default()?;
        debug!(backend = backend.name(), "selected solver backend");
        backend.optimize(self)
    }

    /// Optimize the model with the given solver
    ///
    /// The solver instance and its result are dropped before this returns,
    /// on success and on every error path.
    pub fn optimize_with<S: Solver>(&self, solver: &S) -> Result<Solution<Brand>> {
        let marshaled = self.marshal()?;
        debug!(
            solver = solver.name(),
            vars = marshaled.num_vars(),
            constraints = marshaled.constraints().len(),
            has_objective = marshaled.objective().is_some(),
            "marshaled model"
        );

        let mut instance = solver.create()?;
        marshaled.load_into(&mut instance, &self.config);
        let raw = instance.optimize();
        Solution::from_raw(&raw)
    }
}

impl<Brand> Default for Model<Brand> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Brand> fmt::Debug for Model<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("vars", &self.vars)
            .field("constrs", &self.constrs)
            .field("objective", &self.objective)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests;
