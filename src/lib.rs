//! Linear and mixed-integer optimization models without hand-built solver arrays
//!
//! `lpmodel` lets you declare decision variables, combine them into sparse
//! linear expressions, state constraints and an objective, and solve the
//! result with a pluggable numerical solver.
//!
//! # Overview
//!
//! 1. Create a [`Model`] (usually with [`lp_model!`]) and add variables to it.
//! 2. Build [`Expr`]essions with ordinary arithmetic operators and turn them
//!    into constraints with [`constraint!`].
//! 3. Set an objective and call [`Model::optimize`].
//! 4. Read variable values from the returned [`Solution`].
//!
//! Before a solve the model is flattened ([`marshal`]) into index-aligned
//! arrays: one bound pair and kind tag per variable, and for each expression a
//! sparse row of coefficients and variable indices in ascending id order.
//!
//! # Usage Example
//!
//! ```no_run
//! use lpmodel::{ObjSense, VarKind, constraint, lp_model};
//!
//! let mut model = lp_model!();
//! let x = model.add_var(0.0, 10.0, VarKind::Continuous);
//! let y = model.add_var(0.0, 10.0, VarKind::Continuous);
//!
//! model.add_constr(constraint!((x + y) <= 10.0));
//! model.set_objective(x + y, ObjSense::Maximize);
//!
//! let solution = model.optimize()?;
//! assert_eq!(solution.objective_value(), 10.0);
//! # Ok::<(), lpmodel::Error>(())
//! ```
//!
//! # Modules
//!
//! - **[`model`]**: variables, expressions, constraints, objectives and the [`Model`]
//! - **[`marshal`]**: flattening of a model into solver arrays
//! - **[`solver`]**: the solver boundary, backend selection and the bundled backends
//! - **[`solution`]**: solve results
//! - **[`scaling`]**: scaling mode bitmasks
//! - **[`error`]**: error types
//! - **[`demo`]**: reference models used by the `lpmodel` binary

use clap::Parser;

pub mod demo;
pub mod error;
pub mod marshal;
pub mod model;
pub mod scaling;
pub mod solution;
pub mod solver;

pub use demo::{AssignmentArgs, KnapsackArgs, SolveArgs, assignment_main, knapsack_main, simple_mip_main};
pub use error::{Error, OptimizeError, Result};
pub use model::{
    Constraint, ConstraintId, ConstraintSense, Expr, Model, ObjSense, Objective, SolverConfig, Var,
    VarKind,
};
pub use scaling::ScaleMode;
pub use solution::Solution;
pub use solver::SolverBackend;

/// Command-line interface arguments for the `lpmodel` binary.
///
/// Every command builds a reference model, solves it and prints the values:
/// - `SimpleMip`: a three-variable binary program
/// - `Assignment`: an n x n assignment problem
/// - `Knapsack`: a 0/1 knapsack
#[derive(Debug, Parser)]
#[clap(
    name = "lpmodel",
    about = "Solve reference linear and mixed-integer models"
)]
pub enum CLIArguments {
    /// Maximize x + y + 2z over binaries, subject to x + 2y + 3z <= 4 and x + y >= 1.
    SimpleMip(SolveArgs),
    /// Assign each row to exactly one column at minimal cost.
    Assignment(AssignmentArgs),
    /// Pick the most valuable items that fit in the knapsack.
    Knapsack(KnapsackArgs),
}
