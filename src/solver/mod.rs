//! Solver boundary
//!
//! This module defines the capability set a numerical solver must offer and
//! the backends shipped with the crate:
//!
//! - [`Solver`] creates an opaque [`SolverInstance`]; dropping the instance
//!   destroys it.
//! - A [`SolverInstance`] is configured, fed flattened variables, constraints
//!   and an optional objective, and then asked to optimize.
//! - Optimizing yields a [`RawSolution`] handle; dropping it releases it.
//!
//! Every call is synchronous. [`crate::model::Model::optimize_with`] scopes the
//! instance and the result handle to a single call, so both are released on
//! every exit path.
//!
//! # Wire tags
//!
//! | Concern          | Tags                                   |
//! |------------------|----------------------------------------|
//! | variable kind    | `b'C'` continuous, `b'I'` integer, `b'B'` binary |
//! | constraint sense | `b'<'`, `b'>'`, `b'='`                 |
//! | objective sense  | `1` minimize, `-1` maximize            |
//!
//! Error codes follow lp_solve's numbering, see [`codes`].
//!
//! # Solver Selection
//!
//! [`crate::model::Model::optimize`] picks a backend via the `LPMODEL_SOLVER`
//! environment variable:
//! - `"microlp"` - pure-Rust solver (requires `microlp` feature, enabled by default)
//! - `"coin_cbc"` or `"cbc"` - COIN-OR CBC (requires `coin_cbc` feature)
//! - `"gurobi"` - Gurobi (requires `gurobi` feature)
//!
//! If not set, the first enabled of Gurobi, CBC and microlp is used.

use std::env;

use crate::error::{Error, Result};
use crate::marshal::SparseRow;
use crate::model::Model;
use crate::solution::Solution;

pub mod pending;

#[cfg(feature = "microlp")]
pub mod microlp;

#[cfg(feature = "coin_cbc")]
pub mod coin_cbc;

#[cfg(feature = "gurobi")]
pub mod gurobi;

#[cfg(any(feature = "coin_cbc", feature = "gurobi"))]
pub mod output_suppression;

#[cfg(test)]
pub(crate) mod scripted;

pub use pending::{BatchSolver, BufferedInstance, PendingModel};

/// Environment variable naming the backend used by `Model::optimize`
pub const SOLVER_ENV_VAR: &str = "LPMODEL_SOLVER";

/// Raw result codes, in lp_solve numbering
pub mod codes {
    pub const UNKNOWN_ERROR: i32 = -5;
    pub const NO_MEMORY: i32 = -2;
    pub const OPTIMAL: i32 = 0;
    pub const SUBOPTIMAL: i32 = 1;
    pub const INFEASIBLE: i32 = 2;
    pub const UNBOUNDED: i32 = 3;
    pub const NUM_FAILURE: i32 = 5;
    pub const TIMEOUT: i32 = 7;
}

/// Factory for solver instances
pub trait Solver {
    type Instance: SolverInstance;

    fn name(&self) -> &'static str;

    /// Create a fresh instance; it is destroyed when dropped
    fn create(&self) -> Result<Self::Instance>;
}

/// One solver instance holding one problem
///
/// Configuration calls are only made for options the caller set. Malformed
/// input (unknown tags, misaligned arrays, indices out of range) is reported
/// through the error code of the result, not by panicking.
pub trait SolverInstance {
    type Solution: RawSolution;

    fn show_log(&mut self, should_show: bool);

    fn set_time_limit(&mut self, seconds: f64);

    /// Scaling bitmask, see [`crate::scaling::ScaleMode`]
    fn set_scaling(&mut self, mode: i32);

    /// Register `lower.len()` variables; the three slices are index-aligned
    fn add_vars(&mut self, lower: &[f64], upper: &[f64], kinds: &[u8]);

    /// Register the constraint `lhs sense rhs`
    fn add_constr(&mut self, lhs: &SparseRow, rhs: &SparseRow, sense: u8);

    /// Set the objective; without this call the solve is a feasibility problem
    fn set_objective(&mut self, objective: &SparseRow, sense: i32);

    fn optimize(&mut self) -> Self::Solution;
}

/// Result handle returned by [`SolverInstance::optimize`]
pub trait RawSolution {
    /// Zero on success
    fn error_code(&self) -> i32;

    fn error_message(&self) -> &str;

    fn objective(&self) -> f64;

    fn optimal(&self) -> bool;

    fn gap(&self) -> f64;

    /// One value per variable, indexed by variable id
    fn values(&self) -> &[f64];
}

/// Owned [`RawSolution`] produced by the bundled backends
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub code: i32,
    pub message: String,
    pub objective: f64,
    pub optimal: bool,
    pub gap: f64,
    pub values: Vec<f64>,
}

impl SolverResult {
    /// A successful, proven optimal result
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            code: codes::OPTIMAL,
            message: String::new(),
            objective,
            optimal: true,
            gap: 0.0,
            values,
        }
    }

    /// A failed result with `num_vars` zero values
    pub fn failed(code: i32, message: impl Into<String>, num_vars: usize) -> Self {
        Self {
            code,
            message: message.into(),
            objective: 0.0,
            optimal: false,
            gap: 0.0,
            values: vec![0.0; num_vars],
        }
    }
}

impl RawSolution for SolverResult {
    fn error_code(&self) -> i32 {
        self.code
    }

    fn error_message(&self) -> &str {
        &self.message
    }

    fn objective(&self) -> f64 {
        self.objective
    }

    fn optimal(&self) -> bool {
        self.optimal
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Available solver backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverBackend {
    #[cfg(feature = "gurobi")]
    /// Gurobi commercial solver
    Gurobi,
    #[cfg(feature = "coin_cbc")]
    /// Coin CBC open-source solver
    CoinCbc,
    #[cfg(feature = "microlp")]
    /// Pure-Rust simplex and branch-and-bound
    Microlp,
}

impl SolverBackend {
    /// Parse a backend name, case-insensitively
    pub fn from_name(solver_name: &str) -> Result<Self> {
        match solver_name.to_lowercase().as_str() {
            "gurobi" => {
                #[cfg(feature = "gurobi")]
                return Ok(SolverBackend::Gurobi);
                #[cfg(not(feature = "gurobi"))]
                return Err(Error::Backend(
                    "Gurobi solver requested but gurobi feature not enabled".into(),
                ));
            }
            "coin_cbc" | "coin-cbc" | "cbc" => {
                #[cfg(feature = "coin_cbc")]
                return Ok(SolverBackend::CoinCbc);
                #[cfg(not(feature = "coin_cbc"))]
                return Err(Error::Backend(
                    "Coin CBC solver requested but coin_cbc feature not enabled".into(),
                ));
            }
            "microlp" => {
                #[cfg(feature = "microlp")]
                return Ok(SolverBackend::Microlp);
                #[cfg(not(feature = "microlp"))]
                return Err(Error::Backend(
                    "microlp solver requested but microlp feature not enabled".into(),
                ));
            }
            _ => Err(Error::Backend(format!(
                "Invalid solver '{}'. Valid options: gurobi, coin_cbc, microlp",
                solver_name
            ))),
        }
    }

    /// Get the solver backend from the environment variable or use fallback logic
    pub fn from_env_or_default() -> Result<Self> {
        if let Ok(solver_name) = env::var(SOLVER_ENV_VAR) {
            return Self::from_name(&solver_name);
        }
        Self::default_backend()
    }

    /// Prefer gurobi if available, then coin_cbc, then microlp
    pub fn default_backend() -> Result<Self> {
        #[cfg(feature = "gurobi")]
        return Ok(SolverBackend::Gurobi);

        #[allow(unreachable_code)]
        #[cfg(feature = "coin_cbc")]
        return Ok(SolverBackend::CoinCbc);

        #[allow(unreachable_code)]
        #[cfg(feature = "microlp")]
        return Ok(SolverBackend::Microlp);

        #[cfg(not(any(feature = "gurobi", feature = "coin_cbc", feature = "microlp")))]
        Err(Error::Backend(
            "No LP solver backend available. Please enable a solver feature (e.g., 'microlp' or 'coin_cbc')"
                .into(),
        ))
    }

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "gurobi")]
            SolverBackend::Gurobi => "gurobi",
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => "coin_cbc",
            #[cfg(feature = "microlp")]
            SolverBackend::Microlp => "microlp",
        }
    }

    /// Optimize `model` with this backend
    pub fn optimize<Brand>(self, model: &Model<Brand>) -> Result<Solution<Brand>> {
        match self {
            #[cfg(feature = "gurobi")]
            SolverBackend::Gurobi => model.optimize_with(&gurobi::GurobiSolver),
            #[cfg(feature = "coin_cbc")]
            SolverBackend::CoinCbc => model.optimize_with(&coin_cbc::CbcSolver),
            #[cfg(feature = "microlp")]
            SolverBackend::Microlp => model.optimize_with(&microlp::MicrolpSolver),
        }
    }
}
