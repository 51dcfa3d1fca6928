use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, OptimizeError, Result};
use crate::model::Var;
use crate::solver::RawSolution;

/// Tolerance used by [`Solution::is_one`]
pub const TINY: f64 = 0.01;

/// The outcome of a successful solve
///
/// A solution owns a copy of every value it reports and is independent of the
/// model and the solver that produced it.
pub struct Solution<Brand> {
    values: Vec<f64>,
    objective: f64,
    optimal: bool,
    gap: f64,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> Solution<Brand> {
    pub fn new(values: Vec<f64>, objective: f64, optimal: bool, gap: f64) -> Self {
        Self {
            values,
            objective,
            optimal,
            gap,
            _brand: PhantomData,
        }
    }

    /// Translate a raw solver result
    ///
    /// A nonzero error code is returned verbatim as an [`OptimizeError`].
    pub(crate) fn from_raw(raw: &impl RawSolution) -> Result<Self> {
        let code = raw.error_code();
        if code != OptimizeError::NO_ERROR {
            return Err(OptimizeError::new(code, raw.error_message()).into());
        }
        Ok(Self::new(
            raw.values().to_vec(),
            raw.objective(),
            raw.optimal(),
            raw.gap(),
        ))
    }

    /// Value of `var`
    pub fn value(&self, var: Var<Brand>) -> Result<f64> {
        self.values
            .get(var.id())
            .copied()
            .ok_or(Error::IndexOutOfRange {
                what: "variable",
                index: var.id(),
                len: self.values.len(),
            })
    }

    /// Approximate test for a binary variable being set
    ///
    /// True when `var` is integer or binary and its value exceeds [`TINY`],
    /// which absorbs solver noise around 0 and 1. This is not an equality
    /// test: an integer variable at 2 also counts as "one", and continuous
    /// variables never do.
    pub fn is_one(&self, var: Var<Brand>) -> Result<bool> {
        if !var.kind().is_integral() {
            return Ok(false);
        }
        Ok(self.value(var)? > TINY)
    }

    /// All values, indexed by variable id
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn objective_value(&self) -> f64 {
        self.objective
    }

    /// True if the solver proved optimality
    pub fn is_optimal(&self) -> bool {
        self.optimal
    }

    /// Optimality gap as reported by the solver
    pub fn gap(&self) -> f64 {
        self.gap
    }
}

impl<Brand> Clone for Solution<Brand> {
    fn clone(&self) -> Self {
        Self::new(self.values.clone(), self.objective, self.optimal, self.gap)
    }
}

impl<Brand> fmt::Debug for Solution<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("values", &self.values)
            .field("objective", &self.objective)
            .field("optimal", &self.optimal)
            .field("gap", &self.gap)
            .finish()
    }
}
