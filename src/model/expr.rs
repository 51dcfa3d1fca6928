//! Sparse linear expressions
//!
//! An [`Expr`] is a sum of `coefficient * variable` terms plus a constant. Terms
//! are kept in a map ordered by variable id, so iterating them always yields
//! ascending ids and the flattened coefficient/index arrays built from an
//! expression are reproducible.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use itertools::Itertools;

use super::Var;

/// A linear expression: sum of terms plus constant
///
/// The term map never holds a coefficient of exactly zero. Any operation that
/// cancels a coefficient removes the term.
pub struct Expr<Brand> {
    terms: BTreeMap<usize, f64>,
    constant: f64,
    _brand: PhantomData<fn() -> Brand>,
}

impl<Brand> Expr<Brand> {
    /// Create an expression with no terms and the given constant
    pub fn new(constant: f64) -> Self {
        Self {
            terms: BTreeMap::new(),
            constant,
            _brand: PhantomData,
        }
    }

    /// Create an expression holding a single unit-coefficient term
    pub fn from_var(var: Var<Brand>) -> Self {
        let mut expr = Self::new(0.0);
        expr.add_term(1.0, var);
        expr
    }

    /// Add `coefficient * var` to the expression in place
    pub fn add_term(&mut self, coefficient: f64, var: Var<Brand>) -> &mut Self {
        self.add_raw_term(var.id(), coefficient);
        self
    }

    fn add_raw_term(&mut self, id: usize, coefficient: f64) {
        let sum = self.terms.get(&id).copied().unwrap_or(0.0) + coefficient;
        if sum == 0.0 {
            self.terms.remove(&id);
        } else {
            self.terms.insert(id, sum);
        }
    }

    /// Add another expression (or a variable, or a constant) to this one in place
    ///
    /// Coefficients of shared variables are summed; terms whose sum is exactly
    /// zero are dropped. Constants are added.
    pub fn plus(&mut self, other: impl Into<Expr<Brand>>) -> &mut Self {
        let other = other.into();
        for (id, coefficient) in other.terms {
            self.add_raw_term(id, coefficient);
        }
        self.constant += other.constant;
        self
    }

    /// Multiply every coefficient and the constant by `k` in place
    pub fn scale(&mut self, k: f64) -> &mut Self {
        for coefficient in self.terms.values_mut() {
            *coefficient *= k;
        }
        self.terms.retain(|_, coefficient| *coefficient != 0.0);
        self.constant *= k;
        self
    }

    /// Number of variables with a nonzero coefficient
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// `(variable id, coefficient)` pairs in ascending id order
    ///
    /// The iterator borrows the expression and can be cloned or recreated at
    /// will; walking it has no side effects.
    pub fn ordered_terms(&self) -> impl Iterator<Item = (usize, f64)> + Clone + '_ {
        self.terms.iter().map(|(&id, &coefficient)| (id, coefficient))
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Coefficient of `var`, zero if it does not appear
    pub fn coefficient(&self, var: Var<Brand>) -> f64 {
        self.terms.get(&var.id()).copied().unwrap_or(0.0)
    }

    /// True if the expression has no variable terms
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Largest variable id referenced, if any
    pub(crate) fn max_var_id(&self) -> Option<usize> {
        self.terms.keys().next_back().copied()
    }
}

impl<Brand> Clone for Expr<Brand> {
    fn clone(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            constant: self.constant,
            _brand: PhantomData,
        }
    }
}

impl<Brand> PartialEq for Expr<Brand> {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms && self.constant == other.constant
    }
}

impl<Brand> Default for Expr<Brand> {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<Brand> fmt::Debug for Expr<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("terms", &self.terms)
            .field("constant", &self.constant)
            .finish()
    }
}

impl<Brand> fmt::Display for Expr<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "{}", self.constant);
        }
        let terms = self
            .ordered_terms()
            .map(|(id, coefficient)| format!("{} x{}", coefficient, id))
            .join(" + ");
        if self.constant == 0.0 {
            write!(f, "{}", terms)
        } else {
            write!(f, "{} + {}", terms, self.constant)
        }
    }
}

impl<Brand> From<Var<Brand>> for Expr<Brand> {
    fn from(var: Var<Brand>) -> Self {
        Self::from_var(var)
    }
}

impl<Brand> From<&Var<Brand>> for Expr<Brand> {
    fn from(var: &Var<Brand>) -> Self {
        Self::from_var(*var)
    }
}

impl<Brand> From<f64> for Expr<Brand> {
    fn from(constant: f64) -> Self {
        Self::new(constant)
    }
}

impl<Brand> From<&Expr<Brand>> for Expr<Brand> {
    fn from(expr: &Expr<Brand>) -> Self {
        expr.clone()
    }
}
