//! Convenience builders that fold variables and expressions into a fresh [`Expr`]
//!
//! None of these mutate their arguments: each starts from an empty expression
//! and accumulates into it with [`Expr::plus`].

use crate::error::{Error, Result};

use super::{Expr, Var};

/// Sum of the given expressions (or variables)
pub fn sum<Brand, E>(exprs: impl IntoIterator<Item = E>) -> Expr<Brand>
where
    E: Into<Expr<Brand>>,
{
    let mut total = Expr::new(0.0);
    for expr in exprs {
        total.plus(expr);
    }
    total
}

/// Sum of the given variables
pub fn sum_vars<Brand>(vars: &[Var<Brand>]) -> Expr<Brand> {
    let mut total = Expr::new(0.0);
    for &var in vars {
        total.plus(var);
    }
    total
}

/// Sum of every variable in one row of a variable matrix
pub fn sum_row<Brand>(vars: &[Vec<Var<Brand>>], row: usize) -> Result<Expr<Brand>> {
    let cells = vars.get(row).ok_or(Error::IndexOutOfRange {
        what: "row",
        index: row,
        len: vars.len(),
    })?;
    Ok(sum_vars(cells))
}

/// Sum of every variable in one column of a variable matrix
///
/// Fails if the matrix is empty or any row is too short to hold `col`.
pub fn sum_col<Brand>(vars: &[Vec<Var<Brand>>], col: usize) -> Result<Expr<Brand>> {
    if vars.is_empty() {
        return Err(Error::IndexOutOfRange {
            what: "column",
            index: col,
            len: 0,
        });
    }
    let mut total = Expr::new(0.0);
    for cells in vars {
        let &var = cells.get(col).ok_or(Error::IndexOutOfRange {
            what: "column",
            index: col,
            len: cells.len(),
        })?;
        total.plus(var);
    }
    Ok(total)
}

/// Dot product of a vector of variables and a vector of coefficients
pub fn dot<Brand>(vars: &[Var<Brand>], coeffs: &[f64]) -> Result<Expr<Brand>> {
    if vars.len() != coeffs.len() {
        return Err(Error::ShapeMismatch {
            vars: vars.len(),
            coeffs: coeffs.len(),
        });
    }
    let mut total = Expr::new(0.0);
    for (&var, &coeff) in vars.iter().zip(coeffs) {
        total.add_term(coeff, var);
    }
    Ok(total)
}
