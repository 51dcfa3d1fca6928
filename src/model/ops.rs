//! Operator overloading for linear expressions
//!
//! Variables and expressions support natural arithmetic operators:
//!
//! ```ignore
//! let x = model.add_var(0.0, 10.0, VarKind::Continuous);
//! let y = model.add_var(0.0, 10.0, VarKind::Continuous);
//!
//! let expr1 = x + y;             // Addition
//! let expr2 = x - y;             // Subtraction
//! let expr3 = 2.0 * x;           // Scalar multiplication (left)
//! let expr4 = x * 2.0;           // Scalar multiplication (right)
//! let expr5 = x + 2.0 * y + 5.0; // Mixed
//! let expr6 = (x + y) * 3.0;     // Parentheses work
//! ```
//!
//! Every operator is defined in terms of [`Expr::plus`] and [`Expr::scale`],
//! so results never hold zero coefficients.
//!
//! All operations maintain the brand type parameter, ensuring variables from different
//! models cannot be accidentally mixed.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{Expr, Var};

// ============================================================================
// Operators for Expr
// ============================================================================

impl<Brand, T: Into<Expr<Brand>>> Add<T> for Expr<Brand> {
    type Output = Expr<Brand>;

    fn add(mut self, other: T) -> Self::Output {
        self.plus(other);
        self
    }
}

impl<Brand, T: Into<Expr<Brand>>> Sub<T> for Expr<Brand> {
    type Output = Expr<Brand>;

    fn sub(mut self, other: T) -> Self::Output {
        let mut other = other.into();
        other.scale(-1.0);
        self.plus(other);
        self
    }
}

impl<Brand> Mul<f64> for Expr<Brand> {
    type Output = Expr<Brand>;

    fn mul(mut self, other: f64) -> Self::Output {
        self.scale(other);
        self
    }
}

impl<Brand> Mul<Expr<Brand>> for f64 {
    type Output = Expr<Brand>;

    fn mul(self, other: Expr<Brand>) -> Self::Output {
        other * self
    }
}

impl<Brand> Neg for Expr<Brand> {
    type Output = Expr<Brand>;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl<Brand, T: Into<Expr<Brand>>> AddAssign<T> for Expr<Brand> {
    fn add_assign(&mut self, other: T) {
        self.plus(other);
    }
}

impl<Brand, T: Into<Expr<Brand>>> SubAssign<T> for Expr<Brand> {
    fn sub_assign(&mut self, other: T) {
        let mut other = other.into();
        other.scale(-1.0);
        self.plus(other);
    }
}

impl<Brand> MulAssign<f64> for Expr<Brand> {
    fn mul_assign(&mut self, other: f64) {
        self.scale(other);
    }
}

// ============================================================================
// Operators for Var
// ============================================================================

impl<Brand, T: Into<Expr<Brand>>> Add<T> for Var<Brand> {
    type Output = Expr<Brand>;

    fn add(self, other: T) -> Self::Output {
        Expr::from_var(self) + other
    }
}

impl<Brand, T: Into<Expr<Brand>>> Sub<T> for Var<Brand> {
    type Output = Expr<Brand>;

    fn sub(self, other: T) -> Self::Output {
        Expr::from_var(self) - other
    }
}

impl<Brand> Mul<f64> for Var<Brand> {
    type Output = Expr<Brand>;

    fn mul(self, other: f64) -> Self::Output {
        Expr::from_var(self) * other
    }
}

impl<Brand> Mul<Var<Brand>> for f64 {
    type Output = Expr<Brand>;

    fn mul(self, other: Var<Brand>) -> Self::Output {
        other * self
    }
}

impl<Brand> Neg for Var<Brand> {
    type Output = Expr<Brand>;

    fn neg(self) -> Self::Output {
        -Expr::from_var(self)
    }
}

// ============================================================================
// Reverse operators for f64
// ============================================================================

impl<Brand> Add<Var<Brand>> for f64 {
    type Output = Expr<Brand>;

    fn add(self, other: Var<Brand>) -> Self::Output {
        Expr::from_var(other) + self
    }
}

impl<Brand> Add<Expr<Brand>> for f64 {
    type Output = Expr<Brand>;

    fn add(self, other: Expr<Brand>) -> Self::Output {
        other + self
    }
}

impl<Brand> Sub<Var<Brand>> for f64 {
    type Output = Expr<Brand>;

    fn sub(self, other: Var<Brand>) -> Self::Output {
        Expr::new(self) - other
    }
}

impl<Brand> Sub<Expr<Brand>> for f64 {
    type Output = Expr<Brand>;

    fn sub(self, other: Expr<Brand>) -> Self::Output {
        Expr::new(self) - other
    }
}
