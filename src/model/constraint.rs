//! Constraints and objectives
//!
//! A [`Constraint`] keeps both of its sides as full expressions. Reducing
//! `lhs - rhs sense 0` is left to the solver backend, so the left and right
//! terms and constants reach the solver exactly as the caller wrote them.

use std::fmt;

use super::Expr;

/// Relational sense of a linear constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintSense {
    /// Less than or equal to (≤)
    LessEqual,
    /// Greater than or equal to (≥)
    GreaterEqual,
    /// Equal to (=)
    Equal,
}

impl ConstraintSense {
    /// Tag passed across the solver boundary
    pub fn tag(self) -> u8 {
        match self {
            ConstraintSense::LessEqual => b'<',
            ConstraintSense::GreaterEqual => b'>',
            ConstraintSense::Equal => b'=',
        }
    }

    /// Inverse of [`ConstraintSense::tag`]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'<' => Some(ConstraintSense::LessEqual),
            b'>' => Some(ConstraintSense::GreaterEqual),
            b'=' => Some(ConstraintSense::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintSense::LessEqual => "<=",
            ConstraintSense::GreaterEqual => ">=",
            ConstraintSense::Equal => "==",
        })
    }
}

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjSense {
    /// Minimize the objective function
    Minimize,
    /// Maximize the objective function
    Maximize,
}

impl ObjSense {
    /// Tag passed across the solver boundary
    pub fn tag(self) -> i32 {
        match self {
            ObjSense::Minimize => 1,
            ObjSense::Maximize => -1,
        }
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            1 => Some(ObjSense::Minimize),
            -1 => Some(ObjSense::Maximize),
            _ => None,
        }
    }
}

/// Identifier of a registered constraint, equal to its registration index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A linear constraint `lhs sense rhs`
///
/// # Examples
///
/// ```rust
/// use lpmodel::constraint;
/// use lpmodel::lp_model;
/// use lpmodel::model::{Constraint, ConstraintSense, VarKind};
///
/// let mut model = lp_model!();
/// let x = model.add_var(0.0, 10.0, VarKind::Continuous);
/// let y = model.add_var(0.0, 10.0, VarKind::Continuous);
///
/// // Using the constraint! macro
/// let c = constraint!((x + y) <= 10.0);
///
/// // Using builder methods
/// let c = Constraint::le(x + y, 10.0);
///
/// // Using the constructor directly
/// let c = Constraint::new(x + y, ConstraintSense::LessEqual, 10.0);
/// # model.add_constr(c);
/// ```
pub struct Constraint<Brand> {
    lhs: Expr<Brand>,
    rhs: Expr<Brand>,
    sense: ConstraintSense,
}

impl<Brand> Constraint<Brand> {
    pub fn new(
        lhs: impl Into<Expr<Brand>>,
        sense: ConstraintSense,
        rhs: impl Into<Expr<Brand>>,
    ) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
            sense,
        }
    }

    /// Create a less-than-or-equal constraint: lhs <= rhs
    pub fn le(lhs: impl Into<Expr<Brand>>, rhs: impl Into<Expr<Brand>>) -> Self {
        Self::new(lhs, ConstraintSense::LessEqual, rhs)
    }

    /// Create a greater-than-or-equal constraint: lhs >= rhs
    pub fn ge(lhs: impl Into<Expr<Brand>>, rhs: impl Into<Expr<Brand>>) -> Self {
        Self::new(lhs, ConstraintSense::GreaterEqual, rhs)
    }

    /// Create an equality constraint: lhs == rhs
    pub fn eq(lhs: impl Into<Expr<Brand>>, rhs: impl Into<Expr<Brand>>) -> Self {
        Self::new(lhs, ConstraintSense::Equal, rhs)
    }

    pub fn lhs(&self) -> &Expr<Brand> {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr<Brand> {
        &self.rhs
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }
}

impl<Brand> Clone for Constraint<Brand> {
    fn clone(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            sense: self.sense,
        }
    }
}

impl<Brand> fmt::Debug for Constraint<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("lhs", &self.lhs)
            .field("sense", &self.sense)
            .field("rhs", &self.rhs)
            .finish()
    }
}

impl<Brand> fmt::Display for Constraint<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.sense, self.rhs)
    }
}

impl<Brand> Expr<Brand> {
    /// `self <= rhs`
    pub fn le(self, rhs: impl Into<Expr<Brand>>) -> Constraint<Brand> {
        Constraint::le(self, rhs)
    }

    /// `self >= rhs`
    pub fn ge(self, rhs: impl Into<Expr<Brand>>) -> Constraint<Brand> {
        Constraint::ge(self, rhs)
    }

    /// `self == rhs`
    pub fn equals(self, rhs: impl Into<Expr<Brand>>) -> Constraint<Brand> {
        Constraint::eq(self, rhs)
    }
}

/// Objective function: an expression and an optimization direction
pub struct Objective<Brand> {
    expr: Expr<Brand>,
    sense: ObjSense,
}

impl<Brand> Objective<Brand> {
    pub fn new(expr: impl Into<Expr<Brand>>, sense: ObjSense) -> Self {
        Self {
            expr: expr.into(),
            sense,
        }
    }

    pub fn expr(&self) -> &Expr<Brand> {
        &self.expr
    }

    pub fn sense(&self) -> ObjSense {
        self.sense
    }
}

impl<Brand> Clone for Objective<Brand> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            sense: self.sense,
        }
    }
}

impl<Brand> fmt::Debug for Objective<Brand> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Objective")
            .field("expr", &self.expr)
            .field("sense", &self.sense)
            .finish()
    }
}
