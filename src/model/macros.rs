//! Macros for building models
//!
//! Convenient syntax for creating branded models and constraints.

/// Create a new [`Model`](crate::model::Model) with a unique brand
///
/// Each invocation defines its own brand type, so variables of one model
/// cannot be used in another.
///
/// # Examples
///
/// ```rust
/// use lpmodel::lp_model;
/// use lpmodel::model::VarKind;
///
/// // Anonymous brand (each call creates unique anonymous type)
/// let mut model = lp_model!();
/// let x = model.add_var(0.0, 10.0, VarKind::Continuous);
///
/// // Named brand (easier to identify in type errors)
/// let mut production = lp_model!(ProductionModel);
/// let mut scheduling = lp_model!(SchedulingModel);
///
/// let units = production.add_var(0.0, 100.0, VarKind::Integer);
/// let hours = scheduling.add_var(0.0, 24.0, VarKind::Continuous);
///
/// // This would not compile, the brands differ:
/// // scheduling.add_constr(lpmodel::constraint!((units) <= 50.0));
/// ```
#[macro_export]
macro_rules! lp_model {
    ($brand_name:ident) => {{
        struct $brand_name;
        $crate::model::Model::<$brand_name>::new()
    }};

    // `UniqueBrand` is local to the block, so every expansion gets a distinct type
    () => {{
        struct UniqueBrand;
        $crate::model::Model::<UniqueBrand>::new()
    }};
}

/// Create a [`Constraint`](crate::model::Constraint) using comparison syntax
///
/// The left-hand side must be in parentheses. Both sides accept anything
/// convertible into an expression: variables, expressions and `f64` constants.
///
/// # Examples
///
/// ```rust
/// use lpmodel::constraint;
/// use lpmodel::lp_model;
/// use lpmodel::model::VarKind;
///
/// let mut model = lp_model!(Scheduling);
/// let x = model.add_var(0.0, 10.0, VarKind::Continuous);
/// let y = model.add_var(0.0, 10.0, VarKind::Continuous);
///
/// model.add_constr(constraint!((x + y) == 10.0));
/// model.add_constr(constraint!((2.0 * x) <= y + 5.0));
/// model.add_constr(constraint!((x - y) >= 0.0));
/// ```
#[macro_export]
macro_rules! constraint {
    (($lhs:expr) == $rhs:expr) => {
        $crate::model::Constraint::new($lhs, $crate::model::ConstraintSense::Equal, $rhs)
    };
    (($lhs:expr) <= $rhs:expr) => {
        $crate::model::Constraint::new($lhs, $crate::model::ConstraintSense::LessEqual, $rhs)
    };
    (($lhs:expr) >= $rhs:expr) => {
        $crate::model::Constraint::new($lhs, $crate::model::ConstraintSense::GreaterEqual, $rhs)
    };
}
