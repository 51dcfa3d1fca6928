//! Example demonstrating the ways of building constraints

use lpmodel::model::{Constraint, Expr, ObjSense, VarKind};
use lpmodel::{constraint, lp_model};

fn main() -> anyhow::Result<()> {
    let mut model = lp_model!();

    let x = model.add_var(0.0, f64::INFINITY, VarKind::Continuous);
    let y = model.add_var(0.0, f64::INFINITY, VarKind::Continuous);

    // Method 1: the constraint! macro
    model.add_constr(constraint!((2.0 * x + 3.0 * y) <= 100.0));
    model.add_constr(constraint!((x - y) >= 5.0));

    // Method 2: Constraint constructors
    let balance = model.add_constr(Constraint::eq(x + y, 50.0));

    // Method 3: comparison methods on expressions
    model.add_constr(Expr::from(x).ge(y - 20.0));

    println!("Constraints:");
    for (idx, constr) in model.constraints().iter().enumerate() {
        println!("  c{}: {}", idx, constr);
    }
    if let Some(constr) = model.constraint(balance) {
        println!("Balance constraint is c{}: {}", balance.index(), constr);
    }

    model.set_objective(x + 2.0 * y, ObjSense::Maximize);

    let solution = model.optimize()?;
    let x_val = solution.value(x)?;
    let y_val = solution.value(y)?;
    println!("\nSolution:");
    println!("Objective value: {}", solution.objective_value());
    println!("x = {}", x_val);
    println!("y = {}", y_val);

    println!("\nConstraint verification:");
    println!("2x + 3y = {} (should be <= 100)", 2.0 * x_val + 3.0 * y_val);
    println!("x - y = {} (should be >= 5)", x_val - y_val);
    println!("x + y = {} (should be == 50)", x_val + y_val);

    Ok(())
}
