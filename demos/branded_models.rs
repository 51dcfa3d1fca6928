//! Two models with named brands solved side by side
//!
//! Variables carry the brand of the model that created them, so mixing the two
//! models below is a compile-time error.

use lpmodel::model::{ObjSense, VarKind};
use lpmodel::{constraint, lp_model};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut production = lp_model!(ProductionModel);
    let mut logistics = lp_model!(LogisticsModel);

    let widgets = production.add_var(0.0, 1000.0, VarKind::Continuous);
    let gadgets = production.add_var(0.0, 500.0, VarKind::Continuous);

    let trucks = logistics.add_var(0.0, 10.0, VarKind::Integer);
    let routes = logistics.add_var(0.0, 20.0, VarKind::Integer);

    production.add_constr(constraint!((widgets + 2.0 * gadgets) <= 1200.0));
    production.add_constr(constraint!((0.5 * widgets + gadgets) <= 400.0));
    production.set_objective(50.0 * widgets + 80.0 * gadgets, ObjSense::Maximize);

    logistics.add_constr(constraint!((trucks) <= 8.0));
    logistics.add_constr(constraint!((routes - 3.0 * trucks) <= 0.0));
    logistics.add_constr(constraint!((routes) >= 10.0));
    logistics.set_objective(trucks * 100.0 + routes * 20.0, ObjSense::Minimize);

    // These would not compile, the brands differ:
    // production.add_constr(constraint!((trucks) <= 5.0));
    // let mixed = widgets + trucks;

    let plan = production.optimize()?;
    println!("Production: {} widgets, {} gadgets", plan.value(widgets)?, plan.value(gadgets)?);
    println!("  profit {}", plan.objective_value());

    let fleet = logistics.optimize()?;
    println!("Logistics: {} trucks, {} routes", fleet.value(trucks)?, fleet.value(routes)?);
    println!("  cost {}", fleet.objective_value());

    Ok(())
}
