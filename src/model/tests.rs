use std::time::Duration;

use super::*;
use crate::constraint;
use crate::error::{Error, OptimizeError};
use crate::marshal::SparseRow;
use crate::solver::SolverResult;
use crate::solver::codes;
use crate::solver::scripted::{Call, ScriptedSolver};

fn row(indices: &[usize], coeffs: &[f64], constant: f64) -> SparseRow {
    let mut model: Model<()> = Model::new();
    let vars = model.add_var_vector(8, 0.0, 1.0, VarKind::Continuous);
    let mut expr = Expr::new(constant);
    for (&idx, &coeff) in indices.iter().zip(coeffs) {
        expr.add_term(coeff, vars[idx]);
    }
    SparseRow::from_expr(&expr)
}

#[test]
fn test_var_ids_follow_creation_order() {
    let mut model: Model<()> = Model::new();
    let a = model.add_var(0.0, 1.0, VarKind::Continuous);
    let v = model.add_var_vector(3, -1.0, 1.0, VarKind::Integer);
    let b = model.add_binary_var();

    assert_eq!(a.id(), 0);
    assert_eq!(v.iter().map(|var| var.id()).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(b.id(), 4);
    assert_eq!(model.vars().len(), 5);
}

#[test]
fn test_matrix_ids_are_row_major() {
    let mut model: Model<()> = Model::new();
    let m = model.add_binary_var_matrix(2, 3);

    assert_eq!(m.len(), 2);
    assert_eq!(m[0][2].id(), 2);
    assert_eq!(m[1][0].id(), 3);
    assert_eq!(m[1][2].id(), 5);
}

#[test]
fn test_binary_bounds_are_forced() {
    let mut model: Model<()> = Model::new();
    let b = model.add_var(-5.0, 7.0, VarKind::Binary);

    assert_eq!((b.lower(), b.upper()), (0.0, 1.0));
    assert_eq!(b.kind(), VarKind::Binary);
}

#[test]
fn test_constraint_ids_are_registration_indices() {
    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 1.0, VarKind::Continuous);

    let first = model.add_constr(constraint!((x) <= 1.0));
    let second = model.add_constr(constraint!((x) >= 0.0));

    assert_eq!(first.index(), 0);
    assert_eq!(second.index(), 1);
    assert_eq!(
        model.constraint(second).map(|c| c.sense()),
        Some(ConstraintSense::GreaterEqual)
    );
}

#[test]
fn test_var_ids_stay_dense_after_registration() {
    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 4.0, VarKind::Continuous);
    let c = model.add_constr(constraint!((x) <= 3.0));
    model.set_objective(x, ObjSense::Maximize);

    let ys = model.add_var_vector(2, 0.0, 1.0, VarKind::Integer);
    let z = model.add_binary_var();
    model.add_constr(constraint!((ys[1] + z) >= 1.0));

    let ids: Vec<usize> = model.vars().iter().map(|var| var.id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!((x.id(), ys[0].id(), ys[1].id(), z.id()), (0, 1, 2, 3));
    assert_eq!(c.index(), 0);

    let marshaled = model.marshal().unwrap();
    assert_eq!(marshaled.kinds(), b"CIIB");
    assert_eq!(marshaled.constraints()[0].lhs, row(&[0], &[1.0], 0.0));
    assert_eq!(marshaled.constraints()[1].lhs, row(&[2, 3], &[1.0, 1.0], 0.0));
    assert_eq!(marshaled.objective().unwrap().row, row(&[0], &[1.0], 0.0));
}

#[test]
fn test_set_objective_replaces_previous() {
    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 1.0, VarKind::Continuous);

    model.set_objective(x, ObjSense::Minimize);
    model.set_objective(2.0 * x, ObjSense::Maximize);

    let objective = model.objective().unwrap();
    assert_eq!(objective.sense(), ObjSense::Maximize);
    assert_eq!(objective.expr().coefficient(x), 2.0);
}

#[test]
fn test_zero_var_guard() {
    let mut model: Model<()> = Model::new();
    model.add_constr(Constraint::le(1.0, 2.0));
    model.set_objective(3.0, ObjSense::Maximize);
    let solver = ScriptedSolver::new(SolverResult::optimal(Vec::new(), 0.0));

    let err = model.optimize_with(&solver).unwrap_err();

    assert!(matches!(err, Error::InvalidModel(_)));
    assert_eq!(solver.journal().created(), 0);
}

#[test]
fn test_marshaled_arrays() {
    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 10.0, VarKind::Continuous);
    let y = model.add_var(-1.0, 5.0, VarKind::Integer);
    let z = model.add_binary_var();

    // Terms are added out of id order
    model.add_constr(constraint!((3.0 * z + x + 1.0) <= 2.0 * y));
    model.add_constr(constraint!((y) == 4.0));
    model.set_objective(z - x + 7.0, ObjSense::Maximize);

    let marshaled = model.marshal().unwrap();
    assert_eq!(marshaled.lower(), &[0.0, -1.0, 0.0]);
    assert_eq!(marshaled.upper(), &[10.0, 5.0, 1.0]);
    assert_eq!(marshaled.kinds(), b"CIB");

    let first = &marshaled.constraints()[0];
    assert_eq!(first.lhs, row(&[0, 2], &[1.0, 3.0], 1.0));
    assert_eq!(first.rhs, row(&[1], &[2.0], 0.0));
    assert_eq!(first.sense, b'<');
    assert_eq!(marshaled.constraints()[1].sense, b'=');

    let objective = marshaled.objective().unwrap();
    assert_eq!(objective.row, row(&[0, 2], &[-1.0, 1.0], 7.0));
    assert_eq!(objective.sense, -1);
}

#[test]
fn test_out_of_range_variable_is_rejected() {
    let mut other: Model<()> = Model::new();
    other.add_var_vector(3, 0.0, 1.0, VarKind::Continuous);
    let stranger = other.add_var(0.0, 1.0, VarKind::Continuous);

    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 1.0, VarKind::Continuous);
    model.add_constr(constraint!((x + stranger) <= 1.0));

    match model.marshal() {
        Err(Error::InvalidModel(msg)) => assert!(msg.contains("variable 3")),
        other => panic!("unexpected result: {:?}", other),
    }

    let mut model: Model<()> = Model::new();
    model.add_var(0.0, 1.0, VarKind::Continuous);
    model.set_objective(stranger, ObjSense::Minimize);
    assert!(matches!(model.marshal(), Err(Error::InvalidModel(_))));
}

#[test]
fn test_boundary_call_sequence() {
    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 1.0, VarKind::Continuous);
    let y = model.add_var(0.0, 1.0, VarKind::Continuous);
    model.add_constr(constraint!((x + y) <= 1.0));
    model.add_constr(constraint!((x) >= 0.5));
    model.set_objective(x + y, ObjSense::Minimize);
    model
        .show_log(true)
        .set_time_limit(Duration::from_millis(1500))
        .set_scaling(ScaleMode::MODEL_GEOMETRIC);

    let solver = ScriptedSolver::new(SolverResult::optimal(vec![0.5, 0.0], 0.5));
    let solution = model.optimize_with(&solver).unwrap();

    assert_eq!(solution.value(x).unwrap(), 0.5);
    assert_eq!(solution.objective_value(), 0.5);

    let calls = solver.journal().calls();
    assert_eq!(
        calls,
        vec![
            Call::ShowLog(true),
            Call::AddVars {
                lower: vec![0.0, 0.0],
                upper: vec![1.0, 1.0],
                kinds: b"CC".to_vec(),
            },
            Call::AddConstr {
                lhs: row(&[0, 1], &[1.0, 1.0], 0.0),
                rhs: row(&[], &[], 1.0),
                sense: b'<',
            },
            Call::AddConstr {
                lhs: row(&[0], &[1.0], 0.0),
                rhs: row(&[], &[], 0.5),
                sense: b'>',
            },
            Call::SetObjective {
                row: row(&[0, 1], &[1.0, 1.0], 0.0),
                sense: 1,
            },
            Call::TimeLimit(1.5),
            Call::Scaling(132),
            Call::Optimize,
        ]
    );
}

#[test]
fn test_default_config_skips_optional_calls() {
    let mut model: Model<()> = Model::new();
    let x = model.add_binary_var();
    model.add_constr(constraint!((x) <= 1.0));

    let solver = ScriptedSolver::new(SolverResult::optimal(vec![1.0], 0.0));
    model.optimize_with(&solver).unwrap();

    let calls = solver.journal().calls();
    assert_eq!(calls.first(), Some(&Call::ShowLog(false)));
    assert!(!calls.iter().any(|call| matches!(
        call,
        Call::TimeLimit(_) | Call::Scaling(_) | Call::SetObjective { .. }
    )));
    assert_eq!(calls.last(), Some(&Call::Optimize));
}

#[test]
fn test_resources_released_on_success() {
    let mut model: Model<()> = Model::new();
    let x = model.add_binary_var();
    model.set_objective(x, ObjSense::Maximize);

    let solver = ScriptedSolver::new(SolverResult::optimal(vec![1.0], 1.0));
    let solution = model.optimize_with(&solver).unwrap();

    assert!(solution.is_one(x).unwrap());
    assert_eq!(solver.journal().created(), 1);
    assert_eq!(solver.journal().live(), 0);
}

#[test]
fn test_resources_released_on_solver_error() {
    let mut model: Model<()> = Model::new();
    let x = model.add_var(0.0, 1.0, VarKind::Continuous);
    model.add_constr(constraint!((x) >= 2.0));

    let solver = ScriptedSolver::new(SolverResult::failed(codes::INFEASIBLE, "infeasible", 1));
    let err = model.optimize_with(&solver).unwrap_err();

    assert!(OptimizeError::new(codes::INFEASIBLE, "").is(&err));
    assert!(!OptimizeError::new(codes::TIMEOUT, "").is(&err));
    assert_eq!(err.to_string(), "[Code = 2] infeasible");
    assert_eq!(solver.journal().created(), 1);
    assert_eq!(solver.journal().live(), 0);
}

#[test]
fn test_create_failure_is_propagated() {
    let mut model: Model<()> = Model::new();
    model.add_binary_var();

    let solver = ScriptedSolver::unavailable();
    let err = model.optimize_with(&solver).unwrap_err();

    assert!(matches!(err, Error::Backend(_)));
    assert_eq!(solver.journal().live(), 0);
}

#[test]
fn test_solution_outlives_model() {
    let solver = ScriptedSolver::new(SolverResult::optimal(vec![3.0, 4.0], 7.0));
    let (solution, y) = {
        let mut model: Model<()> = Model::new();
        let vars = model.add_var_vector(2, 0.0, 10.0, VarKind::Integer);
        (model.optimize_with(&solver).unwrap(), vars[1])
    };

    assert_eq!(solution.value(y).unwrap(), 4.0);
    assert_eq!(solution.values(), &[3.0, 4.0]);
}
