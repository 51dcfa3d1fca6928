#![cfg(feature = "microlp")]

use std::fs;
use std::process::Command;
use std::time::Duration;

use lpmodel::model::{sum_col, sum_row};
use lpmodel::solver::codes;
use lpmodel::solver::microlp::MicrolpSolver;
use lpmodel::{Error, ObjSense, OptimizeError, ScaleMode, VarKind, constraint, lp_model};
use tempfile::TempDir;

const EPS: f64 = 1e-6;

fn run_lpmodel(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lpmodel"))
        .args(args)
        .env("LPMODEL_SOLVER", "microlp")
        .output()
        .expect("failed to run lpmodel")
}

#[cfg(test)]
mod scenario_tests {
    use super::*;

    /// One binary variable, maximized, no constraints
    #[test]
    fn test_single_binary_maximized() {
        let mut model = lp_model!(SingleBinary);
        let b = model.add_binary_var();
        model.set_objective(b, ObjSense::Maximize);

        let solution = model.optimize_with(&MicrolpSolver).unwrap();

        assert!((solution.value(b).unwrap() - 1.0).abs() < EPS);
        assert!(solution.is_one(b).unwrap());
        assert!(solution.is_optimal());
    }

    #[test]
    fn test_continuous_sum_bounded() {
        let mut model = lp_model!(ContinuousSum);
        let x = model.add_var(0.0, 10.0, VarKind::Continuous);
        let y = model.add_var(0.0, 10.0, VarKind::Continuous);
        model.add_constr(constraint!((x + y) <= 10.0));
        model.set_objective(x + y, ObjSense::Maximize);

        let solution = model.optimize_with(&MicrolpSolver).unwrap();

        assert!((solution.objective_value() - 10.0).abs() < EPS);
        let total = solution.value(x).unwrap() + solution.value(y).unwrap();
        assert!((total - 10.0).abs() < EPS);
        assert!(!solution.is_one(x).unwrap());
    }

    #[test]
    fn test_simple_mip() {
        let mut model = lp_model!(SimpleMip);
        let x = model.add_binary_var();
        let y = model.add_binary_var();
        let z = model.add_binary_var();
        model.add_constr(constraint!((x + 2.0 * y + 3.0 * z) <= 4.0));
        model.add_constr(constraint!((x + y) >= 1.0));
        model.set_objective(x + y + 2.0 * z, ObjSense::Maximize);

        let solution = model.optimize_with(&MicrolpSolver).unwrap();

        assert!(solution.is_one(x).unwrap());
        assert!(!solution.is_one(y).unwrap());
        assert!(solution.is_one(z).unwrap());
        assert!((solution.objective_value() - 3.0).abs() < EPS);
    }

    /// Rows and columns each summing to one, without objective
    #[test]
    fn test_rows_and_columns_form_a_permutation() {
        let mut model = lp_model!(Permutation);
        let cells = model.add_binary_var_matrix(4, 4);
        for k in 0..4 {
            model.add_constr(constraint!((sum_row(&cells, k).unwrap()) == 1.0));
            model.add_constr(constraint!((sum_col(&cells, k).unwrap()) == 1.0));
        }

        let solution = model.optimize_with(&MicrolpSolver).unwrap();

        for k in 0..4 {
            let in_row = cells[k]
                .iter()
                .filter(|&&cell| solution.is_one(cell).unwrap())
                .count();
            let in_col = cells
                .iter()
                .filter(|row| solution.is_one(row[k]).unwrap())
                .count();
            assert_eq!(in_row, 1, "row {}", k);
            assert_eq!(in_col, 1, "column {}", k);
        }
    }

    #[test]
    fn test_constants_on_both_sides() {
        let mut model = lp_model!(Constants);
        let x = model.add_var(0.0, 100.0, VarKind::Continuous);
        let y = model.add_var(0.0, 100.0, VarKind::Continuous);
        // x + 3 <= 10 - y, minimize -x + 5
        model.add_constr(constraint!((x + 3.0) <= 10.0 - y));
        model.add_constr(constraint!((y) >= 2.0));
        model.set_objective(5.0 - x, ObjSense::Minimize);

        let solution = model.optimize_with(&MicrolpSolver).unwrap();

        assert!((solution.value(x).unwrap() - 5.0).abs() < EPS);
        assert!(solution.objective_value().abs() < EPS);
    }

    #[test]
    fn test_infeasible_model_reports_code() {
        let mut model = lp_model!(Infeasible);
        let x = model.add_var(0.0, 1.0, VarKind::Integer);
        model.add_constr(constraint!((x) >= 2.0));
        model.set_objective(x, ObjSense::Minimize);

        let err = model.optimize_with(&MicrolpSolver).unwrap_err();

        assert!(OptimizeError::new(codes::INFEASIBLE, "").is(&err));
        assert!(err.to_string().starts_with("[Code = 2]"));
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let model = lp_model!(Empty);
        assert!(matches!(
            model.optimize_with(&MicrolpSolver),
            Err(Error::InvalidModel(_))
        ));
    }

    #[test]
    fn test_unsupported_options_are_ignored() {
        let mut model = lp_model!(Options);
        let x = model.add_var(0.0, 4.0, VarKind::Integer);
        model.set_objective(x, ObjSense::Maximize);
        model
            .show_log(true)
            .set_time_limit(Duration::from_secs(5))
            .set_scaling(ScaleMode::MODEL_DYNAMIC);

        let solution = model.optimize_with(&MicrolpSolver).unwrap();

        assert!((solution.value(x).unwrap() - 4.0).abs() < EPS);
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_simple_mip_command() {
        let output = run_lpmodel(&["simple-mip"]);
        assert!(
            output.status.success(),
            "Command should succeed. stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Simple MIP"));
        assert!(stdout.contains("Objective: 3"));
    }

    #[test]
    fn test_assignment_report_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let report = temp_dir.path().join("assignment.rpt");

        let output = run_lpmodel(&[
            "assignment",
            "--size",
            "3",
            "--report",
            report.to_str().unwrap(),
        ]);
        assert!(output.status.success());

        let content = fs::read_to_string(&report).expect("report should be written");
        assert!(content.contains("Assignment 3x3"));
        assert_eq!(content.matches("-> col").count(), 3);
    }

    #[test]
    fn test_unknown_solver_fails() {
        let output = run_lpmodel(&["knapsack", "--solver", "simplex9000"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("simplex9000"));
    }

    #[test]
    fn test_unknown_scaling_preset_is_rejected() {
        let output = run_lpmodel(&["knapsack", "--scaling", "sideways"]);
        assert!(!output.status.success());
    }
}
