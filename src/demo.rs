//! Reference models solved from the command line
//!
//! Each subcommand builds a small, fixed model, solves it with the selected
//! backend and prints the variable values as a table:
//!
//! - `simple-mip`: three binaries, maximize `x + y + 2z` subject to
//!   `x + 2y + 3z <= 4` and `x + y >= 1`
//! - `assignment`: an `n x n` assignment problem (every row and every column
//!   picks exactly one cell) with a deterministic cost matrix
//! - `knapsack`: a 0/1 knapsack over a fixed item list

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use prettytable::*;
use tracing::info;

use crate::constraint;
use crate::lp_model;
use crate::model::{Expr, Model, ObjSense, Var, dot, sum_col, sum_row};
use crate::scaling::ScaleMode;
use crate::solution::Solution;
use crate::solver::SolverBackend;

/// Scaling presets selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingPreset {
    None,
    Equilibrated,
    Geometric,
    Arithmetic,
    Dynamic,
    CurtisReid,
}

impl From<ScalingPreset> for ScaleMode {
    fn from(preset: ScalingPreset) -> Self {
        match preset {
            ScalingPreset::None => ScaleMode::NONE,
            ScalingPreset::Equilibrated => ScaleMode::MODEL_EQUILIBRATED,
            ScalingPreset::Geometric => ScaleMode::MODEL_GEOMETRIC,
            ScalingPreset::Arithmetic => ScaleMode::MODEL_ARITHMETIC,
            ScalingPreset::Dynamic => ScaleMode::MODEL_DYNAMIC,
            ScalingPreset::CurtisReid => ScaleMode::MODEL_CURTIS_REID,
        }
    }
}

/// Solver options shared by every subcommand
#[derive(Parser, Debug, Clone, Default)]
pub struct SolveArgs {
    /// Solver backend: microlp, coin_cbc or gurobi (default: $LPMODEL_SOLVER, then the first enabled)
    #[clap(long)]
    pub solver: Option<String>,

    /// Show the solver's own log
    #[clap(long)]
    pub show_log: bool,

    /// Solver time limit in seconds
    #[clap(short('t'), long)]
    pub time_limit: Option<f64>,

    /// Scaling mode passed to the solver
    #[clap(long, value_enum)]
    pub scaling: Option<ScalingPreset>,

    /// Report file (default: stdout)
    #[clap(long, short)]
    pub report: Option<PathBuf>,
}

impl SolveArgs {
    fn configure<Brand>(&self, model: &mut Model<Brand>) -> Result<()> {
        model.show_log(self.show_log);
        if let Some(seconds) = self.time_limit {
            let limit = Duration::try_from_secs_f64(seconds)
                .with_context(|| format!("invalid time limit {}", seconds))?;
            model.set_time_limit(limit);
        }
        if let Some(preset) = self.scaling {
            model.set_scaling(preset.into());
        }
        Ok(())
    }

    fn backend(&self) -> Result<SolverBackend> {
        let backend = match &self.solver {
            Some(name) => SolverBackend::from_name(name)?,
            None => SolverBackend::from_env_or_default()?,
        };
        info!(backend = backend.name(), "using solver backend");
        Ok(backend)
    }

    fn solve<Brand>(&self, model: &mut Model<Brand>) -> Result<Solution<Brand>> {
        self.configure(model)?;
        Ok(self.backend()?.optimize(model)?)
    }

    fn writer(&self) -> Result<Box<dyn Write>> {
        Ok(match &self.report {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("cannot create report {}", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        })
    }
}

#[derive(Parser, Debug, Clone)]
pub struct AssignmentArgs {
    /// Number of rows and columns
    #[clap(short('n'), long, default_value_t = 4)]
    pub size: usize,

    /// Only look for a feasible assignment, without costs
    #[clap(long)]
    pub feasibility: bool,

    #[clap(flatten)]
    pub solve: SolveArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct KnapsackArgs {
    /// Knapsack capacity
    #[clap(short, long, default_value_t = 50.0)]
    pub capacity: f64,

    #[clap(flatten)]
    pub solve: SolveArgs,
}

/// Named variables and their values, plus the objective
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub values: Vec<(String, f64)>,
    pub objective: f64,
    pub optimal: bool,
}

impl Report {
    fn new<Brand>(
        title: impl Into<String>,
        solution: &Solution<Brand>,
        named: impl IntoIterator<Item = (String, Var<Brand>)>,
    ) -> Result<Self> {
        let values = named
            .into_iter()
            .map(|(name, var)| -> Result<(String, f64)> { Ok((name, solution.value(var)?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            title: title.into(),
            values,
            objective: solution.objective_value(),
            optimal: solution.is_optimal(),
        })
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        let mut table = Table::new();
        table.set_titles(row!["Variable", "Value"]);
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        for (name, value) in &self.values {
            table.add_row(row![name, format!("{}", value)]);
        }

        writeln!(writer, "{}:", self.title)?;
        table.print(writer)?;
        writeln!(
            writer,
            "Objective: {}{}",
            self.objective,
            if self.optimal { "" } else { " (not proven optimal)" }
        )?;
        Ok(())
    }
}

pub fn simple_mip(args: &SolveArgs) -> Result<Report> {
    let mut model = lp_model!(SimpleMip);
    let x = model.add_binary_var();
    let y = model.add_binary_var();
    let z = model.add_binary_var();

    model.add_constr(constraint!((x + 2.0 * y + 3.0 * z) <= 4.0));
    model.add_constr(constraint!((x + y) >= 1.0));
    model.set_objective(x + y + 2.0 * z, ObjSense::Maximize);

    let solution = args.solve(&mut model)?;
    Report::new(
        "Simple MIP",
        &solution,
        [("x".to_string(), x), ("y".to_string(), y), ("z".to_string(), z)],
    )
}

/// Cost of assigning row `i` to column `j`
pub fn assignment_cost(size: usize, i: usize, j: usize) -> f64 {
    ((i * 7 + j * 3) % size + 1) as f64
}

pub fn assignment(args: &AssignmentArgs) -> Result<Report> {
    let n = args.size;
    if n == 0 {
        bail!("assignment size must be positive");
    }

    let mut model = lp_model!(Assignment);
    let cells = model.add_binary_var_matrix(n, n);
    for k in 0..n {
        model.add_constr(constraint!((sum_row(&cells, k)?) == 1.0));
        model.add_constr(constraint!((sum_col(&cells, k)?) == 1.0));
    }
    if !args.feasibility {
        let mut cost = Expr::new(0.0);
        for (i, row) in cells.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                cost.add_term(assignment_cost(n, i, j), cell);
            }
        }
        model.set_objective(cost, ObjSense::Minimize);
    }

    let solution = args.solve.solve(&mut model)?;
    let mut picked = Vec::with_capacity(n);
    for (i, row) in cells.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if solution.is_one(cell)? {
                picked.push((format!("row {} -> col {}", i, j), cell));
            }
        }
    }
    Report::new(format!("Assignment {}x{}", n, n), &solution, picked)
}

/// (name, weight, value)
pub const KNAPSACK_ITEMS: [(&str, f64, f64); 6] = [
    ("map", 9.0, 150.0),
    ("compass", 13.0, 35.0),
    ("water", 15.0, 200.0),
    ("sandwich", 20.0, 160.0),
    ("glucose", 15.0, 60.0),
    ("tin", 8.0, 45.0),
];

pub fn knapsack(args: &KnapsackArgs) -> Result<Report> {
    let mut model = lp_model!(Knapsack);
    let take = model.add_binary_var_vector(KNAPSACK_ITEMS.len());
    let weights: Vec<f64> = KNAPSACK_ITEMS.iter().map(|item| item.1).collect();
    let values: Vec<f64> = KNAPSACK_ITEMS.iter().map(|item| item.2).collect();

    model.add_constr(constraint!((dot(&take, &weights)?) <= args.capacity));
    model.set_objective(dot(&take, &values)?, ObjSense::Maximize);

    let solution = args.solve.solve(&mut model)?;
    let named = KNAPSACK_ITEMS
        .iter()
        .zip(&take)
        .map(|(item, &var)| (item.0.to_string(), var));
    Report::new(
        format!("Knapsack (capacity {})", args.capacity),
        &solution,
        named,
    )
}

pub fn simple_mip_main(args: SolveArgs) -> Result<()> {
    simple_mip(&args)?.write(&mut args.writer()?)
}

pub fn assignment_main(args: AssignmentArgs) -> Result<()> {
    assignment(&args)?.write(&mut args.solve.writer()?)
}

pub fn knapsack_main(args: KnapsackArgs) -> Result<()> {
    if args.capacity < 0.0 {
        bail!("capacity must not be negative");
    }
    knapsack(&args)?.write(&mut args.solve.writer()?)
}
