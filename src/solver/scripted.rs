//! Recording solver for unit tests
//!
//! [`ScriptedSolver`] answers every `optimize` with a canned [`SolverResult`]
//! and logs each boundary call, in order, to a shared [`Journal`]. The journal
//! also counts live instances and result handles so tests can check that both
//! are released.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{RawSolution, Solver, SolverInstance, SolverResult};
use crate::error::{Error, Result};
use crate::marshal::SparseRow;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ShowLog(bool),
    TimeLimit(f64),
    Scaling(i32),
    AddVars {
        lower: Vec<f64>,
        upper: Vec<f64>,
        kinds: Vec<u8>,
    },
    AddConstr {
        lhs: SparseRow,
        rhs: SparseRow,
        sense: u8,
    },
    SetObjective {
        row: SparseRow,
        sense: i32,
    },
    Optimize,
}

#[derive(Debug, Default)]
pub struct Journal {
    calls: RefCell<Vec<Call>>,
    created: Cell<usize>,
    live_instances: Cell<usize>,
    live_results: Cell<usize>,
}

impl Journal {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// Instances or result handles not yet dropped
    pub fn live(&self) -> usize {
        self.live_instances.get() + self.live_results.get()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    journal: Rc<Journal>,
    response: SolverResult,
    refuse_create: bool,
}

impl ScriptedSolver {
    /// A solver answering with `response`
    pub fn new(response: SolverResult) -> Self {
        Self {
            journal: Rc::default(),
            response,
            refuse_create: false,
        }
    }

    /// A solver whose instances can never be created
    pub fn unavailable() -> Self {
        Self {
            refuse_create: true,
            ..Self::new(SolverResult::optimal(Vec::new(), 0.0))
        }
    }

    pub fn journal(&self) -> Rc<Journal> {
        Rc::clone(&self.journal)
    }
}

impl Solver for ScriptedSolver {
    type Instance = ScriptedInstance;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn create(&self) -> Result<ScriptedInstance> {
        if self.refuse_create {
            return Err(Error::Backend("scripted solver unavailable".into()));
        }
        let journal = Rc::clone(&self.journal);
        journal.created.set(journal.created.get() + 1);
        journal.live_instances.set(journal.live_instances.get() + 1);
        Ok(ScriptedInstance {
            journal,
            response: self.response.clone(),
        })
    }
}

pub struct ScriptedInstance {
    journal: Rc<Journal>,
    response: SolverResult,
}

impl SolverInstance for ScriptedInstance {
    type Solution = ScriptedResult;

    fn show_log(&mut self, should_show: bool) {
        self.journal.record(Call::ShowLog(should_show));
    }

    fn set_time_limit(&mut self, seconds: f64) {
        self.journal.record(Call::TimeLimit(seconds));
    }

    fn set_scaling(&mut self, mode: i32) {
        self.journal.record(Call::Scaling(mode));
    }

    fn add_vars(&mut self, lower: &[f64], upper: &[f64], kinds: &[u8]) {
        self.journal.record(Call::AddVars {
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            kinds: kinds.to_vec(),
        });
    }

    fn add_constr(&mut self, lhs: &SparseRow, rhs: &SparseRow, sense: u8) {
        self.journal.record(Call::AddConstr {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
            sense,
        });
    }

    fn set_objective(&mut self, objective: &SparseRow, sense: i32) {
        self.journal.record(Call::SetObjective {
            row: objective.clone(),
            sense,
        });
    }

    fn optimize(&mut self) -> ScriptedResult {
        self.journal.record(Call::Optimize);
        let journal = Rc::clone(&self.journal);
        journal.live_results.set(journal.live_results.get() + 1);
        ScriptedResult {
            journal,
            result: self.response.clone(),
        }
    }
}

impl Drop for ScriptedInstance {
    fn drop(&mut self) {
        self.journal
            .live_instances
            .set(self.journal.live_instances.get() - 1);
    }
}

pub struct ScriptedResult {
    journal: Rc<Journal>,
    result: SolverResult,
}

impl RawSolution for ScriptedResult {
    fn error_code(&self) -> i32 {
        self.result.error_code()
    }

    fn error_message(&self) -> &str {
        self.result.error_message()
    }

    fn objective(&self) -> f64 {
        RawSolution::objective(&self.result)
    }

    fn optimal(&self) -> bool {
        RawSolution::optimal(&self.result)
    }

    fn gap(&self) -> f64 {
        self.result.gap()
    }

    fn values(&self) -> &[f64] {
        self.result.values()
    }
}

impl Drop for ScriptedResult {
    fn drop(&mut self) {
        self.journal
            .live_results
            .set(self.journal.live_results.get() - 1);
    }
}
