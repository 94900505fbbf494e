// Shared test support: a recording engine and tracing setup
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use lpsolve_model::{LpEngine, LpModel, ModelState};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Ordered record of every engine call, shared with hooks
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Call names without arguments
    pub fn names(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.split('(').next().unwrap_or_default().to_string())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().iter().any(|n| n == name)
    }
}

/// What the fake engine reports after `solve`
#[derive(Clone, Debug)]
pub struct FakeResult {
    pub status: i32,
    pub objective: f64,
    pub count: usize,
    pub variables: Option<Vec<f64>>,
    pub iterations: u64,
}

impl FakeResult {
    pub fn optimal(variables: Vec<f64>) -> Self {
        Self {
            status: 0,
            objective: variables.iter().sum(),
            count: 1,
            variables: Some(variables),
            iterations: 4,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: 2,
            objective: 0.0,
            count: 0,
            variables: Some(Vec::new()),
            iterations: 2,
        }
    }
}

pub struct RecordingEngine {
    log: CallLog,
    result: FakeResult,
    refuse: bool,
}

impl RecordingEngine {
    pub fn new(result: FakeResult) -> Self {
        Self {
            log: CallLog::default(),
            result,
            refuse: false,
        }
    }

    /// Engine that cannot allocate models
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new(FakeResult::infeasible())
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl LpEngine for RecordingEngine {
    fn make_lp(&self, rows: usize, cols: usize) -> Option<Box<dyn LpModel>> {
        self.log.push(format!("make_lp({}, {})", rows, cols));
        if self.refuse {
            return None;
        }
        Some(Box::new(RecordingModel {
            log: self.log.clone(),
            result: self.result.clone(),
            state: ModelState::new(rows, cols),
            solved: false,
        }))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub struct RecordingModel {
    log: CallLog,
    result: FakeResult,
    state: ModelState,
    solved: bool,
}

impl LpModel for RecordingModel {
    fn set_scaling(&mut self, scaling: u32) {
        self.log.push(format!("set_scaling({})", scaling));
        self.state.set_scaling(scaling);
    }

    fn set_verbose(&mut self, verbosity: i32) {
        self.log.push(format!("set_verbose({})", verbosity));
        self.state.set_verbosity(verbosity);
    }

    fn set_timeout(&mut self, seconds: u64) {
        self.log.push(format!("set_timeout({})", seconds));
        self.state.set_timeout(seconds);
    }

    fn set_obj_fn(&mut self, objective: &[f64]) -> bool {
        self.log.push(format!("set_obj_fn({:?})", objective));
        self.state.set_objective(objective)
    }

    fn set_minim(&mut self) {
        self.log.push("set_minim()");
        self.state.set_maximize(false);
    }

    fn set_maxim(&mut self) {
        self.log.push("set_maxim()");
        self.state.set_maximize(true);
    }

    fn add_constraint(&mut self, coefficients: &[f64], comparison: i32, rhs: f64) -> bool {
        self.log
            .push(format!("add_constraint({:?}, {}, {})", coefficients, comparison, rhs));
        self.state.add_row(coefficients, comparison, rhs)
    }

    fn set_lowbo(&mut self, bounds: &[f64]) -> bool {
        self.log.push(format!("set_lowbo({:?})", bounds));
        self.state.set_lower_bounds(bounds)
    }

    fn set_upbo(&mut self, bounds: &[f64]) -> bool {
        self.log.push(format!("set_upbo({:?})", bounds));
        self.state.set_upper_bounds(bounds)
    }

    fn set_lowbo_single(&mut self, column: usize, value: f64) -> bool {
        self.log.push(format!("set_lowbo({}, {})", column, value));
        self.state.set_lower_bound(column, value)
    }

    fn set_upbo_single(&mut self, column: usize, value: f64) -> bool {
        self.log.push(format!("set_upbo({}, {})", column, value));
        self.state.set_upper_bound(column, value)
    }

    fn set_int(&mut self, column: usize, flag: bool) -> bool {
        self.log.push(format!("set_int({}, {})", column, flag));
        self.state.set_integer(column, flag)
    }

    fn set_binary(&mut self, column: usize, flag: bool) -> bool {
        self.log.push(format!("set_binary({}, {})", column, flag));
        self.state.set_binary(column, flag)
    }

    fn solve(&mut self) -> i32 {
        self.log.push("solve()");
        self.solved = true;
        self.result.status
    }

    fn get_working_objective(&self) -> f64 {
        self.log.push("get_working_objective()");
        self.result.objective
    }

    fn get_solutioncount(&self) -> usize {
        self.log.push("get_solutioncount()");
        self.result.count
    }

    fn get_variables(&self) -> Option<Vec<f64>> {
        self.log.push("get_variables()");
        self.result.variables.clone()
    }

    fn get_status(&self) -> i32 {
        self.log.push("get_status()");
        if self.solved {
            self.result.status
        } else {
            -1
        }
    }

    fn get_statustext(&self, code: i32) -> String {
        self.log.push(format!("get_statustext({})", code));
        format!("fake status {}", code)
    }

    fn get_total_iter(&self) -> u64 {
        self.log.push("get_total_iter()");
        if self.solved {
            self.result.iterations
        } else {
            0
        }
    }

    fn get_ncolumns(&self) -> usize {
        self.state.columns()
    }

    fn get_nrows(&self) -> usize {
        self.state.rows().len()
    }

    fn get_lowbo(&self, column: usize) -> Option<f64> {
        self.state.lower_bound(column)
    }

    fn get_upbo(&self, column: usize) -> Option<f64> {
        self.state.upper_bound(column)
    }

    fn is_int(&self, column: usize) -> bool {
        self.state.is_integer(column)
    }

    fn is_binary(&self, column: usize) -> bool {
        self.state.is_binary(column)
    }

    fn is_maxim(&self) -> bool {
        self.state.is_maximize()
    }

    fn get_scaling(&self) -> u32 {
        self.state.scaling()
    }

    fn get_verbose(&self) -> i32 {
        self.state.verbosity()
    }

    fn get_timeout(&self) -> u64 {
        self.state.timeout()
    }

    fn delete_lp(&mut self) {
        self.log.push("delete_lp()");
        self.state.clear();
    }
}
