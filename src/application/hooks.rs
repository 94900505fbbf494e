// Hook capabilities: what pre- and post-solve callbacks may see and change on a live model

use std::error::Error as StdError;
use std::sync::Arc;

use crate::domain::{
    models::{Problem, Solution},
    solver_service::LpModel,
    value_objects::{Scaling, Verbosity},
};

pub type HookResult = std::result::Result<(), Box<dyn StdError + Send + Sync>>;

/// Runs after the model is fully built and before the engine solves it.
pub type BeforeSolve = Arc<dyn Fn(&mut ModelHandle<'_>, &Problem) -> HookResult + Send + Sync>;

/// Runs after the result has been extracted, before the model is released.
pub type AfterSolve =
    Arc<dyn Fn(&mut ModelHandle<'_>, &Problem, &Solution) -> HookResult + Send + Sync>;

/// Narrow view of a live engine model handed to hooks.
///
/// Allows last-mile configuration and inspection. Solving and releasing the
/// model stay with the solver. Columns are 1-based.
pub struct ModelHandle<'a> {
    model: &'a mut dyn LpModel,
}

impl<'a> ModelHandle<'a> {
    pub(crate) fn new(model: &'a mut dyn LpModel) -> Self {
        Self { model }
    }

    pub fn set_timeout(&mut self, seconds: u64) {
        self.model.set_timeout(seconds);
    }

    pub fn set_verbose(&mut self, verbosity: Verbosity) {
        self.model.set_verbose(verbosity.level());
    }

    pub fn set_scaling(&mut self, scaling: Scaling) {
        self.model.set_scaling(scaling.bits());
    }

    pub fn set_lowbo(&mut self, column: usize, value: f64) -> bool {
        self.model.set_lowbo_single(column, value)
    }

    pub fn set_upbo(&mut self, column: usize, value: f64) -> bool {
        self.model.set_upbo_single(column, value)
    }

    pub fn set_int(&mut self, column: usize, flag: bool) -> bool {
        self.model.set_int(column, flag)
    }

    pub fn set_binary(&mut self, column: usize, flag: bool) -> bool {
        self.model.set_binary(column, flag)
    }

    pub fn ncolumns(&self) -> usize {
        self.model.get_ncolumns()
    }

    pub fn nrows(&self) -> usize {
        self.model.get_nrows()
    }

    pub fn lowbo(&self, column: usize) -> Option<f64> {
        self.model.get_lowbo(column)
    }

    pub fn upbo(&self, column: usize) -> Option<f64> {
        self.model.get_upbo(column)
    }

    pub fn is_int(&self, column: usize) -> bool {
        self.model.is_int(column)
    }

    pub fn is_binary(&self, column: usize) -> bool {
        self.model.is_binary(column)
    }

    pub fn is_maxim(&self) -> bool {
        self.model.is_maxim()
    }

    pub fn scaling(&self) -> Scaling {
        Scaling(self.model.get_scaling())
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_level(self.model.get_verbose())
    }

    pub fn timeout(&self) -> u64 {
        self.model.get_timeout()
    }

    pub fn status(&self) -> i32 {
        self.model.get_status()
    }

    pub fn total_iter(&self) -> u64 {
        self.model.get_total_iter()
    }
}
