use std::fmt;
use std::str::FromStr;

use super::grammar;
use super::solver_service::{Result, SolverError};
use super::value_objects::{Comparison, StatusCode, VariableDesignation};

/// One row of the problem: `coefficients · x  <comparison>  value`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Constraint {
    coefficients: Vec<f64>,
    comparison: Comparison,
    value: f64,
}

impl Constraint {
    pub fn new(coefficients: Vec<f64>, comparison: Comparison, value: f64) -> Self {
        Self {
            coefficients,
            comparison,
            value,
        }
    }

    /// Parse an algebraic constraint such as `120x + 210y + 150.75z <= 15000`.
    ///
    /// Variable names only separate coefficients; the k-th coefficient belongs
    /// to the k-th variable of the problem. The right-hand side is coerced
    /// leniently, so a non-numeric value becomes 0.
    pub fn from_string(text: &str) -> Result<Self> {
        let (coefficients, comparison, value) = grammar::parse_constraint(text)?;
        Ok(Self::new(coefficients, comparison, value))
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_coefficients(&mut self, coefficients: Vec<f64>) -> &mut Self {
        self.coefficients = coefficients;
        self
    }

    pub fn set_comparison(&mut self, comparison: Comparison) -> &mut Self {
        self.comparison = comparison;
        self
    }

    pub fn set_value(&mut self, value: f64) -> &mut Self {
        self.value = value;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }
}

impl FromStr for Constraint {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self> {
        Constraint::from_string(s)
    }
}

/// Writes the constraint with generated names `x1, x2, ...`; the output
/// parses back to the same row for finite values.
impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &coefficient) in self.coefficients.iter().enumerate() {
            let column = i + 1;
            match (i, coefficient.is_sign_negative()) {
                (0, _) => write!(f, "{}x{}", coefficient, column)?,
                (_, true) => write!(f, " - {}x{}", -coefficient, column)?,
                (_, false) => write!(f, " + {}x{}", coefficient, column)?,
            }
        }
        if self.coefficients.is_empty() {
            write!(f, "0")?;
        }
        write!(f, " {} {}", self.comparison, self.value)
    }
}

/// Complete problem declaration: objective, rows, bounds and variable types.
///
/// Empty bound vectors leave the engine defaults in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Problem {
    objective: Vec<f64>,
    constraints: Vec<Constraint>,
    lower_bounds: Vec<f64>,
    upper_bounds: Vec<f64>,
    integer_variables: VariableDesignation,
    binary_variables: VariableDesignation,
}

impl Problem {
    pub fn new(objective: Vec<f64>, constraints: Vec<Constraint>) -> Self {
        Self {
            objective,
            constraints,
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, lower_bounds: Vec<f64>, upper_bounds: Vec<f64>) -> Self {
        self.lower_bounds = lower_bounds;
        self.upper_bounds = upper_bounds;
        self
    }

    pub fn with_integer_variables(mut self, designation: impl Into<VariableDesignation>) -> Self {
        self.integer_variables = designation.into();
        self
    }

    pub fn with_binary_variables(mut self, designation: impl Into<VariableDesignation>) -> Self {
        self.binary_variables = designation.into();
        self
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower_bounds
    }

    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }

    pub fn integer_variables(&self) -> &VariableDesignation {
        &self.integer_variables
    }

    pub fn binary_variables(&self) -> &VariableDesignation {
        &self.binary_variables
    }

    pub fn set_objective(&mut self, objective: Vec<f64>) -> &mut Self {
        self.objective = objective;
        self
    }

    pub fn set_constraints(&mut self, constraints: Vec<Constraint>) -> &mut Self {
        self.constraints = constraints;
        self
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    pub fn set_lower_bounds(&mut self, lower_bounds: Vec<f64>) -> &mut Self {
        self.lower_bounds = lower_bounds;
        self
    }

    pub fn set_upper_bounds(&mut self, upper_bounds: Vec<f64>) -> &mut Self {
        self.upper_bounds = upper_bounds;
        self
    }

    pub fn set_integer_variables(
        &mut self,
        designation: impl Into<VariableDesignation>,
    ) -> &mut Self {
        self.integer_variables = designation.into();
        self
    }

    pub fn set_binary_variables(
        &mut self,
        designation: impl Into<VariableDesignation>,
    ) -> &mut Self {
        self.binary_variables = designation.into();
        self
    }

    pub fn count_rows(&self) -> usize {
        self.constraints.len()
    }

    pub fn count_cols(&self) -> usize {
        self.objective.len()
    }

    pub fn is_mixed_integer(&self) -> bool {
        !self.integer_variables.is_empty() || !self.binary_variables.is_empty()
    }

    /// Check every positional vector against the variable count.
    pub fn validate(&self) -> Result<()> {
        let cols = self.count_cols();

        for (i, constraint) in self.constraints.iter().enumerate() {
            if constraint.num_variables() != cols {
                return Err(mismatch(
                    format!("constraint {} coefficients", i),
                    cols,
                    constraint.num_variables(),
                ));
            }
        }

        for (what, bounds) in [
            ("lower bounds", &self.lower_bounds),
            ("upper bounds", &self.upper_bounds),
        ] {
            if !bounds.is_empty() && bounds.len() != cols {
                return Err(mismatch(what.to_string(), cols, bounds.len()));
            }
        }

        for (what, designation) in [
            ("integer variables", &self.integer_variables),
            ("binary variables", &self.binary_variables),
        ] {
            if let VariableDesignation::PerVariable(flags) = designation {
                if flags.len() > cols {
                    return Err(mismatch(what.to_string(), cols, flags.len()));
                }
            }
        }

        Ok(())
    }
}

fn mismatch(what: String, expected: usize, actual: usize) -> SolverError {
    SolverError::DimensionMismatch {
        what,
        expected,
        actual,
    }
}

/// Result of one solve. Built once from the engine output and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    objective: f64,
    count: usize,
    variables: Vec<f64>,
    code: i32,
    status: String,
    iterations: u64,
}

impl Solution {
    pub fn new(
        objective: f64,
        count: usize,
        variables: Vec<f64>,
        code: i32,
        status: impl Into<String>,
        iterations: u64,
    ) -> Self {
        Self {
            objective,
            count,
            variables,
            code,
            status: status.into(),
            iterations,
        }
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Number of solutions found; 0 usually means the model is infeasible.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn variables(&self) -> &[f64] {
        &self.variables
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    /// Status text as reported by the engine.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_code(self.code)
    }

    pub fn is_optimal(&self) -> bool {
        self.status_code().is_some_and(StatusCode::is_optimal)
    }
}
