// Domain value objects: comparators, directions, designations and the engine's flag tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use super::solver_service::SolverError;

/// Comparison operator of a constraint row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Less than or equal (≤)
    #[default]
    LessOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterOrEqual,
}

impl Comparison {
    /// Integer code the engine uses for this comparator (LE=1, GE=2, EQ=3).
    pub fn code(self) -> i32 {
        match self {
            Comparison::LessOrEqual => 1,
            Comparison::GreaterOrEqual => 2,
            Comparison::Equal => 3,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::LessOrEqual => "<=",
            Comparison::Equal => "=",
            Comparison::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Direction of optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Minimize the objective function
    #[default]
    Minimize,
    /// Maximize the objective function
    Maximize,
}

impl FromStr for Direction {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimize" | "minimise" | "set_minim" => Ok(Direction::Minimize),
            "max" | "maximize" | "maximise" | "set_maxim" => Ok(Direction::Maximize),
            _ => Err(SolverError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Minimize => write!(f, "minimize"),
            Direction::Maximize => write!(f, "maximize"),
        }
    }
}

/// Engine backend to allocate models from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineBackend {
    /// First backend compiled into this build
    #[default]
    Auto,
    /// Pure-Rust microlp through good_lp
    #[serde(rename = "microlp")]
    MicroLp,
    /// COIN-OR CBC through good_lp
    CoinCbc,
    /// HiGHS
    Highs,
}

impl fmt::Display for EngineBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineBackend::Auto => write!(f, "Auto"),
            EngineBackend::MicroLp => write!(f, "microlp"),
            EngineBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            EngineBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

/// Integer or binary designation of the problem variables.
///
/// Either one flag per variable (positional, objective order) or a single
/// flag applied to every variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableDesignation {
    PerVariable(Vec<bool>),
    Uniform(bool),
}

impl Default for VariableDesignation {
    fn default() -> Self {
        VariableDesignation::PerVariable(Vec::new())
    }
}

impl VariableDesignation {
    /// 1-based engine columns that must be marked for a problem with
    /// `count_cols` variables.
    pub fn marked_columns(&self, count_cols: usize) -> Vec<usize> {
        match self {
            VariableDesignation::PerVariable(flags) => flags
                .iter()
                .enumerate()
                .filter(|(_, &flag)| flag)
                .map(|(index, _)| index + 1)
                .collect(),
            VariableDesignation::Uniform(true) => (1..=count_cols).collect(),
            VariableDesignation::Uniform(false) => Vec::new(),
        }
    }

    /// True when no variable carries the designation.
    pub fn is_empty(&self) -> bool {
        match self {
            VariableDesignation::PerVariable(flags) => !flags.iter().any(|&flag| flag),
            VariableDesignation::Uniform(flag) => !flag,
        }
    }
}

impl From<bool> for VariableDesignation {
    fn from(flag: bool) -> Self {
        VariableDesignation::Uniform(flag)
    }
}

impl From<Vec<bool>> for VariableDesignation {
    fn from(flags: Vec<bool>) -> Self {
        VariableDesignation::PerVariable(flags)
    }
}

impl From<&[bool]> for VariableDesignation {
    fn from(flags: &[bool]) -> Self {
        VariableDesignation::PerVariable(flags.to_vec())
    }
}

impl<const N: usize> From<[bool; N]> for VariableDesignation {
    fn from(flags: [bool; N]) -> Self {
        VariableDesignation::PerVariable(flags.to_vec())
    }
}

/// Scaling mode flags understood by the engine. Base modes are combined
/// with modifiers through `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scaling(pub u32);

impl Scaling {
    pub const NONE: Scaling = Scaling(0);
    pub const EXTREME: Scaling = Scaling(1);
    pub const RANGE: Scaling = Scaling(2);
    pub const MEAN: Scaling = Scaling(3);
    pub const GEOMETRIC: Scaling = Scaling(4);
    pub const CURTISREID: Scaling = Scaling(7);

    pub const QUADRATIC: Scaling = Scaling(8);
    pub const LOGARITHMIC: Scaling = Scaling(16);
    pub const USERWEIGHT: Scaling = Scaling(31);
    pub const POWER2: Scaling = Scaling(32);
    pub const EQUILIBRATE: Scaling = Scaling(64);
    pub const INTEGERS: Scaling = Scaling(128);
    pub const DYNUPDATE: Scaling = Scaling(256);
    pub const ROWSONLY: Scaling = Scaling(512);
    pub const COLSONLY: Scaling = Scaling(1024);

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Base scaling mode with the modifier bits masked off.
    pub fn mode(self) -> u32 {
        self.0 & 7
    }

    pub fn contains(self, other: Scaling) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Scaling {
    type Output = Scaling;

    fn bitor(self, rhs: Scaling) -> Scaling {
        Scaling(self.0 | rhs.0)
    }
}

/// Engine message verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Neutral = 0,
    Critical = 1,
    Severe = 2,
    /// Only important messages (warnings and errors)
    #[default]
    Important = 3,
    Normal = 4,
    Detailed = 5,
    Full = 6,
}

impl Verbosity {
    pub fn level(self) -> i32 {
        self as i32
    }

    pub fn from_level(level: i32) -> Verbosity {
        match level {
            i32::MIN..=0 => Verbosity::Neutral,
            1 => Verbosity::Critical,
            2 => Verbosity::Severe,
            3 => Verbosity::Important,
            4 => Verbosity::Normal,
            5 => Verbosity::Detailed,
            _ => Verbosity::Full,
        }
    }
}

/// Classification of the engine's status codes.
///
/// Only used to interpret a code; the human-readable text always comes from
/// the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    NoMemory,
    Optimal,
    SubOptimal,
    Infeasible,
    Unbounded,
    Degenerate,
    NumFailure,
    UserAbort,
    Timeout,
    Presolved,
    ProcFail,
    ProcBreak,
    FeasFound,
    NoFeasFound,
}

impl StatusCode {
    pub const ALL: [StatusCode; 14] = [
        StatusCode::NoMemory,
        StatusCode::Optimal,
        StatusCode::SubOptimal,
        StatusCode::Infeasible,
        StatusCode::Unbounded,
        StatusCode::Degenerate,
        StatusCode::NumFailure,
        StatusCode::UserAbort,
        StatusCode::Timeout,
        StatusCode::Presolved,
        StatusCode::ProcFail,
        StatusCode::ProcBreak,
        StatusCode::FeasFound,
        StatusCode::NoFeasFound,
    ];

    pub fn code(self) -> i32 {
        match self {
            StatusCode::NoMemory => -2,
            StatusCode::Optimal => 0,
            StatusCode::SubOptimal => 1,
            StatusCode::Infeasible => 2,
            StatusCode::Unbounded => 3,
            StatusCode::Degenerate => 4,
            StatusCode::NumFailure => 5,
            StatusCode::UserAbort => 6,
            StatusCode::Timeout => 7,
            StatusCode::Presolved => 9,
            StatusCode::ProcFail => 10,
            StatusCode::ProcBreak => 11,
            StatusCode::FeasFound => 12,
            StatusCode::NoFeasFound => 13,
        }
    }

    pub fn from_code(code: i32) -> Option<StatusCode> {
        StatusCode::ALL.into_iter().find(|status| status.code() == code)
    }

    pub fn is_optimal(self) -> bool {
        self == StatusCode::Optimal
    }
}
