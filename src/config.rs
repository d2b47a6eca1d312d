//! The configuration surface: every tunable `tm_integration` needs,
//! bundled into one validated value instead of seven positional scalars.
use crate::contract::ContractiveParams;
use crate::error::{Error, Result};

/// Every tunable `tm_integration` needs beyond the problem data itself
/// (state variables, vector field, boxes, remainders).
///
/// `Config` performs no validation on construction; validity is
/// established once, at the top of [`crate::driver::tm_integration`], via
/// [`Config::validate`], and every component downstream of that call may
/// assume it holds. Collaborators (CLI parsing, file loading) are expected
/// to build one of these and pass it in — the core itself never reads
/// configuration from the environment, a file, or argv.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// The time horizon `[0, time_horizon_end]` to cover.
    pub time_horizon_end: f64,
    /// Nominal sub-interval length.
    pub step_size: f64,
    /// Threshold below which a shorter final sub-interval is dropped.
    pub step_epsilon: f64,
    /// Total-degree truncation bound for all polynomial operations.
    pub order: i64,
    /// Widening attempts in the contractive search.
    pub max_tries: u32,
    /// Multiplier applied to the candidate remainder on failed contractiveness.
    pub widen_scale: f64,
    /// Post-contractiveness refinement iterations.
    pub extra_refinements: u32,
}

impl Config {
    /// The contractive-search tunables bundled separately, since
    /// [`crate::contract::contractive_search`] takes them as one value.
    pub(crate) fn contractive_params(&self) -> ContractiveParams {
        ContractiveParams {
            max_tries: self.max_tries,
            widen_scale: self.widen_scale,
            extra_refinements: self.extra_refinements,
        }
    }

    /// Check every precondition `tm_integration` relies on.
    pub fn validate(&self) -> Result<()> {
        if self.time_horizon_end < 0.0 {
            return Err(Error::InvalidInput(
                "time horizon must end at a value >= 0".to_string(),
            ));
        }
        if self.step_size <= 0.0 {
            return Err(Error::InvalidInput("step_size must be > 0".to_string()));
        }
        if self.step_epsilon < 0.0 {
            return Err(Error::InvalidInput("step_epsilon must be >= 0".to_string()));
        }
        if self.order < 0 {
            return Err(Error::NegativeOrder);
        }
        if self.max_tries < 1 {
            return Err(Error::BadTries);
        }
        if self.widen_scale <= 1.0 {
            return Err(Error::BadScale);
        }
        Ok(())
    }
}

impl Default for Config {
    /// A modest default scenario: two state variables over a short horizon.
    fn default() -> Self {
        Config {
            time_horizon_end: 0.1,
            step_size: 0.02,
            step_epsilon: 0.0001,
            order: 3,
            max_tries: 10,
            widen_scale: 2.0,
            extra_refinements: 0,
        }
    }
}
