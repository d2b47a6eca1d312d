//! The flowpipe driver: partitions the time horizon and produces the
//! ordered sequence of flowpipes and their box enclosures.
use crate::config::Config;
use crate::contract::contractive_search;
use crate::error::{Error, Result};
use crate::eval::eval_interval_vector;
use crate::interval::{Interval, IntervalVector};
use crate::poly::{Polynomial, Var};
use crate::taylor::taylor_expand;

/// A single Taylor Model flowpipe: a polynomial vector paired with the
/// interval-vector remainder that bounds the error between the polynomial
/// and the true flow over its time sub-interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Flowpipe {
    /// The polynomial part, in state-vars only (all variable `t` has
    /// already been fixed to the sub-interval's upper endpoint, per
    /// already been fixed to the sub-interval's upper endpoint) except for the seed flowpipe, whose
    /// polynomial is simply each state variable itself.
    pub poly: Vec<Polynomial>,
    /// The remainder bounding the enclosure's error.
    pub remainder: IntervalVector,
}

/// The full output of [`tm_integration`]: the ordered flowpipe list and its
/// parallel list of axis-aligned box enclosures.
#[derive(Debug, Clone, PartialEq)]
pub struct TmIntegrationResult {
    /// One entry per constructed flowpipe, including the seed flowpipe at index 0.
    pub flowpipes: Vec<Flowpipe>,
    /// `boxes[i]` is the axis-aligned enclosure of `flowpipes[i]`.
    pub boxes: Vec<IntervalVector>,
}

/// Run Taylor Model integration across the whole configured time horizon.
///
/// Partitions `[0, time_horizon_end]` into `full` steps of `config.step_size` plus
/// (usually) one shorter final step, seed the flowpipe list with the
/// identity polynomial vector and `initial_remainders`, and for each step
/// compute a Taylor expansion, search for a contractive remainder, then fix
/// `t` to the step's length to produce the next flowpipe. Box construction
/// evaluates every flowpipe's polynomial under `initial_box` and adds its
/// remainder.
#[tracing::instrument(target = "tm_flowpipe", skip(state_vars, ode, ode_box, initial_box, initial_remainders, config))]
pub fn tm_integration(
    state_vars: &[Var],
    ode: &[Polynomial],
    ode_box: &IntervalVector,
    initial_box: &IntervalVector,
    initial_remainders: &IntervalVector,
    config: &Config,
) -> Result<TmIntegrationResult> {
    config.validate()?;

    let n = state_vars.len();
    if ode.len() != n {
        return Err(Error::InvalidInput(format!(
            "length mismatch: {} state variables but {} ODE components",
            n,
            ode.len()
        )));
    }
    if ode_box.len() != n || initial_box.len() != n || initial_remainders.len() != n {
        return Err(Error::InvalidInput(
            "ode_box, initial_box and initial_remainders must each have one component per state variable"
                .to_string(),
        ));
    }

    let full_steps = (config.time_horizon_end / config.step_size).floor() as u64;
    let final_step_size = config.time_horizon_end - full_steps as f64 * config.step_size;
    let skip_final_step = final_step_size < config.step_epsilon && final_step_size < config.step_size;

    let mut step_sizes: Vec<f64> = vec![config.step_size; full_steps as usize];
    if !skip_final_step {
        step_sizes.push(final_step_size);
    }

    let seed = Flowpipe {
        poly: state_vars.iter().map(|v| Polynomial::var(*v)).collect(),
        remainder: initial_remainders.clone(),
    };
    let mut flowpipes = vec![seed];

    let contractive_params = config.contractive_params();
    for (step_idx, &step_size) in step_sizes.iter().enumerate() {
        let span = tracing::info_span!("step", step = step_idx, size = step_size);
        let _enter = span.enter();

        let previous = flowpipes.last().expect("seed flowpipe always present");
        let taylor = taylor_expand(&previous.poly, state_vars, ode, config.order)?;

        let tau = Interval::new(0.0, step_size);
        let remainder = contractive_search(
            &taylor,
            ode,
            state_vars,
            ode_box,
            initial_remainders,
            tau,
            config.order,
            contractive_params,
        )?;

        let poly = taylor
            .iter()
            .map(|p| p.subst(Var::Time, &Polynomial::constant(step_size)))
            .collect();

        flowpipes.push(Flowpipe { poly, remainder });
    }

    let boxes = flowpipes
        .iter()
        .map(|fp| {
            let assignment = |v: Var| match v {
                Var::State(i) => initial_box[i],
                _ => Interval::zero(),
            };
            eval_interval_vector(&fp.poly, &assignment).add(&fp.remainder)
        })
        .collect();

    Ok(TmIntegrationResult { flowpipes, boxes })
}
