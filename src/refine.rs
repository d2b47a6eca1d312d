//! One-shot remainder refinement: evaluate the Picard image against
//! a current remainder estimate.
use crate::error::Result;
use crate::eval::eval_interval;
use crate::interval::{Interval, IntervalVector};
use crate::picard::picard_operator;
use crate::poly::{Polynomial, Var};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Refine `candidate` once against the Picard image of `taylor`.
///
/// For component `j`, evaluate the `j`-th Picard component under
/// `{state-var_i -> ode_box_i, t -> time, s -> candidate_j}` — every
/// component shares the same `ode_box`/`time` assignment, but each uses its
/// own candidate interval for `s`.
///
/// With the `parallel` feature enabled, the per-component loop below runs
/// via `rayon` instead of sequentially; this must (and does) produce
/// bit-identical results, since each component only reads already-computed
/// inputs and writes its own independent output slot.
pub(crate) fn refine_remainders(
    taylor: &[Polynomial],
    ode: &[Polynomial],
    state_vars: &[Var],
    ode_box: &IntervalVector,
    candidate: &IntervalVector,
    time: Interval,
    order: i64,
) -> Result<IntervalVector> {
    let picard = picard_operator(taylor, ode, state_vars, order)?;

    let refine_component = |j: usize| -> Interval {
        let s_j = candidate[j];
        let assignment = |v: Var| match v {
            Var::State(i) => ode_box[i],
            Var::Time => time,
            Var::Remainder => s_j,
        };
        eval_interval(&picard[j], &assignment)
    };

    #[cfg(feature = "parallel")]
    let refined: Vec<Interval> = (0..picard.len()).into_par_iter().map(refine_component).collect();
    #[cfg(not(feature = "parallel"))]
    let refined: Vec<Interval> = (0..picard.len()).map(refine_component).collect();

    Ok(IntervalVector::new(refined))
}
