//! The contractive remainder search: widen a candidate remainder
//! until its Picard image is a subset of itself, or fail.
use crate::error::{Error, Result};
use crate::interval::{Interval, IntervalVector};
use crate::poly::{Polynomial, Var};
use crate::refine::refine_remainders;

/// Tunables for [`contractive_search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContractiveParams {
    /// Number of widening attempts before giving up.
    pub(crate) max_tries: u32,
    /// Multiplier applied to the candidate on a failed contractiveness test.
    pub(crate) widen_scale: f64,
    /// Number of extra refinement passes once contractiveness is reached.
    pub(crate) extra_refinements: u32,
}

/// Search for a contractive remainder: a vector `I` with `Picard(I) ⊆ I`
/// componentwise.
///
/// Implements a TRYING/CONTRACTIVE/FAIL state machine as a bounded loop: on
/// every failed subset test the candidate is widened by `widen_scale`
/// *unconditionally*, including on the final iteration; if the loop runs
/// out of tries, the reported `last_candidate` divides that final
/// (redundant) widening back out so it matches the candidate the last
/// subset test was actually run against.
#[tracing::instrument(target = "tm_flowpipe", skip(taylor, ode, state_vars, ode_box, initial), fields(max_tries = params.max_tries))]
pub(crate) fn contractive_search(
    taylor: &[Polynomial],
    ode: &[Polynomial],
    state_vars: &[Var],
    ode_box: &IntervalVector,
    initial: &IntervalVector,
    time: Interval,
    order: i64,
    params: ContractiveParams,
) -> Result<IntervalVector> {
    if params.max_tries < 1 {
        return Err(Error::BadTries);
    }
    if params.widen_scale <= 1.0 {
        return Err(Error::BadScale);
    }
    if order < 0 {
        return Err(Error::NegativeOrder);
    }

    let mut candidate = initial.clone();
    let mut last_image = None;
    for attempt in 0..params.max_tries {
        let image = refine_remainders(taylor, ode, state_vars, ode_box, &candidate, time, order)?;
        if image.subset(&candidate) {
            tracing::debug!(attempt, "contractiveness reached");
            let mut refined = image;
            for _ in 0..params.extra_refinements {
                refined =
                    refine_remainders(taylor, ode, state_vars, ode_box, &refined, time, order)?;
            }
            return Ok(refined);
        }
        let first_width = image.iter().next().map(Interval::width).unwrap_or(0.0);
        tracing::debug!(attempt, width = first_width, "widening candidate");
        last_image = Some(image);
        candidate = candidate.scale(params.widen_scale);
    }

    // `candidate` here is the already-widened value that would have been
    // tried on attempt `max_tries`; divide back to report the one the last
    // *performed* subset test actually used.
    let last_candidate = candidate.scale(1.0 / params.widen_scale);
    Err(Error::ContractivenessFailure {
        last_candidate,
        last_image: last_image.expect("max_tries >= 1 guarantees at least one iteration ran"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taylor::taylor_expand;

    fn default_params() -> ContractiveParams {
        ContractiveParams {
            max_tries: 10,
            widen_scale: 2.0,
            extra_refinements: 0,
        }
    }

    #[test]
    fn rejects_bad_tries() {
        let x = Var::State(0);
        let taylor = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(1.0)];
        let ode_box = IntervalVector::new(vec![Interval::new(-0.01, 0.01)]);
        let initial = IntervalVector::new(vec![Interval::new(-0.1, 0.1)]);
        let params = ContractiveParams {
            max_tries: 0,
            ..default_params()
        };
        let err = contractive_search(&taylor, &ode, &[x], &ode_box, &initial, Interval::new(0.0, 0.02), 3, params);
        assert_eq!(err, Err(Error::BadTries));
    }

    #[test]
    fn rejects_bad_scale() {
        let x = Var::State(0);
        let taylor = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(1.0)];
        let ode_box = IntervalVector::new(vec![Interval::new(-0.01, 0.01)]);
        let initial = IntervalVector::new(vec![Interval::new(-0.1, 0.1)]);
        let params = ContractiveParams {
            widen_scale: 1.0,
            ..default_params()
        };
        let err = contractive_search(&taylor, &ode, &[x], &ode_box, &initial, Interval::new(0.0, 0.02), 3, params);
        assert_eq!(err, Err(Error::BadScale));
    }

    #[test]
    fn finds_a_contractive_remainder_for_a_benign_field() {
        let x = Var::State(0);
        let y = Var::State(1);
        let state_vars = [x, y];
        let p0 = vec![Polynomial::var(x), Polynomial::var(y)];
        let ode = vec![
            Polynomial::constant(1.0).add(&Polynomial::var(y)),
            Polynomial::var(x).pow(2).neg(),
        ];
        let taylor = taylor_expand(&p0, &state_vars, &ode, 3).unwrap();
        let ode_box = IntervalVector::new(vec![Interval::new(-0.002, 0.002), Interval::new(-0.0021, 0.0021)]);
        let initial = IntervalVector::new(vec![Interval::new(-0.1, 0.1), Interval::new(-0.1, 0.1)]);
        let result = contractive_search(
            &taylor,
            &ode,
            &state_vars,
            &ode_box,
            &initial,
            Interval::new(0.0, 0.02),
            3,
            default_params(),
        )
        .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn fails_with_contractiveness_failure_when_starved_of_tries() {
        let x = Var::State(0);
        let y = Var::State(1);
        let state_vars = [x, y];
        let p0 = vec![Polynomial::var(x), Polynomial::var(y)];
        let ode = vec![
            Polynomial::constant(1.0).add(&Polynomial::var(y)),
            Polynomial::var(x).pow(2).neg(),
        ];
        let taylor = taylor_expand(&p0, &state_vars, &ode, 3).unwrap();
        let ode_box = IntervalVector::new(vec![Interval::new(-0.002, 0.002), Interval::new(-0.0021, 0.0021)]);
        // A remainder far too small to be contractive against the t=0.02 step.
        let initial = IntervalVector::new(vec![Interval::new(-1e-9, 1e-9), Interval::new(-1e-9, 1e-9)]);
        let params = ContractiveParams {
            max_tries: 1,
            widen_scale: 1.5,
            extra_refinements: 0,
        };
        let result = contractive_search(
            &taylor,
            &ode,
            &state_vars,
            &ode_box,
            &initial,
            Interval::new(0.0, 0.02),
            3,
            params,
        );
        match result {
            Err(Error::ContractivenessFailure { last_candidate, .. }) => {
                for (got, want) in last_candidate.iter().zip(initial.iter()) {
                    assert!((got.lower() - want.lower()).abs() < 1e-6);
                    assert!((got.upper() - want.upper()).abs() < 1e-6);
                }
            }
            other => panic!("expected ContractivenessFailure, got {other:?}"),
        }
    }
}
