//! Interval evaluation of polynomials.
use crate::interval::{Interval, IntervalVector};
use crate::poly::{Polynomial, Var};

/// Evaluate `p` under an assignment of each free variable to an interval,
/// producing a single enclosing interval.
///
/// Sums, over every term, the coefficient times the product of the
/// variable powers — the same evaluation shape a field-valued polynomial
/// uses, except every arithmetic step runs in interval space instead of
/// field space, so the result is sound rather than exact. The output is
/// always a flat `Interval`, never a nested structure that needs
/// flattening afterward.
pub(crate) fn eval_interval(p: &Polynomial, assignment: &dyn Fn(Var) -> Interval) -> Interval {
    let mut total = Interval::zero();
    for (m, c) in p.terms() {
        let mut term_value = Interval::point(*c);
        for (v, e) in m.iter() {
            term_value = term_value * assignment(*v).powi(*e);
        }
        total = total + term_value;
    }
    total
}

/// Evaluate each component of a polynomial vector, producing a parallel
/// [`IntervalVector`].
pub(crate) fn eval_interval_vector(
    polys: &[Polynomial],
    assignment: &dyn Fn(Var) -> Interval,
) -> IntervalVector {
    IntervalVector::new(polys.iter().map(|p| eval_interval(p, assignment)).collect())
}
