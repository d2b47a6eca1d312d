//! The Picard operator: `state + integral_0^t (F(T) + s) dtau`.
use crate::error::Result;
use crate::poly::{Monomial, Polynomial, Var};

/// Integrate a polynomial in `{state-vars, t}` with respect to `t`:
/// `t^e -> t^{e+1}/(e+1)` on every term. Follows the same "split each term
/// on one variable's exponent, rebuild" shape `Polynomial::subst` and
/// `Polynomial::partial_derivative` use.
fn integrate_wrt_t(p: &Polynomial) -> Polynomial {
    let mut terms = Vec::new();
    for (m, c) in p.terms() {
        let e = m.exponent(Var::Time);
        let new_monomial = m.with_exponent(Var::Time, e + 1);
        terms.push((new_monomial, c / (e as f64 + 1.0)));
    }
    Polynomial::from_terms(terms)
}

/// Compute the Picard image of the Taylor polynomial vector `taylor` under
/// the vector field `ode`.
///
/// Substitutes each state variable in `ode` by the matching component of
/// `taylor` (safe to do sequentially here since the `T_i` are expressed in
/// the original variables, never in each other), adds the remainder
/// placeholder `s` additively, integrates with respect to `t`
/// (`integral (F(T) + s) dt = integral F(T) dt + s*t`, by linearity),
/// truncates to `order`, then prefixes with the state variables themselves.
pub(crate) fn picard_operator(
    taylor: &[Polynomial],
    ode: &[Polynomial],
    state_vars: &[Var],
    order: i64,
) -> Result<Vec<Polynomial>> {
    let mut substituted = ode.to_vec();
    for (var, replacement) in state_vars.iter().zip(taylor.iter()) {
        substituted = substituted
            .iter()
            .map(|p| p.subst(*var, replacement))
            .collect();
    }

    let s_times_t = Polynomial::from_terms(vec![(
        Monomial::single(Var::Time, 1).mul(&Monomial::single(Var::Remainder, 1)),
        1.0,
    )]);

    let mut result = Vec::with_capacity(substituted.len());
    for (var, integrand) in state_vars.iter().zip(substituted.iter()) {
        let integrated = integrate_wrt_t(integrand).add(&s_times_t);
        let truncated = integrated.truncate(order)?;
        result.push(Polynomial::var(*var).add(&truncated));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picard_of_constant_field_is_linear_in_time() {
        // ode = [1], taylor = [x]; picard should be x + t + s*t, truncated.
        let x = Var::State(0);
        let taylor = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(1.0)];
        let result = picard_operator(&taylor, &ode, &[x], 3).unwrap();

        let assignment = |v: Var| match v {
            Var::State(0) => 2.0,
            Var::Time => 0.5,
            Var::Remainder => 0.1,
            _ => unreachable!(),
        };
        // x + t + s*t = 2 + 0.5 + 0.05 = 2.55
        assert!((result[0].eval_point(&assignment) - 2.55).abs() < 1e-9);
    }

    #[test]
    fn picard_prefixes_with_the_state_variable() {
        let x = Var::State(0);
        let taylor = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(0.0)];
        let result = picard_operator(&taylor, &ode, &[x], 2).unwrap();
        // With a zero field, picard(x) = x + s*t only.
        let assignment = |v: Var| match v {
            Var::State(0) => 7.0,
            Var::Time => 1.0,
            Var::Remainder => 2.0,
            _ => unreachable!(),
        };
        assert!((result[0].eval_point(&assignment) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn picard_result_respects_truncation_order() {
        let x = Var::State(0);
        let taylor = vec![Polynomial::var(x).pow(2)];
        let ode = vec![Polynomial::var(x).pow(2)];
        let result = picard_operator(&taylor, &ode, &[x], 2).unwrap();
        assert!(result[0].degree() <= 2);
    }

    #[test]
    fn picard_rejects_negative_order() {
        let x = Var::State(0);
        let taylor = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(1.0)];
        assert!(picard_operator(&taylor, &ode, &[x], -1).is_err());
    }
}
