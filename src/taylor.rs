//! The Taylor expander: symbolic Taylor expansion of a flow via iterated
//! Lie differentiation.
use crate::error::Result;
use crate::poly::{jacobian, Polynomial, Var};

/// `i!` as an `f64`. `order` is always small (single digits in practice, a
/// handful at most for the systems this crate targets), so a
/// naive product is both correct and plenty fast.
fn factorial(i: u32) -> f64 {
    (1..=i).map(|k| k as f64).product::<f64>().max(1.0)
}

/// Compute the order-`order` Taylor polynomial in time of the flow of `ode`
/// starting from `p0`.
///
/// Builds the sequence `L_0, L_1, ..., L_order` of truncated Lie
/// derivatives (`L_0 = p0`, `L_{i+1} = truncate(jacobian(L_i, state_vars) *
/// ode, order - i - 1)`) and assembles `T(x, t) = sum_i L_i(x) * t^i / i!`.
///
/// Truncating each `L_i` at a *decreasing* degree budget (`order - i`, not
/// `order`) is deliberate: `L_i` is later multiplied by `t^i`, so its
/// state-variable degree budget has to shrink by `i` to keep the combined
/// total degree in `{state-vars, t}` within `order`.
pub(crate) fn taylor_expand(
    p0: &[Polynomial],
    state_vars: &[Var],
    ode: &[Polynomial],
    order: i64,
) -> Result<Vec<Polynomial>> {
    let n = p0.len();
    let mut lie_derivatives: Vec<Vec<Polynomial>> = vec![p0.to_vec()];

    // Iterate i = order-1, order-2, ..., 0, truncating the i-th produced
    // derivative to degree i (see doc comment above for why).
    for i in (0..order).rev() {
        let prev = lie_derivatives.last().unwrap();
        let jac = jacobian(prev, state_vars);
        let mut next = Vec::with_capacity(n);
        for row in &jac {
            let mut component = Polynomial::zero();
            for (j_entry, field_component) in row.iter().zip(ode.iter()) {
                component = component.add(&j_entry.mul(field_component));
            }
            next.push(component.truncate(i)?);
        }
        lie_derivatives.push(next);
    }

    let mut taylor = vec![Polynomial::zero(); n];
    for (i, l_i) in lie_derivatives.iter().enumerate() {
        let coeff = 1.0 / factorial(i as u32);
        let t_power = Polynomial::var(Var::Time).pow(i as u32);
        for (component, l_ij) in taylor.iter_mut().zip(l_i.iter()) {
            *component = component.add(&l_ij.scalar_mul(coeff).mul(&t_power));
        }
        // Once a Lie derivative vector is entirely zero, every subsequent
        // one is too (the Jacobian of the zero vector is zero). Skipping
        // the rest is an optimization only; it must not change the result,
        // so it is safe to continue to the loop's natural conclusion instead.
    }

    Ok(taylor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_zero_returns_the_seed_polynomial_unchanged() {
        let x = Var::State(0);
        let p0 = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(1.0)];
        let result = taylor_expand(&p0, &[x], &ode, 0).unwrap();
        assert_eq!(result[0], Polynomial::var(x));
    }

    #[test]
    fn linear_ode_matches_closed_form_exponential_series() {
        // x' = x, p0 = x. Taylor series of e^t truncated to order k:
        // T(x, t) = x * sum_{i=0}^{k} t^i / i!.
        let x = Var::State(0);
        let p0 = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::var(x)];
        let order = 4;
        let result = taylor_expand(&p0, &[x], &ode, order).unwrap();

        let assignment = |v: Var| match v {
            Var::State(0) => 2.0,
            Var::Time => 0.3,
            _ => 0.0,
        };
        let got = result[0].eval_point(&assignment);
        let expected: f64 = 2.0 * (0..=order).map(|i| 0.3f64.powi(i as i32) / factorial(i as u32)).sum::<f64>();
        assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn constant_velocity_ode_gives_exact_linear_motion() {
        // x' = 1, p0 = x. Exact solution x(t) = x0 + t; any order should be exact
        // since the Taylor series of a linear function terminates.
        let x = Var::State(0);
        let p0 = vec![Polynomial::var(x)];
        let ode = vec![Polynomial::constant(1.0)];
        let result = taylor_expand(&p0, &[x], &ode, 3).unwrap();
        let assignment = |v: Var| match v {
            Var::State(0) => 5.0,
            Var::Time => 1.5,
            _ => 0.0,
        };
        assert!((result[0].eval_point(&assignment) - 6.5).abs() < 1e-9);
    }

    #[test]
    fn result_degree_never_exceeds_order() {
        let x = Var::State(0);
        let y = Var::State(1);
        let p0 = vec![Polynomial::var(x), Polynomial::var(y)];
        let ode = vec![
            Polynomial::constant(1.0).add(&Polynomial::var(y)),
            Polynomial::var(x).pow(2).neg(),
        ];
        let order = 3;
        let result = taylor_expand(&p0, &[x, y], &ode, order).unwrap();
        for component in &result {
            assert!(component.degree() <= order as u32);
        }
    }
}
