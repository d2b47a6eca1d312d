//! Sparse multivariate polynomials over `f64`, in coefficient form.
use super::monomial::Monomial;
use super::var::Var;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// A tolerance below which a coefficient is treated as exactly zero after
/// an arithmetic operation. Coefficients are `f64`, so summing terms that
/// should cancel exactly (e.g. `x - x`) can leave a residue on the order of
/// a few ULPs; dropping it keeps `is_zero`/structural equality meaningful.
const ZERO_TOLERANCE: f64 = 1e-13;

/// A sparse multivariate polynomial: a mapping from monomial to nonzero
/// coefficient. The zero polynomial is the empty mapping. Every operation
/// below returns a fully expanded, normalized (like terms collected, zero
/// coefficients dropped) result — there is no lazy/symbolic intermediate
/// form to simplify later.
///
/// Same "sorted key to coefficient" representation and add/merge/drop-zeros
/// normalization discipline as a sparse multivariate polynomial over a
/// finite field, generalized down to `f64` since this crate's coefficients
/// are floating-point enclosure arithmetic, not field elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, f64>,
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Polynomial {
            terms: BTreeMap::new(),
        }
    }

    /// A constant polynomial.
    pub fn constant(c: f64) -> Self {
        let mut terms = BTreeMap::new();
        if c.abs() > ZERO_TOLERANCE {
            terms.insert(Monomial::one(), c);
        }
        Polynomial { terms }
    }

    /// The polynomial consisting of a single variable raised to the first power.
    pub fn var(v: Var) -> Self {
        Polynomial::from_terms(vec![(Monomial::single(v, 1), 1.0)])
    }

    /// Build a polynomial from a list of `(monomial, coefficient)` pairs,
    /// combining duplicate monomials and dropping (near-)zero coefficients.
    pub fn from_terms(terms: Vec<(Monomial, f64)>) -> Self {
        let mut map: BTreeMap<Monomial, f64> = BTreeMap::new();
        for (m, c) in terms {
            *map.entry(m).or_insert(0.0) += c;
        }
        map.retain(|_, c| c.abs() > ZERO_TOLERANCE);
        Polynomial { terms: map }
    }

    /// Whether every coefficient has been canceled out, i.e. this is `0`.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total degree: the maximum degree among this polynomial's monomials.
    /// The zero polynomial has degree `0`.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    /// The terms of this polynomial, in ascending monomial order.
    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &f64)> {
        self.terms.iter()
    }

    /// `self + other`.
    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let mut map = self.terms.clone();
        for (m, c) in &other.terms {
            *map.entry(m.clone()).or_insert(0.0) += c;
        }
        map.retain(|_, c| c.abs() > ZERO_TOLERANCE);
        Polynomial { terms: map }
    }

    /// `-self`.
    pub fn neg(&self) -> Polynomial {
        Polynomial {
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }

    /// `self - other`.
    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.neg())
    }

    /// `c * self`.
    pub fn scalar_mul(&self, c: f64) -> Polynomial {
        if c.abs() <= ZERO_TOLERANCE {
            return Polynomial::zero();
        }
        Polynomial {
            terms: self.terms.iter().map(|(m, coeff)| (m.clone(), coeff * c)).collect(),
        }
    }

    /// `self * other`, by the naive cross product of terms (the expected
    /// scale here is a handful of state variables at a truncation order in
    /// the single digits, so this is never the bottleneck an FFT-based
    /// multiplier would be built for).
    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        if self.is_zero() || other.is_zero() {
            return Polynomial::zero();
        }
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                terms.push((m1.mul(m2), c1 * c2));
            }
        }
        Polynomial::from_terms(terms)
    }

    /// `self^n` by repeated multiplication.
    pub fn pow(&self, n: u32) -> Polynomial {
        let mut acc = Polynomial::constant(1.0);
        for _ in 0..n {
            acc = acc.mul(self);
        }
        acc
    }

    /// `∂self/∂var`, via the monomial power rule on every term.
    pub fn partial_derivative(&self, var: Var) -> Polynomial {
        let mut terms = Vec::new();
        for (m, c) in &self.terms {
            let e = m.exponent(var);
            if e == 0 {
                continue;
            }
            let reduced = m.with_exponent(var, e - 1);
            terms.push((reduced, c * e as f64));
        }
        Polynomial::from_terms(terms)
    }

    /// Drop every monomial whose total degree exceeds `k`. Fails with
    /// [`Error::NegativeOrder`] if `k < 0`. A polynomial over no variables
    /// (i.e. a constant) is returned unchanged, since its only monomial has
    /// degree zero.
    pub fn truncate(&self, k: i64) -> Result<Polynomial> {
        if k < 0 {
            return Err(Error::NegativeOrder);
        }
        let k = k as u32;
        Ok(Polynomial {
            terms: self
                .terms
                .iter()
                .filter(|(m, _)| m.degree() <= k)
                .map(|(m, c)| (m.clone(), *c))
                .collect(),
        })
    }

    /// Substitute `replacement` for every occurrence of `var`, returning the
    /// expanded result. Splits each term's monomial into the exponent of
    /// `var` and the remaining monomial, the same split a synthetic-division
    /// routine performs when dividing by `X_i - z_i` (here, instead, to
    /// raise the replacement to the split-off power).
    pub fn subst(&self, var: Var, replacement: &Polynomial) -> Polynomial {
        let mut result = Polynomial::zero();
        for (m, c) in &self.terms {
            let e = m.exponent(var);
            let rest = Polynomial::from_terms(vec![(m.with_exponent(var, 0), *c)]);
            let contribution = if e == 0 {
                rest
            } else {
                rest.mul(&replacement.pow(e))
            };
            result = result.add(&contribution);
        }
        result
    }

    /// Evaluate at a concrete assignment of every variable the polynomial
    /// depends on.
    pub fn eval_point(&self, assignment: &dyn Fn(Var) -> f64) -> f64 {
        self.terms
            .iter()
            .map(|(m, c)| {
                let monomial_value: f64 = m
                    .iter()
                    .map(|(v, e)| assignment(*v).powi(*e as i32))
                    .product();
                c * monomial_value
            })
            .sum()
    }
}

impl core::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if m.is_one() {
                write!(f, "{c}")?;
            } else {
                write!(f, "{c}*{m}")?;
            }
        }
        Ok(())
    }
}

/// `jacobian(p, vars)[i][j] = ∂p[i]/∂vars[j]`.
pub(crate) fn jacobian(p: &[Polynomial], vars: &[Var]) -> Vec<Vec<Polynomial>> {
    p.iter()
        .map(|pi| vars.iter().map(|v| pi.partial_derivative(*v)).collect())
        .collect()
}
