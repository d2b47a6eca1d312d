//! Monomials: a sorted mapping from variable to non-negative exponent.
use super::var::Var;
use core::cmp::Ordering;

/// A monomial such as `x^2*t`, stored as a list of `(variable, exponent)`
/// pairs sorted ascending by variable with no zero exponents — variables
/// absent from the list have exponent zero. The empty monomial is `1`.
///
/// A sorted `Vec<(variable, exponent)>` searched with `binary_search_by`,
/// whose total degree is the sum of its exponents and whose "is this the
/// constant term" check is simply "is the vector empty".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Monomial(Vec<(Var, u32)>);

impl Monomial {
    /// The constant monomial `1`.
    pub fn one() -> Self {
        Monomial(Vec::new())
    }

    /// The monomial consisting of a single variable raised to `exponent`.
    /// `exponent = 0` returns the constant monomial.
    pub fn single(var: Var, exponent: u32) -> Self {
        if exponent == 0 {
            Monomial::one()
        } else {
            Monomial(vec![(var, exponent)])
        }
    }

    /// Whether this is the constant monomial `1`.
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Total degree: the sum of all exponents.
    pub fn degree(&self) -> u32 {
        self.0.iter().map(|(_, e)| e).sum()
    }

    /// The exponent of `var` in this monomial (`0` if absent).
    pub fn exponent(&self, var: Var) -> u32 {
        match self.0.binary_search_by(|(v, _)| v.cmp(&var)) {
            Ok(idx) => self.0[idx].1,
            Err(_) => 0,
        }
    }

    /// Iterate over the `(variable, exponent)` pairs in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = &(Var, u32)> {
        self.0.iter()
    }

    /// The product of two monomials: exponents of shared variables add.
    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut result = Vec::with_capacity(self.0.len() + other.0.len());
        let mut i = 0;
        let mut j = 0;
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].0.cmp(&other.0[j].0) {
                Ordering::Less => {
                    result.push(self.0[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    result.push(other.0[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    result.push((self.0[i].0, self.0[i].1 + other.0[j].1));
                    i += 1;
                    j += 1;
                }
            }
        }
        result.extend_from_slice(&self.0[i..]);
        result.extend_from_slice(&other.0[j..]);
        Monomial(result)
    }

    /// Replace the exponent of `var` with `exponent`, dropping the entry
    /// entirely when `exponent` is zero. The remaining monomial (all other
    /// variables, untouched) is what substitution and integration split off.
    pub fn with_exponent(&self, var: Var, exponent: u32) -> Monomial {
        let mut result: Vec<(Var, u32)> =
            self.0.iter().cloned().filter(|(v, _)| *v != var).collect();
        if exponent != 0 {
            result.push((var, exponent));
            result.sort_by_key(|(v, _)| *v);
        }
        Monomial(result)
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.degree()
            .cmp(&other.degree())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl core::fmt::Display for Monomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (i, (v, e)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            if *e == 1 {
                write!(f, "{v}")?;
            } else {
                write!(f, "{v}^{e}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_sums_exponents() {
        let m = Monomial::single(Var::State(0), 2).mul(&Monomial::single(Var::Time, 3));
        assert_eq!(m.degree(), 5);
    }

    #[test]
    fn mul_merges_shared_variables() {
        let a = Monomial::single(Var::State(0), 2);
        let b = Monomial::single(Var::State(0), 3);
        let m = a.mul(&b);
        assert_eq!(m.exponent(Var::State(0)), 5);
        assert_eq!(m.degree(), 5);
    }

    #[test]
    fn one_is_empty_and_degree_zero() {
        let m = Monomial::one();
        assert!(m.is_one());
        assert_eq!(m.degree(), 0);
    }

    #[test]
    fn with_exponent_zero_removes_the_variable() {
        let m = Monomial::single(Var::State(0), 2).mul(&Monomial::single(Var::Time, 1));
        let stripped = m.with_exponent(Var::State(0), 0);
        assert_eq!(stripped.exponent(Var::State(0)), 0);
        assert_eq!(stripped.exponent(Var::Time), 1);
    }

    #[test]
    fn ordering_is_total_and_degree_first() {
        let a = Monomial::single(Var::State(0), 1);
        let b = Monomial::single(Var::State(0), 2);
        assert!(a < b);
    }
}
