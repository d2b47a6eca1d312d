//! The fixed variable universe the polynomial module knows about.

/// A variable usable inside a [`crate::poly::Polynomial`].
///
/// Every variable this crate's polynomials ever mention comes from a
/// handful of globally-known names (`x`, `y`, ..., `t`, `s`). Since that
/// universe is fixed and small, it is encoded here as a closed sum type
/// instead of a runtime symbol table: a state variable carries its index
/// into the ordered state-var list, and time/the remainder placeholder are
/// singletons. `Ord` is derived so that state variables sort before `Time`,
/// which sorts before `Remainder` — the same order monomials are printed
/// and compared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Var {
    /// The `i`-th state variable, e.g. `x` is `State(0)`, `y` is `State(1)`.
    State(usize),
    /// The time variable `t`.
    Time,
    /// The remainder placeholder `s` used during Picard refinement.
    Remainder,
}

impl core::fmt::Display for Var {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Var::State(i) => write!(f, "x{i}"),
            Var::Time => write!(f, "t"),
            Var::Remainder => write!(f, "s"),
        }
    }
}
