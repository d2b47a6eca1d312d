//! Guaranteed enclosures of ODE solution sets via Taylor Model flowpipe
//! construction.
//!
//! Given a vector field `F`, an initial box and a time horizon,
//! [`tm_integration`] builds a sequence of flowpipes — polynomial-plus-
//! interval-remainder enclosures — one per time sub-interval, each
//! containing every true trajectory that starts in the initial box.
#![deny(unused_import_braces, trivial_casts, bare_trait_objects)]
#![deny(unused_qualifications, stable_features)]
#![deny(non_shorthand_field_patterns, unused_attributes, unused_imports)]
#![deny(renamed_and_removed_lints, unused_allocation, unused_comparisons)]
#![deny(unused_must_use, unused_mut)]
#![deny(unreachable_pub, trivial_numeric_casts)]
#![forbid(unsafe_code)]

mod config;
mod contract;
mod driver;
mod error;
mod eval;
mod interval;
mod picard;
mod poly;
mod refine;
mod taylor;

pub use config::Config;
pub use driver::{tm_integration, Flowpipe, TmIntegrationResult};
pub use error::{Error, Result};
pub use interval::{Interval, IntervalVector};
pub use poly::{Monomial, Polynomial, Var};
