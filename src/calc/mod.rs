//! Calculation core - tyre geometry and size matching
//!
//! Both halves are pure functions over plain values: no I/O, no shared
//! state, safe to call from anywhere. Callers are responsible for
//! turning raw text into the numeric arguments these functions take.

pub mod filter;
pub mod geometry;

pub use filter::{filter, SizeQuery, TyreRecord};
pub use geometry::{compute, AlternativeSize, CalcError, CalculationResult, TyreDimension};
