//! Exhaustive enumeration of feasible combinations.
//!
//! The enumeration is exponential in the number of projects and is meant
//! for small, interactive instances. The set it produces is shared by the
//! ideal-point ranking and by every round of a sequential-concessions
//! session; both rely on its canonical order to break ties.

mod enumerator;

pub use enumerator::{
    ensure_enumerable, CombinationEnumerator, EnumeratedCombination, DEFAULT_MAX_PROJECTS,
};
