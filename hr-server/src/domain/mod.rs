//! Domain rules
//!
//! Store-independent logic: the hiring workflow, the validation engine and
//! read-model assembly. Services gather facts from the database and call in.

pub mod reporting;
pub mod validation;
pub mod workflow;

pub use validation::WriteMode;
pub use workflow::{TransitionError, allowed_transitions, check_transition};
