//! Grade classification and SGPA computation.
//!
//! Holds the two fixed grade tables (one keyed on marks, one keyed on SGPA),
//! the numeric helpers used for mark statistics, and the credit-weighted
//! SGPA calculation with its per-subject breakdown.

pub mod error;
pub mod scale;
pub mod sgpa;
pub mod types;
pub mod utility;

pub use error::ValidationError;
pub use scale::{Grade, classify, classify_sgpa};
pub use sgpa::{SgpaResult, compute_sgpa};
pub use types::{AverageChoice, AverageState, SgpaDetail, SubjectField, SubjectRecord};
