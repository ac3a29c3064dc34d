//! Student registration flow.
//!
//! - [`form`] - form fields, choices and validation
//! - [`lookup`] - code input policy that drives the school directory

pub mod form;
pub mod lookup;

pub use form::{Field, FormError, GRADES, MEDIUMS, STATES, StudentForm};
pub use lookup::{CodeInputOutcome, LookupPolicy, Registration};
