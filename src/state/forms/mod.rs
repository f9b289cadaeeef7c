//! Form domain layer
//!
//! Field declarations, the per-form engine that owns values, errors and
//! the submit lifecycle, and the catalog of forms the app offers.

pub mod catalog;
mod field;
mod form_state;

pub use field::{FieldKind, FieldSpec, FieldWidget, SelectOption};
pub use form_state::{
    Form, FormDefinition, FormEngine, FormError, SubmissionStatus, SubmitStart,
    VALIDATION_DEBOUNCE,
};
