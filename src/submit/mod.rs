//! Form submission transport
//!
//! The form engine only needs something implementing [`FormSubmitter`];
//! the HTTP transport posts to a forms-as-a-service backend.

mod client;
mod traits;

pub use client::{submission_pairs, HttpFormSubmitter, HONEYPOT_FIELD};
pub use traits::{FormSubmission, FormSubmitter, SubmitError};

#[cfg(test)]
pub use traits::MockFormSubmitter;
