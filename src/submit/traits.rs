//! Trait abstraction for form submission to enable mocking in tests

use async_trait::async_trait;
use thiserror::Error;

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no submission endpoint is configured")]
    NotConfigured,

    #[error("failed to reach the form backend: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("form backend rejected the submission with status {status}")]
    Rejected { status: u16 },

    #[error("submission ended before reporting an outcome")]
    Interrupted,
}

/// Snapshot of a validated form, fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_name: String,
    pub fields: Vec<(String, String)>,
}

/// Delivers a validated form to wherever it needs to go
///
/// ```
/// # use std::time::Duration;
/// # use deephull_forms::submit::{FormSubmission, FormSubmitter, HttpFormSubmitter, SubmitError};
/// # tokio_test::block_on(async {
/// let submitter = HttpFormSubmitter::new(None, Duration::from_secs(5))?;
/// let submission = FormSubmission {
///     form_name: "contact-form".to_string(),
///     fields: vec![("email".to_string(), "jo@x.com".to_string())],
/// };
/// let result = submitter.submit(&submission).await;
/// assert!(matches!(result, Err(SubmitError::NotConfigured)));
/// # Ok::<(), SubmitError>(())
/// # }).unwrap();
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError>;
}
