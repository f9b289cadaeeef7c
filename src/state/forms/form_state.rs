//! Form engine: values, errors, debounced feedback and submit lifecycle

use super::field::{FieldKind, FieldSpec};
use crate::debounce::Debounced;
use crate::submit::{FormSubmission, FormSubmitter, SubmitError};
use crate::validation::{normalize_phone_display, validate_form_with, FieldErrors, FieldRule, FormValues};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Quiet period before a field is re-validated while typing
pub const VALIDATION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Trait for focus navigation across a form
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Where the current (or last) submit attempt stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    None,
    Submitting,
    Success,
    Error,
}

/// Errors reported by the engine itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    SubmissionInFlight,
}

/// What `on_submit` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStart {
    /// Validation failed; errors are populated and nothing was sent
    Invalid,
    /// Values were handed to the submitter
    Started,
}

/// Static description of a form
#[derive(Debug, Clone)]
pub struct FormDefinition {
    /// Identifier sent with the submission
    pub name: String,
    pub title: String,
    pub submit_text: String,
    pub fields: Vec<FieldSpec>,
}

struct InFlight {
    attempt: Uuid,
    outcome: oneshot::Receiver<Result<(), SubmitError>>,
}

/// Live state of one form instance.
///
/// Each instance owns its values, errors, status and debounce timer;
/// nothing is shared between forms. Dropping the engine aborts the pending
/// validation timer and discards any late submission outcome.
pub struct FormEngine {
    definition: FormDefinition,
    values: FormValues,
    errors: FieldErrors,
    status: SubmissionStatus,
    pub active_field_index: usize,
    validator: Debounced<(String, String)>,
    validation_rx: mpsc::UnboundedReceiver<(String, String)>,
    in_flight: Option<InFlight>,
    last_success_at: Option<DateTime<Utc>>,
}

impl FormEngine {
    pub fn new(definition: FormDefinition) -> Self {
        Self::with_debounce(definition, VALIDATION_DEBOUNCE)
    }

    pub fn with_debounce(definition: FormDefinition, wait: Duration) -> Self {
        let (tx, validation_rx) = mpsc::unbounded_channel();
        let validator = Debounced::new(wait, move |request: (String, String)| {
            // Receiver gone means the form was torn down
            let _ = tx.send(request);
        });

        Self {
            definition,
            values: FormValues::new(),
            errors: FieldErrors::new(),
            status: SubmissionStatus::None,
            active_field_index: 0,
            validator,
            validation_rx,
            in_flight: None,
            last_success_at: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn title(&self) -> &str {
        &self.definition.title
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.definition.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.definition.fields.iter().find(|f| f.name == name)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn last_success_at(&self) -> Option<DateTime<Utc>> {
        self.last_success_at
    }

    /// Label for the submit button
    pub fn submit_label(&self) -> &str {
        if self.is_submitting() {
            "Sending..."
        } else {
            &self.definition.submit_text
        }
    }

    /// True while a debounced validation is waiting to fire
    pub fn validation_pending(&self) -> bool {
        self.validator.is_pending()
    }

    /// Store new input for a field.
    ///
    /// Phone input is reformatted first. Any existing error for the field is
    /// cleared immediately and a re-validation is scheduled once typing
    /// pauses. Names not declared on the form are ignored.
    pub fn on_input_change(&mut self, name: &str, raw: &str) {
        let Some(field) = self.field(name) else {
            tracing::warn!("Ignoring input for undeclared field {name:?} on {}", self.name());
            return;
        };

        let value = match field.kind {
            FieldKind::Phone => normalize_phone_display(raw),
            _ => raw.to_string(),
        };

        self.errors.remove(name);
        self.values.insert(name.to_string(), value.clone());
        self.validator.call((name.to_string(), value));
    }

    /// Apply finished background work: debounced validations and the
    /// submission outcome. Returns true if anything visible changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok((name, value)) = self.validation_rx.try_recv() {
            changed |= self.apply_validation(&name, &value);
        }

        let received = match self.in_flight.as_mut() {
            Some(flight) => flight.outcome.try_recv(),
            None => return changed,
        };

        let outcome = match received {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return changed,
            Err(oneshot::error::TryRecvError::Closed) => Err(SubmitError::Interrupted),
        };
        let attempt = self.in_flight.take().map(|f| f.attempt);
        self.finish_submission(attempt, outcome);
        true
    }

    fn apply_validation(&mut self, name: &str, value: &str) -> bool {
        // Superseded by later input or a reset
        if self.value(name) != value {
            return false;
        }
        let Some(field) = self.field(name) else {
            return false;
        };

        match field.error_for(value) {
            Some(error) => {
                self.errors.insert(name.to_string(), error);
                true
            }
            None => self.errors.remove(name).is_some(),
        }
    }

    /// Validate everything and, if valid, hand the values to `submitter`.
    ///
    /// Only one submission may be in flight per form; a second call while
    /// submitting is refused without touching the submitter.
    pub fn on_submit(&mut self, submitter: Arc<dyn FormSubmitter>) -> Result<SubmitStart, FormError> {
        if self.is_submitting() {
            tracing::debug!("Submit ignored for {}: already submitting", self.name());
            return Err(FormError::SubmissionInFlight);
        }

        self.status = SubmissionStatus::Submitting;
        // Full validation supersedes any pending per-field check
        self.validator.cancel();

        let required: Vec<&str> = self
            .definition
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();
        let validation = validate_form_with(&self.values, &required, |name| {
            self.field(name)
                .map(|f| (f.rule, f.placeholder.clone()))
                .unwrap_or_else(|| (FieldRule::from_identifier(name), name.to_string()))
        });

        self.errors = validation.errors;
        if !validation.is_valid {
            tracing::info!(
                "{} has {} invalid field(s); not submitting",
                self.name(),
                self.errors.len()
            );
            self.status = SubmissionStatus::None;
            return Ok(SubmitStart::Invalid);
        }

        let attempt = Uuid::new_v4();
        let submission = self.snapshot();
        let (tx, outcome) = oneshot::channel();

        tracing::info!("Submitting {} (attempt {attempt})", submission.form_name);
        tokio::spawn(async move {
            let result = submitter.submit(&submission).await;
            let _ = tx.send(result);
        });

        self.in_flight = Some(InFlight { attempt, outcome });
        Ok(SubmitStart::Started)
    }

    /// Current values in declaration order, unset fields as empty strings
    fn snapshot(&self) -> FormSubmission {
        FormSubmission {
            form_name: self.definition.name.clone(),
            fields: self
                .definition
                .fields
                .iter()
                .map(|f| (f.name.clone(), self.value(&f.name).to_string()))
                .collect(),
        }
    }

    /// Wait for the in-flight submission, if any, and return the final status
    pub async fn settle(&mut self) -> SubmissionStatus {
        if let Some(flight) = self.in_flight.take() {
            let outcome = flight
                .outcome
                .await
                .unwrap_or_else(|_| Err(SubmitError::Interrupted));
            self.finish_submission(Some(flight.attempt), outcome);
        }
        self.status
    }

    fn finish_submission(&mut self, attempt: Option<Uuid>, outcome: Result<(), SubmitError>) {
        match outcome {
            Ok(()) => {
                tracing::info!("{} submitted (attempt {attempt:?})", self.name());
                self.status = SubmissionStatus::Success;
                self.values.clear();
                self.errors.clear();
                self.validator.cancel();
                self.last_success_at = Some(Utc::now());
            }
            Err(err) => {
                tracing::error!("Form submission error for {} (attempt {attempt:?}): {err}", self.name());
                self.status = SubmissionStatus::Error;
            }
        }
    }

    /// The field under focus, `None` when the submit button is focused
    pub fn active_spec(&self) -> Option<&FieldSpec> {
        self.definition.fields.get(self.active_field_index)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_field_index == self.definition.fields.len()
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.active_spec().is_some_and(|f| f.kind.is_multiline())
    }

    /// Type a character into the focused field
    pub fn push_char(&mut self, c: char) {
        let Some(field) = self.active_spec() else {
            return;
        };
        if field.kind == FieldKind::SingleSelect {
            return;
        }
        let name = field.name.clone();
        let max_length = field.max_length;

        let mut value = self.value(&name).to_string();
        if max_length.is_some_and(|max| value.chars().count() >= max) {
            return;
        }
        value.push(c);
        self.on_input_change(&name, &value);
    }

    /// Delete the last character of the focused field
    pub fn pop_char(&mut self) {
        let Some(field) = self.active_spec() else {
            return;
        };
        if field.kind == FieldKind::SingleSelect {
            return;
        }
        let name = field.name.clone();

        let mut value = self.value(&name).to_string();
        if value.pop().is_some() {
            self.on_input_change(&name, &value);
        }
    }

    /// Step the focused select field through its options, placeholder included
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.active_spec() else {
            return;
        };
        if field.kind != FieldKind::SingleSelect {
            return;
        }

        let mut choices: Vec<String> = vec![String::new()];
        choices.extend(field.options.iter().map(|o| o.value.clone()));
        let name = field.name.clone();

        let current = choices
            .iter()
            .position(|v| v == self.value(&name))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else if current == 0 {
            choices.len() - 1
        } else {
            current - 1
        };

        self.on_input_change(&name, &choices[next]);
    }
}

impl Form for FormEngine {
    fn field_count(&self) -> usize {
        self.definition.fields.len() + 1 // fields + submit button
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.definition.fields.len());
    }
}

impl std::fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormEngine")
            .field("name", &self.definition.name)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .field("active_field_index", &self.active_field_index)
            .field("debounce", &self.validator.wait())
            .finish()
    }
}
