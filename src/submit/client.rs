//! HTTP client posting forms to a hosted form backend
//!
//! Submissions are sent the way a hidden HTML form would send them:
//! URL-encoded, with the form name and an empty honeypot field ahead of
//! the declared fields.

use super::traits::{FormSubmission, FormSubmitter, SubmitError};
use async_trait::async_trait;
use std::time::Duration;

/// Hidden anti-spam field; humans leave it empty
pub const HONEYPOT_FIELD: &str = "bot-field";

/// Field carrying the name of the submitted form
const FORM_NAME_FIELD: &str = "form-name";

/// Submitter that POSTs URL-encoded forms to an endpoint
pub struct HttpFormSubmitter {
    /// Backend URL; submissions fail with `NotConfigured` when unset
    endpoint: Option<String>,
    http_client: reqwest::Client,
}

impl HttpFormSubmitter {
    /// Create a submitter whose requests give up after `timeout`
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

/// Build the encoded body: form name, honeypot, then fields in the order given
pub fn submission_pairs(submission: &FormSubmission) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(submission.fields.len() + 2);
    pairs.push((FORM_NAME_FIELD.to_string(), submission.form_name.clone()));
    pairs.push((HONEYPOT_FIELD.to_string(), String::new()));
    pairs.extend(
        submission
            .fields
            .iter()
            .filter(|(name, _)| name != FORM_NAME_FIELD && name != HONEYPOT_FIELD)
            .cloned(),
    );
    pairs
}

#[async_trait]
impl FormSubmitter for HttpFormSubmitter {
    async fn submit(&self, submission: &FormSubmission) -> Result<(), SubmitError> {
        let endpoint = self.endpoint.as_deref().ok_or(SubmitError::NotConfigured)?;
        let pairs = submission_pairs(submission);

        tracing::debug!(
            "Posting {} ({} fields) to {endpoint}",
            submission.form_name,
            pairs.len()
        );

        let response = self
            .http_client
            .post(endpoint)
            .form(&pairs)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::net::TcpListener;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    fn submission(form_name: &str, fields: &[(&str, &str)]) -> FormSubmission {
        FormSubmission {
            form_name: form_name.to_string(),
            fields: fields.iter().map(|(k, v)| pair(k, v)).collect(),
        }
    }

    /// Accepts connections and never answers them
    async fn silent_backend() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}/")
    }

    #[test]
    fn test_pairs_keep_declaration_order() {
        let body = submission(
            "contact-form",
            &[("lastName", "Diver"), ("email", "jo@x.com"), ("firstName", "Jo")],
        );

        assert_eq!(
            submission_pairs(&body),
            vec![
                pair("form-name", "contact-form"),
                pair("bot-field", ""),
                pair("lastName", "Diver"),
                pair("email", "jo@x.com"),
                pair("firstName", "Jo"),
            ]
        );
    }

    #[test]
    fn test_pairs_never_forward_a_filled_honeypot() {
        let body = submission(
            "quote-request",
            &[(HONEYPOT_FIELD, "spam"), ("form-name", "other")],
        );

        assert_eq!(
            submission_pairs(&body),
            vec![pair("form-name", "quote-request"), pair("bot-field", "")]
        );
    }

    #[tokio::test]
    async fn test_submit_without_endpoint_is_not_configured() {
        let submitter = HttpFormSubmitter::new(None, Duration::from_secs(1)).unwrap();
        let result = submitter.submit(&submission("contact-form", &[])).await;
        assert!(matches!(result, Err(SubmitError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_silent_backend_times_out() {
        let endpoint = silent_backend().await;
        let submitter =
            HttpFormSubmitter::new(Some(endpoint), Duration::from_millis(200)).unwrap();

        let result = submitter
            .submit(&submission("contact-form", &[("email", "jo@x.com")]))
            .await;
        match result {
            Err(SubmitError::Transport(err)) => assert!(err.is_timeout()),
            other => panic!("expected a transport timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_accessor() {
        let submitter = HttpFormSubmitter::new(
            Some("https://forms.example.com/".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(submitter.endpoint(), Some("https://forms.example.com/"));
    }
}
