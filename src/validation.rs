//! Field validation rules
//!
//! Pure functions turning raw field text into either validity or a
//! human-readable error message. Nothing here keeps state, and a failed
//! check is reported as data (`Option<String>`), never as an `Err`.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Current value of every field, keyed by field name
pub type FormValues = HashMap<String, String>;

/// Error message per field name; a missing key means the field is fine
pub type FieldErrors = HashMap<String, String>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("valid phone pattern"));

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"));

/// Leading decimal number, the way a lenient float parser reads user text
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid number pattern")
});

/// Upper bound (exclusive) for a vessel length
const MAX_VESSEL_LENGTH: f64 = 1000.0;

/// Minimum trimmed length of a free-text message
pub const MIN_MESSAGE_LENGTH: usize = 10;

/// Loose syntactic email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Phone check after dropping spaces, dashes and parentheses
pub fn is_valid_phone(value: &str) -> bool {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    PHONE_PATTERN.is_match(&cleaned)
}

/// At least two characters, letters and whitespace only
pub fn is_valid_name(value: &str) -> bool {
    value.trim().chars().count() >= 2 && NAME_PATTERN.is_match(value)
}

pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_message(value: &str) -> bool {
    value.trim().chars().count() >= MIN_MESSAGE_LENGTH
}

/// Empty passes (the field is optional); otherwise `0 < length < 1000`
pub fn is_valid_vessel_length(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    match LEADING_NUMBER.find(value.trim_start()) {
        Some(number) => number
            .as_str()
            .parse::<f64>()
            .is_ok_and(|length| length > 0.0 && length < MAX_VESSEL_LENGTH),
        None => false,
    }
}

/// Validation rule attached to a field
///
/// Rules are resolved from a stable identifier rather than from whatever
/// text the field happens to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldRule {
    Email,
    Phone,
    PersonName,
    Message,
    VesselLength,
    /// Any non-empty value is accepted
    #[default]
    Unchecked,
}

impl FieldRule {
    /// Resolve a rule from a field identifier.
    ///
    /// Case is ignored, as are spaces, underscores and dashes, so
    /// `"firstName"`, `"first_name"` and `"First Name"` all resolve to
    /// [`FieldRule::PersonName`].
    pub fn from_identifier(identifier: &str) -> Self {
        let key: String = identifier
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "firstname" | "lastname" => Self::PersonName,
            "message" => Self::Message,
            "vessellength" => Self::VesselLength,
            _ => Self::Unchecked,
        }
    }

    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::Email => is_valid_email(value),
            Self::Phone => is_valid_phone(value),
            Self::PersonName => is_valid_name(value),
            Self::Message => is_valid_message(value),
            Self::VesselLength => is_valid_vessel_length(value),
            Self::Unchecked => true,
        }
    }

    /// Message shown when [`FieldRule::accepts`] fails
    pub fn failure_message(self) -> Option<&'static str> {
        match self {
            Self::Email => Some("Please enter a valid email address"),
            Self::Phone => Some("Please enter a valid phone number"),
            Self::PersonName => Some("Please enter a valid name (letters only)"),
            Self::Message => Some("Message must be at least 10 characters long"),
            Self::VesselLength => Some("Please enter a valid vessel length"),
            Self::Unchecked => None,
        }
    }

    /// Check a value against this rule.
    ///
    /// A missing required value wins over every rule-specific check, and an
    /// empty optional value is never an error.
    pub fn check(self, label: &str, value: &str, required: bool) -> Option<String> {
        if required && !is_non_empty(value) {
            return Some(format!("{label} is required"));
        }

        if !required && value.is_empty() {
            return None;
        }

        if self.accepts(value) {
            None
        } else {
            self.failure_message().map(str::to_string)
        }
    }
}

/// Error for a single field, with the rule looked up from `field`
pub fn field_error(field: &str, value: &str, required: bool) -> Option<String> {
    FieldRule::from_identifier(field).check(field, value, required)
}

/// Outcome of validating a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    pub errors: FieldErrors,
    pub is_valid: bool,
}

/// Validate every required field, plus every optional field that has a value.
///
/// Missing required values are treated as empty.
pub fn validate_form<S: AsRef<str>>(values: &FormValues, required: &[S]) -> FormValidation {
    validate_form_with(values, required, |name| {
        (FieldRule::from_identifier(name), name.to_string())
    })
}

/// Like [`validate_form`], with the rule and display label of each field
/// supplied by `describe`
pub fn validate_form_with<S, F>(values: &FormValues, required: &[S], describe: F) -> FormValidation
where
    S: AsRef<str>,
    F: Fn(&str) -> (FieldRule, String),
{
    let mut errors = FieldErrors::new();

    for name in required {
        let name = name.as_ref();
        let value = values.get(name).map(String::as_str).unwrap_or_default();
        let (rule, label) = describe(name);
        if let Some(error) = rule.check(&label, value, true) {
            errors.insert(name.to_string(), error);
        }
    }

    for (name, value) in values {
        let is_required = required.iter().any(|r| r.as_ref() == name);
        if is_required || value.is_empty() {
            continue;
        }
        let (rule, label) = describe(name);
        if let Some(error) = rule.check(&label, value, false) {
            errors.insert(name.clone(), error);
        }
    }

    FormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Format phone digits progressively as they are typed.
///
/// Non-digits are dropped, then: up to 3 digits stay bare, 4 to 6 become
/// `(XXX) XXX`, and 7 or more become `(XXX) XXX-XXXX` (extra digits are cut).
pub fn normalize_phone_display(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0..=3 => digits,
        4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
        len => format!(
            "({}) {}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..len.min(10)]
        ),
    }
}
