//! Field declarations and the widget each one renders as

use crate::validation::FieldRule;

/// Default minimum length hint for multi-line fields
pub const DEFAULT_TEXTAREA_MIN_LENGTH: usize = 10;

/// Rows shown for a multi-line field
pub const TEXTAREA_ROWS: u16 = 4;

/// Kind of input a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ShortText,
    Email,
    Phone,
    MultilineText,
    SingleSelect,
}

impl FieldKind {
    /// HTML-style input type, used for hints and the submitted form
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::ShortText => "text",
            Self::Email => "email",
            Self::Phone => "tel",
            Self::MultilineText => "textarea",
            Self::SingleSelect => "select",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::MultilineText)
    }
}

/// One entry of a single-select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Declaration of a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Unique identifier, also the submitted key
    pub name: String,
    pub kind: FieldKind,
    /// Human label shown inside the empty widget
    pub placeholder: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Choices for single-select fields, in display order
    pub options: Vec<SelectOption>,
    pub rule: FieldRule,
}

impl FieldSpec {
    fn new(name: &str, kind: FieldKind, placeholder: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            placeholder: placeholder.to_string(),
            required: false,
            min_length: None,
            max_length: None,
            options: Vec::new(),
            rule: FieldRule::from_identifier(name),
        }
    }

    pub fn short_text(name: &str, placeholder: &str) -> Self {
        Self::new(name, FieldKind::ShortText, placeholder)
    }

    pub fn email(name: &str, placeholder: &str) -> Self {
        Self::new(name, FieldKind::Email, placeholder)
    }

    pub fn phone(name: &str, placeholder: &str) -> Self {
        Self::new(name, FieldKind::Phone, placeholder)
    }

    pub fn multiline(name: &str, placeholder: &str) -> Self {
        Self::new(name, FieldKind::MultilineText, placeholder)
    }

    pub fn select(name: &str, placeholder: &str, options: Vec<SelectOption>) -> Self {
        Self {
            options,
            ..Self::new(name, FieldKind::SingleSelect, placeholder)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Override the rule derived from the field name
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rule = rule;
        self
    }

    /// Placeholder with a trailing ` *` on required fields
    pub fn display_placeholder(&self) -> String {
        if self.required {
            format!("{} *", self.placeholder)
        } else {
            self.placeholder.clone()
        }
    }

    /// Validate `value` against this field's rule and required flag
    pub fn error_for(&self, value: &str) -> Option<String> {
        self.rule.check(&self.placeholder, value, self.required)
    }

    /// Label of the option whose value is `value`
    pub fn option_label(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    pub fn widget(&self) -> FieldWidget {
        FieldWidget::for_field(self)
    }
}

/// How a field is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWidget {
    /// Single-line input with optional length hints
    SingleLine {
        input_type: &'static str,
        min_length: Option<usize>,
        max_length: Option<usize>,
    },
    TextArea { rows: u16, min_length: usize },
    /// Choice list; the first entry is the placeholder with an empty value
    Choice { options: Vec<SelectOption> },
}

impl FieldWidget {
    pub fn for_field(field: &FieldSpec) -> Self {
        match field.kind {
            FieldKind::ShortText | FieldKind::Email | FieldKind::Phone => Self::SingleLine {
                input_type: field.kind.input_type(),
                min_length: field.min_length,
                max_length: field.max_length,
            },
            FieldKind::MultilineText => Self::TextArea {
                rows: TEXTAREA_ROWS,
                min_length: field.min_length.unwrap_or(DEFAULT_TEXTAREA_MIN_LENGTH),
            },
            FieldKind::SingleSelect => {
                let mut options = Vec::with_capacity(field.options.len() + 1);
                options.push(SelectOption::new("", &field.display_placeholder()));
                options.extend(field.options.iter().cloned());
                Self::Choice { options }
            }
        }
    }

    /// Rows needed to draw the widget, borders included
    pub fn height(&self) -> u16 {
        match self {
            Self::SingleLine { .. } | Self::Choice { .. } => 3,
            Self::TextArea { rows, .. } => rows + 2,
        }
    }

    /// Short length hint for the widget border, e.g. `12/40` or `min 10`
    pub fn length_hint(&self, current_len: usize) -> Option<String> {
        match self {
            Self::SingleLine {
                max_length: Some(max),
                ..
            } => Some(format!("{current_len}/{max}")),
            Self::SingleLine {
                min_length: Some(min),
                max_length: None,
                ..
            } => Some(format!("min {min}")),
            Self::TextArea { min_length, .. } => Some(format!("{current_len} chars, min {min_length}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod field_spec {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rule_follows_name() {
            assert_eq!(FieldSpec::short_text("firstName", "First Name").rule, FieldRule::PersonName);
            assert_eq!(FieldSpec::email("email", "Email").rule, FieldRule::Email);
            assert_eq!(FieldSpec::short_text("subject", "Subject").rule, FieldRule::Unchecked);
        }

        #[test]
        fn test_with_rule_overrides() {
            let field = FieldSpec::short_text("contact", "Contact").with_rule(FieldRule::Email);
            assert_eq!(field.rule, FieldRule::Email);
        }

        #[test]
        fn test_display_placeholder_marks_required() {
            assert_eq!(FieldSpec::email("email", "Email").required().display_placeholder(), "Email *");
            assert_eq!(FieldSpec::email("email", "Email").display_placeholder(), "Email");
        }

        #[test]
        fn test_error_for_uses_placeholder_label() {
            let field = FieldSpec::short_text("lastName", "Last Name").required();
            assert_eq!(field.error_for("").as_deref(), Some("Last Name is required"));
            assert_eq!(
                field.error_for("D").as_deref(),
                Some("Please enter a valid name (letters only)")
            );
            assert_eq!(field.error_for("Diver"), None);
        }

        #[test]
        fn test_option_label_lookup() {
            let field = FieldSpec::select(
                "serviceType",
                "Service Type",
                vec![SelectOption::new("hull-cleaning", "Hull Cleaning")],
            );
            assert_eq!(field.option_label("hull-cleaning"), Some("Hull Cleaning"));
            assert_eq!(field.option_label("nope"), None);
        }
    }

    mod field_widget {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_line_kinds_carry_length_hints() {
            let field = FieldSpec::phone("phone", "Phone").with_min_length(7).with_max_length(14);
            assert_eq!(
                field.widget(),
                FieldWidget::SingleLine {
                    input_type: "tel",
                    min_length: Some(7),
                    max_length: Some(14),
                }
            );
            assert!(matches!(
                FieldSpec::short_text("subject", "Subject").widget(),
                FieldWidget::SingleLine { input_type: "text", .. }
            ));
            assert!(matches!(
                FieldSpec::email("email", "Email").widget(),
                FieldWidget::SingleLine { input_type: "email", .. }
            ));
        }

        #[test]
        fn test_textarea_defaults_min_length_to_ten() {
            assert_eq!(
                FieldSpec::multiline("message", "Message").widget(),
                FieldWidget::TextArea { rows: 4, min_length: 10 }
            );
            assert_eq!(
                FieldSpec::multiline("message", "Message").with_min_length(20).widget(),
                FieldWidget::TextArea { rows: 4, min_length: 20 }
            );
        }

        #[test]
        fn test_choice_prepends_placeholder_and_keeps_order() {
            let field = FieldSpec::select(
                "urgency",
                "Urgency",
                vec![
                    SelectOption::new("routine", "Routine"),
                    SelectOption::new("asap", "ASAP"),
                ],
            )
            .required();

            let FieldWidget::Choice { options } = field.widget() else {
                panic!("select field should render as a choice");
            };
            let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
            assert_eq!(values, vec!["", "routine", "asap"]);
            assert_eq!(options[0].label, "Urgency *");
        }

        #[test]
        fn test_heights() {
            assert_eq!(FieldSpec::email("email", "Email").widget().height(), 3);
            assert_eq!(FieldSpec::multiline("message", "Message").widget().height(), 6);
        }

        #[test]
        fn test_length_hints() {
            let bounded = FieldSpec::short_text("subject", "Subject").with_max_length(80).widget();
            assert_eq!(bounded.length_hint(5).as_deref(), Some("5/80"));

            let min_only = FieldSpec::short_text("subject", "Subject").with_min_length(3).widget();
            assert_eq!(min_only.length_hint(0).as_deref(), Some("min 3"));

            let area = FieldSpec::multiline("message", "Message").widget();
            assert_eq!(area.length_hint(4).as_deref(), Some("4 chars, min 10"));

            assert_eq!(FieldSpec::email("email", "Email").widget().length_hint(3), None);
        }
    }
}
