//! The site's two forms: contact and quote request

use super::field::{FieldSpec, SelectOption};
use super::form_state::FormDefinition;

pub const CONTACT_FORM_NAME: &str = "contact-form";
pub const QUOTE_FORM_NAME: &str = "quote-request";

/// Services offered, in the order they are listed on the site
pub fn service_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("hull-cleaning", "Hull Cleaning"),
        SelectOption::new("prop-polishing", "Prop Polishing"),
        SelectOption::new("zinc-replacement", "Zinc Replacement"),
        SelectOption::new("emergency", "Emergency Service"),
    ]
}

pub fn urgency_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("routine", "Routine (within 2 weeks)"),
        SelectOption::new("soon", "Soon (within a week)"),
        SelectOption::new("urgent", "Urgent (24-48 hours)"),
        SelectOption::new("emergency", "Emergency (ASAP)"),
    ]
}

/// Name, email and phone, all required
fn contact_details() -> Vec<FieldSpec> {
    vec![
        FieldSpec::short_text("firstName", "First Name")
            .required()
            .with_max_length(50),
        FieldSpec::short_text("lastName", "Last Name")
            .required()
            .with_max_length(50),
        FieldSpec::email("email", "Email").required().with_max_length(254),
        FieldSpec::phone("phone", "Phone").required().with_max_length(14),
    ]
}

pub fn contact_form() -> FormDefinition {
    let mut fields = contact_details();
    fields.push(
        FieldSpec::short_text("subject", "Subject")
            .required()
            .with_max_length(120),
    );
    fields.push(FieldSpec::multiline("message", "Message").required());

    FormDefinition {
        name: CONTACT_FORM_NAME.to_string(),
        title: "Send us a message".to_string(),
        submit_text: "Send Message".to_string(),
        fields,
    }
}

pub fn quote_form() -> FormDefinition {
    let mut fields = contact_details();
    fields.extend([
        FieldSpec::short_text("vesselType", "Vessel Type")
            .required()
            .with_max_length(60),
        FieldSpec::short_text("vesselLength", "Vessel Length (ft)").with_max_length(10),
        FieldSpec::select("serviceType", "Service Type", service_options()).required(),
        FieldSpec::short_text("location", "Location").with_max_length(80),
        FieldSpec::select("urgency", "Urgency", urgency_options()),
        FieldSpec::multiline("message", "Additional Message"),
    ]);

    FormDefinition {
        name: QUOTE_FORM_NAME.to_string(),
        title: "Get a Free Quote".to_string(),
        submit_text: "Get Free Quote".to_string(),
        fields,
    }
}
