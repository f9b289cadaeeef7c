//! Application state definitions

use super::forms::catalog::{contact_form, quote_form};
use super::forms::FormEngine;
use std::time::Duration;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Contact,
    Quote,
}

impl View {
    pub const ALL: [View; 2] = [View::Contact, View::Quote];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Quote => "Get Quote",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Contact => 0,
            Self::Quote => 1,
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub contact: FormEngine,
    pub quote: FormEngine,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Fresh state with both forms using `debounce` for field feedback
    pub fn new(debounce: Duration) -> Self {
        Self {
            current_view: View::default(),
            contact: FormEngine::with_debounce(contact_form(), debounce),
            quote: FormEngine::with_debounce(quote_form(), debounce),
            status_message: None,
        }
    }

    pub fn active_form(&self) -> &FormEngine {
        match self.current_view {
            View::Contact => &self.contact,
            View::Quote => &self.quote,
        }
    }

    pub fn active_form_mut(&mut self) -> &mut FormEngine {
        match self.current_view {
            View::Contact => &mut self.contact,
            View::Quote => &mut self.quote,
        }
    }

    /// Apply background results to every form, not just the visible one
    pub fn poll_forms(&mut self) -> bool {
        let contact = self.contact.poll();
        let quote = self.quote.poll();
        contact || quote
    }
}
