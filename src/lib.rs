//! DeepHull Forms
//!
//! Validation rules, the per-form engine and the HTTP transport behind the
//! DeepHull Diving contact and quote request forms, plus the Ratatui front
//! end that drives them.

pub mod app;
pub mod config;
pub mod debounce;
pub mod platform;
pub mod state;
pub mod submit;
pub mod ui;
pub mod validation;
