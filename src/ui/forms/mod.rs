//! Form rendering module
//!
//! - `field_renderer`: one field widget per field kind, with its error line
//! - `form_view`: banner, scrolling field list and submit button

mod field_renderer;
mod form_view;

pub use form_view::draw_form;
