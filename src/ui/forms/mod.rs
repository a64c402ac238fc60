//! Form rendering module
//!
//! - `field_renderer`: one widget per field kind
//! - `wizard_form`: the onboarding wizard (loading, failed and step views)

mod field_renderer;
mod wizard_form;

pub use wizard_form::draw as draw_wizard;
