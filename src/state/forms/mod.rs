//! Form domain layer
//!
//! Server-defined field types plus the wizard state that navigates,
//! records and validates them.

mod field;
mod form_state;

pub use field::{FieldDefinition, FieldInput, FieldKind, FieldValue};
#[cfg(test)]
pub use form_state::AnswerEntry;
pub use form_state::{FormSchema, SubmissionPayload, WizardButton, WizardForm};
