//! Wizard form state: schema, step navigation, answers and validation

use super::field::{FieldDefinition, FieldInput, FieldKind, FieldValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Answers keyed by field name, in the order they were first recorded
pub type AnswerMap = IndexMap<String, FieldValue>;

/// Ordered steps, each an ordered list of fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub steps: Vec<Vec<FieldDefinition>>,
}

impl FormSchema {
    #[allow(dead_code)]
    pub fn new(steps: Vec<Vec<FieldDefinition>>) -> Self {
        Self { steps }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&[FieldDefinition]> {
        self.steps.get(index).map(Vec::as_slice)
    }
}

/// One submitted answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub name: String,
    pub value: FieldValue,
}

/// Body of the onboarding submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub steps: Vec<AnswerEntry>,
}

/// Flatten answers into name/value pairs, keeping insertion order
fn flatten_answers(answers: &AnswerMap) -> Vec<AnswerEntry> {
    answers
        .iter()
        .map(|(name, value)| AnswerEntry {
            name: name.clone(),
            value: value.clone(),
        })
        .collect()
}

/// Buttons shown below the fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardButton {
    Back,
    /// "Next", or "Finish" on the last step
    #[default]
    Proceed,
}

/// State of a loaded onboarding wizard
#[derive(Debug, Clone, Default)]
pub struct WizardForm {
    pub schema: FormSchema,
    pub answers: AnswerMap,
    pub current_step: usize,
    /// Index of the focused field; equal to the field count when the buttons row is focused
    pub active_field_index: usize,
    pub selected_button: WizardButton,
}

impl WizardForm {
    pub fn new(schema: FormSchema) -> Self {
        let mut form = Self {
            schema,
            ..Default::default()
        };
        form.reset_focus();
        form
    }

    pub fn step_count(&self) -> usize {
        self.schema.step_count()
    }

    /// Fields of the current step (empty when the schema has no steps)
    pub fn current_fields(&self) -> &[FieldDefinition] {
        self.schema.step(self.current_step).unwrap_or(&[])
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        let count = self.step_count();
        count > 0 && self.current_step == count - 1
    }

    /// Move to the next step. No-op on the last step.
    pub fn advance(&mut self) {
        if self.current_step + 1 < self.step_count() {
            self.current_step += 1;
            self.reset_focus();
        }
    }

    /// Move to the previous step. No-op on the first step.
    pub fn retreat(&mut self) {
        if self.current_step > 0 {
            self.current_step -= 1;
            self.reset_focus();
        }
    }

    /// True iff every required field of the step has a non-empty answer.
    /// A step outside the schema is never complete.
    pub fn is_step_complete(&self, step_index: usize) -> bool {
        let Some(fields) = self.schema.step(step_index) else {
            return false;
        };
        fields
            .iter()
            .filter(|f| f.required)
            .all(|f| self.answers.get(&f.name).is_some_and(FieldValue::is_filled))
    }

    /// Whether Next/Finish is enabled
    pub fn can_proceed(&self) -> bool {
        self.is_step_complete(self.current_step)
    }

    /// Record a change for a field, overwriting any previous value
    pub fn on_input_change(&mut self, name: &str, input: FieldInput) {
        self.answers.insert(name.to_string(), input.into());
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.answers.get(name)
    }

    /// Current answers as submission entries
    pub fn submission(&self) -> SubmissionPayload {
        SubmissionPayload {
            steps: flatten_answers(&self.answers),
        }
    }

    // Focus handling

    /// Field indices that can take focus, followed by the buttons row
    fn focus_stops(&self) -> Vec<usize> {
        let fields = self.current_fields();
        let mut stops: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.kind.is_text() || f.kind == FieldKind::YesNo)
            .map(|(i, _)| i)
            .collect();
        stops.push(fields.len());
        stops
    }

    fn reset_focus(&mut self) {
        self.active_field_index = self.focus_stops()[0];
        self.selected_button = WizardButton::Proceed;
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_field_index >= self.current_fields().len()
    }

    /// The focused field, if focus is not on the buttons row
    pub fn active_field(&self) -> Option<&FieldDefinition> {
        self.current_fields().get(self.active_field_index)
    }

    pub fn next_field(&mut self) {
        let stops = self.focus_stops();
        let pos = stops
            .iter()
            .position(|&i| i == self.active_field_index)
            .map_or(0, |p| (p + 1) % stops.len());
        self.active_field_index = stops[pos];
    }

    pub fn prev_field(&mut self) {
        let stops = self.focus_stops();
        let pos = match stops.iter().position(|&i| i == self.active_field_index) {
            Some(0) | None => stops.len() - 1,
            Some(p) => p - 1,
        };
        self.active_field_index = stops[pos];
    }

    /// Switch between Back and Next/Finish. Back is hidden on the first step.
    pub fn toggle_button(&mut self) {
        self.selected_button = match self.selected_button {
            WizardButton::Back => WizardButton::Proceed,
            WizardButton::Proceed if !self.is_first_step() => WizardButton::Back,
            WizardButton::Proceed => WizardButton::Proceed,
        };
    }

    // Editing the focused field

    /// Append a character to the focused text field
    pub fn push_char(&mut self, c: char) {
        let Some(field) = self.active_field().filter(|f| f.kind.is_text()) else {
            return;
        };
        let name = field.name.clone();
        let mut text = self.value(&name).map(|v| v.as_text().to_string()).unwrap_or_default();
        text.push(c);
        self.on_input_change(&name, FieldInput::Text(text));
    }

    /// Remove the last character of the focused text field
    pub fn pop_char(&mut self) {
        let Some(field) = self.active_field().filter(|f| f.kind.is_text()) else {
            return;
        };
        let name = field.name.clone();
        let Some(mut text) = self.value(&name).map(|v| v.as_text().to_string()) else {
            return;
        };
        text.pop();
        self.on_input_change(&name, FieldInput::Text(text));
    }

    /// Set the checked state of the focused toggle
    pub fn set_active_flag(&mut self, checked: bool) {
        if let Some(name) = self.active_toggle_name() {
            self.on_input_change(&name, FieldInput::Checkbox { checked });
        }
    }

    /// Flip the focused toggle; an untouched toggle becomes checked
    pub fn toggle_active_flag(&mut self) {
        if let Some(name) = self.active_toggle_name() {
            let checked = !self.value(&name).is_some_and(FieldValue::as_flag);
            self.on_input_change(&name, FieldInput::Checkbox { checked });
        }
    }

    fn active_toggle_name(&self) -> Option<String> {
        self.active_field()
            .filter(|f| f.kind == FieldKind::YesNo)
            .map(|f| f.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str, required: bool) -> FieldDefinition {
        FieldDefinition::new(name, name, FieldKind::Text, required)
    }

    fn yes_no(name: &str, required: bool) -> FieldDefinition {
        FieldDefinition::new(name, name, FieldKind::YesNo, required)
    }

    fn two_step_form() -> WizardForm {
        WizardForm::new(FormSchema::new(vec![
            vec![text("firstName", true), text("lastName", false)],
            vec![yes_no("receiveUpdates", true)],
        ]))
    }

    mod step_controller {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_first_step() {
            let form = two_step_form();
            assert_eq!(form.current_step, 0);
            assert!(form.is_first_step());
            assert!(!form.is_last_step());
        }

        #[test]
        fn test_advance_stops_at_last_step() {
            let mut form = two_step_form();
            form.advance();
            assert!(form.is_last_step());
            form.advance();
            assert_eq!(form.current_step, 1);
        }

        #[test]
        fn test_retreat_stops_at_first_step() {
            let mut form = two_step_form();
            form.retreat();
            assert_eq!(form.current_step, 0);
            form.advance();
            form.retreat();
            assert_eq!(form.current_step, 0);
        }

        #[test]
        fn test_index_stays_in_range_under_any_sequence() {
            let mut form = WizardForm::new(FormSchema::new(vec![vec![], vec![], vec![]]));
            // deterministic pseudo-random walk
            let mut seed: u32 = 7;
            for _ in 0..500 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                if seed & 0x100 == 0 {
                    form.advance();
                } else {
                    form.retreat();
                }
                assert!(form.current_step < 3);
            }
        }

        #[test]
        fn test_empty_schema_is_safe() {
            let mut form = WizardForm::new(FormSchema::default());
            form.advance();
            form.retreat();
            assert_eq!(form.current_step, 0);
            assert!(form.is_first_step());
            assert!(!form.is_last_step());
            assert!(!form.can_proceed());
            assert!(form.current_fields().is_empty());
            assert!(form.is_buttons_row_active());
        }

        #[test]
        fn test_single_step_is_first_and_last() {
            let form = WizardForm::new(FormSchema::new(vec![vec![text("name", true)]]));
            assert!(form.is_first_step());
            assert!(form.is_last_step());
        }
    }

    mod validator {
        use super::*;

        #[test]
        fn test_required_text_missing_blocks() {
            let form = two_step_form();
            assert!(!form.is_step_complete(0));
        }

        #[test]
        fn test_required_text_empty_blocks() {
            let mut form = two_step_form();
            form.on_input_change("firstName", FieldInput::Text(String::new()));
            assert!(!form.is_step_complete(0));
        }

        #[test]
        fn test_optional_fields_never_matter() {
            let mut form = two_step_form();
            form.on_input_change("firstName", FieldInput::Text("Ann".into()));
            assert!(form.is_step_complete(0));
            form.on_input_change("lastName", FieldInput::Text(String::new()));
            assert!(form.is_step_complete(0));
        }

        #[test]
        fn test_false_flag_satisfies_required() {
            let mut form = two_step_form();
            form.on_input_change("receiveUpdates", FieldInput::Checkbox { checked: false });
            assert!(form.is_step_complete(1));
        }

        #[test]
        fn test_step_without_fields_is_complete() {
            let form = WizardForm::new(FormSchema::new(vec![vec![]]));
            assert!(form.is_step_complete(0));
            assert!(form.can_proceed());
        }

        #[test]
        fn test_out_of_range_step_is_not_complete() {
            let form = two_step_form();
            assert!(!form.is_step_complete(5));
        }
    }

    mod answers {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_answers_survive_navigation() {
            let mut form = two_step_form();
            form.on_input_change("firstName", FieldInput::Text("Ann".into()));
            form.advance();
            form.retreat();
            assert_eq!(
                form.value("firstName"),
                Some(&FieldValue::Text("Ann".into()))
            );
        }

        #[test]
        fn test_submission_has_each_key_once_with_latest_value() {
            let mut form = two_step_form();
            form.on_input_change("firstName", FieldInput::Text("An".into()));
            form.on_input_change("lastName", FieldInput::Text("Lee".into()));
            form.advance();
            form.on_input_change("receiveUpdates", FieldInput::Checkbox { checked: true });
            form.retreat();
            form.on_input_change("firstName", FieldInput::Text("Ann".into()));

            assert_eq!(
                form.submission().steps,
                vec![
                    AnswerEntry {
                        name: "firstName".into(),
                        value: FieldValue::Text("Ann".into()),
                    },
                    AnswerEntry {
                        name: "lastName".into(),
                        value: FieldValue::Text("Lee".into()),
                    },
                    AnswerEntry {
                        name: "receiveUpdates".into(),
                        value: FieldValue::Flag(true),
                    },
                ]
            );
        }

        #[test]
        fn test_payload_wire_shape() {
            let mut form = WizardForm::new(FormSchema::new(vec![vec![text("name", true)]]));
            form.on_input_change("name", FieldInput::Text("Ann".into()));
            assert_eq!(
                serde_json::to_value(form.submission()).unwrap(),
                serde_json::json!({"steps": [{"name": "name", "value": "Ann"}]})
            );
        }

        #[test]
        fn test_schema_deserializes_and_ignores_wrapper_fields() {
            let json = r#"{"isFetching": false, "steps": [[{"name": "a", "label": "A", "type": "text", "required": true}]]}"#;
            let schema: FormSchema = serde_json::from_str(json).unwrap();
            assert_eq!(schema.step_count(), 1);
            assert!(schema.steps[0][0].required);
        }

        #[test]
        fn test_untyped_field_does_not_fail_the_schema() {
            let json = r#"{"steps": [[{"name": "a", "label": "A", "type": "text"}, {"name": "b", "label": "B", "required": null}]]}"#;
            let schema: FormSchema = serde_json::from_str(json).unwrap();
            let fields = schema.step(0).unwrap();
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[1].kind, FieldKind::Unknown(String::new()));

            // The untyped field is optional, so only `a` gates the step
            let mut form = WizardForm::new(schema);
            assert!(!form.can_proceed());
            form.on_input_change("a", FieldInput::Text("x".into()));
            assert!(form.can_proceed());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_records_text() {
            let mut form = two_step_form();
            for c in "Ann".chars() {
                form.push_char(c);
            }
            assert_eq!(form.value("firstName").map(FieldValue::as_text), Some("Ann"));
            assert!(form.can_proceed());
        }

        #[test]
        fn test_backspace_to_empty_unsatisfies_required() {
            let mut form = two_step_form();
            form.push_char('A');
            form.pop_char();
            assert_eq!(form.value("firstName"), Some(&FieldValue::Text(String::new())));
            assert!(!form.can_proceed());
        }

        #[test]
        fn test_backspace_on_untouched_field_records_nothing() {
            let mut form = two_step_form();
            form.pop_char();
            assert!(form.answers.is_empty());
        }

        #[test]
        fn test_toggle_from_untouched_checks() {
            let mut form = two_step_form();
            form.advance();
            form.toggle_active_flag();
            assert_eq!(form.value("receiveUpdates"), Some(&FieldValue::Flag(true)));
            form.toggle_active_flag();
            assert_eq!(form.value("receiveUpdates"), Some(&FieldValue::Flag(false)));
        }

        #[test]
        fn test_typing_on_toggle_is_ignored() {
            let mut form = two_step_form();
            form.advance();
            form.push_char('x');
            assert!(form.answers.is_empty());
            form.set_active_flag(false);
            assert_eq!(form.value("receiveUpdates"), Some(&FieldValue::Flag(false)));
        }
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_field_cycles_through_buttons_row() {
            let mut form = two_step_form();
            assert_eq!(form.active_field_index, 0);
            form.next_field();
            assert_eq!(form.active_field_index, 1);
            form.next_field();
            assert!(form.is_buttons_row_active());
            form.next_field();
            assert_eq!(form.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_buttons_row() {
            let mut form = two_step_form();
            form.prev_field();
            assert!(form.is_buttons_row_active());
        }

        #[test]
        fn test_unknown_kind_is_skipped() {
            let mut form = WizardForm::new(FormSchema::new(vec![vec![
                FieldDefinition::new("dob", "Birthday", FieldKind::Unknown("date".into()), false),
                text("name", false),
            ]]));
            assert_eq!(form.active_field_index, 1);
            form.next_field();
            assert!(form.is_buttons_row_active());
            form.next_field();
            assert_eq!(form.active_field_index, 1);
        }

        #[test]
        fn test_step_change_resets_focus() {
            let mut form = two_step_form();
            form.next_field();
            form.advance();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.selected_button, WizardButton::Proceed);
        }

        #[test]
        fn test_back_button_unavailable_on_first_step() {
            let mut form = two_step_form();
            form.toggle_button();
            assert_eq!(form.selected_button, WizardButton::Proceed);
            form.advance();
            form.toggle_button();
            assert_eq!(form.selected_button, WizardButton::Back);
        }
    }
}
