//! Decides what a form shows for its current state.

use super::errors::ErrorMap;
use super::status::SubmissionStatus;
use super::store::{FieldSpec, FormStore};

/// Copy a form uses for its submit control and acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitCopy {
    /// Submit control label while nothing is outstanding.
    pub idle: &'static str,
    /// Submit control label while a submission is in flight.
    pub busy: &'static str,
    /// Transient acknowledgment after an accepted submission.
    pub success: &'static str,
}

/// The submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl<'a> {
    pub label: &'a str,
    pub disabled: bool,
}

/// Everything a form view needs besides the raw field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub submit: SubmitControl<'a>,
    /// Present only while the success acknowledgment is showing.
    pub acknowledgment: Option<&'a str>,
    /// One `(field, message)` per declared field with an error, in field order.
    pub field_errors: Vec<(&'a str, &'a str)>,
    /// Messages whose key matches no declared field.
    pub general_errors: Vec<&'a str>,
}

impl<'a> Feedback<'a> {
    /// Inline error for `field`, if any.
    pub fn error_for(&self, field: &str) -> Option<&'a str> {
        self.field_errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }
}

/// Computes feedback from a store.
pub fn feedback<'a>(store: &'a FormStore, copy: &SubmitCopy) -> Feedback<'a> {
    render(store.fields(), store.errors(), store.status(), copy)
}

/// Pure mapping of (fields, errors, status) to what is shown.
pub fn render<'a>(
    fields: &'a [FieldSpec],
    errors: &'a ErrorMap,
    status: SubmissionStatus,
    copy: &SubmitCopy,
) -> Feedback<'a> {
    let in_flight = status.is_in_flight();
    let submit = SubmitControl {
        label: if in_flight { copy.busy } else { copy.idle },
        disabled: in_flight,
    };
    let acknowledgment = (status == SubmissionStatus::Succeeded).then_some(copy.success);

    let field_errors = fields
        .iter()
        .filter_map(|f| errors.get(f.name).map(|msg| (f.name, msg)))
        .collect();
    let general_errors = errors
        .iter()
        .filter(|(key, _)| !fields.iter().any(|f| f.name == *key))
        .map(|(_, msg)| msg)
        .collect();

    Feedback {
        submit,
        acknowledgment,
        field_errors,
        general_errors,
    }
}
