//! Field binding store: values, errors, focus and submission status for one
//! form instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::errors::ErrorMap;
use super::recovery::RecoveryPolicy;
use super::status::SubmissionStatus;

/// How an input is presented. Advisory only; the backend owns validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    /// Rendered masked.
    Password,
}

/// A field declared by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also the key in [`FormState`] and [`ErrorMap`].
    pub name: &'static str,
    /// Display label.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            required: false,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Field name → current value. Every declared field has exactly one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState(IndexMap<String, String>);

impl FormState {
    /// Returns the value for `name`, or `""` for undeclared names.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    /// Returns `true` if `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the form declares no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every value is the empty string.
    pub fn all_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    fn set(&mut self, name: &str, value: String) -> bool {
        match self.0.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Identifies one submission. Unique across every form in the process, so a
/// completion can never be applied to a form that did not send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

impl Ticket {
    fn next() -> Self {
        Self(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ticket number.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// A submission started by [`FormStore::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: Ticket,
    /// Snapshot of the values at submit time.
    pub payload: FormState,
}

/// How a completion was handled by [`FormStore::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Status and errors updated, recovery applied.
    Resolved,
    /// Status and errors updated; field recovery skipped because the user
    /// edited the form while the submission was outstanding.
    ResolvedAfterEdit,
    /// The ticket is not this form's outstanding submission.
    Ignored,
}

/// Outstanding submission bookkeeping.
#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: Ticket,
    revision: u64,
}

/// The live state of one form.
#[derive(Debug, Clone)]
pub struct FormStore {
    fields: Vec<FieldSpec>,
    values: FormState,
    errors: ErrorMap,
    status: SubmissionStatus,
    recovery: RecoveryPolicy,
    focus: usize,
    dirty: bool,
    revision: u64,
    pending: Option<Pending>,
    succeeded_at: Option<Instant>,
}

impl FormStore {
    /// Creates a store with every declared field set to `""`. Focus starts on
    /// the first field.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let values = fields.iter().map(|f| (f.name, "")).collect();
        Self {
            fields,
            values,
            errors: ErrorMap::new(),
            status: SubmissionStatus::Idle,
            recovery: RecoveryPolicy::inline(),
            focus: 0,
            dirty: false,
            revision: 0,
            pending: None,
            succeeded_at: None,
        }
    }

    /// Sets the recovery policy applied when submissions resolve.
    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    /// Seeds initial values. Undeclared names are ignored. Does not mark the
    /// form dirty.
    pub fn seeded<'a>(mut self, initial: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (name, value) in initial {
            self.values.set(name, value.to_string());
        }
        self
    }

    // --- Field binding ---

    /// Updates `name` unconditionally.
    ///
    /// Returns `false` (and changes nothing) if `name` is not declared. A
    /// resolved status falls back to `Idle`, which also drops the success
    /// acknowledgment.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if !self.values.set(name, value.into()) {
            tracing::warn!(field = name, "ignoring edit of undeclared field");
            return false;
        }
        self.touch();
        self.status = self.status.after_edit();
        if self.status != SubmissionStatus::Succeeded {
            self.succeeded_at = None;
        }
        true
    }

    /// Clears the named fields to `""`. Undeclared names are skipped.
    pub fn reset_fields(&mut self, names: &[&str]) {
        for name in names {
            self.values.set(name, String::new());
        }
        self.touch();
    }

    /// Clears every field to `""`.
    pub fn reset(&mut self) {
        let names: Vec<&'static str> = self.fields.iter().map(|f| f.name).collect();
        self.reset_fields(&names);
    }

    /// Appends a character to the focused field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(name) = self.focused_field() {
            let mut value = self.values.get(name).to_string();
            value.push(ch);
            self.set_field(name, value);
        }
    }

    /// Removes the last character of the focused field.
    pub fn delete_char(&mut self) {
        if let Some(name) = self.focused_field() {
            let mut value = self.values.get(name).to_string();
            if value.pop().is_some() {
                self.set_field(name, value);
            }
        }
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    // --- Focus ---

    /// Index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Name of the focused field, if the form has any fields.
    pub fn focused_field(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|f| f.name)
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Focuses the field called `name`. Returns `false` if it is not declared.
    pub fn set_focus(&mut self, name: &str) -> bool {
        match self.fields.iter().position(|f| f.name == name) {
            Some(index) => {
                self.focus = index;
                true
            }
            None => false,
        }
    }

    // --- Submission ---

    /// Starts a submission with a snapshot of the current values.
    ///
    /// Returns `None` without touching anything while another submission is
    /// outstanding. Errors from the previous resolution are dropped if the
    /// form was edited since.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if !self.status.can_submit() {
            tracing::debug!("submit suppressed while in flight");
            return None;
        }
        let ticket = Ticket::next();
        self.pending = Some(Pending {
            ticket,
            revision: self.revision,
        });
        self.status = SubmissionStatus::InFlight;
        self.succeeded_at = None;
        if self.dirty {
            self.errors.clear();
            self.dirty = false;
        }
        tracing::debug!(ticket = ticket.id(), "submission started");
        Some(Submission {
            ticket,
            payload: self.values.clone(),
        })
    }

    /// Applies the resolution of `ticket`.
    ///
    /// `Ok(())` is an accepted submission; `Err(errors)` a rejected one. Only
    /// the status and error map are replaced. Field recovery from the
    /// [`RecoveryPolicy`] runs only if nothing was edited since the
    /// submission started, so a late completion never wipes newer input.
    pub fn complete(&mut self, ticket: Ticket, result: Result<(), ErrorMap>) -> Applied {
        let pending = match self.pending {
            Some(p) if p.ticket == ticket => p,
            _ => {
                tracing::debug!(ticket = ticket.id(), "ignoring completion for unknown ticket");
                return Applied::Ignored;
            }
        };
        self.pending = None;
        let edited = self.revision != pending.revision;

        match result {
            Ok(()) => {
                self.errors.clear();
                self.status = SubmissionStatus::Succeeded;
                self.succeeded_at = Some(Instant::now());
                if self.recovery.resets_on_success() && !edited {
                    self.reset();
                }
            }
            Err(errors) => {
                let plan = self.recovery.plan(&errors);
                self.errors = errors;
                self.status = SubmissionStatus::Failed;
                if !edited {
                    if !plan.clear.is_empty() {
                        self.reset_fields(&plan.clear);
                    }
                    if let Some(field) = plan.focus {
                        self.set_focus(field);
                    }
                    tracing::debug!(cleared = ?plan.clear, focus = ?plan.focus, "recovery applied");
                }
            }
        }

        if edited {
            Applied::ResolvedAfterEdit
        } else {
            Applied::Resolved
        }
    }

    /// Ends the success acknowledgment once `ttl` has elapsed since the
    /// submission was accepted. Returns `true` if the status changed.
    pub fn expire_acknowledgment(&mut self, now: Instant, ttl: Duration) -> bool {
        match (self.status, self.succeeded_at) {
            (SubmissionStatus::Succeeded, Some(at)) if now.saturating_duration_since(at) >= ttl => {
                self.status = SubmissionStatus::Idle;
                self.succeeded_at = None;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if `ticket` is this form's outstanding submission.
    pub fn owns(&self, ticket: Ticket) -> bool {
        self.pending.is_some_and(|p| p.ticket == ticket)
    }

    // --- Accessors ---

    /// Returns the declared fields in display order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the current values.
    pub fn values(&self) -> &FormState {
        &self.values
    }

    /// Returns the value of `name`, or `""` if it is not declared.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name)
    }

    /// Returns the errors from the last rejected submission.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the error for `name`, if any.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    /// Returns the submission status.
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    /// Returns `true` if the form was edited since the last submission began.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns `true` while the success acknowledgment should be shown.
    pub fn recently_successful(&self) -> bool {
        self.status == SubmissionStatus::Succeeded
    }
}
