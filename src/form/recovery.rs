//! Field-specific recovery applied after a rejected submission.

use super::errors::ErrorMap;

/// One rejection response: when `trigger` has an error, clear `clear` and move
/// focus to `focus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryRule {
    pub trigger: &'static str,
    pub clear: Vec<&'static str>,
    pub focus: &'static str,
}

/// What a form does with its own fields once a submission resolves.
///
/// Rules run in declaration order. When several fire, every listed field is
/// cleared and focus ends on the last rule's field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryPolicy {
    rules: Vec<RecoveryRule>,
    reset_on_success: bool,
}

/// Fields to clear and where to put focus, as decided by a policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryPlan {
    pub clear: Vec<&'static str>,
    pub focus: Option<&'static str>,
}

impl RecoveryPlan {
    pub fn is_empty(&self) -> bool {
        self.clear.is_empty() && self.focus.is_none()
    }
}

impl RecoveryPolicy {
    /// Inline errors only: nothing is cleared and focus stays put.
    pub fn inline() -> Self {
        Self::default()
    }

    /// Adds a rule.
    pub fn on_error(
        mut self,
        trigger: &'static str,
        clear: &[&'static str],
        focus: &'static str,
    ) -> Self {
        self.rules.push(RecoveryRule {
            trigger,
            clear: clear.to_vec(),
            focus,
        });
        self
    }

    /// Clears every field after an accepted submission.
    pub fn reset_on_success(mut self) -> Self {
        self.reset_on_success = true;
        self
    }

    /// Returns `true` if accepted submissions wipe the form.
    pub fn resets_on_success(&self) -> bool {
        self.reset_on_success
    }

    pub fn rules(&self) -> &[RecoveryRule] {
        &self.rules
    }

    /// Works out the recovery for a rejection carrying `errors`.
    pub fn plan(&self, errors: &ErrorMap) -> RecoveryPlan {
        let mut plan = RecoveryPlan::default();
        for rule in self.rules.iter().filter(|r| errors.contains(r.trigger)) {
            for field in &rule.clear {
                if !plan.clear.contains(field) {
                    plan.clear.push(field);
                }
            }
            plan.focus = Some(rule.focus);
        }
        plan
    }
}
