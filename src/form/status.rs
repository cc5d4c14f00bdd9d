//! Lifecycle of a single form's current submission attempt.

/// Where a form is in its submit/resolve cycle.
///
/// ```text
/// Idle --submit--> InFlight
/// InFlight --accepted--> Succeeded
/// InFlight --rejected--> Failed
/// Succeeded --edit--> Idle
/// Failed --edit--> Idle
/// Failed --submit--> InFlight
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubmissionStatus {
    /// Nothing outstanding and nothing to acknowledge.
    #[default]
    Idle,
    /// A submission has been sent and not yet resolved.
    InFlight,
    /// The last submission was accepted.
    Succeeded,
    /// The last submission was rejected.
    Failed,
}

impl SubmissionStatus {
    /// Returns `true` while a submission is outstanding.
    pub fn is_in_flight(self) -> bool {
        self == Self::InFlight
    }

    /// Returns `true` if a new submission may start from this state.
    pub fn can_submit(self) -> bool {
        !self.is_in_flight()
    }

    /// State after the user edits a field.
    ///
    /// Resolved states fall back to `Idle`; an outstanding submission stays
    /// outstanding.
    pub fn after_edit(self) -> Self {
        match self {
            Self::Succeeded | Self::Failed => Self::Idle,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
    }

    #[test]
    fn only_in_flight_blocks_submit() {
        let expected = [
            (SubmissionStatus::Idle, true),
            (SubmissionStatus::InFlight, false),
            (SubmissionStatus::Succeeded, true),
            (SubmissionStatus::Failed, true),
        ];
        for (status, can) in expected {
            assert_eq!(status.can_submit(), can, "{status:?}");
        }
    }

    #[test]
    fn edit_resets_resolved_states() {
        assert_eq!(
            SubmissionStatus::Succeeded.after_edit(),
            SubmissionStatus::Idle
        );
        assert_eq!(SubmissionStatus::Failed.after_edit(), SubmissionStatus::Idle);
        assert_eq!(SubmissionStatus::Idle.after_edit(), SubmissionStatus::Idle);
        assert_eq!(
            SubmissionStatus::InFlight.after_edit(),
            SubmissionStatus::InFlight
        );
    }
}
