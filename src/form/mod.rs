//! Form-submission lifecycle: field binding, submission and feedback.
//!
//! A page declares its fields, binds keystrokes to a [`FormStore`], hands the
//! snapshot from [`FormStore::begin_submit`] to a [`SubmissionChannel`], and
//! applies each [`Completion`] back to the store. What the page shows is
//! derived from the store by [`feedback`].

mod channel;
mod errors;
mod feedback;
mod recovery;
mod status;
mod store;

pub use channel::{Backend, Completion, Outcome, Request, SubmissionChannel};
pub use errors::{ErrorMap, GENERAL_KEY};
pub use feedback::{Feedback, SubmitControl, SubmitCopy, feedback, render};
pub use recovery::{RecoveryPlan, RecoveryPolicy, RecoveryRule};
pub use status::SubmissionStatus;
pub use store::{Applied, FieldKind, FieldSpec, FormState, FormStore, Submission, Ticket};
