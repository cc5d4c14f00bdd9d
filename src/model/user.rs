use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated account as the backend presents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns `true` once the email address has been verified.
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// The "member since" date, e.g. `2024-03-09`.
    pub fn member_since(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

/// Authentication state shared with every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auth {
    pub user: Option<User>,
}

/// Read-only data every page receives from the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedData {
    pub auth: Auth,
    /// One-shot status flash, e.g. `verification-link-sent`.
    pub status: Option<String>,
}

impl SharedData {
    pub fn user(&self) -> Option<&User> {
        self.auth.user.as_ref()
    }
}

/// Supplies [`SharedData`] to pages. Pages never mutate it; changes go
/// through a submission and are observed on the next read.
pub trait SessionProvider: Send + Sync {
    fn shared_data(&self) -> SharedData;
}

/// Flash status set after a verification email was queued.
pub const VERIFICATION_LINK_SENT: &str = "verification-link-sent";
