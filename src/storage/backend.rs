//! File-backed stand-in for the remote account backend.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use super::error::StorageError;
use super::hasher::{hash_password, verify_password};
use super::manager::AccountManager;
use crate::form::{Backend, ErrorMap, Outcome, Request};
use crate::model::{
    Auth, SessionProvider, SharedData, VERIFICATION_LINK_SENT, ValidationError, normalize_email,
    validate_current_password, validate_email, validate_name, validate_new_password,
};
use crate::routes::{Method, RouteError, RouteTable};

/// Resolved paths this backend answers.
#[derive(Debug, Clone)]
struct Endpoints {
    profile: String,
    password: String,
    verification: String,
}

/// Serves profile, password and verification submissions against an
/// [`AccountManager`].
///
/// Storage failures are reported as a rejection without field attribution.
pub struct LocalBackend {
    manager: AccountManager,
    endpoints: Endpoints,
    flash: Mutex<Option<String>>,
    writes: Mutex<()>,
}

impl LocalBackend {
    /// Creates a backend answering the endpoints named in `routes`.
    pub fn new(manager: AccountManager, routes: &RouteTable) -> Result<Self, RouteError> {
        let endpoints = Endpoints {
            profile: routes.resolve("profile.update")?.to_string(),
            password: routes.resolve("password.update")?.to_string(),
            verification: routes.resolve("verification.send")?.to_string(),
        };
        Ok(Self {
            manager,
            endpoints,
            flash: Mutex::new(None),
            writes: Mutex::new(()),
        })
    }

    fn set_flash(&self, status: Option<&str>) {
        *self.flash.lock().unwrap_or_else(PoisonError::into_inner) = status.map(str::to_string);
    }

    fn update_profile(&self, request: &Request) -> Result<Outcome, StorageError> {
        let name = request.payload.get("name").trim();
        let email = request.payload.get("email");

        let mut errors = ErrorMap::new();
        if let Err(e) = validate_name(name) {
            errors.insert("name", e.to_string());
        }
        if let Err(e) = validate_email(email) {
            errors.insert("email", e.to_string());
        }
        if !errors.is_empty() {
            tracing::info!(fields = errors.len(), "profile update rejected");
            return Ok(Outcome::Rejected(errors));
        }

        let mut account = self.manager.load_account()?;
        let email = normalize_email(email);
        if account.user.email != email {
            account.user.email_verified_at = None;
        }
        account.user.name = name.to_string();
        account.user.email = email;
        account.user.updated_at = Utc::now();
        self.manager.save_account(&account)?;
        tracing::info!(user_id = account.user.id, "profile updated");
        Ok(Outcome::Accepted)
    }

    fn update_password(&self, request: &Request) -> Result<Outcome, StorageError> {
        let current = request.payload.get("current_password");
        let password = request.payload.get("password");
        let confirmation = request.payload.get("password_confirmation");

        let mut account = self.manager.load_account()?;
        let mut errors = ErrorMap::new();

        let current_check = validate_current_password(current).and_then(|()| {
            match verify_password(current, &account.password_hash) {
                Ok(true) => Ok(()),
                Ok(false) => Err(ValidationError::WrongCurrentPassword),
                Err(e) => {
                    tracing::error!(error = %e, "stored password hash unreadable");
                    Err(ValidationError::WrongCurrentPassword)
                }
            }
        });
        if let Err(e) = current_check {
            errors.insert("current_password", e.to_string());
        }
        if let Err(e) = validate_new_password(password, confirmation) {
            errors.insert("password", e.to_string());
        }
        if !errors.is_empty() {
            tracing::info!(fields = errors.len(), "password update rejected");
            return Ok(Outcome::Rejected(errors));
        }

        account.password_hash = hash_password(password)?;
        account.user.updated_at = Utc::now();
        self.manager.save_account(&account)?;
        tracing::info!(user_id = account.user.id, "password updated");
        Ok(Outcome::Accepted)
    }

    fn send_verification(&self) -> Result<Outcome, StorageError> {
        let account = self.manager.load_account()?;
        if account.user.is_verified() {
            tracing::debug!("email already verified, nothing to send");
        } else {
            tracing::info!(email = %account.user.email, "verification link queued");
            self.set_flash(Some(VERIFICATION_LINK_SENT));
        }
        Ok(Outcome::Accepted)
    }
}

impl Backend for LocalBackend {
    fn submit(&self, request: &Request) -> Outcome {
        let _guard = self.writes.lock().unwrap_or_else(PoisonError::into_inner);
        self.set_flash(None);

        let endpoint = request.endpoint.as_str();
        let result = match request.method {
            Method::Patch if endpoint == self.endpoints.profile => self.update_profile(request),
            Method::Put if endpoint == self.endpoints.password => self.update_password(request),
            Method::Post if endpoint == self.endpoints.verification => self.send_verification(),
            method => {
                tracing::warn!(%method, endpoint, "no handler for request");
                return Outcome::Rejected(ErrorMap::general(format!(
                    "{method} {endpoint} is not supported."
                )));
            }
        };

        result.unwrap_or_else(|e| {
            tracing::error!(error = %e, endpoint, "submission failed in storage");
            Outcome::Rejected(ErrorMap::general(format!("Something went wrong: {e}")))
        })
    }
}

impl SessionProvider for LocalBackend {
    fn shared_data(&self) -> SharedData {
        let user = match self.manager.load_account() {
            Ok(account) => Some(account.user),
            Err(e) => {
                tracing::warn!(error = %e, "no session user");
                None
            }
        };
        let status = self
            .flash
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        SharedData {
            auth: Auth { user },
            status,
        }
    }
}
